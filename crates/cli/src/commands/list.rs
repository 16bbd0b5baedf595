use themectl_client::{ApiError, AssetEntry, ThemeApi};

use super::{CommandMeta, OptionMeta};
use crate::error::AppError;
use crate::reporter::Reporter;

pub const META: CommandMeta = CommandMeta {
    name: "list",
    description: "List assets on server",
    usage: "list [--prefix <PREFIX>]",
    group: "theme",
    options: &[OptionMeta {
        flag: "--prefix",
        description: "Only list assets whose key starts with this prefix",
    }],
};

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

fn format_entry(asset: &AssetEntry) -> String {
    let size = format_size(asset.size);
    let updated = asset.updated_at.as_deref().unwrap_or("\u{2014}");
    format!("{:>10}  {}  {}", size, updated, asset.key)
}

pub struct ListOperation<'a, A, R: ?Sized> {
    api: &'a A,
    reporter: &'a R,
}

impl<'a, A, R> ListOperation<'a, A, R>
where
    A: ThemeApi,
    R: Reporter + ?Sized,
{
    pub fn new(api: &'a A, reporter: &'a R) -> Self {
        Self { api, reporter }
    }

    /// Walk every page of the listing, printing one line per asset.
    pub async fn execute(&self, prefix: Option<&str>) -> Result<Vec<AssetEntry>, A::Error> {
        let mut all_assets = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .api
                .list_assets(prefix, page_token.as_deref())
                .await?;
            all_assets.extend(page.assets);
            if page.next_page_token.is_some() && page.next_page_token == page_token {
                self.reporter
                    .warn("Server repeated the same page token; listing may be incomplete.");
                break;
            }
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        for asset in &all_assets {
            self.reporter.info(&format_entry(asset));
        }
        self.reporter.info(&format!("{} asset(s)", all_assets.len()));

        Ok(all_assets)
    }
}

pub async fn run<A, R>(api: &A, reporter: &R, prefix: Option<&str>) -> Result<usize, AppError>
where
    A: ThemeApi<Error = ApiError>,
    R: Reporter + ?Sized,
{
    let assets = ListOperation::new(api, reporter).execute(prefix).await?;
    Ok(assets.len())
}
