use async_trait::async_trait;
use serde::Deserialize;

/// A single asset as reported by the theme listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetEntry {
    pub key: String,
    #[serde(default)]
    pub size: u64,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
    pub next_page_token: Option<String>,
}

/// Remote operations on a single theme.
///
/// Implementations own transport concerns (timeouts, retries, pooling).
/// Callers receive `Self::Error` untouched and decide themselves whether to
/// normalize it.
#[async_trait]
pub trait ThemeApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Remove the asset stored under `path`.
    async fn remove_asset(&self, path: &str) -> Result<(), Self::Error>;

    /// Ask the server to rebuild the theme's compiled assets.
    async fn compile_assets(&self) -> Result<(), Self::Error>;

    /// Create or replace the asset stored under `key`.
    async fn put_asset(&self, key: &str, contents: &[u8]) -> Result<(), Self::Error>;

    /// Fetch one page of the asset listing.
    async fn list_assets(
        &self,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<AssetPage, Self::Error>;
}
