use themectl_client::{ApiError, ThemeApi};

use super::CommandMeta;
use crate::error::AppError;
use crate::reporter::Reporter;

pub const META: CommandMeta = CommandMeta {
    name: "compile",
    description: "Compile assets on server",
    usage: "compile",
    group: "theme",
    options: &[],
};

pub const COMPILING: &str = "Compiling assets on theme...";
pub const COMPILED: &str = "Asset compilation triggered.";
pub const SKIPPED: &str = "Asset compilation skipped (--no-compile).";

/// Triggers a server-side rebuild of the theme's assets.
pub struct CompileOperation<'a, A, R: ?Sized> {
    api: &'a A,
    reporter: &'a R,
}

impl<'a, A, R> CompileOperation<'a, A, R>
where
    A: ThemeApi,
    R: Reporter + ?Sized,
{
    pub fn new(api: &'a A, reporter: &'a R) -> Self {
        Self { api, reporter }
    }

    /// A failed compile call is returned as-is and not reported here.
    pub async fn execute(&self) -> Result<(), A::Error> {
        self.reporter.status(COMPILING);
        self.api.compile_assets().await?;
        self.reporter.success(COMPILED);
        Ok(())
    }
}

/// Compile phase shared by commands that modify assets.
pub(crate) async fn compile_after_change<A, R>(
    api: &A,
    reporter: &R,
    enabled: bool,
) -> Result<(), A::Error>
where
    A: ThemeApi,
    R: Reporter + ?Sized,
{
    if !enabled {
        reporter.info(SKIPPED);
        return Ok(());
    }
    CompileOperation::new(api, reporter).execute().await
}

pub async fn run<A, R>(api: &A, reporter: &R) -> Result<(), AppError>
where
    A: ThemeApi<Error = ApiError>,
    R: Reporter + ?Sized,
{
    CompileOperation::new(api, reporter).execute().await?;
    Ok(())
}
