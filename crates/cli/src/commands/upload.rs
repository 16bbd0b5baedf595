use std::path::{Component, Path, PathBuf};

use serde_json::json;
use themectl_client::{ApiError, ThemeApi};

use super::{compile, CommandMeta, OptionMeta, NO_SOURCES};
use crate::error::AppError;
use crate::reporter::Reporter;

pub const META: CommandMeta = CommandMeta {
    name: "upload",
    description: "Upload file to server",
    usage: "upload [sources...]",
    group: "theme",
    options: &[OptionMeta {
        flag: "--no-compile",
        description: "Skip asset compilation after upload",
    }],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub compile: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self { compile: true }
    }
}

#[derive(Debug)]
pub enum UploadOutcome<E> {
    Uploaded { uploaded_count: usize },
    Failed { error: E },
}

impl<E> UploadOutcome<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }

    pub fn into_result(self) -> Result<usize, E> {
        match self {
            UploadOutcome::Uploaded { uploaded_count } => Ok(uploaded_count),
            UploadOutcome::Failed { error } => Err(error),
        }
    }
}

/// Lexically resolve `.` and `..` against the working directory.
fn normalize(path: &Path) -> Result<PathBuf, AppError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// Asset key for `path`: its location under `root`, `/`-separated.
pub fn asset_key(root: &Path, path: &Path) -> Result<String, AppError> {
    let details = || {
        json!({
            "path": path.display().to_string(),
            "root": root.display().to_string(),
        })
    };

    let root = normalize(root)?;
    let path = normalize(path)?;
    let relative = path.strip_prefix(&root).map_err(|_| {
        AppError::validation_error(
            format!("{} is outside the theme root", path.display()),
            Some(details()),
        )
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return Err(AppError::validation_error(
            format!("{} is the theme root, not a file", path.display()),
            Some(details()),
        ));
    }
    Ok(parts.join("/"))
}

/// Uploads local files as theme assets, then optionally recompiles.
///
/// Every file is read before the first request, so a missing or unreadable
/// file aborts with nothing uploaded.
pub struct UploadOperation<'a, A, R: ?Sized> {
    api: &'a A,
    reporter: &'a R,
    root: &'a Path,
}

impl<'a, A, R> UploadOperation<'a, A, R>
where
    A: ThemeApi,
    R: Reporter + ?Sized,
{
    pub fn new(api: &'a A, reporter: &'a R, root: &'a Path) -> Self {
        Self {
            api,
            reporter,
            root,
        }
    }

    pub async fn execute(
        &self,
        sources: &[PathBuf],
        options: &UploadOptions,
    ) -> Result<UploadOutcome<A::Error>, AppError> {
        if sources.is_empty() {
            return Err(AppError::validation_error(NO_SOURCES, None));
        }

        let mut assets = Vec::with_capacity(sources.len());
        for source in sources {
            let key = asset_key(self.root, source)?;
            let contents = tokio::fs::read(source).await.map_err(|e| {
                AppError::file_system_error(
                    format!("could not read {}: {e}", source.display()),
                    Some(json!({ "path": source.display().to_string() })),
                )
            })?;
            assets.push((key, contents));
        }

        for (key, contents) in &assets {
            self.reporter.status(&format!("Uploading {key}..."));
            if let Err(error) = self.api.put_asset(key, contents).await {
                tracing::debug!(key = %key, "asset upload failed, aborting upload");
                return Ok(UploadOutcome::Failed { error });
            }
        }

        let uploaded_count = assets.len();
        self.reporter
            .success(&format!("Uploaded {uploaded_count} asset(s) to theme."));

        if let Err(error) =
            compile::compile_after_change(self.api, self.reporter, options.compile).await
        {
            return Ok(UploadOutcome::Failed { error });
        }

        Ok(UploadOutcome::Uploaded { uploaded_count })
    }
}

pub async fn run<A, R>(
    api: &A,
    reporter: &R,
    root: &Path,
    sources: &[PathBuf],
    options: &UploadOptions,
) -> Result<usize, AppError>
where
    A: ThemeApi<Error = ApiError>,
    R: Reporter + ?Sized,
{
    let outcome = UploadOperation::new(api, reporter, root)
        .execute(sources, options)
        .await?;
    Ok(outcome.into_result()?)
}
