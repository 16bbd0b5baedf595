use themectl_client::{ApiError, ThemeApi};

use super::{compile, CommandMeta, OptionMeta, NO_SOURCES};
use crate::error::AppError;
use crate::reporter::Reporter;

pub const META: CommandMeta = CommandMeta {
    name: "delete",
    description: "Delete file from server",
    usage: "delete [sources...]",
    group: "theme",
    options: &[OptionMeta {
        flag: "--no-compile",
        description: "Skip asset compilation after deletion",
    }],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Trigger a compile once every asset is gone.
    pub compile: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self { compile: true }
    }
}

/// Result of a delete run that got past input validation.
#[derive(Debug)]
pub enum DeleteOutcome<E> {
    Deleted { deleted_count: usize },
    /// The error returned by the theme API, unchanged.
    Failed { error: E },
}

impl<E> DeleteOutcome<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }

    pub fn deleted_count(&self) -> Option<usize> {
        match self {
            DeleteOutcome::Deleted { deleted_count } => Some(*deleted_count),
            DeleteOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            DeleteOutcome::Deleted { .. } => None,
            DeleteOutcome::Failed { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<usize, E> {
        match self {
            DeleteOutcome::Deleted { deleted_count } => Ok(deleted_count),
            DeleteOutcome::Failed { error } => Err(error),
        }
    }
}

/// Removes assets one at a time, then optionally recompiles the theme.
///
/// The first failed removal aborts the run: later sources are not touched
/// and no compile is triggered. Only an empty source list is an `Err`;
/// remote failures come back inside [`DeleteOutcome::Failed`].
pub struct DeleteOperation<'a, A, R: ?Sized> {
    api: &'a A,
    reporter: &'a R,
}

impl<'a, A, R> DeleteOperation<'a, A, R>
where
    A: ThemeApi,
    R: Reporter + ?Sized,
{
    pub fn new(api: &'a A, reporter: &'a R) -> Self {
        Self { api, reporter }
    }

    pub async fn execute(
        &self,
        sources: &[String],
        options: &DeleteOptions,
    ) -> Result<DeleteOutcome<A::Error>, AppError> {
        if sources.is_empty() {
            return Err(AppError::validation_error(NO_SOURCES, None));
        }

        for source in sources {
            self.reporter.status(&format!("Deleting {source}..."));
            if let Err(error) = self.api.remove_asset(source).await {
                tracing::debug!(path = %source, "asset removal failed, aborting delete");
                return Ok(DeleteOutcome::Failed { error });
            }
        }

        let deleted_count = sources.len();
        self.reporter
            .success(&format!("Deleted {deleted_count} asset(s) from theme."));

        if deleted_count > 0 {
            if let Err(error) =
                compile::compile_after_change(self.api, self.reporter, options.compile).await
            {
                return Ok(DeleteOutcome::Failed { error });
            }
        }

        Ok(DeleteOutcome::Deleted { deleted_count })
    }
}

/// CLI entry point: a failed outcome is normalized into an [`AppError`].
pub async fn run<A, R>(
    api: &A,
    reporter: &R,
    sources: &[String],
    options: &DeleteOptions,
) -> Result<usize, AppError>
where
    A: ThemeApi<Error = ApiError>,
    R: Reporter + ?Sized,
{
    let outcome = DeleteOperation::new(api, reporter)
        .execute(sources, options)
        .await?;
    Ok(outcome.into_result()?)
}
