use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::delete::DeleteOptions;
use crate::commands::upload::UploadOptions;
use crate::commands::{compile, delete, list, upload, NO_SOURCES};
use crate::config::CliConfig;
use crate::error::AppError;
use crate::reporter::Reporter;

#[derive(Debug, Parser)]
#[command(
    name = "themectl",
    version,
    about = "Manage the assets of a remote theme"
)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Operate on this theme instead of the configured one
    #[arg(long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = delete::META.description, override_usage = delete::META.usage)]
    Delete {
        /// Keys of the assets to delete
        sources: Vec<String>,
        #[arg(long = "no-compile", help = delete::META.option_help("--no-compile"))]
        no_compile: bool,
    },
    #[command(about = upload::META.description, override_usage = upload::META.usage)]
    Upload {
        /// Local files under the theme root
        sources: Vec<PathBuf>,
        #[arg(long = "no-compile", help = upload::META.option_help("--no-compile"))]
        no_compile: bool,
    },
    #[command(about = compile::META.description, override_usage = compile::META.usage)]
    Compile,
    #[command(about = list::META.description, override_usage = list::META.usage)]
    List {
        #[arg(long, help = list::META.option_help("--prefix"))]
        prefix: Option<String>,
    },
}

impl Commands {
    /// Subcommand name as registered with clap.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Delete { .. } => delete::META.name,
            Commands::Upload { .. } => upload::META.name,
            Commands::Compile => compile::META.name,
            Commands::List { .. } => list::META.name,
        }
    }

    /// Reject usage errors before any config is loaded or request is made.
    pub fn validate(&self) -> Result<(), AppError> {
        let empty = match self {
            Commands::Delete { sources, .. } => sources.is_empty(),
            Commands::Upload { sources, .. } => sources.is_empty(),
            Commands::Compile | Commands::List { .. } => false,
        };
        if empty {
            return Err(AppError::validation_error(NO_SOURCES, None));
        }
        Ok(())
    }
}

/// Validate, load config, connect and dispatch one parsed invocation.
pub async fn run<R>(cli: Cli, reporter: &R) -> anyhow::Result<()>
where
    R: Reporter + ?Sized,
{
    cli.command.validate()?;

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.server.theme_id = theme;
    }
    let api = config.connect()?;
    tracing::debug!(endpoint = %config.server.endpoint, theme = %config.server.theme_id, "connected");

    match cli.command {
        Commands::Delete {
            sources,
            no_compile,
        } => {
            let options = DeleteOptions {
                compile: !no_compile,
            };
            delete::run(&api, reporter, &sources, &options).await?;
        }
        Commands::Upload {
            sources,
            no_compile,
        } => {
            let options = UploadOptions {
                compile: !no_compile,
            };
            upload::run(&api, reporter, &config.theme.root, &sources, &options).await?;
        }
        Commands::Compile => {
            compile::run(&api, reporter).await?;
        }
        Commands::List { prefix } => {
            list::run(&api, reporter, prefix.as_deref()).await?;
        }
    }

    Ok(())
}
