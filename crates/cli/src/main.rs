use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use themectl::cli::Cli;
use themectl::{AppError, ConsoleReporter, Reporter};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reporter = ConsoleReporter;
    let command = cli.command.name();

    match themectl::cli::run(cli, &reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&reporter, command, &err);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(reporter: &ConsoleReporter, command: &str, err: &anyhow::Error) {
    match err.downcast_ref::<AppError>() {
        Some(app) => {
            tracing::debug!(
                command,
                error = app.name(),
                code = %app.code(),
                details = ?app.details(),
                "{app}"
            );
            reporter.error(&format!("[{}] {}", app.code(), app.message()));
        }
        None => {
            tracing::debug!(command, "{err:#}");
            reporter.error(&format!("{err:#}"));
        }
    }
}
