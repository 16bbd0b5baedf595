/// Sink for user-facing progress notifications.
///
/// Operations receive a reporter instead of printing directly, so the same
/// code drives the console and test doubles.
pub trait Reporter {
    fn info(&self, message: &str);
    fn status(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        tracing::debug!(kind = "info", "{message}");
        println!("{message}");
    }

    fn status(&self, message: &str) {
        tracing::debug!(kind = "status", "{message}");
        println!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::debug!(kind = "success", "{message}");
        println!("\u{2714} {message}");
    }

    fn warn(&self, message: &str) {
        tracing::debug!(kind = "warn", "{message}");
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        tracing::debug!(kind = "error", "{message}");
        eprintln!("error: {message}");
    }
}
