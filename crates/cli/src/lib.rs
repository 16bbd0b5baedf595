pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod reporter;

pub use error::{AppError, ErrorCode};
pub use reporter::{ConsoleReporter, Reporter};
