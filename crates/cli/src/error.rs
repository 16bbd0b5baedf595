use std::fmt;

use serde_json::{json, Value};
use themectl_client::ApiError;
use thiserror::Error;

/// Classification attached to every [`AppError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Api,
    Validation,
    Config,
    FileSystem,
    Auth,
    Custom(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Api => "API_ERROR",
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::FileSystem => "FILE_SYSTEM_ERROR",
            ErrorCode::Auth => "AUTH_ERROR",
            ErrorCode::Custom(code) => code.as_str(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized application error shared by every command.
///
/// Callers branch on [`AppError::code`], never on the message text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AppError {
    message: String,
    code: ErrorCode,
    details: Option<Value>,
}

impl AppError {
    pub const NAME: &'static str = "AppError";

    pub fn new(message: impl Into<String>, code: ErrorCode, details: Option<Value>) -> Self {
        Self {
            message: message.into(),
            code,
            details,
        }
    }

    /// Normalize an error payload returned by the theme API.
    ///
    /// The message is taken from the first non-empty `error_description` or
    /// `message`, then a fixed fallback. The payload itself is kept as the
    /// details.
    pub fn from_api_error(api_error: Value) -> Self {
        let message = ["error_description", "message"]
            .iter()
            .find_map(|field| {
                api_error
                    .get(field)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("Unknown API error")
            .to_string();

        Self::new(message, ErrorCode::Api, Some(api_error))
    }

    pub fn validation_error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::new(message, ErrorCode::Validation, details)
    }

    pub fn config_error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::new(message, ErrorCode::Config, details)
    }

    pub fn file_system_error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::new(message, ErrorCode::FileSystem, details)
    }

    pub fn auth_error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::new(message, ErrorCode::Auth, details)
    }

    /// Tag identifying this error type in logs.
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401 | 403, body } => {
                let message = AppError::from_api_error(body.clone()).message;
                AppError::auth_error(message, Some(body))
            }
            ApiError::Status { body, .. } => AppError::from_api_error(body),
            ApiError::Request(err) => AppError::new(err.to_string(), ErrorCode::Api, None),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let details = json!({ "kind": format!("{:?}", err.kind()) });
        AppError::file_system_error(err.to_string(), Some(details))
    }
}
