use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to theme API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("theme API error (HTTP {status}): {}", describe_body(.body))]
    Status { status: u16, body: Value },
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request(err) => err.status().map(|s| s.as_u16()),
            ApiError::Status { status, .. } => Some(*status),
        }
    }

    /// The decoded error body returned by the server.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Request(_) => None,
            ApiError::Status { body, .. } => Some(body),
        }
    }
}

fn describe_body(body: &Value) -> String {
    ["error_description", "message"]
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_prefers_error_description() {
        let err = ApiError::Status {
            status: 404,
            body: json!({"error_description": "Asset not found", "message": "ignored"}),
        };
        assert_eq!(
            err.to_string(),
            "theme API error (HTTP 404): Asset not found"
        );
    }

    #[test]
    fn test_display_falls_back_to_raw_body() {
        let err = ApiError::Status {
            status: 500,
            body: json!({"errors": ["boom"]}),
        };
        assert_eq!(
            err.to_string(),
            r#"theme API error (HTTP 500): {"errors":["boom"]}"#
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some(&json!({"errors": ["boom"]})));
    }
}
