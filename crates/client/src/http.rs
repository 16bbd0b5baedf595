use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{AssetPage, ThemeApi};
use crate::error::ApiError;

pub struct ThemeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct PutAssetRequest<'a> {
    asset: PutAssetBody<'a>,
}

#[derive(Serialize)]
struct PutAssetBody<'a> {
    key: &'a str,
    attachment: String,
}

impl ThemeClient {
    /// Build a client bound to one theme at `endpoint`.
    pub fn new(
        endpoint: &str,
        theme_id: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = format!("{}/themes/{}", endpoint.trim_end_matches('/'), theme_id);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn assets_url(&self) -> String {
        format!("{}/assets", self.base_url)
    }

    /// Check HTTP response status; decode the error body if present.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        tracing::debug!(status, body = %body_text, "theme API request rejected");

        Err(ApiError::Status {
            status,
            body: decode_error_body(&body_text),
        })
    }
}

/// Servers do not always answer with JSON; plain text is kept as `message`.
fn decode_error_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }))
}

#[async_trait]
impl ThemeApi for ThemeClient {
    type Error = ApiError;

    /// DELETE /themes/{id}/assets?key={path}
    async fn remove_asset(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "removing asset");
        let resp = self
            .client
            .delete(self.assets_url())
            .bearer_auth(&self.api_key)
            .query(&[("key", path)])
            .send()
            .await?;

        Self::check_response(resp).await?;
        Ok(())
    }

    /// POST /themes/{id}/assets/compile
    async fn compile_assets(&self) -> Result<(), ApiError> {
        tracing::debug!(base_url = %self.base_url, "triggering asset compilation");
        let resp = self
            .client
            .post(format!("{}/compile", self.assets_url()))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::check_response(resp).await?;
        Ok(())
    }

    /// PUT /themes/{id}/assets with the contents base64-encoded.
    async fn put_asset(&self, key: &str, contents: &[u8]) -> Result<(), ApiError> {
        tracing::debug!(key, size = contents.len(), "uploading asset");
        let body = PutAssetRequest {
            asset: PutAssetBody {
                key,
                attachment: STANDARD.encode(contents),
            },
        };
        let resp = self
            .client
            .put(self.assets_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::check_response(resp).await?;
        Ok(())
    }

    /// GET /themes/{id}/assets with optional prefix and page token.
    async fn list_assets(
        &self,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<AssetPage, ApiError> {
        let mut req = self
            .client
            .get(self.assets_url())
            .bearer_auth(&self.api_key);

        if let Some(p) = prefix {
            req = req.query(&[("prefix", p)]);
        }
        if let Some(t) = page_token {
            req = req.query(&[("page_token", t)]);
        }

        let resp = Self::check_response(req.send().await?).await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = ThemeClient::new(
            "https://themes.example.com/api/v1/",
            "main",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://themes.example.com/api/v1/themes/main");
        assert_eq!(
            client.assets_url(),
            "https://themes.example.com/api/v1/themes/main/assets"
        );
    }

    #[test]
    fn test_decode_error_body() {
        assert_eq!(decode_error_body(""), json!({}));
        assert_eq!(
            decode_error_body(r#"{"error_description":"nope"}"#),
            json!({"error_description": "nope"})
        );
        assert_eq!(
            decode_error_body("Bad Gateway"),
            json!({"message": "Bad Gateway"})
        );
    }
}
