//! HTTP client for the MixMaster API.

pub mod covers;
pub mod events;
pub mod health;
pub mod tracks;

use std::path::Path;

use mixmaster_core::event::ErrorResponse;

use crate::error::{ClientError, Result};

/// Default server address when neither a flag nor `MIXMASTER_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP client for the MixMaster API.
#[derive(Debug, Clone)]
pub struct MixmasterClient {
    client: reqwest::Client,
    base_url: String,
}

impl MixmasterClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (MIXMASTER_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MIXMASTER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body or turn the server's error body into a
    /// [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let resource = response.url().path().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status.as_u16() == 404 {
            return Err(ClientError::NotFound { resource });
        }

        Err(error_from_body(status.as_u16(), body))
    }
}

/// File name sent with a multipart upload of `path`.
fn upload_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ClientError::InvalidInput(format!("{} has no usable file name", path.display()))
        })
}

/// Reads `{ "error", "conflicting_event_id" }` bodies, falling back to the
/// raw text.
fn error_from_body(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => ClientError::ServerError {
            status,
            message: error.error,
            conflicting_event_id: error.conflicting_event_id,
        },
        Err(_) => ClientError::ServerError {
            status,
            message: body,
            conflicting_event_id: None,
        },
    }
}
