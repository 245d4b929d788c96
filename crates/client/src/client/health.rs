//! Health check operations.

use serde::{Deserialize, Serialize};

use super::MixmasterClient;
use crate::error::Result;

/// Body of `/readyz`, returned for both 200 and 503.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub ready: bool,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MixmasterClient {
    /// Check readiness. A 503 still yields a report.
    pub async fn readiness(&self) -> Result<Readiness> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        self.handle_response(response).await
    }
}
