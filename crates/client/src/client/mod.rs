//! HTTP client for the profile backend.

mod backend;
pub mod users;

use profilesync_core::profile::RejectedRequest;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;

/// HTTP client for the profile backend API.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileClient {
    /// Create a new client from a validated config.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url().to_string(),
        }
    }

    /// Create from environment (PROFILESYNC_API_URL or default).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Capture everything needed to diagnose a non-success response.
    async fn rejected(response: reqwest::Response, payload: Value) -> RejectedRequest {
        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let parsed_body = serde_json::from_str(&body).ok();

        RejectedRequest {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
            parsed_body,
            url,
            payload,
        }
    }
}
