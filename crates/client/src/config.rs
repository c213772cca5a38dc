use url::Url;

use crate::error::{ClientError, Result};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "PROFILESYNC_API_URL";

/// Base URL used when [`API_URL_ENV`] is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Build a config from an absolute http(s) URL. Trailing slashes are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the URL does not parse or is
    /// not http/https.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "{base_url}: scheme must be http or https"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Load from `PROFILESYNC_API_URL`, falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn keeps_path_prefix() {
        let config = ClientConfig::new("https://example.com/backend").unwrap();
        assert_eq!(config.base_url(), "https://example.com/backend");
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            ClientConfig::new("/api"),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url(), "http://localhost:3000");
    }
}
