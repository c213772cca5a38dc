use serde_json::Value;
use thiserror::Error;

/// Diagnostic context for a request the backend answered with a non-success status.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRequest {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    /// `body` parsed as JSON, when it is JSON.
    pub parsed_body: Option<Value>,
    pub url: String,
    /// JSON payload that was sent, `Value::Null` for bodiless requests.
    pub payload: Value,
}

/// Errors surfaced by a [`ProfileBackend`](super::ProfileBackend).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend rejected request to {} with {} {}", .0.url, .0.status, .0.status_text)]
    Rejected(Box<RejectedRequest>),

    /// A success status with a body that is not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected(rejected) => Some(rejected.status),
            _ => None,
        }
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
