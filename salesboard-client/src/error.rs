//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the gateway
    #[error("fetch failed ({status}): {message}")]
    Fetch {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Gateway is missing its backend location or credentials
    #[error("server configuration error: {0}")]
    Config(String),

    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication required
    #[error("authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("permission denied: {0}")]
    Forbidden(String),
}

impl ClientError {
    /// True for the 401/403 family, which callers treat as "not signed in"
    /// rather than a hard failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::Forbidden(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
