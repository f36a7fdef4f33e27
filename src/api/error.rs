//! Errors returned by the log API client

/// Failure of a single API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("API error: {status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Request never completed (connect, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Success status but the body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
