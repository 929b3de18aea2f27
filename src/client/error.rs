//! Error types for metric resource fetches.

use thiserror::Error;

/// Errors that can occur when fetching a metric resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// The transport failed (DNS, refused connection, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout waiting for a response.
    #[error("Request timed out")]
    Timeout,

    /// The response body was not valid JSON for the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
