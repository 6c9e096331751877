//! Product API error types.

use thiserror::Error;

/// Errors that can occur when talking to the product API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent.
    #[error("Request failed: {0}")]
    Request(String),

    /// The URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be read.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request exceeded the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// Request body serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// The response envelope had no `data`.
    #[error("Response has no data: {0}")]
    MissingData(String),
}

impl FetchError {
    /// Check for a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Http { status: 404, .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
