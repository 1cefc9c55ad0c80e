//! Errors returned by the onboarding API client

use thiserror::Error;

/// Failure talking to the onboarding API.
///
/// Every variant is recoverable: callers keep their last good data or
/// re-enable the form for another attempt.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("onboarding API unavailable")]
    Unavailable,

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response missing {0}")]
    MissingData(&'static str),
}

impl ApiError {
    /// Classify a transport error the way the status line reports it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }

    /// True when the API answered with 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
