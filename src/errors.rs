//! Failures that can end a search invocation.

use thiserror::Error;

/// Message used when a failure carries no description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Any failure raised while handling a single search invocation.
///
/// Every variant is reported to the caller the same way: a 500 with
/// `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The inbound body could not be read as a search request.
    #[error("{0}")]
    InvalidBody(String),

    /// The outbound call to the provider failed.
    #[error("{0}")]
    Request(String),

    /// The provider answered with something that is not JSON.
    #[error("{0}")]
    InvalidProviderResponse(String),
}

impl SearchError {
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn invalid_provider_response(msg: impl Into<String>) -> Self {
        Self::InvalidProviderResponse(msg.into())
    }

    /// Caller-facing description of the failure.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
