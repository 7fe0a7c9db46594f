//! Error types for scores provider access

use std::time::Duration;
use thiserror::Error;

/// Why one source could not be fetched
///
/// Always recovered by the runner: the source's slot falls back to the empty
/// record and the run continues.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Transport errors, timeouts and 5xx/429 responses are worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http { .. } | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Decode { .. } => false,
        }
    }
}
