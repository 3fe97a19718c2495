//! Errors returned by the control API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid control API address '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether the daemon could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_connect() || source.is_timeout())
    }
}
