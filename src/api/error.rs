//! API error types

use thiserror::Error;

/// Errors that can occur while talking to the task backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Get the HTTP status if the backend answered with a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
