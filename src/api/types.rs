//! Wire envelope for backend responses
//!
//! Every endpoint answers with the same shape: `{ success, statusCode,
//! message, data }`. `data` may be absent or null; that means "no result",
//! not an error — transport and HTTP failures are reported separately.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ApiError;

/// The standard response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,

    pub status_code: u16,

    pub message: String,

    /// The payload; null or absent when there is no result
    pub data: Option<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode an envelope from a response body
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }
}
