//! Task API client module for taskdeck
//!
//! Translates task CRUD operations into calls against the configured
//! backend and unwraps the standard response envelope.

use std::sync::Arc;

use tracing::debug;

mod client;
mod error;
mod http;
mod memory;
mod types;

pub use client::TaskApi;
pub use error::ApiError;
pub use http::HttpTaskApi;
pub use memory::InMemoryTaskApi;
pub use types::ApiResponse;

use crate::config::Config;

/// Create a task API client based on the backend specified in config
///
/// Supports "http" and "memory" backends.
pub fn create_api(config: &Config) -> Result<Arc<dyn TaskApi>, ApiError> {
    debug!(backend = %config.backend, "create_api: called");
    match config.backend.as_str() {
        "http" => {
            debug!("create_api: creating HTTP client");
            Ok(Arc::new(HttpTaskApi::from_config(&config.api)?))
        }
        "memory" => {
            debug!("create_api: creating in-memory backend");
            Ok(Arc::new(InMemoryTaskApi::new()))
        }
        other => {
            debug!(backend = %other, "create_api: unknown backend");
            Err(ApiError::InvalidResponse(format!(
                "Unknown backend: '{}'. Supported: http, memory",
                other
            )))
        }
    }
}
