//! HTTP implementation of the TaskApi trait
//!
//! Talks to the REST backend configured under `api` in the config file.
//! Every response is decoded through the standard envelope; non-2xx
//! statuses and transport failures surface as errors with no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::{ApiError, ApiResponse, TaskApi};
use crate::config::ApiConfig;
use crate::domain::{Task, TaskDraft};

/// HTTP client for the task REST API
pub struct HttpTaskApi {
    base_url: String,
    http: Client,
}

impl HttpTaskApi {
    /// Create a new client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(ApiError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// URL of the task collection
    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// URL of a single task
    fn task_url(&self, id: i64) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Read the body of a successful response, or fail with status and body
    async fn success_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "success_body: request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.tasks_url();
        debug!(%url, "list: called");

        let response = self.http.get(&url).send().await.map_err(ApiError::Network)?;
        let body = Self::success_body(response).await?;

        let envelope: ApiResponse<Vec<Task>> = ApiResponse::parse(&body)?;
        debug!(count = envelope.data.as_ref().map_or(0, Vec::len), "list: success");
        Ok(envelope.data.unwrap_or_default())
    }

    async fn get(&self, id: i64) -> Result<Option<Task>, ApiError> {
        let url = self.task_url(id);
        debug!(%url, "get: called");

        let response = self.http.get(&url).send().await.map_err(ApiError::Network)?;
        let body = Self::success_body(response).await?;

        let envelope: ApiResponse<Task> = ApiResponse::parse(&body)?;
        debug!(found = envelope.data.is_some(), "get: success");
        Ok(envelope.data)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Option<Task>, ApiError> {
        let url = self.tasks_url();
        debug!(%url, title = %draft.title, "create: called");

        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body = Self::success_body(response).await?;

        let envelope: ApiResponse<Task> = ApiResponse::parse(&body)?;
        debug!(id = ?envelope.data.as_ref().map(|t| t.id), "create: success");
        Ok(envelope.data)
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, ApiError> {
        let url = self.task_url(task.id);
        debug!(%url, "update: called");

        let response = self
            .http
            .put(&url)
            .json(task)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body = Self::success_body(response).await?;

        let envelope: ApiResponse<Task> = ApiResponse::parse(&body)?;
        debug!(found = envelope.data.is_some(), "update: success");
        Ok(envelope.data)
    }

    async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let url = self.task_url(id);
        debug!(%url, "delete: called");

        let response = self.http.delete(&url).send().await.map_err(ApiError::Network)?;
        let body = Self::success_body(response).await?;

        let envelope: ApiResponse<String> = ApiResponse::parse(&body)?;
        debug!("delete: success");
        // confirmation is the payload when present, the envelope message otherwise
        Ok(envelope.data.unwrap_or(envelope.message))
    }
}
