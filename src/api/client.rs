//! TaskApi trait definition

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Task, TaskDraft};

/// Stateless task backend client - each call is an independent round trip
///
/// This is the seam between the store and the wire. Implementations are
/// pure pass-throughs: they never retry and never recover errors; the
/// caller decides what a failure means. An absent payload in an otherwise
/// successful response is `None` (or an empty list), not an error.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task the backend knows about
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Fetch a single task by id, `None` if the backend has no payload
    async fn get(&self, id: i64) -> Result<Option<Task>, ApiError>;

    /// Create a task from a draft; the server assigns id and createdAt
    async fn create(&self, draft: &TaskDraft) -> Result<Option<Task>, ApiError>;

    /// Replace a task's fields with the given record
    async fn update(&self, task: &Task) -> Result<Option<Task>, ApiError>;

    /// Delete a task by id, returning the backend's confirmation message
    async fn delete(&self, id: i64) -> Result<String, ApiError>;
}
