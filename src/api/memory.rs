//! In-memory implementation of the TaskApi trait
//!
//! A backend that lives entirely in process memory: ids come from the
//! wall clock in milliseconds, nothing survives process exit. Useful for
//! running without a server and as the test double for the store - the
//! failure switch makes every call error, which is how tests exercise the
//! store's recovery paths.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{ApiError, TaskApi};
use crate::domain::{Task, TaskDraft};

/// Task backend held in process memory
pub struct InMemoryTaskApi {
    tasks: Mutex<Vec<Task>>,
    failing: AtomicBool,
}

impl Default for InMemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskApi {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Create a backend pre-populated with the given tasks
    pub fn seeded(tasks: Vec<Task>) -> Self {
        debug!(count = tasks.len(), "seeded: called");
        Self {
            tasks: Mutex::new(tasks),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail (simulates the backend being down)
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            debug!("check_available: simulated outage");
            return Err(ApiError::InvalidResponse("Simulated backend failure".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pick a fresh id: current clock in milliseconds, bumped past collisions
    fn next_id(tasks: &[Task]) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while tasks.iter().any(|t| t.id == id) {
            id += 1;
        }
        id
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        debug!("list: called");
        self.check_available()?;
        Ok(self.lock().clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Task>, ApiError> {
        debug!(%id, "get: called");
        self.check_available()?;
        Ok(self.lock().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Option<Task>, ApiError> {
        debug!(title = %draft.title, "create: called");
        self.check_available()?;

        let mut tasks = self.lock();
        let task = Task {
            id: Self::next_id(&tasks),
            title: draft.title.clone(),
            description: draft.description.clone(),
            is_completed: draft.is_completed,
            created_at: Some(Utc::now()),
        };
        tasks.push(task.clone());
        Ok(Some(task))
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, ApiError> {
        debug!(id = %task.id, "update: called");
        self.check_available()?;

        let mut tasks = self.lock();
        if let Some(slot) = tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task.clone();
        }
        // PUT echoes the record whether or not it replaced anything
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i64) -> Result<String, ApiError> {
        debug!(%id, "delete: called");
        self.check_available()?;

        self.lock().retain(|t| t.id != id);
        Ok(format!("Task {} deleted", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let api = InMemoryTaskApi::new();

        let a = api.create(&TaskDraft::new("a")).await.unwrap().unwrap();
        let b = api.create(&TaskDraft::new("b")).await.unwrap().unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        assert_eq!(api.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let api = InMemoryTaskApi::seeded(vec![Task::new(1, "T1"), Task::new(2, "T2")]);

        assert_eq!(api.get(1).await.unwrap().unwrap().title, "T1");
        assert!(api.get(99).await.unwrap().is_none());

        let message = api.delete(1).await.unwrap();
        assert!(message.contains('1'));
        assert!(api.get(1).await.unwrap().is_none());
        assert_eq!(api.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_matching() {
        let api = InMemoryTaskApi::seeded(vec![Task::new(1, "T1"), Task::new(2, "T2")]);

        let updated = Task::new(1, "T1 renamed").completed(true);
        api.update(&updated).await.unwrap();

        let tasks = api.list().await.unwrap();
        assert_eq!(tasks[0].title, "T1 renamed");
        assert!(tasks[0].is_completed);
        assert_eq!(tasks[1].title, "T2");
    }

    #[tokio::test]
    async fn test_failure_switch() {
        let api = InMemoryTaskApi::seeded(vec![Task::new(1, "T1")]);
        api.fail_requests(true);

        assert!(api.list().await.is_err());
        assert!(api.create(&TaskDraft::new("x")).await.is_err());
        assert!(api.delete(1).await.is_err());

        api.fail_requests(false);
        assert_eq!(api.list().await.unwrap().len(), 1);
    }
}
