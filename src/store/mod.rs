//! Client-side task store
//!
//! Single in-process authority for the locally cached task collection.
//! Mirrors the last known server state: a full reload replaces the cache,
//! the incremental operations apply one confirmed mutation each, and the
//! filtered view is recomputed from the cache on every read.
//!
//! Error policy: the store recovers every backend failure locally - it
//! logs and stops, leaving the cache in its last-known-good state. Callers
//! observe only that no state changed and that `loading` returned to
//! false. The one exception is `toggle_completion`, which applies the flip
//! before the round trip and does not roll it back on failure.

use std::sync::Arc;

use tracing::{debug, error};

use crate::api::TaskApi;
use crate::domain::{Task, TaskDraft, TaskFilter};

/// Locally cached task collection with a loading flag and active filter
pub struct TaskStore {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
    loading: bool,
    filter: TaskFilter,
}

impl TaskStore {
    /// Create an empty store backed by the given API client
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: false,
            filter: TaskFilter::All,
        }
    }

    /// The cached tasks, in the order the backend returned them
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// True while a full reload is in flight
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The active view filter
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// The cached tasks that pass the active filter, in cache order
    ///
    /// Recomputed on every read; at tens to low hundreds of tasks there is
    /// nothing worth memoizing.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Replace the entire cache with the backend's task list
    ///
    /// On failure the previous cache is left untouched. `loading` is false
    /// again once the call returns, on both paths.
    pub async fn load_tasks(&mut self) {
        debug!("load_tasks: called");
        self.loading = true;

        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "load_tasks: cache replaced");
                self.tasks = tasks;
            }
            Err(e) => {
                error!(error = %e, "load_tasks: request failed, keeping previous cache");
            }
        }

        self.loading = false;
    }

    /// Create a task from a draft and insert the confirmed record
    ///
    /// No optimistic insert: the cache only grows once the backend has
    /// answered with the created task.
    pub async fn add_task(&mut self, draft: TaskDraft) {
        debug!(title = %draft.title, "add_task: called");

        match self.api.create(&draft).await {
            Ok(Some(task)) => {
                debug!(id = %task.id, "add_task: inserting confirmed task");
                self.upsert(task);
            }
            Ok(None) => {
                debug!("add_task: backend returned no task");
            }
            Err(e) => {
                error!(error = %e, "add_task: request failed");
            }
        }
    }

    /// Update a task and replace the matching cached entry with the result
    pub async fn update_task(&mut self, task: Task) {
        debug!(id = %task.id, "update_task: called");

        match self.api.update(&task).await {
            Ok(Some(updated)) => {
                debug!(id = %updated.id, "update_task: replacing cached entry");
                self.replace(updated);
            }
            Ok(None) => {
                debug!("update_task: backend returned no task");
            }
            Err(e) => {
                error!(error = %e, "update_task: request failed");
            }
        }
    }

    /// Delete a task and remove it from the cache once confirmed
    ///
    /// Deleting an id the cache does not hold is a no-op.
    pub async fn delete_task(&mut self, id: i64) {
        debug!(%id, "delete_task: called");

        match self.api.delete(id).await {
            Ok(message) => {
                debug!(%message, "delete_task: removing cached entry");
                self.tasks.retain(|t| t.id != id);
            }
            Err(e) => {
                error!(error = %e, "delete_task: request failed");
            }
        }
    }

    /// Flip a task's completion flag, cache first, backend second
    ///
    /// The flip lands in the cache before the update round trip so the
    /// view reacts immediately. A backend failure is logged and NOT rolled
    /// back; the next full reload reconverges with the server.
    pub async fn toggle_completion(&mut self, task: &Task) {
        debug!(id = %task.id, "toggle_completion: called");
        let toggled = task.toggled();

        self.replace(toggled.clone());

        if let Err(e) = self.api.update(&toggled).await {
            error!(error = %e, id = %task.id, "toggle_completion: sync failed, cache keeps the flip");
        }
    }

    /// Set the view filter; no I/O
    pub fn set_filter(&mut self, filter: TaskFilter) {
        debug!(%filter, "set_filter: called");
        self.filter = filter;
    }

    /// Replace the cached entry with the same id, if any
    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    /// Insert a task, replacing any cached entry with the same id
    fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }
}
