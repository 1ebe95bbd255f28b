//! Task record and filter types
//!
//! Task is the unit the backend persists; TaskDraft is the partial record
//! sent on creation, before the server has assigned an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the backend
    pub id: i64,

    /// Display title
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag
    pub is_completed: bool,

    /// Creation timestamp, set by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task with a known id (used by tests and the in-memory backend)
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            is_completed: false,
            created_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Copy of this task with the completion flag flipped
    pub fn toggled(&self) -> Self {
        let mut task = self.clone();
        task.is_completed = !task.is_completed;
        task
    }
}

/// The partial task sent to the create endpoint
///
/// The server assigns `id` and `createdAt`; anything the client supplies
/// for those is a hint at best, so the draft omits them entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub is_completed: bool,
}

impl TaskDraft {
    /// Create a draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_completed: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

/// View filter over the cached task collection
///
/// Not persisted server-side; selects which tasks the presentation shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// Every cached task
    #[default]
    All,
    /// Only tasks with `is_completed` true
    Completed,
    /// Only tasks with `is_completed` false
    Pending,
}

impl TaskFilter {
    /// Whether the given task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed,
            Self::Pending => !task.is_completed,
        }
    }
}

impl std::str::FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "pending" | "open" => Ok(Self::Pending),
            _ => Err(format!("Unknown filter: {}. Use: all, completed, or pending", s)),
        }
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_task_builders() {
        let task = Task::new(1, "Buy milk").with_description("2 liters").completed(true);
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, Some("2 liters".to_string()));
        assert!(task.is_completed);
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_task_toggled_flips_completion() {
        let task = Task::new(1, "Buy milk");
        assert!(!task.is_completed);
        assert!(task.toggled().is_completed);
        assert!(!task.toggled().toggled().is_completed);
        // toggled() leaves the original untouched
        assert!(!task.is_completed);
    }

    #[test]
    fn test_task_serde_camel_case() {
        let json = r#"{
            "id": 7,
            "title": "Ship release",
            "isCompleted": true,
            "createdAt": "2025-03-01T12:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert!(task.is_completed);
        assert!(task.created_at.is_some());
        assert!(task.description.is_none());

        let out = serde_json::to_string(&task).unwrap();
        assert!(out.contains("\"isCompleted\":true"));
        assert!(out.contains("\"createdAt\""));
        // absent optionals are omitted from the wire
        assert!(!out.contains("description"));
    }

    #[test]
    fn test_draft_serialization_omits_server_fields() {
        let draft = TaskDraft::new("New task");
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("\"title\":\"New task\""));
        assert!(json.contains("\"isCompleted\":false"));
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("createdAt"));
    }

    #[test]
    fn test_filter_matches() {
        let pending = Task::new(1, "a");
        let completed = Task::new(2, "b").completed(true);

        assert!(TaskFilter::All.matches(&pending));
        assert!(TaskFilter::All.matches(&completed));
        assert!(TaskFilter::Pending.matches(&pending));
        assert!(!TaskFilter::Pending.matches(&completed));
        assert!(TaskFilter::Completed.matches(&completed));
        assert!(!TaskFilter::Completed.matches(&pending));
    }

    #[test]
    fn test_filter_from_str() {
        assert!(matches!("all".parse::<TaskFilter>(), Ok(TaskFilter::All)));
        assert!(matches!("Completed".parse::<TaskFilter>(), Ok(TaskFilter::Completed)));
        assert!(matches!("pending".parse::<TaskFilter>(), Ok(TaskFilter::Pending)));
        assert!(matches!("open".parse::<TaskFilter>(), Ok(TaskFilter::Pending)));
        assert!("nonsense".parse::<TaskFilter>().is_err());
    }

    #[test]
    fn test_filter_display_round_trip() {
        for filter in [TaskFilter::All, TaskFilter::Completed, TaskFilter::Pending] {
            assert_eq!(filter.to_string().parse::<TaskFilter>(), Ok(filter));
        }
    }

    proptest! {
        /// Completed and Pending partition the task space; All covers it.
        #[test]
        fn prop_filters_partition(id in any::<i64>(), is_completed in any::<bool>()) {
            let task = Task::new(id, "t").completed(is_completed);
            prop_assert!(TaskFilter::All.matches(&task));
            prop_assert_ne!(
                TaskFilter::Completed.matches(&task),
                TaskFilter::Pending.matches(&task)
            );
        }
    }
}
