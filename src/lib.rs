//! taskdeck - task manager backed by a REST API
//!
//! taskdeck mirrors a remote task list in a local cache: CRUD operations
//! round-trip through the backend and reconcile the cache with whatever
//! the server confirmed, while the view filter is derived locally.
//!
//! # Core Concepts
//!
//! - **Server Is Truth**: the cache only changes after the backend answers
//!   (the optimistic completion toggle is the one deliberate exception)
//! - **Errors Stay Local**: the store logs failures and keeps its
//!   last-known-good state; nothing propagates past it
//! - **Derived Views**: the filtered task list is recomputed from the
//!   cache on every read, never stored
//!
//! # Modules
//!
//! - [`domain`] - Task record, draft, and filter types
//! - [`api`] - TaskApi trait with HTTP and in-memory implementations
//! - [`store`] - the locally cached task collection
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod store;

// Re-export commonly used types
pub use api::{ApiError, ApiResponse, HttpTaskApi, InMemoryTaskApi, TaskApi, create_api};
pub use config::{ApiConfig, Config};
pub use domain::{Task, TaskDraft, TaskFilter};
pub use store::TaskStore;
