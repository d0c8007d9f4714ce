//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::task::{
    validate_task_text, NewTask, Task, TaskId, TaskUpdate, TaskValidationError,
    DEFAULT_PRIORITY, MAX_TASK_CHARS,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskRepository, TaskStats,
};
pub use service::task_service::{
    NoticeKind, TaskOutcome, TaskService, TaskServiceError, TaskServiceResult,
};
pub use store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
