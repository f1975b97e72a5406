//! Core domain logic for Taskdeck, a local-first personal task tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use filter::{filter_tasks, TaskFilter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Category, Priority, Status, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError,
};
pub use notify::reminder::{
    is_near_due, near_due_tasks, MemoryBackend, NotificationBackend, NotifyError,
    ReminderRequest, ReminderScheduler,
};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{TaskService, TaskStats};

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
