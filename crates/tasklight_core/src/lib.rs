//! Core task state and analytics engine for Tasklight.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::profile::{ThemePreference, UserProfile};
pub use model::smart_list::SmartList;
pub use model::task::{
    Category, Priority, Subtask, SubtaskId, Task, TaskId, TaskValidationError,
};
pub use query::{resolve, TaskQuery};
pub use storage::sqlite_store::SqliteStorage;
pub use storage::{StorageError, StoragePort, StorageResult};
pub use store::{NewTaskRequest, TaskStore};

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
