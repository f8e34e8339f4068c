//! Persistence port consumed by the task store.
//!
//! # Responsibility
//! - Define the narrow load/save contract between the engine and durable
//!   storage.
//! - Keep failure handling at this boundary: port methods swallow and log,
//!   typed errors stay on the implementation's `try_` surface.
//!
//! # Invariants
//! - `load_all_tasks` never fails the caller; any read or decode problem
//!   yields an empty collection.
//! - `save_all_tasks` replaces the whole prior state atomically.

use crate::model::profile::{ThemePreference, UserProfile};
use crate::model::task::{Task, TaskValidationError};

pub mod sqlite_store;

pub type StorageResult<T> = Result<T, StorageError>;

/// Typed error surface for storage implementations.
#[derive(Debug)]
pub enum StorageError {
    Db(crate::db::DbError),
    Validation(TaskValidationError),
    InvalidData(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<crate::db::DbError> for StorageError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

impl From<TaskValidationError> for StorageError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

/// Load/save contract between the engine and durable storage.
///
/// The engine treats the in-memory collection as authoritative; failures on
/// this surface are the implementation's concern and must not propagate.
pub trait StoragePort {
    /// Returns all persisted tasks in collection order, empty when no prior
    /// state exists or the read fails.
    fn load_all_tasks(&self) -> Vec<Task>;

    /// Atomically replaces the persisted collection.
    fn save_all_tasks(&mut self, tasks: &[Task]);

    /// Returns the saved profile, `None` when never saved or unreadable.
    fn load_profile(&self) -> Option<UserProfile>;

    fn save_profile(&mut self, profile: &UserProfile);

    /// Returns the saved theme, `ThemePreference::System` when unset.
    fn load_theme_preference(&self) -> ThemePreference;

    fn save_theme_preference(&mut self, theme: ThemePreference);

    fn is_onboarding_complete(&self) -> bool;

    fn set_onboarding_complete(&mut self, complete: bool);

    /// Clears tasks, profile, theme and the onboarding flag.
    fn reset_all(&mut self);
}
