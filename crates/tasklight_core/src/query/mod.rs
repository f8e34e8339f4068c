//! Query resolution over the task collection.
//!
//! # Responsibility
//! - Compose the smart-list, category, search and focus filters into one
//!   deterministic pipeline.
//! - Stay stateless: output is a pure function of the inputs.
//!
//! # Invariants
//! - Stage order is fixed: smart list, category, search, focus.
//! - Stages after the smart list never reorder, only narrow.
//! - An empty search string is a no-op; other text matches the title as a
//!   case-insensitive substring.

use crate::model::smart_list::SmartList;
use crate::model::task::{Category, Task};
use chrono::{DateTime, Local};

/// Filter parameters for one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub list: SmartList,
    /// Retain only this category when set.
    pub category: Option<Category>,
    /// Case-insensitive title substring. Empty disables the stage.
    pub search: String,
    /// Restrict output to not-done tasks when enabled.
    pub focus: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            list: SmartList::All,
            category: None,
            search: String::new(),
            focus: false,
        }
    }
}

/// Resolves the visible task list for the given query.
///
/// `now` anchors the due-today cut used by `SmartList::Today`.
pub fn resolve(tasks: &[Task], query: &TaskQuery, now: DateTime<Local>) -> Vec<Task> {
    let mut result = query.list.apply(tasks, now);

    if let Some(category) = query.category {
        result.retain(|t| t.category == category);
    }

    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        result.retain(|t| t.title.to_lowercase().contains(&needle));
    }

    if query.focus {
        result.retain(|t| !t.is_done);
    }

    result
}
