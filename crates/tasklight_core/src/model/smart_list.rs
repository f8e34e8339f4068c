//! Smart list presets.
//!
//! # Responsibility
//! - Name the fixed filter/sort presets over the task collection.
//! - Implement the preset stage of query resolution.
//!
//! # Invariants
//! - `All` ordering is priority-first, then newest `created_at`.
//! - `Today` ordering is priority-only and stable on ties.
//! - `Completed` ordering is newest completion first, `created_at` fallback.

use crate::model::task::Task;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Named filter/sort preset over the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmartList {
    /// Not-done tasks, most urgent and newest first.
    All,
    /// Tasks due within the current local day and not done.
    Today,
    /// Done tasks, most recently completed first.
    Completed,
}

impl SmartList {
    /// Applies this preset's membership filter and ordering.
    ///
    /// Returns a new vector; the input collection is never reordered.
    pub fn apply(self, tasks: &[Task], now: DateTime<Local>) -> Vec<Task> {
        match self {
            SmartList::All => {
                let mut result: Vec<Task> =
                    tasks.iter().filter(|t| !t.is_done).cloned().collect();
                result.sort_by(|a, b| {
                    (b.priority, b.created_at).cmp(&(a.priority, a.created_at))
                });
                result
            }
            SmartList::Today => {
                let mut result: Vec<Task> = tasks
                    .iter()
                    .filter(|t| t.is_due_today(now) && !t.is_done)
                    .cloned()
                    .collect();
                // sort_by is stable, so priority ties keep collection order.
                result.sort_by(|a, b| b.priority.cmp(&a.priority));
                result
            }
            SmartList::Completed => {
                let mut result: Vec<Task> =
                    tasks.iter().filter(|t| t.is_done).cloned().collect();
                result.sort_by(|a, b| {
                    b.completed_at
                        .unwrap_or(b.created_at)
                        .cmp(&a.completed_at.unwrap_or(a.created_at))
                });
                result
            }
        }
    }
}
