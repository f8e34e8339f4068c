//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its subtask children.
//! - Provide lifecycle helpers that keep the done/completed-at pairing intact.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` never changes after construction.
//! - `completed_at` is `Some` exactly when `is_done` is true.
//! - Subtask ids are unique within their parent, not globally.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Stable identifier for a subtask, scoped to its parent task.
pub type SubtaskId = Uuid;

/// Fixed category set for grouping tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Work,
    Health,
    Learning,
    Errands,
}

impl Category {
    /// All categories in canonical enumeration order.
    ///
    /// Aggregations that report per-category figures iterate this order, not
    /// count order.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Health,
        Category::Learning,
        Category::Errands,
    ];
}

/// Task urgency level.
///
/// Declaration order defines the total order: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Checklist item owned by a single task.
///
/// Subtasks have no independent lifecycle; they are created, toggled and
/// removed only through their parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    pub is_done: bool,
}

impl Subtask {
    /// Creates a subtask with a generated id, initially not done.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_done: false,
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for lookups and persistence identity.
    pub id: TaskId,
    pub title: String,
    pub is_done: bool,
    pub category: Category,
    pub priority: Priority,
    /// Optional deadline instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation instant. Immutable after construction.
    pub created_at: DateTime<Utc>,
    /// Completion instant. `Some` exactly when `is_done` is true.
    pub completed_at: Option<DateTime<Utc>>,
    /// Checklist items in insertion order.
    pub subtasks: Vec<Subtask>,
    /// Free-form notes. May be empty.
    pub notes: String,
}

/// Validation failure for a task record.
///
/// Used by the storage read path to reject invalid persisted state instead of
/// masking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task title is empty or whitespace-only.
    BlankTitle(TaskId),
    /// A subtask title is empty or whitespace-only.
    BlankSubtaskTitle(TaskId, SubtaskId),
    /// `is_done` and `completed_at` disagree.
    CompletionMismatch(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle(id) => write!(f, "task {id} has a blank title"),
            Self::BlankSubtaskTitle(task_id, subtask_id) => {
                write!(f, "subtask {subtask_id} of task {task_id} has a blank title")
            }
            Self::CompletionMismatch(id) => {
                write!(f, "task {id} has inconsistent is_done/completed_at state")
            }
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a task with a generated id and `created_at` stamped now.
    ///
    /// The caller is responsible for trimming the title before construction;
    /// `validate` rejects blank titles.
    pub fn new(title: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_done: false,
            category,
            priority,
            due_date: None,
            created_at: Utc::now(),
            completed_at: None,
            subtasks: Vec::new(),
            notes: String::new(),
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle(self.id));
        }
        for subtask in &self.subtasks {
            if subtask.title.trim().is_empty() {
                return Err(TaskValidationError::BlankSubtaskTitle(self.id, subtask.id));
            }
        }
        if self.is_done != self.completed_at.is_some() {
            return Err(TaskValidationError::CompletionMismatch(self.id));
        }
        Ok(())
    }

    /// Sets the done flag and keeps `completed_at` paired with it.
    ///
    /// Transition to done stamps `at`; transition back clears the stamp.
    /// Setting the current state again is a no-op.
    pub fn set_done(&mut self, done: bool, at: DateTime<Utc>) {
        if self.is_done == done {
            return;
        }
        self.is_done = done;
        self.completed_at = if done { Some(at) } else { None };
    }

    /// Whether the task has a due date strictly in the past and is not done.
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        match self.due_date {
            Some(due) if !self.is_done => due < now.with_timezone(&Utc),
            _ => false,
        }
    }

    /// Whether the due date falls within the current local calendar day.
    pub fn is_due_today(&self, now: DateTime<Local>) -> bool {
        self.due_date
            .map(|due| due.with_timezone(&Local).date_naive() == now.date_naive())
            .unwrap_or(false)
    }

    /// Completed fraction of the checklist. 0.0 when there are no subtasks.
    pub fn subtask_progress(&self) -> f64 {
        if self.subtasks.is_empty() {
            return 0.0;
        }
        let done = self.subtasks.iter().filter(|s| s.is_done).count();
        done as f64 / self.subtasks.len() as f64
    }

    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}
