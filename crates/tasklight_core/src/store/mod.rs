//! Mutable owner of the task collection.
//!
//! # Responsibility
//! - Apply CRUD and subtask mutations to the in-memory collection.
//! - Persist the full collection through the storage port after every
//!   effective mutation, before returning.
//!
//! # Invariants
//! - The store is the only component that mutates the collection.
//! - Mutations keyed on an unknown id are silent no-ops, never errors.
//! - Titles are trimmed on every write; empty-after-trim input is rejected.
//! - New tasks are inserted at position 0 (most recent first).

use crate::model::task::{Category, Priority, Subtask, SubtaskId, Task, TaskId};
use crate::storage::StoragePort;
use chrono::Utc;

/// Input for creating one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<chrono::DateTime<Utc>>,
    /// Initial checklist titles. Blank entries are dropped.
    pub subtasks: Vec<String>,
    pub notes: String,
}

impl NewTaskRequest {
    /// Creates a request with the default category and priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Category::Personal,
            priority: Priority::Medium,
            due_date: None,
            subtasks: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Single source of truth for the user's task collection.
///
/// Construction loads whatever the storage port holds; afterwards the
/// in-memory collection is authoritative and each mutation writes it back
/// synchronously.
pub struct TaskStore<S: StoragePort> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: StoragePort> TaskStore<S> {
    /// Creates a store over the given storage collaborator.
    pub fn new(storage: S) -> Self {
        let tasks = storage.load_all_tasks();
        Self { tasks, storage }
    }

    /// Current collection snapshot, in store order (most recent first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Read access to the storage collaborator, for settings surfaces that
    /// share it (profile, theme, onboarding).
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Creates a task from the request and inserts it at the front.
    ///
    /// Returns `None` without touching the collection when the trimmed title
    /// is empty. Blank subtask titles in the request are dropped.
    pub fn add(&mut self, request: NewTaskRequest) -> Option<TaskId> {
        let title = request.title.trim();
        if title.is_empty() {
            return None;
        }

        let mut task = Task::new(title, request.category, request.priority);
        task.due_date = request.due_date;
        task.notes = request.notes;
        task.subtasks = request
            .subtasks
            .iter()
            .filter_map(|subtask_title| {
                let trimmed = subtask_title.trim();
                (!trimmed.is_empty()).then(|| Subtask::new(trimmed))
            })
            .collect();

        let id = task.id;
        self.tasks.insert(0, task);
        self.persist();
        Some(id)
    }

    /// Flips the done flag, stamping or clearing `completed_at`.
    pub fn toggle_done(&mut self, id: TaskId) {
        let Some(task) = self.find_mut(id) else {
            return;
        };
        let done = !task.is_done;
        task.set_done(done, Utc::now());
        self.persist();
    }

    /// Replaces the title with its trimmed form; empty input is rejected.
    pub fn rename(&mut self, id: TaskId, title: &str) {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return;
        }
        let Some(task) = self.find_mut(id) else {
            return;
        };
        task.title = trimmed.to_string();
        self.persist();
    }

    pub fn set_category(&mut self, id: TaskId, category: Category) {
        let Some(task) = self.find_mut(id) else {
            return;
        };
        task.category = category;
        self.persist();
    }

    pub fn set_priority(&mut self, id: TaskId, priority: Priority) {
        let Some(task) = self.find_mut(id) else {
            return;
        };
        task.priority = priority;
        self.persist();
    }

    /// Removes the task. Unknown ids leave the collection untouched.
    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    pub fn toggle_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) {
        let Some(task) = self.find_mut(task_id) else {
            return;
        };
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return;
        };
        subtask.is_done = !subtask.is_done;
        self.persist();
    }

    /// Appends a subtask to the task's checklist.
    ///
    /// Returns `None` when the task is unknown or the trimmed title is empty.
    pub fn add_subtask(&mut self, task_id: TaskId, title: &str) -> Option<SubtaskId> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return None;
        }
        let task = self.find_mut(task_id)?;
        let subtask = Subtask::new(trimmed);
        let subtask_id = subtask.id;
        task.subtasks.push(subtask);
        self.persist();
        Some(subtask_id)
    }

    pub fn delete_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) {
        let Some(task) = self.find_mut(task_id) else {
            return;
        };
        let before = task.subtasks.len();
        task.subtasks.retain(|s| s.id != subtask_id);
        if task.subtasks.len() != before {
            self.persist();
        }
    }

    pub fn set_notes(&mut self, id: TaskId, notes: impl Into<String>) {
        let Some(task) = self.find_mut(id) else {
            return;
        };
        task.notes = notes.into();
        self.persist();
    }

    fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn persist(&mut self) {
        self.storage.save_all_tasks(&self.tasks);
    }
}
