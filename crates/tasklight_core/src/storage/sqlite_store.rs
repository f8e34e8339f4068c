//! SQLite-backed implementation of the persistence port.
//!
//! # Responsibility
//! - Map the task collection and user settings onto SQLite tables.
//! - Replace the persisted collection atomically on every save.
//!
//! # Invariants
//! - `save` paths run inside one immediate transaction; readers never observe
//!   a partially written collection.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Port-trait methods swallow errors and log them; typed errors are only
//!   visible on the `try_` surface.

use crate::db::{open_db, open_db_in_memory};
use crate::model::profile::{ThemePreference, UserProfile};
use crate::model::task::{Category, Priority, Subtask, Task};
use crate::storage::{StorageError, StoragePort, StorageResult};
use chrono::{DateTime, Utc};
use log::error;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::path::Path;
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    is_done,
    category,
    priority,
    due_at,
    created_at,
    completed_at,
    notes
FROM tasks
ORDER BY position ASC";

const SUBTASK_SELECT_SQL: &str = "SELECT uuid, title, is_done
FROM subtasks
WHERE task_uuid = ?1
ORDER BY position ASC";

const SETTING_DISPLAY_NAME: &str = "profile_display_name";
const SETTING_PROFILE_THEME: &str = "profile_theme";
const SETTING_THEME: &str = "theme";
const SETTING_ONBOARDING: &str = "onboarding_complete";

/// SQLite-backed storage for tasks, profile and preferences.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory database, mainly for tests and probes.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Loads the whole collection in persisted order.
    pub fn try_load_all_tasks(&self) -> StorageResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(TASK_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            let mut task = parse_task_row(row)?;
            task.subtasks = self.load_subtasks(task.id)?;
            task.validate()?;
            tasks.push(task);
        }

        Ok(tasks)
    }

    /// Replaces the persisted collection with `tasks` in one transaction.
    pub fn try_save_all_tasks(&mut self, tasks: &[Task]) -> StorageResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM subtasks;", [])?;
        tx.execute("DELETE FROM tasks;", [])?;

        for (position, task) in tasks.iter().enumerate() {
            tx.execute(
                "INSERT INTO tasks (
                    uuid,
                    title,
                    is_done,
                    category,
                    priority,
                    due_at,
                    created_at,
                    completed_at,
                    notes,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    task.id.to_string(),
                    task.title.as_str(),
                    bool_to_int(task.is_done),
                    category_to_db(task.category),
                    priority_to_db(task.priority),
                    task.due_date.map(|stamp| stamp.timestamp_millis()),
                    task.created_at.timestamp_millis(),
                    task.completed_at.map(|stamp| stamp.timestamp_millis()),
                    task.notes.as_str(),
                    position as i64,
                ],
            )?;

            for (subtask_position, subtask) in task.subtasks.iter().enumerate() {
                tx.execute(
                    "INSERT INTO subtasks (uuid, task_uuid, title, is_done, position)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        subtask.id.to_string(),
                        task.id.to_string(),
                        subtask.title.as_str(),
                        bool_to_int(subtask.is_done),
                        subtask_position as i64,
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn try_load_profile(&self) -> StorageResult<Option<UserProfile>> {
        let Some(display_name) = self.read_setting(SETTING_DISPLAY_NAME)? else {
            return Ok(None);
        };

        let selected_theme = match self.read_setting(SETTING_PROFILE_THEME)? {
            Some(value) => parse_theme(&value)?,
            None => ThemePreference::default(),
        };

        Ok(Some(UserProfile {
            display_name,
            selected_theme,
        }))
    }

    pub fn try_save_profile(&mut self, profile: &UserProfile) -> StorageResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        write_setting_in_tx(&tx, SETTING_DISPLAY_NAME, profile.display_name.as_str())?;
        write_setting_in_tx(
            &tx,
            SETTING_PROFILE_THEME,
            profile.selected_theme.as_storage_str(),
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn try_load_theme_preference(&self) -> StorageResult<ThemePreference> {
        match self.read_setting(SETTING_THEME)? {
            Some(value) => parse_theme(&value),
            None => Ok(ThemePreference::default()),
        }
    }

    pub fn try_save_theme_preference(&mut self, theme: ThemePreference) -> StorageResult<()> {
        self.write_setting(SETTING_THEME, theme.as_storage_str())
    }

    pub fn try_is_onboarding_complete(&self) -> StorageResult<bool> {
        match self.read_setting(SETTING_ONBOARDING)? {
            Some(value) => int_text_to_bool(&value).ok_or_else(|| {
                StorageError::InvalidData(format!(
                    "invalid onboarding flag `{value}` in settings.{SETTING_ONBOARDING}"
                ))
            }),
            None => Ok(false),
        }
    }

    pub fn try_set_onboarding_complete(&mut self, complete: bool) -> StorageResult<()> {
        self.write_setting(SETTING_ONBOARDING, if complete { "1" } else { "0" })
    }

    /// Clears tasks, subtasks and every settings row in one transaction.
    pub fn try_reset_all(&mut self) -> StorageResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM subtasks;", [])?;
        tx.execute("DELETE FROM tasks;", [])?;
        tx.execute("DELETE FROM settings;", [])?;
        tx.commit()?;
        Ok(())
    }

    fn load_subtasks(&self, task_id: Uuid) -> StorageResult<Vec<Subtask>> {
        let mut stmt = self.conn.prepare(SUBTASK_SELECT_SQL)?;
        let mut rows = stmt.query([task_id.to_string()])?;
        let mut subtasks = Vec::new();

        while let Some(row) = rows.next()? {
            subtasks.push(parse_subtask_row(row)?);
        }

        Ok(subtasks)
    }

    fn read_setting(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn write_setting(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StoragePort for SqliteStorage {
    fn load_all_tasks(&self) -> Vec<Task> {
        self.try_load_all_tasks().unwrap_or_else(|err| {
            error!("event=tasks_load module=storage status=error error={err}");
            Vec::new()
        })
    }

    fn save_all_tasks(&mut self, tasks: &[Task]) {
        if let Err(err) = self.try_save_all_tasks(tasks) {
            error!(
                "event=tasks_save module=storage status=error count={} error={err}",
                tasks.len()
            );
        }
    }

    fn load_profile(&self) -> Option<UserProfile> {
        self.try_load_profile().unwrap_or_else(|err| {
            error!("event=profile_load module=storage status=error error={err}");
            None
        })
    }

    fn save_profile(&mut self, profile: &UserProfile) {
        if let Err(err) = self.try_save_profile(profile) {
            error!("event=profile_save module=storage status=error error={err}");
        }
    }

    fn load_theme_preference(&self) -> ThemePreference {
        self.try_load_theme_preference().unwrap_or_else(|err| {
            error!("event=theme_load module=storage status=error error={err}");
            ThemePreference::default()
        })
    }

    fn save_theme_preference(&mut self, theme: ThemePreference) {
        if let Err(err) = self.try_save_theme_preference(theme) {
            error!("event=theme_save module=storage status=error error={err}");
        }
    }

    fn is_onboarding_complete(&self) -> bool {
        self.try_is_onboarding_complete().unwrap_or_else(|err| {
            error!("event=onboarding_load module=storage status=error error={err}");
            false
        })
    }

    fn set_onboarding_complete(&mut self, complete: bool) {
        if let Err(err) = self.try_set_onboarding_complete(complete) {
            error!("event=onboarding_save module=storage status=error error={err}");
        }
    }

    fn reset_all(&mut self) {
        if let Err(err) = self.try_reset_all() {
            error!("event=storage_reset module=storage status=error error={err}");
        }
    }
}

fn write_setting_in_tx(
    tx: &rusqlite::Transaction<'_>,
    key: &str,
    value: &str,
) -> StorageResult<()> {
    tx.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )?;
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> StorageResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StorageError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let category_text: String = row.get("category")?;
    let category = parse_category(&category_text).ok_or_else(|| {
        StorageError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category"
        ))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        StorageError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    Ok(Task {
        id,
        title: row.get("title")?,
        is_done: int_to_bool(row.get("is_done")?, "tasks.is_done")?,
        category,
        priority,
        due_date: parse_optional_millis(row.get("due_at")?, "tasks.due_at")?,
        created_at: parse_millis(row.get("created_at")?, "tasks.created_at")?,
        completed_at: parse_optional_millis(row.get("completed_at")?, "tasks.completed_at")?,
        subtasks: Vec::new(),
        notes: row.get("notes")?,
    })
}

fn parse_subtask_row(row: &Row<'_>) -> StorageResult<Subtask> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StorageError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in subtasks.uuid"
        ))
    })?;

    Ok(Subtask {
        id,
        title: row.get("title")?,
        is_done: int_to_bool(row.get("is_done")?, "subtasks.is_done")?,
    })
}

fn parse_theme(value: &str) -> StorageResult<ThemePreference> {
    ThemePreference::from_storage_str(value).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid theme value `{value}` in settings"))
    })
}

fn parse_millis(millis: i64, column: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid timestamp `{millis}` in {column}"))
    })
}

fn parse_optional_millis(millis: Option<i64>, column: &str) -> StorageResult<Option<DateTime<Utc>>> {
    millis.map(|value| parse_millis(value, column)).transpose()
}

fn category_to_db(category: Category) -> &'static str {
    match category {
        Category::Personal => "personal",
        Category::Work => "work",
        Category::Health => "health",
        Category::Learning => "learning",
        Category::Errands => "errands",
    }
}

fn parse_category(value: &str) -> Option<Category> {
    match value {
        "personal" => Some(Category::Personal),
        "work" => Some(Category::Work),
        "health" => Some(Category::Health),
        "learning" => Some(Category::Learning),
        "errands" => Some(Category::Errands),
        _ => None,
    }
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> StorageResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn int_text_to_bool(value: &str) -> Option<bool> {
    match value {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{category_to_db, parse_category, parse_priority, priority_to_db};
    use crate::model::task::{Category, Priority};

    #[test]
    fn category_db_strings_round_trip() {
        for category in Category::ALL {
            assert_eq!(parse_category(category_to_db(category)), Some(category));
        }
    }

    #[test]
    fn priority_db_strings_round_trip() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(parse_priority(priority_to_db(priority)), Some(priority));
        }
    }

    #[test]
    fn unknown_db_strings_are_rejected() {
        assert_eq!(parse_category("chores"), None);
        assert_eq!(parse_priority("urgent"), None);
    }
}
