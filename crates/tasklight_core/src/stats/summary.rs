//! Collection counts, completion rate and category breakdown.
//!
//! # Responsibility
//! - Provide the headline numbers shown on the dashboard.
//!
//! # Invariants
//! - `completion_rate` is exactly 0.0 for an empty collection, never NaN.
//! - `category_breakdown` preserves `Category::ALL` enumeration order and
//!   omits zero-count categories.

use crate::model::task::{Category, Task};
use chrono::{DateTime, Local, Weekday};

/// Week start used when the caller has no explicit preference.
pub const DEFAULT_WEEK_START: Weekday = Weekday::Mon;

/// Number of tasks in the collection.
pub fn total_count(tasks: &[Task]) -> usize {
    tasks.len()
}

/// Number of not-done tasks.
pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.is_done).count()
}

/// Number of done tasks.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_done).count()
}

/// Number of tasks due within the current local day and not done.
pub fn today_count(tasks: &[Task], now: DateTime<Local>) -> usize {
    tasks
        .iter()
        .filter(|t| t.is_due_today(now) && !t.is_done)
        .count()
}

/// Number of overdue tasks.
pub fn overdue_count(tasks: &[Task], now: DateTime<Local>) -> usize {
    tasks.iter().filter(|t| t.is_overdue(now)).count()
}

/// Done fraction of the whole collection.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    completed_count(tasks) as f64 / tasks.len() as f64
}

/// Number of tasks completed since the start of the current week.
///
/// Tasks done before `completed_at` existed fall back to `created_at`. The
/// week boundary is the local start of day of the week's first day.
pub fn completed_this_week(tasks: &[Task], now: DateTime<Local>, week_start: Weekday) -> usize {
    let first_day = now.date_naive().week(week_start).first_day();
    tasks
        .iter()
        .filter(|t| t.is_done)
        .filter(|t| {
            let stamp = t.completed_at.unwrap_or(t.created_at);
            stamp.with_timezone(&Local).date_naive() >= first_day
        })
        .count()
}

/// Not-done task counts per category, in enumeration order.
///
/// Categories without active tasks are omitted.
pub fn category_breakdown(tasks: &[Task]) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let count = tasks
                .iter()
                .filter(|t| t.category == category && !t.is_done)
                .count();
            (count > 0).then_some((category, count))
        })
        .collect()
}
