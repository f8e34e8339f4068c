//! Completion streak and weekly activity buckets.
//!
//! # Responsibility
//! - Compute the consecutive-day completion streak anchored at today.
//! - Build the trailing 7-day heatmap.
//!
//! # Invariants
//! - The streak is strictly contiguous: a day without a completion ends it,
//!   and a streak can only be nonzero when today has a completion.
//! - The heatmap always has exactly 7 buckets, oldest first.

use crate::model::task::Task;
use chrono::{DateTime, Days, Local, NaiveDate};
use std::collections::HashSet;

/// Number of trailing days covered by the heatmap, today inclusive.
pub const HEATMAP_DAYS: u64 = 7;

/// One heatmap day: short weekday label plus completion count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapBucket {
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    pub count: usize,
}

/// Consecutive local calendar days ending today with at least one completion.
///
/// Today not having a completion yields 0 regardless of earlier days.
pub fn current_streak(tasks: &[Task], now: DateTime<Local>) -> u32 {
    let completed_days: HashSet<NaiveDate> = tasks
        .iter()
        .filter_map(|t| t.completed_at)
        .map(|stamp| stamp.with_timezone(&Local).date_naive())
        .collect();

    let mut streak = 0;
    let mut day = now.date_naive();
    while completed_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Completion counts for the 7 local calendar days ending today.
///
/// Buckets are ordered oldest to newest and emitted even when empty.
pub fn weekly_heatmap(tasks: &[Task], now: DateTime<Local>) -> Vec<HeatmapBucket> {
    let today = now.date_naive();
    (0..HEATMAP_DAYS)
        .rev()
        .map(|days_ago| {
            let day = today - Days::new(days_ago);
            let count = tasks
                .iter()
                .filter_map(|t| t.completed_at)
                .filter(|stamp| stamp.with_timezone(&Local).date_naive() == day)
                .count();
            HeatmapBucket {
                label: day.format("%a").to_string(),
                count,
            }
        })
        .collect()
}

/// Largest heatmap bucket count, floored at 1.
///
/// Consumers divide by this value, so it is never 0.
pub fn max_weekly_count(tasks: &[Task], now: DateTime<Local>) -> usize {
    weekly_heatmap(tasks, now)
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or(1)
        .max(1)
}
