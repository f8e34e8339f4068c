//! Contextual status message selection.
//!
//! # Responsibility
//! - Pick the one-line message shown above the task list.
//!
//! # Invariants
//! - The decision list is priority-ordered and first match wins.
//! - Random picks go through the caller-provided `Rng`, so a seeded
//!   generator makes selection deterministic.

use crate::model::task::Task;
use crate::stats::summary::{active_count, completed_count, overdue_count, today_count};
use crate::stats::timeline::current_streak;
use chrono::{DateTime, Local};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Streak length at which the streak message takes over.
pub const STREAK_MESSAGE_THRESHOLD: u32 = 7;

const IDLE_QUOTES: [&str; 6] = [
    "Small steps every day lead to big changes.",
    "Focus on progress, not perfection.",
    "The secret of getting ahead is getting started.",
    "One task at a time. You've got this.",
    "Discipline is choosing what you want most over what you want now.",
    "Done is better than perfect.",
];

const CELEBRATION_MESSAGES: [&str; 4] = [
    "\u{1F389} All tasks complete! Take a well-deserved break.",
    "\u{2728} Inbox zero achieved. You're amazing!",
    "\u{1F3C6} Everything's done. What a productive day!",
    "\u{1F4AA} All clear! Time to set new goals.",
];

/// Selects the contextual message for the current collection state.
pub fn motivational_message<R: Rng + ?Sized>(
    tasks: &[Task],
    now: DateTime<Local>,
    rng: &mut R,
) -> String {
    if tasks.is_empty() {
        return pick(&IDLE_QUOTES, rng);
    }
    if active_count(tasks) == 0 && completed_count(tasks) > 0 {
        return pick(&CELEBRATION_MESSAGES, rng);
    }

    let streak = current_streak(tasks, now);
    if streak >= STREAK_MESSAGE_THRESHOLD {
        return format!("\u{1F525} {streak}-day streak! You're unstoppable.");
    }

    let overdue = overdue_count(tasks, now);
    if overdue > 0 {
        return format!("You have {overdue} overdue. Tackle them first!");
    }

    let today = today_count(tasks, now);
    if today > 0 {
        let noun = if today == 1 { "task" } else { "tasks" };
        return format!("{today} {noun} due today. You got this!");
    }

    pick(&IDLE_QUOTES, rng)
}

fn pick<R: Rng + ?Sized>(pool: &[&str], rng: &mut R) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}
