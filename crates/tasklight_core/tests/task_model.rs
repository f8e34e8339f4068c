use chrono::{Duration, Local, TimeZone, Utc};
use tasklight_core::{Category, Priority, Task};

fn fixed_local_noon() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 8, 5, 12, 0, 0)
        .single()
        .unwrap()
}

#[test]
fn due_today_matches_local_calendar_day() {
    let now = fixed_local_noon();

    let mut task = Task::new("pick up parcel", Category::Errands, Priority::Medium);
    assert!(!task.is_due_today(now));

    // Late the same local day still counts as today.
    task.due_date = Some(
        Local
            .with_ymd_and_hms(2026, 8, 5, 23, 30, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc),
    );
    assert!(task.is_due_today(now));

    // One minute into the next local day does not.
    task.due_date = Some(
        Local
            .with_ymd_and_hms(2026, 8, 6, 0, 1, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc),
    );
    assert!(!task.is_due_today(now));
}

#[test]
fn overdue_is_strict_and_cleared_by_completion() {
    let now = fixed_local_noon();
    let now_utc = now.with_timezone(&Utc);

    let mut task = Task::new("file taxes", Category::Work, Priority::High);
    task.due_date = Some(now_utc + Duration::hours(1));
    assert!(!task.is_overdue(now));

    task.due_date = Some(now_utc - Duration::minutes(1));
    assert!(task.is_overdue(now));

    task.set_done(true, now_utc);
    assert!(!task.is_overdue(now));
}

#[test]
fn done_flag_and_completed_at_stay_paired() {
    let mut task = Task::new("read chapter", Category::Learning, Priority::Low);
    assert_eq!(task.completed_at, None);

    let at = Utc::now();
    task.set_done(true, at);
    assert!(task.is_done && task.completed_at == Some(at));
    task.validate().unwrap();

    task.set_done(false, at);
    assert!(!task.is_done && task.completed_at.is_none());
    task.validate().unwrap();
}

#[test]
fn subtask_progress_counts_completed_fraction() {
    let mut task = Task::new("pack for trip", Category::Personal, Priority::Medium);
    task.subtasks = vec![
        tasklight_core::Subtask::new("clothes"),
        tasklight_core::Subtask::new("chargers"),
        tasklight_core::Subtask::new("documents"),
        tasklight_core::Subtask::new("snacks"),
    ];
    task.subtasks[0].is_done = true;
    task.subtasks[2].is_done = true;

    assert!(task.has_subtasks());
    assert_eq!(task.subtask_progress(), 0.5);
}

#[test]
fn serde_uses_snake_case_enum_values() {
    let json = serde_json::to_string(&Category::Learning).unwrap();
    assert_eq!(json, "\"learning\"");
    let json = serde_json::to_string(&Priority::High).unwrap();
    assert_eq!(json, "\"high\"");
}
