use chrono::{Days, Local, TimeZone, Utc, Weekday};
use tasklight_core::stats::summary::{
    active_count, category_breakdown, completed_count, completed_this_week, completion_rate,
    overdue_count, today_count, total_count, DEFAULT_WEEK_START,
};
use tasklight_core::{Category, Priority, Task};

// Wednesday.
fn now() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 8, 5, 15, 0, 0)
        .single()
        .unwrap()
}

fn local_noon_utc(days_ago: u64) -> chrono::DateTime<Utc> {
    let day = now().date_naive() - Days::new(days_ago);
    day.and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

fn task(title: &str, category: Category) -> Task {
    Task::new(title, category, Priority::Medium)
}

#[test]
fn counts_partition_the_collection() {
    let mut done = task("done", Category::Work);
    done.set_done(true, local_noon_utc(0));
    let mut due = task("due today", Category::Personal);
    due.due_date = Some(now().with_timezone(&Utc));
    let mut late = task("late", Category::Errands);
    late.due_date = Some(local_noon_utc(3));
    let open = task("open", Category::Health);

    let tasks = vec![done, due, late, open];

    assert_eq!(total_count(&tasks), 4);
    assert_eq!(active_count(&tasks), 3);
    assert_eq!(completed_count(&tasks), 1);
    assert_eq!(today_count(&tasks, now()), 1);
    assert_eq!(overdue_count(&tasks, now()), 1);
}

#[test]
fn completion_rate_is_zero_for_empty_collection() {
    assert_eq!(completion_rate(&[]), 0.0);
}

#[test]
fn completion_rate_is_completed_over_total() {
    let mut tasks: Vec<Task> = (0..4).map(|i| task(&format!("t{i}"), Category::Work)).collect();
    for t in tasks.iter_mut().take(3) {
        t.set_done(true, Utc::now());
    }

    assert_eq!(completion_rate(&tasks), 0.75);
}

#[test]
fn default_week_start_is_monday() {
    assert_eq!(DEFAULT_WEEK_START, Weekday::Mon);
}

#[test]
fn completed_this_week_uses_monday_boundary() {
    // now() is Wednesday; Monday of that week is 2 days back.
    let mut monday = task("monday", Category::Work);
    monday.set_done(true, local_noon_utc(2));
    let mut sunday = task("sunday", Category::Work);
    sunday.set_done(true, local_noon_utc(3));
    let mut wednesday = task("wednesday", Category::Work);
    wednesday.set_done(true, local_noon_utc(0));

    let tasks = vec![monday, sunday, wednesday];
    assert_eq!(completed_this_week(&tasks, now(), DEFAULT_WEEK_START), 2);
}

#[test]
fn completed_this_week_falls_back_to_created_at() {
    let mut legacy = task("legacy", Category::Work);
    legacy.is_done = true;
    legacy.completed_at = None;
    legacy.created_at = local_noon_utc(0);

    assert_eq!(completed_this_week(&[legacy], now(), DEFAULT_WEEK_START), 1);
}

#[test]
fn category_breakdown_keeps_enumeration_order_and_omits_zeros() {
    let errand_one = task("post office", Category::Errands);
    let errand_two = task("groceries", Category::Errands);
    let personal = task("call mom", Category::Personal);
    let mut done_work = task("shipped", Category::Work);
    done_work.set_done(true, Utc::now());

    let tasks = vec![errand_one, errand_two, personal, done_work];
    let breakdown = category_breakdown(&tasks);

    assert_eq!(
        breakdown,
        vec![(Category::Personal, 1), (Category::Errands, 2)]
    );
}

#[test]
fn category_breakdown_is_empty_when_nothing_is_active() {
    let mut done = task("done", Category::Health);
    done.set_done(true, Utc::now());

    assert!(category_breakdown(&[done]).is_empty());
    assert!(category_breakdown(&[]).is_empty());
}
