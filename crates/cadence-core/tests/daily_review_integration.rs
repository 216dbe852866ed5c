//! Integration tests for the daily review workflow.
//!
//! Exercises the full load -> evaluate -> save cycle over the KV store:
//! guest window persistence across sessions, entitlement gating before an
//! add, and the once-per-day overdue summary guard.

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use cadence_core::storage::{KEY_GUEST_WINDOW, KEY_HABITS, KEY_NOTIFICATION_GUARD};
use cadence_core::{
    resolve_entitlement, scan_overdue, streak, AccessWindow, Database, DeadlineItem,
    EntitlementContext, KeyValueStore, MemoryStore, NotificationGuard, OverdueDetector,
    RecurringItem, Resource, ResourceCaps, SubscriptionStatus, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn guest_window_survives_a_restart() {
    let mut db = Database::open_memory().unwrap();
    let t0 = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();

    // First session: start the window and persist it.
    let mut window = AccessWindow::guest();
    window.start(t0);
    db.set(KEY_GUEST_WINDOW, &serde_json::to_string(&window).unwrap())
        .unwrap();

    // "Restart": reload and project six hours later.
    let raw = db.get(KEY_GUEST_WINDOW).unwrap().unwrap();
    let reloaded: AccessWindow = serde_json::from_str(&raw).unwrap();
    let status = reloaded.status(t0 + Duration::hours(6));
    assert!(status.is_active);
    assert_eq!(status.hours_left, 18);

    // One day later the reloaded window has expired.
    let status = reloaded.status(t0 + Duration::hours(24));
    assert!(status.has_expired);
}

#[test]
fn entitlement_gates_an_add_against_the_stored_collection() {
    let mut db = Database::open_memory().unwrap();
    let t0 = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();

    // Three habits already stored; base tier caps habits at three.
    let habits: Vec<RecurringItem> = (0..3)
        .map(|i| RecurringItem::new(format!("habit-{i}"), format!("Habit {i}"), vec![1], t0))
        .collect();
    db.set(KEY_HABITS, &serde_json::to_string(&habits).unwrap())
        .unwrap();

    let stored: Vec<RecurringItem> =
        serde_json::from_str(&db.get(KEY_HABITS).unwrap().unwrap()).unwrap();

    let expired_guest = {
        let mut window = AccessWindow::guest();
        window.start(t0 - Duration::hours(30));
        window.status(t0)
    };
    let ctx = EntitlementContext {
        signed_in: false,
        subscription: SubscriptionStatus::default(),
        guest_window: expired_guest,
    };
    let state = resolve_entitlement(&ctx, ResourceCaps::default());
    let check = state.check_limit(Resource::Habits, stored.len() as u32);
    assert!(!check.can_add);

    // An active guest window lifts the cap.
    let active_guest = {
        let mut window = AccessWindow::guest();
        window.start(t0);
        window.status(t0 + Duration::hours(1))
    };
    let state = resolve_entitlement(
        &EntitlementContext {
            guest_window: active_guest,
            ..ctx
        },
        ResourceCaps::default(),
    );
    assert!(state.check_limit(Resource::Habits, stored.len() as u32).can_add);
}

#[test]
fn overdue_summary_fires_once_per_day_across_sessions() {
    let mut db = Database::open_memory().unwrap();
    let today = date(2024, 1, 10);

    let tasks = vec![DeadlineItem {
        id: "t1".to_string(),
        title: "File taxes".to_string(),
        due_date: "2024-01-08".to_string(),
        completed: false,
        status: TaskStatus::InProgress,
    }];

    // Session one: guard starts unset, summary fires, guard is persisted.
    let guard: NotificationGuard = db
        .get(KEY_NOTIFICATION_GUARD)
        .unwrap()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    let mut detector = OverdueDetector::with_guard(guard);
    let report = detector.fire(today, &tasks, &[], &[]);
    assert!(report.is_some());
    db.set(
        KEY_NOTIFICATION_GUARD,
        &serde_json::to_string(detector.guard()).unwrap(),
    )
    .unwrap();

    // Session two, same day: reloaded guard suppresses the summary.
    let guard: NotificationGuard =
        serde_json::from_str(&db.get(KEY_NOTIFICATION_GUARD).unwrap().unwrap()).unwrap();
    let mut detector = OverdueDetector::with_guard(guard);
    assert!(detector.fire(today, &tasks, &[], &[]).is_none());

    // The pure scan is unaffected by the guard.
    assert_eq!(scan_overdue(today, &tasks, &[], &[]).total(), 1);

    // Next day: fires again.
    assert!(detector.fire(date(2024, 1, 11), &tasks, &[], &[]).is_some());
}

#[test]
fn streak_over_a_stored_habit_round_trip() {
    // Same flow through the in-memory store implementation of the KV trait.
    let mut db = MemoryStore::new();
    let t0 = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();

    let mut habit = RecurringItem::new(
        "habit-run".to_string(),
        "Morning run".to_string(),
        vec![1, 3, 5],
        t0,
    );
    habit.toggle_completion(date(2024, 1, 1));
    habit.toggle_completion(date(2024, 1, 3));
    db.set(KEY_HABITS, &serde_json::to_string(&vec![habit]).unwrap())
        .unwrap();

    let stored: Vec<RecurringItem> =
        serde_json::from_str(&db.get(KEY_HABITS).unwrap().unwrap()).unwrap();
    assert_eq!(streak(&stored[0], date(2024, 1, 3)), 2);
    assert_eq!(streak(&stored[0], date(2024, 1, 5)), 2);
}
