//! Overdue detection across tasks, habits, and planned transactions.
//!
//! Detection is pure: [`scan_overdue`] maps today's date plus the entity
//! collections to a report. Firing is guarded: [`OverdueDetector`] wraps the
//! scan with a once-per-calendar-day guard so the daily summary is emitted
//! at most once per device. Presentation timing (staggered toasts etc.) is
//! entirely the caller's concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{date_key, parse_iso_date, weekday_index};
use crate::habit::RecurringItem;

/// Progress state of a deadline-bearing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Done,
}

/// A task with a due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineItem {
    pub id: String,
    pub title: String,
    /// Due date as a `YYYY-MM-DD` key.
    pub due_date: String,
    pub completed: bool,
    pub status: TaskStatus,
}

/// A planned finance transaction; treated like a deadline item for
/// overdue purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTransaction {
    pub id: String,
    pub label: String,
    /// Planned date as a `YYYY-MM-DD` key.
    pub date: String,
    pub amount_cents: i64,
    pub completed: bool,
}

/// The overdue subsets for one scan, plus malformed-date diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverdueReport {
    pub tasks: Vec<DeadlineItem>,
    pub recurring: Vec<RecurringItem>,
    pub transactions: Vec<PlannedTransaction>,
    /// Raw date strings that failed validation; their entities were skipped.
    pub skipped: Vec<String>,
}

impl OverdueReport {
    pub fn total(&self) -> usize {
        self.tasks.len() + self.recurring.len() + self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pure overdue scan as of `today`.
///
/// - A task is overdue iff its due date is strictly before today, it is not
///   completed, and its status is not `Done`.
/// - A habit is overdue-for-today iff today is one of its target weekdays
///   and today is not in its completion set.
/// - A transaction is overdue iff its planned date is strictly before today
///   and it is not completed.
///
/// Entities whose stored date fails `YYYY-MM-DD` validation are skipped and
/// reported in [`OverdueReport::skipped`].
pub fn scan_overdue(
    today: NaiveDate,
    tasks: &[DeadlineItem],
    recurring: &[RecurringItem],
    transactions: &[PlannedTransaction],
) -> OverdueReport {
    let mut skipped = Vec::new();
    let today_weekday = weekday_index(today);
    let today_key = date_key(today);

    let overdue_tasks = tasks
        .iter()
        .filter(|task| {
            if task.completed || task.status == TaskStatus::Done {
                return false;
            }
            match parse_iso_date(&task.due_date) {
                Ok(due) => due < today,
                Err(_) => {
                    skipped.push(task.due_date.clone());
                    false
                }
            }
        })
        .cloned()
        .collect();

    let overdue_recurring = recurring
        .iter()
        .filter(|item| {
            item.target_days.contains(&today_weekday) && !item.completed_dates.contains(&today_key)
        })
        .cloned()
        .collect();

    let overdue_transactions = transactions
        .iter()
        .filter(|tx| {
            if tx.completed {
                return false;
            }
            match parse_iso_date(&tx.date) {
                Ok(planned) => planned < today,
                Err(_) => {
                    skipped.push(tx.date.clone());
                    false
                }
            }
        })
        .cloned()
        .collect();

    OverdueReport {
        tasks: overdue_tasks,
        recurring: overdue_recurring,
        transactions: overdue_transactions,
        skipped,
    }
}

/// Once-per-calendar-day emission guard, persisted in the KV store as a
/// `YYYY-MM-DD` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGuard {
    pub last_fired: Option<NaiveDate>,
}

impl NotificationGuard {
    /// Whether the summary already fired today.
    pub fn fired_on(&self, today: NaiveDate) -> bool {
        self.last_fired == Some(today)
    }
}

/// Guarded overdue detector: scan plus at-most-once-per-day firing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverdueDetector {
    guard: NotificationGuard,
}

impl OverdueDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted guard.
    pub fn with_guard(guard: NotificationGuard) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &NotificationGuard {
        &self.guard
    }

    /// Run the scan and fire the daily summary if permitted.
    ///
    /// Returns `Some(report)` exactly when the guard has not fired today and
    /// at least one item is overdue; the guard is then consumed for the rest
    /// of the day. A scan with zero overdue items does NOT consume the
    /// guard, so the first later transition into nonzero overdue still
    /// fires the same day.
    pub fn fire(
        &mut self,
        today: NaiveDate,
        tasks: &[DeadlineItem],
        recurring: &[RecurringItem],
        transactions: &[PlannedTransaction],
    ) -> Option<OverdueReport> {
        if self.guard.fired_on(today) {
            return None;
        }
        let report = scan_overdue(today, tasks, recurring, transactions);
        if report.is_empty() {
            return None;
        }
        self.guard.last_fired = Some(today);
        Some(report)
    }
}
