use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The UI polls for events; outer adapters (notifications, sync) subscribe
/// to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The guest access window was started for the first time.
    GuestWindowStarted {
        at: DateTime<Utc>,
        duration_ms: i64,
    },
    /// The guest window was cleared (e.g. sign-in superseded it).
    GuestWindowCleared {
        at: DateTime<Utc>,
    },
    /// A habit completion mark was toggled.
    HabitCompletionToggled {
        habit_id: String,
        date: NaiveDate,
        completed: bool,
        at: DateTime<Utc>,
    },
    /// The daily overdue summary fired.
    OverdueSummaryFired {
        tasks: usize,
        recurring: usize,
        transactions: usize,
        at: DateTime<Utc>,
    },
    /// A stored date string failed validation and its entity was skipped.
    MalformedDateSkipped {
        entity_id: String,
        raw: String,
        at: DateTime<Utc>,
    },
}
