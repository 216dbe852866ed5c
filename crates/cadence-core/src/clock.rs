//! Injectable clock abstraction.
//!
//! The original design read wall-clock time wherever it was needed, which
//! made day-boundary behavior impossible to test. Every core function now
//! takes `now` (or `today`) as an explicit parameter; this trait exists for
//! the outer layers that have to produce that value, and for tests that
//! need to pin it.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant.
pub trait Clock {
    /// Current instant as UTC wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the local timezone.
    ///
    /// Period resolution and streak scanning operate on user-facing local
    /// dates, not UTC dates. Derived from `self.now()`, so an impl that
    /// only overrides `now()` stays consistent with it.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}
