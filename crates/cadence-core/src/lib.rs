//! # Cadence Core Library
//!
//! Core business logic for Cadence, a personal productivity tracker for
//! habits, tasks, and planned finance. It implements a CLI-first philosophy
//! where all operations are available via a standalone CLI binary, with any
//! GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! The engine is a pure function / state-machine layer: callers pass the
//! current time and stored records in, and get derived facts back (streak
//! counts, access status, overdue subsets). Nothing here reads the wall
//! clock, performs network I/O, or renders anything.
//!
//! ## Key Components
//!
//! - [`streak`]: consecutive-completion computation over target weekdays
//! - [`resolve_period`]: calendar period resolution for progress queries
//! - [`AccessWindow`]: time-boxed entitlement window (guest trial)
//! - [`resolve_entitlement`]: access tier plus per-resource quotas
//! - [`OverdueDetector`]: overdue scan with a once-per-day emission guard
//! - [`Database`]: SQLite key-value persistence for stored state

pub mod access;
pub mod clock;
pub mod date;
pub mod entitlement;
pub mod error;
pub mod events;
pub mod habit;
pub mod overdue;
pub mod period;
pub mod storage;

pub use access::{AccessWindow, WindowState, WindowStatus, GUEST_WINDOW_MS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use entitlement::{
    resolve_entitlement, EntitlementContext, EntitlementState, LimitCheck, Resource, ResourceCaps,
    SubscriptionProvider, SubscriptionStatus, Tier,
};
pub use error::{ConfigError, CoreError, DateError, Result, StorageError};
pub use events::Event;
pub use habit::{streak, streak_with_diagnostics, RecurringItem, StreakOutcome, STREAK_SCAN_CAP};
pub use overdue::{
    scan_overdue, DeadlineItem, NotificationGuard, OverdueDetector, OverdueReport,
    PlannedTransaction, TaskStatus,
};
pub use period::{days_in_window, resolve_period, DayWindow, PeriodKind, PeriodRange};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
