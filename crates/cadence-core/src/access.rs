//! Time-boxed access windows.
//!
//! An access window is a single-use, non-renewable grant of elevated
//! capability: once started it runs for a fixed duration and expires, with
//! no resume. The guest trial is a 24-hour window; the state machine is
//! `NotStarted -> Active -> Expired`, one-directional except for an
//! explicit [`AccessWindow::clear`] (used when sign-in supersedes the
//! window).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Guest-mode window duration: 24 hours in milliseconds.
pub const GUEST_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_MINUTE: i64 = 60 * 1000;

/// Lifecycle state of an access window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    NotStarted,
    Active,
    Expired,
}

/// A single time-boxed grant: a start instant plus a fixed duration.
///
/// Serialized to the KV store as-is; `started_at` crosses the boundary as
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessWindow {
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub started_at: Option<DateTime<Utc>>,
    pub duration_ms: i64,
}

/// Pure projection of a window at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStatus {
    pub state: WindowState,
    pub is_active: bool,
    pub has_expired: bool,
    /// Remaining time, for callers that want the raw value.
    pub remaining_ms: i64,
    /// Whole hours remaining, for display.
    pub hours_left: i64,
    /// Minutes remaining after the whole hours, for display.
    pub minutes_left: i64,
}

impl AccessWindow {
    /// A window that has not been started yet.
    pub fn new(duration_ms: i64) -> Self {
        Self {
            started_at: None,
            duration_ms,
        }
    }

    /// The standard 24-hour guest window.
    pub fn guest() -> Self {
        Self::new(GUEST_WINDOW_MS)
    }

    /// Start the window at `now`.
    ///
    /// Only legal from `NotStarted`; calling on an already-started window
    /// is a no-op that returns the current status unchanged.
    pub fn start(&mut self, now: DateTime<Utc>) -> WindowStatus {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.status(now)
    }

    /// Reset to `NotStarted`, discarding the start instant.
    pub fn clear(&mut self) {
        self.started_at = None;
    }

    /// Project the window's state at `now`. Idempotent and side-effect-free;
    /// safe to call every render tick.
    ///
    /// A `now` earlier than `started_at` (clock skew) clamps elapsed time to
    /// zero, so `remaining` never exceeds the duration.
    pub fn status(&self, now: DateTime<Utc>) -> WindowStatus {
        let remaining_ms = match self.started_at {
            None => self.duration_ms,
            Some(started_at) => {
                let elapsed = (now - started_at).num_milliseconds().max(0);
                (self.duration_ms - elapsed).max(0)
            }
        };

        let started = self.started_at.is_some();
        let is_active = started && remaining_ms > 0;
        let has_expired = started && remaining_ms == 0;
        let state = if !started {
            WindowState::NotStarted
        } else if is_active {
            WindowState::Active
        } else {
            WindowState::Expired
        };

        WindowStatus {
            state,
            is_active,
            has_expired,
            remaining_ms,
            hours_left: remaining_ms / MS_PER_HOUR,
            minutes_left: (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE,
        }
    }
}

impl Default for AccessWindow {
    fn default() -> Self {
        Self::guest()
    }
}
