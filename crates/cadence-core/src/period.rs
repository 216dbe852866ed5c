//! Calendar period resolution.
//!
//! Maps a period kind plus a reference date to a concrete inclusive date
//! range, used to bound progress queries. Resolution is total: every kind
//! produces a range for every date, and the kind set is a closed enum so
//! there is no unknown-kind error path.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Kind of reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Monday-start ISO week containing the reference date.
    Week,
    /// Calendar month containing the reference date.
    Month,
    /// Calendar quarter containing the reference date.
    Quarter,
    /// Calendar year containing the reference date.
    Year,
    /// Caller-provided bounds; defaults to the next 30 days.
    Custom,
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodRange {
    /// Whether `date` falls inside this range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Resolve a period kind and reference date to its concrete bounds.
///
/// `today` is the user's local calendar date; month/quarter/year boundaries
/// follow the user-facing calendar, not UTC. For [`PeriodKind::Custom`],
/// `custom` bounds are returned verbatim when present, otherwise the range
/// defaults to `[today, today + 30 days]`.
pub fn resolve_period(
    kind: PeriodKind,
    today: NaiveDate,
    custom: Option<(NaiveDate, NaiveDate)>,
) -> PeriodRange {
    match kind {
        PeriodKind::Week => {
            let week = today.week(Weekday::Mon);
            PeriodRange {
                start_date: week.first_day(),
                end_date: week.last_day(),
            }
        }
        PeriodKind::Month => PeriodRange {
            start_date: first_of_month(today.year(), today.month()),
            end_date: last_of_month(today.year(), today.month()),
        },
        PeriodKind::Quarter => {
            let start_month = ((today.month() - 1) / 3) * 3 + 1;
            PeriodRange {
                start_date: first_of_month(today.year(), start_month),
                end_date: last_of_month(today.year(), start_month + 2),
            }
        }
        PeriodKind::Year => PeriodRange {
            start_date: first_of_month(today.year(), 1),
            end_date: last_of_month(today.year(), 12),
        },
        PeriodKind::Custom => match custom {
            Some((start_date, end_date)) => PeriodRange {
                start_date,
                end_date,
            },
            None => PeriodRange {
                start_date: today,
                end_date: today + Days::new(30),
            },
        },
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always 1..=12 here
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next.pred_opt().unwrap_or(next)
}

/// Lazy sequence of consecutive days anchored to the current week.
///
/// Starts at the Monday of the week containing the reference date and
/// yields `count` consecutive days. Used for calendar-grid rendering;
/// finite, deterministic, and restartable (the iterator is `Clone`).
pub fn days_in_window(count: usize, today: NaiveDate) -> DayWindow {
    DayWindow {
        next: today.week(Weekday::Mon).first_day(),
        remaining: count,
    }
}

/// Iterator over consecutive calendar days. See [`days_in_window`].
#[derive(Debug, Clone)]
pub struct DayWindow {
    next: NaiveDate,
    remaining: usize,
}

impl Iterator for DayWindow {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = current.succ_opt()?;
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DayWindow {}
