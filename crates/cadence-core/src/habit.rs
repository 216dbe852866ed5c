//! Recurring items and streak computation.
//!
//! A recurring item (habit) targets a fixed set of weekdays and records
//! completions as `YYYY-MM-DD` keys. The streak is the count of consecutive
//! qualifying days, scanning backward from today, where only today itself
//! is allowed to be incomplete without breaking the run.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::date::{date_key, parse_iso_date, weekday_index};

/// Upper bound on the backward scan. Streaks longer than a year are
/// truncated to 365; documented limitation, not an error.
pub const STREAK_SCAN_CAP: usize = 365;

/// A habit with target weekdays and a completion history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringItem {
    pub id: String,
    pub name: String,
    /// Target weekdays, 0 = Sunday .. 6 = Saturday, no duplicates.
    pub target_days: Vec<u8>,
    /// Completion dates as `YYYY-MM-DD` keys. Malformed entries are
    /// tolerated in storage and skipped during computation.
    pub completed_dates: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl RecurringItem {
    /// Create a new habit with a deduplicated, sorted target-day set.
    pub fn new(id: String, name: String, target_days: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        let mut days: Vec<u8> = target_days.into_iter().filter(|d| *d <= 6).collect();
        days.sort_unstable();
        days.dedup();
        Self {
            id,
            name,
            target_days: days,
            completed_dates: BTreeSet::new(),
            created_at,
        }
    }

    /// Whether `date`'s weekday is one of this item's target days.
    pub fn is_target_day(&self, date: NaiveDate) -> bool {
        self.target_days.contains(&weekday_index(date))
    }

    /// Whether `date` is recorded as completed.
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date_key(date))
    }

    /// Toggle a completion mark for `date`. Returns true if the date is
    /// marked completed after the toggle.
    pub fn toggle_completion(&mut self, date: NaiveDate) -> bool {
        let key = date_key(date);
        if self.completed_dates.remove(&key) {
            false
        } else {
            self.completed_dates.insert(key);
            true
        }
    }
}

/// Result of a streak computation, including non-fatal diagnostics for
/// completion entries that failed date validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakOutcome {
    /// Consecutive qualifying completed days, scanning backward from today.
    pub count: u32,
    /// Raw completion strings that were skipped as malformed.
    pub skipped: Vec<String>,
}

/// Current streak for an item, as of `today`.
///
/// See [`streak_with_diagnostics`] for the malformed-entry report.
pub fn streak(item: &RecurringItem, today: NaiveDate) -> u32 {
    streak_with_diagnostics(item, today).count
}

/// Current streak plus diagnostics.
///
/// Walks backward day-by-day from `today` (inclusive) for at most
/// [`STREAK_SCAN_CAP`] days:
///
/// - a day whose weekday is not targeted neither breaks nor extends the
///   streak;
/// - a targeted, completed day extends it;
/// - a targeted, incomplete day breaks it — unless it is the very first
///   calendar day scanned (today may simply not be done yet). The
///   tolerance applies to today only, not to the first *qualifying* day:
///   if today is not a target day, a miss on the most recent target day
///   still breaks the streak.
pub fn streak_with_diagnostics(item: &RecurringItem, today: NaiveDate) -> StreakOutcome {
    let mut skipped = Vec::new();
    let mut completed = BTreeSet::new();
    for raw in &item.completed_dates {
        match parse_iso_date(raw) {
            Ok(date) => {
                completed.insert(date);
            }
            Err(_) => skipped.push(raw.clone()),
        }
    }

    // Nothing completed (or nothing parseable) means no streak; skip the scan.
    if completed.is_empty() || item.target_days.is_empty() {
        return StreakOutcome { count: 0, skipped };
    }

    let mut count = 0u32;
    for offset in 0..STREAK_SCAN_CAP {
        let day = match today.checked_sub_days(Days::new(offset as u64)) {
            Some(day) => day,
            None => break,
        };
        if !item.target_days.contains(&weekday_index(day)) {
            continue;
        }
        if completed.contains(&day) {
            count += 1;
        } else if offset == 0 {
            // Today's miss is tolerated; prior history still counts.
            continue;
        } else {
            break;
        }
    }

    StreakOutcome { count, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(target_days: Vec<u8>, completed: &[&str]) -> RecurringItem {
        let mut item = RecurringItem::new(
            "habit-1".to_string(),
            "Morning run".to_string(),
            target_days,
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap(),
        );
        item.completed_dates = completed.iter().map(|s| s.to_string()).collect();
        item
    }

    #[test]
    fn empty_completion_history_is_zero() {
        let item = item(vec![1, 3, 5], &[]);
        assert_eq!(streak(&item, date(2024, 1, 3)), 0);
    }

    #[test]
    fn empty_target_days_is_always_zero() {
        let item = item(vec![], &["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(streak(&item, date(2024, 1, 3)), 0);
    }

    #[test]
    fn consecutive_qualifying_completions_count() {
        // Mon/Wed/Fri habit, completed Mon 2024-01-01 and Wed 2024-01-03,
        // evaluated on the Wednesday itself.
        let item = item(vec![1, 3, 5], &["2024-01-01", "2024-01-03"]);
        assert_eq!(streak(&item, date(2024, 1, 3)), 2);
    }

    #[test]
    fn todays_miss_is_tolerated() {
        // Same habit evaluated on Friday 2024-01-05, not yet completed today.
        let item = item(vec![1, 3, 5], &["2024-01-01", "2024-01-03"]);
        assert_eq!(streak(&item, date(2024, 1, 5)), 2);
    }

    #[test]
    fn miss_before_today_breaks_the_streak() {
        // Wed 2024-01-03 missed; evaluated Friday with Friday completed.
        let item = item(vec![1, 3, 5], &["2024-01-01", "2024-01-05"]);
        assert_eq!(streak(&item, date(2024, 1, 5)), 1);
    }

    #[test]
    fn tolerance_does_not_extend_to_first_qualifying_day() {
        // Evaluated on Saturday (not a target day). The most recent target
        // day is Friday; its miss breaks the streak despite being the first
        // qualifying day inspected.
        let item = item(vec![1, 3, 5], &["2024-01-01", "2024-01-03"]);
        assert_eq!(streak(&item, date(2024, 1, 6)), 0);
    }

    #[test]
    fn non_target_days_between_completions_do_not_break() {
        // Mon-only habit completed three Mondays running, evaluated on the
        // third Monday itself.
        let item = item(vec![1], &["2024-01-01", "2024-01-08", "2024-01-15"]);
        assert_eq!(streak(&item, date(2024, 1, 15)), 3);
    }

    #[test]
    fn evaluated_on_non_target_day_after_completed_target_day() {
        // Wed 2024-01-17 is not a target day, so it is skipped; the three
        // completed Mondays behind it still form the streak.
        let item = item(vec![1], &["2024-01-01", "2024-01-08", "2024-01-15"]);
        assert_eq!(streak(&item, date(2024, 1, 17)), 3);
    }

    #[test]
    fn malformed_dates_are_skipped_and_reported() {
        let item = item(vec![1, 3, 5], &["2024-01-03", "bogus", "2024-1-1"]);
        let outcome = streak_with_diagnostics(&item, date(2024, 1, 3));
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.skipped, vec!["2024-1-1".to_string(), "bogus".to_string()]);
    }

    #[test]
    fn unpadded_completion_entries_are_diagnostics_not_matches() {
        // "2024-1-1" can never equal a zero-padded storage key, so it must
        // be reported as skipped rather than silently counted.
        let item = item(vec![1, 3, 5], &["2024-1-1", "2024-01-03"]);
        let outcome = streak_with_diagnostics(&item, date(2024, 1, 3));
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.skipped, vec!["2024-1-1".to_string()]);
    }

    #[test]
    fn all_malformed_is_zero_without_scan() {
        let item = item(vec![1, 3, 5], &["bogus", "also bogus"]);
        let outcome = streak_with_diagnostics(&item, date(2024, 1, 3));
        assert_eq!(outcome.count, 0);
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[test]
    fn scan_is_capped_at_a_year() {
        // Every-day habit completed every day for two years.
        let mut item = item(vec![0, 1, 2, 3, 4, 5, 6], &[]);
        let mut day = date(2022, 1, 4);
        let end = date(2024, 1, 3);
        while day <= end {
            item.completed_dates.insert(date_key(day));
            day = day.succ_opt().unwrap();
        }
        assert_eq!(streak(&item, end), STREAK_SCAN_CAP as u32);
    }

    #[test]
    fn toggle_completion_flips_membership() {
        let mut item = item(vec![1], &[]);
        let monday = date(2024, 1, 1);
        assert!(item.toggle_completion(monday));
        assert!(item.is_completed_on(monday));
        assert!(!item.toggle_completion(monday));
        assert!(!item.is_completed_on(monday));
    }

    #[test]
    fn constructor_dedupes_and_drops_invalid_weekdays() {
        let item = RecurringItem::new(
            "h".into(),
            "h".into(),
            vec![5, 1, 5, 9, 3],
            Utc::now(),
        );
        assert_eq!(item.target_days, vec![1, 3, 5]);
    }

    proptest! {
        #[test]
        fn streak_never_exceeds_completion_count(
            completed_offsets in proptest::collection::btree_set(0u64..400, 0..40)
        ) {
            let today = date(2024, 6, 1);
            let mut it = item(vec![0, 1, 2, 3, 4, 5, 6], &[]);
            for off in &completed_offsets {
                it.completed_dates
                    .insert(date_key(today - Days::new(*off)));
            }
            let count = streak(&it, today);
            prop_assert!(count as usize <= it.completed_dates.len());
            prop_assert!(count as usize <= STREAK_SCAN_CAP);
        }

        #[test]
        fn fully_completed_prefix_counts_every_day(prefix in 1u64..365) {
            let today = date(2024, 6, 1);
            let mut it = item(vec![0, 1, 2, 3, 4, 5, 6], &[]);
            for off in 0..prefix {
                it.completed_dates.insert(date_key(today - Days::new(off)));
            }
            prop_assert_eq!(streak(&it, today), prefix as u32);
        }
    }
}
