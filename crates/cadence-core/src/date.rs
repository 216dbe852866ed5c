//! ISO date helpers for the storage boundary.
//!
//! All dates cross the persistence boundary as `YYYY-MM-DD` strings. This
//! module owns the strict parsing of that representation; a string that
//! fails validation is reported as a [`DateError`] and the owning entity is
//! skipped, never fatal.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::DateError;

/// Parse a strict `YYYY-MM-DD` date string.
///
/// chrono's `%Y-%m-%d` accepts unpadded components ("2024-1-3"), which
/// would never match the zero-padded keys produced by [`date_key`], so the
/// shape is enforced before parsing.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, DateError> {
    let malformed = || DateError::Malformed {
        raw: raw.to_string(),
    };
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
    if !shape_ok {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| malformed())
}

/// Format a date as its `YYYY-MM-DD` storage key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Weekday index in stored `target_days` form: 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_iso_date() {
        let date = parse_iso_date("2024-01-03").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        for raw in ["2024-1-3", "01-03-2024", "2024/01/03", "not a date", ""] {
            let err = parse_iso_date(raw).unwrap_err();
            assert_eq!(
                err,
                DateError::Malformed {
                    raw: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn parse_rejects_unpadded_components() {
        // These satisfy chrono's lenient %Y-%m-%d but would never match a
        // zero-padded storage key.
        for raw in ["2024-1-3", "2024-01-3", "2024-1-03", "824-01-03"] {
            assert!(parse_iso_date(raw).is_err(), "accepted {raw:?}");
        }
        assert!(parse_iso_date("2024-01-03").is_ok());
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
    }

    #[test]
    fn date_key_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        assert_eq!(date_key(date), "2024-12-09");
        assert_eq!(parse_iso_date(&date_key(date)).unwrap(), date);
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        // 2024-01-01 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(weekday_index(monday), 1);
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(weekday_index(sunday), 0);
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(weekday_index(saturday), 6);
    }
}
