//! Date and time helpers shared by the views and the session engine.

use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

/// Format a date as the `YYYY-MM-DD` key used by session logs.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date key.
#[must_use]
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// Parse a reminder time of day (`HH:MM`, optionally with seconds).
#[must_use]
pub fn parse_reminder(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

/// Format a reminder time as `HH:MM`.
#[must_use]
pub fn format_reminder(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format whole seconds as `MM:SS`.
#[must_use]
pub fn format_mmss(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Whole seconds left in a segment, rounded up so `00:00` only shows at the end.
#[must_use]
pub fn remaining_seconds(duration: Duration, elapsed: Duration) -> u64 {
    let remaining = duration.saturating_sub(elapsed);
    let whole = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Number of days in the month containing `date`.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|n| n.pred_opt()).map_or(31, |last| last.day())
}

/// Monday-first index of a weekday (Monday = 0).
#[must_use]
pub fn monday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(date), "2024-03-05");
        assert_eq!(parse_date_key("2024-03-05"), Some(date));
        assert_eq!(parse_date_key("March 5"), None);
    }

    #[test]
    fn test_parse_reminder() {
        assert_eq!(parse_reminder("07:30"), NaiveTime::from_hms_opt(7, 30, 0));
        assert_eq!(parse_reminder(" 21:05:10 "), NaiveTime::from_hms_opt(21, 5, 10));
        assert_eq!(parse_reminder("25:00"), None);
        assert_eq!(parse_reminder(""), None);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(9), "00:09");
        assert_eq!(format_mmss(549), "09:09");
    }

    #[test]
    fn test_remaining_seconds_rounds_up() {
        let ten = Duration::from_secs(10);
        assert_eq!(remaining_seconds(ten, Duration::ZERO), 10);
        assert_eq!(remaining_seconds(ten, Duration::from_millis(100)), 10);
        assert_eq!(remaining_seconds(ten, Duration::from_millis(9_001)), 1);
        assert_eq!(remaining_seconds(ten, ten), 0);
        assert_eq!(remaining_seconds(ten, Duration::from_secs(12)), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()), 30);
    }

    #[test]
    fn test_monday_index() {
        assert_eq!(monday_index(Weekday::Mon), 0);
        assert_eq!(monday_index(Weekday::Sun), 6);
    }
}
