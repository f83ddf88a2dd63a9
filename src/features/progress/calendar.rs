//! Session history aggregated by day.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::core::{date_key, days_in_month, monday_index, parse_date_key};
use crate::state::SessionLog;

/// Days shown in the home screen's mini heatmap.
pub const HEATMAP_DAYS: i64 = 7;

/// Highest per-day count the calendar distinguishes.
pub const CALENDAR_COUNT_CAP: usize = 10;

/// One day of the mini heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDay {
    /// Date key.
    pub date: String,
    /// Day of month.
    pub day: u32,
    /// Monday-first weekday index.
    pub weekday: usize,
    /// At least one session was logged.
    pub active: bool,
}

/// One cell of the monthly calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Date key.
    pub date: String,
    /// Day of month.
    pub day: u32,
    /// Sessions logged that day.
    pub count: usize,
}

impl CalendarDay {
    /// Count as displayed, capped at [`CALENDAR_COUNT_CAP`].
    #[must_use]
    pub fn display_count(&self) -> usize {
        self.count.min(CALENDAR_COUNT_CAP)
    }
}

/// The current month laid out Monday-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-based.
    pub month: u32,
    /// Empty cells before the 1st.
    pub leading_blanks: usize,
    /// Every day of the month.
    pub days: Vec<CalendarDay>,
}

/// Totals shown on the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Number of logged sessions.
    pub total_sessions: usize,
    /// Sessions per week since the first one.
    pub avg_per_week: f64,
}

impl ProgressSummary {
    /// Average formatted with one decimal.
    #[must_use]
    pub fn avg_per_week_display(&self) -> String {
        format!("{:.1}", self.avg_per_week)
    }
}

fn counts_by_date(sessions: &[SessionLog]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for log in sessions {
        *counts.entry(log.date.as_str()).or_default() += 1;
    }
    counts
}

/// The last seven days ending `today`, oldest first.
#[must_use]
pub fn mini_heatmap(sessions: &[SessionLog], today: NaiveDate) -> Vec<HeatmapDay> {
    let counts = counts_by_date(sessions);
    (0..HEATMAP_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let key = date_key(date);
            HeatmapDay {
                active: counts.contains_key(key.as_str()),
                date: key,
                day: date.day(),
                weekday: monday_index(date.weekday()),
            }
        })
        .collect()
}

/// Per-day counts for the month containing `today`.
#[must_use]
pub fn month_calendar(sessions: &[SessionLog], today: NaiveDate) -> MonthCalendar {
    let counts = counts_by_date(sessions);
    let first = today.with_day(1).unwrap_or(today);

    let days = (1..=days_in_month(today))
        .filter_map(|day| first.with_day(day))
        .map(|date| {
            let key = date_key(date);
            CalendarDay {
                count: counts.get(key.as_str()).copied().unwrap_or(0),
                date: key,
                day: date.day(),
            }
        })
        .collect();

    MonthCalendar {
        year: first.year(),
        month: first.month(),
        leading_blanks: monday_index(first.weekday()),
        days,
    }
}

/// Session count and weekly average, or `None` without history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summary(sessions: &[SessionLog], today: NaiveDate) -> Option<ProgressSummary> {
    let earliest = sessions
        .iter()
        .filter_map(|log| parse_date_key(&log.date))
        .min()?;

    let days_active = ((today - earliest).num_days() + 1).max(1) as f64;
    let total_sessions = sessions.len();

    Some(ProgressSummary {
        total_sessions,
        avg_per_week: total_sessions as f64 / (days_active / 7.0),
    })
}
