//! JSON output formatting for stretch-coach.

use chrono::NaiveTime;
use serde::Serialize;
use serde_json::json;

use crate::core::{format_mmss, format_reminder};
use crate::error::CoachError;
use crate::exercises::{Exercise, Rule};
use crate::features::progress::{HeatmapDay, MonthCalendar, ProgressSummary};
use crate::features::session::Segment;
use crate::state::Configuration;

/// Format the home summary as JSON.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_home_json(
    heatmap: &[HeatmapDay],
    reminder: Option<NaiveTime>,
) -> Result<String, CoachError> {
    let output = json!({
        "lastSevenDays": heatmap,
        "reminderTime": reminder.map(format_reminder),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format planned segments as JSON.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_plan_json(segments: &[Segment], total_seconds: u64) -> Result<String, CoachError> {
    let output = json!({
        "count": segments.len(),
        "totalSeconds": total_seconds,
        "total": format_mmss(total_seconds),
        "items": segments,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format exercises as JSON.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_exercises_json(exercises: &[Exercise]) -> Result<String, CoachError> {
    let output = json!({
        "count": exercises.len(),
        "items": exercises,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the configuration as JSON, in the persisted field names.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_settings_json(config: &Configuration) -> Result<String, CoachError> {
    to_json(config)
}

/// Format progress as JSON.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_progress_json(
    summary: Option<&ProgressSummary>,
    calendar: &MonthCalendar,
) -> Result<String, CoachError> {
    let output = json!({
        "totalSessions": summary.map_or(0, |s| s.total_sessions),
        "avgPerWeek": summary.map(|s| s.avg_per_week),
        "calendar": calendar,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the rules as JSON.
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_rules_json(rules: &[Rule]) -> Result<String, CoachError> {
    to_json(&rules)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CoachError> {
    Ok(serde_json::to_string_pretty(value)?)
}
