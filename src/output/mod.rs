//! Output formatting for stretch-coach.
//!
//! Each view has a pretty (colored, localized) and a JSON rendition.

mod json;
mod pretty;

use chrono::NaiveTime;

use crate::cli::args::OutputFormat;
use crate::error::CoachError;
use crate::exercises::{Exercise, Rule};
use crate::features::progress::{HeatmapDay, MonthCalendar, ProgressSummary};
use crate::features::session::Segment;
use crate::i18n::Translator;
use crate::state::Configuration;

pub use json::*;
pub use pretty::*;

/// Format the home summary based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_home(
    tr: &Translator,
    heatmap: &[HeatmapDay],
    reminder: Option<NaiveTime>,
    format: OutputFormat,
) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_home_pretty(tr, heatmap, reminder)),
        OutputFormat::Json => format_home_json(heatmap, reminder),
    }
}

/// Format planned segments based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_plan(
    tr: &Translator,
    segments: &[Segment],
    exercises: &[Exercise],
    format: OutputFormat,
) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(tr, segments, exercises)),
        OutputFormat::Json => format_plan_json(segments, segments.iter().map(|s| s.seconds).sum()),
    }
}

/// Format exercises based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_exercises(
    tr: &Translator,
    exercises: &[Exercise],
    format: OutputFormat,
) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(tr, exercises)),
        OutputFormat::Json => format_exercises_json(exercises),
    }
}

/// Format preferences based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_settings(
    tr: &Translator,
    config: &Configuration,
    format: OutputFormat,
) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(tr, config)),
        OutputFormat::Json => format_settings_json(config),
    }
}

/// Format progress based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_progress(
    tr: &Translator,
    summary: Option<&ProgressSummary>,
    calendar: &MonthCalendar,
    format: OutputFormat,
) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_progress_pretty(tr, summary, calendar)),
        OutputFormat::Json => format_progress_json(summary, calendar),
    }
}

/// Format the rules based on output format
///
/// # Errors
///
/// Returns `CoachError::Parse` if JSON serialization fails.
pub fn format_rules(rules: &[Rule], format: OutputFormat) -> Result<String, CoachError> {
    match format {
        OutputFormat::Pretty => Ok(format_rules_pretty(rules)),
        OutputFormat::Json => format_rules_json(rules),
    }
}
