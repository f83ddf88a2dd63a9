//! Persisted state record: user configuration plus session history.
//!
//! The JSON shape is kept flat (`{"lang": .., "goal": .., "logs": {..}}`)
//! so records written by earlier versions keep loading.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::CoachError;

/// Allowed values for the daily practice target.
pub const MINUTES_OPTIONS: [u32; 4] = [10, 15, 20, 25];

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Czech, the default.
    #[default]
    Cs,
    /// English.
    En,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 2] = [Self::Cs, Self::En];

    /// Two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cs => "cs",
            Self::En => "en",
        }
    }

    /// Parse a two-letter code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "cs" | "cz" => Some(Self::Cs),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// The other supported language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cs => Self::En,
            Self::En => Self::Cs,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Training goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Goal {
    /// General mobility.
    #[default]
    #[serde(rename = "obecna")]
    GeneralMobility,
    /// Bridge.
    #[serde(rename = "most")]
    Bridge,
    /// Front split.
    #[serde(rename = "provaz")]
    FrontSplit,
}

impl Goal {
    /// All goals in display order.
    pub const ALL: [Self; 3] = [Self::GeneralMobility, Self::Bridge, Self::FrontSplit];

    /// Persisted identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralMobility => "obecna",
            Self::Bridge => "most",
            Self::FrontSplit => "provaz",
        }
    }

    /// Translation key for the goal's label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::GeneralMobility => "settings.goalMobility",
            Self::Bridge => "settings.goalBridge",
            Self::FrontSplit => "settings.goalSplit",
        }
    }

    /// Parse a goal from its identifier or an English alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "obecna" | "mobility" | "general" => Some(Self::GeneralMobility),
            "most" | "bridge" => Some(Self::Bridge),
            "provaz" | "split" | "front-split" => Some(Self::FrontSplit),
            _ => None,
        }
    }

    /// The next goal in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Body side for asymmetrical stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left side, the default start.
    #[default]
    Left,
    /// Right side.
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Persisted identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse `left` or `right`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Some(Self::Left),
            "right" | "r" => Some(Self::Right),
            _ => None,
        }
    }
}

/// User configuration, edited from the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Display language.
    #[serde(deserialize_with = "or_default")]
    pub lang: Language,
    /// Training goal.
    #[serde(deserialize_with = "or_default")]
    pub goal: Goal,
    /// Daily practice target in minutes.
    #[serde(deserialize_with = "minutes_or_default")]
    pub minutes_per_day: u32,
    /// Include partner-assisted exercises.
    #[serde(deserialize_with = "or_default")]
    pub partner_mode: bool,
    /// Side asymmetrical exercises start on.
    #[serde(deserialize_with = "or_default")]
    pub start_side: Side,
    /// Play audio cues between segments.
    #[serde(deserialize_with = "or_default")]
    pub sound: bool,
    /// Daily reminder time, persisted as `HH:MM` or an empty string. An
    /// unreadable value loads as no reminder.
    #[serde(with = "reminder_format")]
    pub reminder_time: Option<NaiveTime>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            lang: Language::Cs,
            goal: Goal::GeneralMobility,
            minutes_per_day: 15,
            partner_mode: false,
            start_side: Side::Left,
            sound: false,
            reminder_time: None,
        }
    }
}

impl Configuration {
    /// Validate a daily minutes value.
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is one of [`MINUTES_OPTIONS`].
    pub fn validate_minutes(minutes: u32) -> Result<u32, CoachError> {
        if MINUTES_OPTIONS.contains(&minutes) {
            Ok(minutes)
        } else {
            Err(CoachError::InvalidArgument(format!(
                "minutes per day must be one of {MINUTES_OPTIONS:?}, got {minutes}"
            )))
        }
    }
}

/// A completed session, appended once and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    /// Unique identifier (`session-<unix millis>`).
    pub id: String,
    /// Local date key (`YYYY-MM-DD`).
    pub date: String,
    /// When the session was saved.
    pub timestamp: DateTime<Utc>,
    /// Planned routine length in seconds.
    pub duration: u64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Goal at the time of saving.
    #[serde(default, deserialize_with = "or_default")]
    pub goal: Goal,
    /// Partner mode at the time of saving.
    pub partner_mode: bool,
    /// Exercise ids covered, in routine order.
    pub exercises: Vec<u32>,
}

/// A "back off" safety event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackOffLog {
    /// Exercise that caused discomfort.
    pub exercise_id: u32,
    /// When the user backed off.
    pub timestamp: DateTime<Utc>,
}

/// Historical logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Logs {
    /// Completed sessions in save order.
    pub sessions: Vec<SessionLog>,
    /// Back-off events in occurrence order.
    pub back_off: Vec<BackOffLog>,
}

/// The full persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppState {
    /// User configuration.
    #[serde(flatten)]
    pub config: Configuration,
    /// Session and back-off history.
    pub logs: Logs,
}

/// Read a field, keeping its default when the stored value is not one this
/// version understands. One stale field must not discard the history stored
/// beside it.
fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(d)?;
    Ok(T::deserialize(raw).unwrap_or_else(|e| {
        warn!(error = %e, "unrecognised stored value, using the default");
        T::default()
    }))
}

fn minutes_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let minutes: u32 = or_default(d)?;
    Ok(Configuration::validate_minutes(minutes)
        .unwrap_or_else(|_| Configuration::default().minutes_per_day))
}

mod reminder_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    use crate::core::{format_reminder, parse_reminder};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&format_reminder(*time)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = serde_json::Value::deserialize(d)?;
        match raw.as_str().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let time = parse_reminder(s);
                if time.is_none() {
                    warn!(value = s, "unreadable reminder time, reminder cleared");
                }
                Ok(time)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_record_shape() {
        let json = serde_json::to_value(AppState::default()).unwrap();

        assert_eq!(json["lang"], "cs");
        assert_eq!(json["goal"], "obecna");
        assert_eq!(json["minutesPerDay"], 15);
        assert_eq!(json["partnerMode"], false);
        assert_eq!(json["startSide"], "left");
        assert_eq!(json["sound"], false);
        assert_eq!(json["reminderTime"], "");
        assert!(json["logs"]["sessions"].as_array().unwrap().is_empty());
        assert!(json["logs"]["backOff"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let state: AppState =
            serde_json::from_str(r#"{"goal":"most","reminderTime":"06:45"}"#).unwrap();

        assert_eq!(state.config.goal, Goal::Bridge);
        assert_eq!(state.config.reminder_time, NaiveTime::from_hms_opt(6, 45, 0));
        assert_eq!(state.config.minutes_per_day, 15);
        assert_eq!(state.config.lang, Language::Cs);
        assert!(state.logs.sessions.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let state: AppState =
            serde_json::from_str(r#"{"theme":"dark","logs":{"sessions":[],"extra":1}}"#).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_logs_roundtrip_keeps_camel_case() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut state = AppState::default();
        state.logs.back_off.push(BackOffLog {
            exercise_id: 7,
            timestamp: ts,
        });

        let raw = serde_json::to_string(&state).unwrap();
        assert!(raw.contains("\"backOff\":[{\"exerciseId\":7"));

        let parsed: AppState = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_invalid_reminder_clears_reminder() {
        let state: AppState = serde_json::from_str(r#"{"reminderTime":"late","goal":"most"}"#).unwrap();
        assert_eq!(state.config.reminder_time, None);
        assert_eq!(state.config.goal, Goal::Bridge);
    }

    #[test]
    fn test_unknown_values_fall_back_per_field() {
        let raw = r#"{
            "lang": "de",
            "goal": "yoga",
            "startSide": "up",
            "minutesPerDay": 12,
            "partnerMode": "yes",
            "sound": true,
            "logs": {"sessions": [{
                "id": "session-1", "date": "2024-05-01",
                "timestamp": "2024-05-01T08:00:00Z", "duration": 900,
                "goal": "yoga", "partnerMode": false, "exercises": [1, 2]
            }]}
        }"#;
        let state: AppState = serde_json::from_str(raw).unwrap();

        assert_eq!(state.config.lang, Language::Cs);
        assert_eq!(state.config.goal, Goal::GeneralMobility);
        assert_eq!(state.config.start_side, Side::Left);
        assert_eq!(state.config.minutes_per_day, 15);
        assert!(!state.config.partner_mode);
        assert!(state.config.sound);
        assert_eq!(state.logs.sessions.len(), 1);
        assert_eq!(state.logs.sessions[0].goal, Goal::GeneralMobility);
        assert_eq!(state.logs.sessions[0].exercises, vec![1, 2]);
    }

    #[test]
    fn test_validate_minutes() {
        assert_eq!(Configuration::validate_minutes(20).unwrap(), 20);
        assert!(Configuration::validate_minutes(12).is_err());
    }

    #[test]
    fn test_goal_cycle_and_parse() {
        assert_eq!(Goal::GeneralMobility.next(), Goal::Bridge);
        assert_eq!(Goal::FrontSplit.next(), Goal::GeneralMobility);
        assert_eq!(Goal::parse("split"), Some(Goal::FrontSplit));
        assert_eq!(Goal::parse("yoga"), None);
    }

    #[test]
    fn test_side_and_language_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::parse("R"), Some(Side::Right));
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::Cs.toggled(), Language::En);
    }
}
