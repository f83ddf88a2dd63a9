//! Settings command implementation.

use tracing::info;

use crate::cli::args::{OutputFormat, SettingKey, SettingsCommands};
use crate::cli::Context;
use crate::core::parse_reminder;
use crate::error::CoachError;
use crate::output::format_settings;
use crate::state::{Configuration, Goal, Language, Side};

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error for invalid values, an unconfirmed reset, or a failed
/// write.
pub fn settings(ctx: &mut Context, cmd: SettingsCommands) -> Result<String, CoachError> {
    match cmd {
        SettingsCommands::Show => format_settings(&ctx.translator, ctx.store.config(), ctx.format),
        SettingsCommands::Set { key, value } => set(ctx, key, &value),
        SettingsCommands::Reset { force } => reset(ctx, force),
    }
}

fn set(ctx: &mut Context, key: SettingKey, value: &str) -> Result<String, CoachError> {
    let mut config = ctx.store.config().clone();
    apply(&mut config, key, value)?;

    ctx.update_state(|state| state.config = config)?;
    info!(?key, value, "setting changed");

    let shown = format_settings(&ctx.translator, ctx.store.config(), ctx.format)?;
    match ctx.format {
        OutputFormat::Pretty => {
            Ok(format!("{}\n\n{shown}", ctx.translator.t("settings.saved")))
        }
        OutputFormat::Json => Ok(shown),
    }
}

fn reset(ctx: &mut Context, force: bool) -> Result<String, CoachError> {
    if !force {
        return Err(CoachError::InvalidArgument(
            "This will delete all preferences and history.\nUse --force to confirm.".to_string(),
        ));
    }
    ctx.reset_state()?;
    info!("all data reset");
    format_settings(&ctx.translator, ctx.store.config(), ctx.format)
}

/// Apply one `settings set` value to `config`.
fn apply(config: &mut Configuration, key: SettingKey, value: &str) -> Result<(), CoachError> {
    let invalid = |expected: &str| {
        CoachError::InvalidArgument(format!("invalid value '{value}' for {key:?}: expected {expected}"))
    };

    match key {
        SettingKey::Goal => {
            config.goal = Goal::parse(value).ok_or_else(|| invalid("obecna, most, or provaz"))?;
        }
        SettingKey::Minutes => {
            let minutes = value
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid("10, 15, 20, or 25"))?;
            config.minutes_per_day = Configuration::validate_minutes(minutes)?;
        }
        SettingKey::Lang => {
            config.lang = Language::from_code(value).ok_or_else(|| invalid("cs or en"))?;
        }
        SettingKey::Sound => config.sound = parse_switch(value).ok_or_else(|| invalid("on or off"))?,
        SettingKey::Partner => {
            config.partner_mode = parse_switch(value).ok_or_else(|| invalid("on or off"))?;
        }
        SettingKey::Reminder => {
            config.reminder_time = if parse_switch(value) == Some(false) || value.trim().is_empty() {
                None
            } else {
                Some(parse_reminder(value).ok_or_else(|| invalid("HH:MM or off"))?)
            };
        }
        SettingKey::StartSide => {
            config.start_side = Side::parse(value).ok_or_else(|| invalid("left or right"))?;
        }
    }
    Ok(())
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use chrono::NaiveTime;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_set_lang_switches_output_language() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap();
        let cli =
            Cli::try_parse_from(["stretch-coach", "--data-dir", root, "settings", "show"]).unwrap();
        let mut ctx = Context::open(&cli).unwrap();

        let out = set(&mut ctx, SettingKey::Lang, "en").unwrap();
        assert!(out.starts_with("Settings saved"));

        let out = set(&mut ctx, SettingKey::Lang, "cs").unwrap();
        assert!(out.starts_with("Nastavení uloženo"));
        assert_eq!(ctx.translator.lang(), Language::Cs);
    }

    #[test]
    fn test_apply_each_key() {
        let mut config = Configuration::default();
        apply(&mut config, SettingKey::Goal, "bridge").unwrap();
        apply(&mut config, SettingKey::Minutes, "25").unwrap();
        apply(&mut config, SettingKey::Lang, "en").unwrap();
        apply(&mut config, SettingKey::Sound, "on").unwrap();
        apply(&mut config, SettingKey::Partner, "yes").unwrap();
        apply(&mut config, SettingKey::Reminder, "07:30").unwrap();
        apply(&mut config, SettingKey::StartSide, "right").unwrap();

        assert_eq!(config.goal, Goal::Bridge);
        assert_eq!(config.minutes_per_day, 25);
        assert_eq!(config.lang, Language::En);
        assert!(config.sound);
        assert!(config.partner_mode);
        assert_eq!(config.reminder_time, NaiveTime::from_hms_opt(7, 30, 0));
        assert_eq!(config.start_side, Side::Right);
    }

    #[test]
    fn test_reminder_off_clears() {
        let mut config = Configuration {
            reminder_time: NaiveTime::from_hms_opt(7, 30, 0),
            ..Configuration::default()
        };
        apply(&mut config, SettingKey::Reminder, "off").unwrap();
        assert_eq!(config.reminder_time, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Configuration::default();
        assert!(apply(&mut config, SettingKey::Minutes, "12").is_err());
        assert!(apply(&mut config, SettingKey::Minutes, "ten").is_err());
        assert!(apply(&mut config, SettingKey::Goal, "yoga").is_err());
        assert!(apply(&mut config, SettingKey::Reminder, "25:99").is_err());
        assert!(apply(&mut config, SettingKey::Sound, "loud").is_err());
        assert_eq!(config, Configuration::default());
    }
}
