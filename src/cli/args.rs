use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;
use crate::state::Language;

#[derive(Parser)]
#[command(name = "stretch-coach")]
#[command(about = "An offline Suzuki stretching coach for the terminal")]
#[command(long_about = "stretch-coach - An offline Suzuki stretching coach

Guides you through the daily Suzuki stretching routine: every exercise is
held in two timed phases, asymmetrical stretches are done on both sides,
and completed sessions are kept in a local history.

QUICK START:
  stretch-coach session         Start today's stretch
  stretch-coach plan            Show the planned segments
  stretch-coach progress        Monthly calendar and averages
  stretch-coach settings show   Current preferences

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  stretch-coach <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from config.yaml, or 'pretty'.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Display language for this run (does not change the saved preference)
    #[arg(long, value_enum, global = true)]
    pub lang: Option<LangArg>,

    /// Directory holding config.yaml, the state database, and exports
    #[arg(long, global = true, env = HOME_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Load exercises from this JSON file instead of the bundled list
    #[arg(long, global = true)]
    pub exercises: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

/// Language choice on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LangArg {
    /// Czech.
    Cs,
    /// English.
    En,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Cs => Self::Cs,
            LangArg::En => Self::En,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home screen summary
    ///
    /// Prints the title, which of the last seven days had a session, and
    /// today's reminder.
    Home,

    /// Run today's stretching session
    ///
    /// Opens the interactive session screen. Space starts and pauses,
    /// n moves on, b goes back, r resets, o backs off.
    ///
    /// # Examples
    ///
    ///   stretch-coach session
    ///   stretch-coach s
    #[command(alias = "s")]
    Session,

    /// Open the interactive app on the home screen
    Tui,

    /// Print the planned segments for the current settings
    ///
    /// Lists every transition, hold phase, and side switch with its length,
    /// followed by the total session time.
    Plan,

    /// List the exercises
    ///
    /// Shows each exercise with its name, whether it is done per side,
    /// and its coaching cues.
    #[command(alias = "e")]
    Exercises,

    /// View or change preferences
    Settings(SettingsArgs),

    /// Show the monthly calendar and averages
    Progress,

    /// Write the session and back-off history as JSON
    ///
    /// # Examples
    ///
    ///   stretch-coach export
    ///   stretch-coach export --out logs.json
    Export {
        /// Output file (default: exports/suzuki-stretch-logs-<date>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the ten stretching rules in both languages
    Rules,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   stretch-coach completions zsh > _stretch-coach
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current preferences
    Show,

    /// Change one preference
    ///
    /// # Examples
    ///
    ///   stretch-coach settings set goal bridge
    ///   stretch-coach settings set minutes 20
    ///   stretch-coach settings set reminder 07:30
    ///   stretch-coach settings set reminder off
    ///   stretch-coach settings set start-side right
    Set {
        /// Preference to change
        #[arg(value_enum)]
        key: SettingKey,

        /// New value
        value: String,
    },

    /// Delete all preferences and history (the language is kept)
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Preference names accepted by `settings set`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingKey {
    /// obecna|most|provaz (or mobility|bridge|split)
    Goal,
    /// 10, 15, 20, or 25
    Minutes,
    /// cs or en
    Lang,
    /// on or off
    Sound,
    /// on or off
    Partner,
    /// HH:MM, or off
    Reminder,
    /// left or right
    StartSide,
}
