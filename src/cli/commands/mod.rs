//! Command implementations for stretch-coach.
//!
//! Every command returns the text to print; interactive commands return an
//! empty string once the terminal is restored.

mod session;
mod settings;

pub use session::{session, tui};
pub use settings::settings;

use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::Context;
use crate::error::CoachError;
use crate::exercises::RULES;
use crate::features::progress::{
    export_file_name, mini_heatmap, month_calendar, summary, write_export,
};
use crate::features::session::plan as plan_segments;
use crate::output::{format_exercises, format_home, format_plan, format_progress, format_rules, to_json};

/// Execute home command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn home(ctx: &Context) -> Result<String, CoachError> {
    let heatmap = mini_heatmap(&ctx.store.logs().sessions, Context::today());
    format_home(
        &ctx.translator,
        &heatmap,
        ctx.store.config().reminder_time,
        ctx.format,
    )
}

/// Execute plan command
///
/// # Errors
///
/// Returns an error if the exercise catalog is not ready or output
/// formatting fails.
pub fn plan(ctx: &Context) -> Result<String, CoachError> {
    let exercises = ctx.catalog.exercises()?;
    let segments = plan_segments(exercises, ctx.store.config());
    format_plan(&ctx.translator, &segments, exercises, ctx.format)
}

/// Execute exercises command
///
/// # Errors
///
/// Returns an error if the exercise catalog is not ready or output
/// formatting fails.
pub fn exercises(ctx: &Context) -> Result<String, CoachError> {
    format_exercises(&ctx.translator, ctx.catalog.exercises()?, ctx.format)
}

/// Execute progress command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn progress(ctx: &Context) -> Result<String, CoachError> {
    let sessions = &ctx.store.logs().sessions;
    let today = Context::today();
    format_progress(
        &ctx.translator,
        summary(sessions, today).as_ref(),
        &month_calendar(sessions, today),
        ctx.format,
    )
}

/// Execute export command
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export(ctx: &Context, out: Option<PathBuf>) -> Result<String, CoachError> {
    let path =
        out.unwrap_or_else(|| ctx.paths.exports.join(export_file_name(Context::today())));
    let written = write_export(&ctx.store, &path)?;
    let shown = written.display().to_string();

    match ctx.format {
        OutputFormat::Pretty => Ok(ctx
            .translator
            .t_with("progress.exported", &[("path", shown.as_str())])),
        OutputFormat::Json => to_json(&serde_json::json!({ "path": shown })),
    }
}

/// Execute rules command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn rules(ctx: &Context) -> Result<String, CoachError> {
    format_rules(&RULES, ctx.format)
}

/// Generate a shell completion script.
///
/// # Errors
///
/// Returns an error if the script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, CoachError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "stretch-coach", &mut buf);
    String::from_utf8(buf).map_err(|e| CoachError::Config(format!("UTF-8 error: {e}")))
}
