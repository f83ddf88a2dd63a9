//! Interactive commands.

use crate::cli::Context;
use crate::error::CoachError;
use crate::tui::{run, Route};

/// Execute session command: the interactive app on the session screen.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the history cannot
/// be saved.
pub fn session(ctx: &mut Context) -> Result<String, CoachError> {
    run(ctx, Route::Session)?;
    Ok(String::new())
}

/// Execute tui command: the interactive app on the home screen.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the history cannot
/// be saved.
pub fn tui(ctx: &mut Context) -> Result<String, CoachError> {
    run(ctx, Route::Home)?;
    Ok(String::new())
}
