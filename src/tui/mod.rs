//! Terminal User Interface (TUI) for stretch-coach.
//!
//! Hosts the home, session, exercise, settings, and progress screens.
//! Built with ratatui and crossterm. The event loop waits for input no
//! longer than the session clock's next tick deadline, then ticks the clock.

mod app;
mod event;
mod ui;

pub use app::{App, Route};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

use crate::cli::Context;
use crate::error::CoachError;

/// Run the TUI application starting on `route`.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(ctx: &mut Context, route: Route) -> Result<(), CoachError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| CoachError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| CoachError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| CoachError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!(?route, "tui started");
    let mut app = App::new(ctx, route);
    let result = run_app(&mut terminal, &mut app);
    drop(app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(e) = &result {
        error!(error = %e, "tui stopped");
    }
    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), CoachError> {
    while !app.should_quit {
        app.tick();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| CoachError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_interval();
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::Navigate(route) => app.navigate(route),
                event::Action::BackOff => app.back_off()?,
                event::Action::Save => app.save_session()?,
                event::Action::CycleSetting => app.cycle_setting()?,
                event::Action::ResetAll => app.request_reset()?,
            }
        }
    }

    app.navigate(Route::Home);
    Ok(())
}
