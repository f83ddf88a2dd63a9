//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::CoachError;
use crate::tui::app::{App, Route};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Switch to another screen.
    Navigate(Route),
    /// Pause and record a back-off.
    BackOff,
    /// Save the completed session.
    Save,
    /// Cycle the selected preference.
    CycleSetting,
    /// Ask for, or confirm, a full data reset.
    ResetAll,
}

/// Wait up to `timeout` for a terminal event and handle it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>, timeout: Duration) -> Result<Option<Action>, CoachError> {
    if !event::poll(timeout).map_err(|e| CoachError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }
    match event::read().map_err(|e| CoachError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Map one key press to app changes or an action.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // The safety notice is modal.
    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_notice();
        }
        return None;
    }

    if app.route == Route::Session && app.editing_notes() {
        return match key.code {
            KeyCode::Enter => Some(Action::Save),
            KeyCode::Backspace => {
                if let Some(session) = app.session.as_mut() {
                    session.pop_note();
                }
                None
            }
            KeyCode::Esc => Some(Action::Navigate(Route::Home)),
            KeyCode::Char(c) => {
                if let Some(session) = app.session.as_mut() {
                    session.push_note(c);
                }
                None
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char(c @ '1'..='5') => return Route::from_digit(c).map(Action::Navigate),
        _ => {}
    }

    match app.route {
        Route::Session => handle_session_key(app, key.code),
        Route::Settings => handle_settings_key(app, key.code),
        Route::Home => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Navigate(Route::Session)),
            _ => None,
        },
        Route::Exercises | Route::Progress => None,
    }
}

fn handle_session_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') => app.toggle_run_pause(),
        KeyCode::Char('n') | KeyCode::Right => app.next_segment(),
        KeyCode::Char('b') | KeyCode::Left => app.previous_segment(),
        KeyCode::Char('r') => app.reset_session(),
        KeyCode::Char('o') => return Some(Action::BackOff),
        KeyCode::Esc => return Some(Action::Navigate(Route::Home)),
        _ => {}
    }
    None
}

fn handle_settings_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_field(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_field(),
        KeyCode::Enter | KeyCode::Char(' ') => return Some(Action::CycleSetting),
        KeyCode::Char('X') => return Some(Action::ResetAll),
        KeyCode::Char('y') if app.confirm_reset => return Some(Action::ResetAll),
        _ => app.cancel_reset(),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use crate::cli::Context;
    use crate::features::session::SessionStatus;
    use clap::Parser;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        let root = dir.path().to_str().unwrap();
        Context::open(&Cli::try_parse_from(["stretch-coach", "--data-dir", root, "tui"]).unwrap())
            .unwrap()
    }

    fn press(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_digits_switch_routes() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Home);

        assert_eq!(press(&mut app, KeyCode::Char('4')), Some(Action::Navigate(Route::Settings)));
        assert_eq!(press(&mut app, KeyCode::Char('9')), None);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Session);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, key), Some(Action::Quit));
    }

    #[test]
    fn test_space_starts_session() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Session);

        assert_eq!(press(&mut app, KeyCode::Char(' ')), None);
        assert_eq!(
            app.session.as_ref().map(|s| s.status()),
            Some(SessionStatus::Running)
        );
        assert_eq!(press(&mut app, KeyCode::Char('o')), Some(Action::BackOff));
    }

    #[test]
    fn test_wait_shrinks_while_session_runs() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let idle = ctx.config.session.poll_interval();
        let mut app = App::new(&mut ctx, Route::Session);
        assert_eq!(app.poll_interval(), idle);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.poll_interval() <= idle);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.poll_interval(), idle);
    }

    #[test]
    fn test_corrupt_state_shown_in_status() {
        let dir = TempDir::new().unwrap();
        drop(context(&dir));
        crate::storage::Database::open_at(&dir.path().join("coach.db"))
            .unwrap()
            .put(crate::state::STATE_KEY, "[1, 2")
            .unwrap();

        let mut ctx = context(&dir);
        let app = App::new(&mut ctx, Route::Home);
        assert_eq!(app.status, Some(app.ctx.translator.t("app.stateReset")));
    }

    #[test]
    fn test_leaving_session_drops_it() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Session);
        assert!(app.session.is_some());

        app.navigate(Route::Exercises);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_notice_is_modal() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Session);
        app.back_off().unwrap();
        assert!(app.notice.is_some());

        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert!(app.notice.is_some());
        assert_eq!(press(&mut app, KeyCode::Esc), None);
        assert!(app.notice.is_none());
        assert_eq!(app.ctx.store.logs().back_off.len(), 1);
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Settings);

        assert_eq!(press(&mut app, KeyCode::Char('y')), None);
        assert_eq!(press(&mut app, KeyCode::Char('X')), Some(Action::ResetAll));
        app.request_reset().unwrap();
        assert!(app.confirm_reset);
        assert_eq!(press(&mut app, KeyCode::Char('y')), Some(Action::ResetAll));
        assert_eq!(press(&mut app, KeyCode::Char('z')), None);
        assert!(!app.confirm_reset);
    }

    #[test]
    fn test_cycle_setting_persists() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Settings);
        app.select_next_field();
        app.select_next_field();
        app.cycle_setting().unwrap();

        assert_eq!(app.ctx.store.config().lang, crate::state::Language::En);
        assert_eq!(app.ctx.translator.lang(), crate::state::Language::En);
        assert_eq!(app.status.as_deref(), Some("Settings saved"));
    }

    #[test]
    fn test_reset_keeps_display_language() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut app = App::new(&mut ctx, Route::Settings);
        app.select_next_field();
        app.select_next_field();
        assert_eq!(press(&mut app, KeyCode::Enter), Some(Action::CycleSetting));
        app.cycle_setting().unwrap();
        app.ctx.update_state(|s| s.config.sound = true).unwrap();

        app.request_reset().unwrap();
        app.request_reset().unwrap();
        assert!(!app.ctx.store.config().sound);
        assert_eq!(app.ctx.store.config().lang, crate::state::Language::En);
        assert_eq!(app.ctx.translator.lang(), crate::state::Language::En);
        assert_eq!(app.status.as_deref(), Some("Settings saved"));
    }
}
