//! Application state for the TUI.

use std::time::{Duration, Instant};

use chrono::NaiveTime;
use tracing::{debug, info};

use crate::cli::args::SettingKey;
use crate::cli::Context;
use crate::core::SystemClock;
use crate::error::CoachError;
use crate::features::session::{
    CuePlayer, Navigation, SafetyNotice, SessionController, SessionEvent, SessionStatus, Silent,
    TerminalBell,
};
use crate::state::{Configuration, MINUTES_OPTIONS};

/// Breath ticker half-cycle.
pub const BREATH_PERIOD: Duration = Duration::from_secs(4);

/// Preferences editable on the settings screen, in display order.
pub const SETTING_FIELDS: [SettingKey; 7] = [
    SettingKey::Goal,
    SettingKey::Minutes,
    SettingKey::Lang,
    SettingKey::Sound,
    SettingKey::Partner,
    SettingKey::Reminder,
    SettingKey::StartSide,
];

/// Reminder times offered when cycling; `None` switches the reminder off.
const REMINDER_PRESETS: [Option<(u32, u32)>; 5] =
    [None, Some((6, 30)), Some((7, 30)), Some((12, 0)), Some((19, 0))];

/// Screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Session,
    Exercises,
    Settings,
    Progress,
}

impl Route {
    /// Routes in tab order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Session,
        Self::Exercises,
        Self::Settings,
        Self::Progress,
    ];

    /// Translation key for the tab title.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::Session => "nav.session",
            Self::Exercises => "nav.exercises",
            Self::Settings => "nav.settings",
            Self::Progress => "nav.progress",
        }
    }

    /// Route bound to a digit key `1`-`5`.
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(idx).ok()?).copied()
    }

    /// Position in [`Route::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }
}

/// Application state.
pub struct App<'a> {
    /// Loaded paths, preferences, catalog, and translations.
    pub ctx: &'a mut Context,
    /// Current screen.
    pub route: Route,
    /// Live session, present only while the session screen is shown.
    pub session: Option<SessionController<SystemClock>>,
    /// Safety notice after a back-off, shown until dismissed.
    pub notice: Option<SafetyNotice>,
    /// Selected row on the settings screen.
    pub settings_field: usize,
    /// Waiting for the user to confirm a full reset.
    pub confirm_reset: bool,
    /// Status bar message.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    breath_started: Instant,
}

impl<'a> App<'a> {
    /// Create the app on `route`.
    pub fn new(ctx: &'a mut Context, route: Route) -> Self {
        let mut app = Self {
            ctx,
            route: Route::Home,
            session: None,
            notice: None,
            settings_field: 0,
            confirm_reset: false,
            status: None,
            should_quit: false,
            breath_started: Instant::now(),
        };
        app.navigate(route);
        if app.ctx.store.recovered_from_corruption() {
            app.status = Some(app.ctx.translator.t("app.stateReset"));
        }
        app
    }

    /// Switch screens. Leaving the session screen tears the session down;
    /// entering it plans a fresh one.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route && (route != Route::Session || self.session.is_some()) {
            return;
        }
        if let Some(mut session) = self.session.take() {
            session.stop();
            debug!("session closed");
        }
        self.notice = None;
        self.confirm_reset = false;
        self.status = None;
        self.route = route;

        if route == Route::Session {
            self.open_session();
        }
    }

    fn open_session(&mut self) {
        let cue: Box<dyn CuePlayer> = if self.ctx.config.session.bell {
            Box::new(TerminalBell)
        } else {
            Box::new(Silent)
        };
        match SessionController::new(
            &self.ctx.catalog,
            self.ctx.store.config(),
            SystemClock,
            cue,
            self.ctx.config.session.poll_interval(),
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.breath_started = Instant::now();
            }
            Err(e) => {
                debug!(error = %e, "session unavailable");
                self.status = Some(self.ctx.translator.t("app.loading"));
            }
        }
    }

    /// How long the event loop may wait for input: until the session's next
    /// tick is due, or one idle poll interval while no clock is running.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        let idle = self.ctx.config.session.poll_interval();
        self.session
            .as_ref()
            .and_then(SessionController::until_next_tick)
            .map_or(idle, |wait| wait.min(idle))
    }

    /// Advance the session clock.
    pub fn tick(&mut self) {
        if let Some(SessionEvent::Completed) = self.session.as_mut().and_then(SessionController::tick) {
            self.status = Some(self.ctx.translator.t("session.completed"));
        }
    }

    /// Whether the breath ticker currently reads "inhale".
    #[must_use]
    pub fn breath_in(&self) -> bool {
        let periods = self.breath_started.elapsed().as_millis() / BREATH_PERIOD.as_millis();
        periods % 2 == 0
    }

    /// Start or pause the session.
    pub fn toggle_run_pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.toggle_run_pause();
        }
    }

    /// Move to the next segment.
    pub fn next_segment(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.next() == Navigation::Completed {
                self.status = Some(self.ctx.translator.t("session.completed"));
            }
        }
    }

    /// Step back or restart the current segment.
    pub fn previous_segment(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.back();
        }
    }

    /// Plan the session again from the saved preferences.
    pub fn reset_session(&mut self) {
        let config = self.ctx.store.config().clone();
        if let Some(session) = self.session.as_mut() {
            session.reset(&config);
            self.status = None;
        }
    }

    /// Pause, log a back-off, and show the safety notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the back-off cannot be saved.
    pub fn back_off(&mut self) -> Result<(), CoachError> {
        if let Some(session) = self.session.as_mut() {
            self.notice = session.back_off(&mut self.ctx.store)?;
        }
        Ok(())
    }

    /// Close the safety notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Whether typed characters go into the session notes.
    #[must_use]
    pub fn editing_notes(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.status() == SessionStatus::Completed && !s.is_saved())
    }

    /// Save the completed session with its notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be saved.
    pub fn save_session(&mut self) -> Result<(), CoachError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.save(&mut self.ctx.store)?.is_some() {
            self.status = Some(self.ctx.translator.t("session.saved"));
        }
        Ok(())
    }

    /// Select the previous settings row.
    pub fn select_previous_field(&mut self) {
        self.confirm_reset = false;
        self.settings_field = self
            .settings_field
            .checked_sub(1)
            .unwrap_or(SETTING_FIELDS.len() - 1);
    }

    /// Select the next settings row.
    pub fn select_next_field(&mut self) {
        self.confirm_reset = false;
        self.settings_field = (self.settings_field + 1) % SETTING_FIELDS.len();
    }

    /// Cycle the selected preference to its next value and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be saved.
    pub fn cycle_setting(&mut self) -> Result<(), CoachError> {
        let key = SETTING_FIELDS[self.settings_field % SETTING_FIELDS.len()];
        let mut config = self.ctx.store.config().clone();
        cycle(&mut config, key);
        self.ctx.update_state(|state| state.config = config)?;
        self.confirm_reset = false;
        self.status = Some(self.ctx.translator.t("settings.saved"));
        Ok(())
    }

    /// First call asks for confirmation; the second wipes all data.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset cannot be saved.
    pub fn request_reset(&mut self) -> Result<(), CoachError> {
        if !self.confirm_reset {
            self.confirm_reset = true;
            self.status = Some(self.ctx.translator.t("settings.confirmReset"));
            return Ok(());
        }
        self.ctx.reset_state()?;
        self.confirm_reset = false;
        info!("all data reset from the settings screen");
        self.status = Some(self.ctx.translator.t("settings.saved"));
        Ok(())
    }

    /// Abandon a pending reset confirmation.
    pub fn cancel_reset(&mut self) {
        if self.confirm_reset {
            self.confirm_reset = false;
            self.status = None;
        }
    }
}

/// Move one preference to its next value, wrapping around.
fn cycle(config: &mut Configuration, key: SettingKey) {
    match key {
        SettingKey::Goal => config.goal = config.goal.next(),
        SettingKey::Minutes => {
            let idx = MINUTES_OPTIONS
                .iter()
                .position(|m| *m == config.minutes_per_day)
                .map_or(0, |i| (i + 1) % MINUTES_OPTIONS.len());
            config.minutes_per_day = MINUTES_OPTIONS[idx];
        }
        SettingKey::Lang => config.lang = config.lang.toggled(),
        SettingKey::Sound => config.sound = !config.sound,
        SettingKey::Partner => config.partner_mode = !config.partner_mode,
        SettingKey::Reminder => {
            let presets: Vec<Option<NaiveTime>> = REMINDER_PRESETS
                .iter()
                .map(|p| p.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)))
                .collect();
            let idx = presets
                .iter()
                .position(|p| *p == config.reminder_time)
                .map_or(0, |i| (i + 1) % presets.len());
            config.reminder_time = presets[idx];
        }
        SettingKey::StartSide => config.start_side = config.start_side.opposite(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Goal, Language, Side};

    #[test]
    fn test_route_from_digit() {
        assert_eq!(Route::from_digit('1'), Some(Route::Home));
        assert_eq!(Route::from_digit('5'), Some(Route::Progress));
        assert_eq!(Route::from_digit('0'), None);
        assert_eq!(Route::from_digit('6'), None);
        assert_eq!(Route::from_digit('x'), None);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut config = Configuration::default();
        cycle(&mut config, SettingKey::Goal);
        assert_eq!(config.goal, Goal::Bridge);

        config.minutes_per_day = 25;
        cycle(&mut config, SettingKey::Minutes);
        assert_eq!(config.minutes_per_day, 10);

        cycle(&mut config, SettingKey::Lang);
        assert_eq!(config.lang, Language::En);

        cycle(&mut config, SettingKey::StartSide);
        assert_eq!(config.start_side, Side::Right);
    }

    #[test]
    fn test_cycle_reminder_presets() {
        let mut config = Configuration::default();
        cycle(&mut config, SettingKey::Reminder);
        assert_eq!(config.reminder_time, NaiveTime::from_hms_opt(6, 30, 0));

        config.reminder_time = NaiveTime::from_hms_opt(19, 0, 0);
        cycle(&mut config, SettingKey::Reminder);
        assert_eq!(config.reminder_time, None);

        config.reminder_time = NaiveTime::from_hms_opt(9, 15, 0);
        cycle(&mut config, SettingKey::Reminder);
        assert_eq!(config.reminder_time, None);
    }
}
