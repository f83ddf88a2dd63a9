//! Session orchestration.
//!
//! A [`SessionController`] is the session context: it owns the planned
//! segments, the clock for the current segment, navigation guards, notes,
//! and the saved flag. It is created when the session screen opens and
//! dropped when the user leaves it.

use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::clock::{SessionClock, Tick, MAX_POLL_INTERVAL};
use super::cue::CuePlayer;
use super::planner::{self, Phase, Segment};
use crate::core::{date_key, remaining_seconds, TimeSource};
use crate::error::CoachError;
use crate::exercises::{Exercise, ExerciseCatalog};
use crate::state::{BackOffLog, Configuration, SessionLog, StateStore};

/// Minimum time in phase B before moving on.
pub const MIN_PHASE_B_HOLD: Duration = Duration::from_secs(5);

/// Elapsed time above which `back` restarts the current segment.
pub const BACK_RESTART_THRESHOLD: Duration = Duration::from_secs(1);

/// Elapsed time below which `back` on the first segment does nothing.
pub const BACK_IDLE_THRESHOLD: Duration = Duration::from_millis(100);

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// Planned, never started.
    NotStarted,
    /// Counting down.
    Running,
    /// Frozen by the user or a back-off.
    Paused,
    /// Every segment finished.
    Completed,
}

/// Advisory shown when `next` is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Phase A must run to its end.
    FinishPhaseA,
    /// Phase B must be held for at least [`MIN_PHASE_B_HOLD`].
    HoldPhaseB,
}

impl Guard {
    /// Translation key for the message.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::FinishPhaseA => "session.guardPhaseA",
            Self::HoldPhaseB => "session.guardPhaseB",
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The current segment changed or restarted.
    Moved,
    /// The last segment was left; the session is complete.
    Completed,
    /// Refused; the guard is now shown.
    Refused(Guard),
    /// Nothing to do.
    Ignored,
}

/// Something that happened during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The clock moved on to the segment at this index.
    Advanced(usize),
    /// The final segment finished.
    Completed,
}

/// Safety message shown after a back-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyNotice {
    /// Exercise the user backed off from.
    pub exercise_id: u32,
    /// Translation key of the title.
    pub title_key: &'static str,
    /// Translation key of the body.
    pub body_key: &'static str,
}

/// The live session context.
pub struct SessionController<T: TimeSource> {
    time: T,
    cue: Box<dyn CuePlayer>,
    exercises: Vec<Exercise>,
    routine: Vec<u32>,
    segments: Vec<Segment>,
    total_seconds: u64,
    index: usize,
    clock: SessionClock,
    status: SessionStatus,
    guard: Option<Guard>,
    notes: String,
    saved: bool,
    sound: bool,
}

impl<T: TimeSource> SessionController<T> {
    /// Plan a fresh session from the catalog and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::NotReady`] unless the catalog has loaded.
    pub fn new(
        catalog: &ExerciseCatalog,
        config: &Configuration,
        time: T,
        cue: Box<dyn CuePlayer>,
        poll_interval: Duration,
    ) -> Result<Self, CoachError> {
        let exercises = catalog.exercises()?.to_vec();
        let mut controller = Self {
            time,
            cue,
            exercises,
            routine: Vec::new(),
            segments: Vec::new(),
            total_seconds: 0,
            index: 0,
            clock: SessionClock::new(Duration::ZERO, poll_interval.min(MAX_POLL_INTERVAL)),
            status: SessionStatus::NotStarted,
            guard: None,
            notes: String::new(),
            saved: false,
            sound: false,
        };
        controller.rebuild(config);
        Ok(controller)
    }

    fn rebuild(&mut self, config: &Configuration) {
        let routine = planner::routine(&self.exercises, config.partner_mode);
        self.routine = routine.iter().map(|e| e.id).collect();
        self.segments = planner::plan(&self.exercises, config);
        self.total_seconds = planner::total_seconds(&self.segments);
        self.index = 0;
        let first = self.segments.first().map_or(Duration::ZERO, Segment::duration);
        self.clock = SessionClock::new(first, self.clock.poll_interval());
        self.status = SessionStatus::NotStarted;
        self.guard = None;
        self.notes.clear();
        self.saved = false;
        self.sound = config.sound;

        info!(
            segments = self.segments.len(),
            total_seconds = self.total_seconds,
            exercises = self.routine.len(),
            "session planned"
        );

        if self.segments.is_empty() {
            self.complete();
        }
    }

    /// Run if paused or not started; pause if running.
    pub fn toggle_run_pause(&mut self) -> SessionStatus {
        match self.status {
            SessionStatus::Running => {
                self.clock.pause(self.time.now());
                self.status = SessionStatus::Paused;
            }
            SessionStatus::NotStarted | SessionStatus::Paused => {
                self.guard = None;
                self.clock.start(self.time.now());
                self.status = SessionStatus::Running;
            }
            SessionStatus::Completed => {}
        }
        debug!(status = ?self.status, "run/pause toggled");
        self.status
    }

    /// Move to the next segment unless a hold guard applies.
    pub fn next(&mut self) -> Navigation {
        let Some(segment) = self.current_segment() else {
            return Navigation::Ignored;
        };
        let elapsed = self.elapsed();

        let guard = if segment.is_phase(Phase::A) && elapsed < segment.duration() {
            Some(Guard::FinishPhaseA)
        } else if segment.is_phase(Phase::B) && elapsed < MIN_PHASE_B_HOLD {
            Some(Guard::HoldPhaseB)
        } else {
            None
        };

        if let Some(guard) = guard {
            debug!(index = self.index, ?guard, "next refused");
            self.guard = Some(guard);
            return Navigation::Refused(guard);
        }

        self.guard = None;
        match self.advance() {
            SessionEvent::Completed => Navigation::Completed,
            SessionEvent::Advanced(_) => Navigation::Moved,
        }
    }

    /// Restart the current segment, or step to the previous one when little
    /// time has passed.
    pub fn back(&mut self) -> Navigation {
        if self.status == SessionStatus::Completed {
            return Navigation::Ignored;
        }
        let elapsed = self.elapsed();
        if self.index == 0 && elapsed < BACK_IDLE_THRESHOLD {
            return Navigation::Ignored;
        }

        self.guard = None;
        if elapsed <= BACK_RESTART_THRESHOLD {
            self.index = self.index.saturating_sub(1);
        }
        let duration = self.current_duration();
        self.clock.restart(duration, self.time.now());
        debug!(index = self.index, "stepped back");
        Navigation::Moved
    }

    /// Discard progress and plan again from `config`.
    pub fn reset(&mut self, config: &Configuration) {
        self.clock.stop();
        self.rebuild(config);
    }

    /// Pause and record that the user backed off from the current exercise.
    ///
    /// Returns the safety notice to show, or `None` once the session is
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the back-off log cannot be persisted.
    pub fn back_off(&mut self, store: &mut StateStore) -> Result<Option<SafetyNotice>, CoachError> {
        if self.status == SessionStatus::Running {
            self.clock.pause(self.time.now());
            self.status = SessionStatus::Paused;
        }

        let Some(exercise_id) = self.current_segment().map(|s| s.exercise_id) else {
            return Ok(None);
        };

        let entry = BackOffLog {
            exercise_id,
            timestamp: self.time.wall(),
        };
        store.update(|state| state.logs.back_off.push(entry))?;
        warn!(exercise_id, "user backed off");

        Ok(Some(SafetyNotice {
            exercise_id,
            title_key: "session.backOff",
            body_key: "general.discomfortWarning",
        }))
    }

    /// Poll the clock. Call again once [`until_next_tick`](Self::until_next_tick) elapses.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if self.status != SessionStatus::Running {
            return None;
        }
        match self.clock.poll(self.time.now()) {
            Tick::SegmentComplete => Some(self.advance()),
            Tick::Running | Tick::Idle => None,
        }
    }

    fn advance(&mut self) -> SessionEvent {
        self.index = (self.index + 1).min(self.segments.len());
        if self.index >= self.segments.len() {
            self.complete();
            return SessionEvent::Completed;
        }

        let duration = self.current_duration();
        let now = self.time.now();
        self.clock.restart(duration, now);
        if self.status == SessionStatus::Running {
            self.clock.start(now);
        }
        self.play_cue();
        debug!(index = self.index, "advanced");
        SessionEvent::Advanced(self.index)
    }

    fn complete(&mut self) {
        self.clock.stop();
        self.index = self.segments.len();
        self.status = SessionStatus::Completed;
        self.guard = None;
        info!(total_seconds = self.total_seconds, "session completed");
    }

    fn play_cue(&mut self) {
        if !self.sound {
            return;
        }
        if let Err(e) = self.cue.play() {
            warn!(error = %e, "audio cue failed, sound disabled for this session");
            self.sound = false;
        }
    }

    /// Append the session log. Only the first call after completion writes.
    ///
    /// Returns the appended log, or `None` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::NotReady`] before completion, or an error if the
    /// log cannot be persisted.
    pub fn save(&mut self, store: &mut StateStore) -> Result<Option<SessionLog>, CoachError> {
        if self.status != SessionStatus::Completed {
            return Err(CoachError::NotReady("session is not complete".to_string()));
        }
        if self.saved {
            return Ok(None);
        }

        let now = self.time.wall();
        let log = SessionLog {
            id: format!("session-{}", now.timestamp_millis()),
            date: date_key(now.with_timezone(&Local).date_naive()),
            timestamp: now,
            duration: self.total_seconds,
            notes: self.notes.clone(),
            goal: store.config().goal,
            partner_mode: store.config().partner_mode,
            exercises: self.routine.clone(),
        };

        let entry = log.clone();
        store.update(|state| state.logs.sessions.push(entry))?;
        self.saved = true;
        info!(id = %log.id, "session saved");
        Ok(Some(log))
    }

    /// Stop the clock before the context is dropped.
    pub fn stop(&mut self) {
        self.clock.stop();
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Paused;
        }
    }

    /// Percentage of the planned time covered, 100 exactly when complete.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn progress_percent(&self) -> u8 {
        if self.status == SessionStatus::Completed {
            return 100;
        }
        if self.total_seconds == 0 {
            return 0;
        }
        let passed: u64 = self.segments[..self.index].iter().map(|s| s.seconds).sum();
        let current = self.current_segment().map_or(0.0, |s| {
            self.elapsed().min(s.duration()).as_secs_f64()
        });
        let percent = (100.0 * (passed as f64 + current) / self.total_seconds as f64).round();
        percent.clamp(0.0, 99.0) as u8
    }

    fn current_duration(&self) -> Duration {
        self.current_segment().map_or(Duration::ZERO, Segment::duration)
    }

    /// Segment being shown, `None` once complete.
    #[must_use]
    pub fn current_segment(&self) -> Option<&Segment> {
        self.segments.get(self.index)
    }

    /// Exercise of the current segment.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        let segment = self.current_segment()?;
        self.exercises.iter().find(|e| e.id == segment.exercise_id)
    }

    /// Time spent in the current segment.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed_at(self.time.now())
    }

    /// Whole seconds left in the current segment, rounded up.
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        remaining_seconds(self.current_duration(), self.elapsed())
    }

    /// Whether `next` would currently be refused by phase A's guard.
    #[must_use]
    pub fn next_blocked(&self) -> bool {
        self.current_segment()
            .is_some_and(|s| s.is_phase(Phase::A) && self.elapsed() < s.duration())
    }

    /// Whether `back` would do nothing.
    #[must_use]
    pub fn back_blocked(&self) -> bool {
        self.status == SessionStatus::Completed
            || (self.index == 0 && self.elapsed() < BACK_IDLE_THRESHOLD)
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Index of the current segment (equals the count once complete).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// All planned segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Planned length in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Exercise ids in routine order.
    #[must_use]
    pub fn routine(&self) -> &[u32] {
        &self.routine
    }

    /// Active guard message, if any.
    #[must_use]
    pub const fn guard(&self) -> Option<Guard> {
        self.guard
    }

    /// Session notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes. Ignored after saving.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if !self.saved {
            self.notes = notes.into();
        }
    }

    /// Append a character to the notes. Ignored after saving.
    pub fn push_note(&mut self, c: char) {
        if !self.saved {
            self.notes.push(c);
        }
    }

    /// Remove the last character of the notes.
    pub fn pop_note(&mut self) {
        if !self.saved {
            self.notes.pop();
        }
    }

    /// Whether the session log has been written.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.saved
    }

    /// Whether audio cues are still enabled.
    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound
    }

    /// Time left until the next [`tick`](Self::tick) is due, or `None` while
    /// the clock is stopped.
    #[must_use]
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.clock
            .next_deadline()
            .map(|due| due.saturating_duration_since(self.time.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::session::cue::{MockCuePlayer, Silent};
    use crate::features::session::planner::SegmentKind;
    use crate::state::{Goal, Language, Side};
    use crate::storage::Database;
    use chrono::{TimeZone, Utc};

    fn catalog_json(asym: &[bool]) -> String {
        let items: Vec<String> = asym
            .iter()
            .enumerate()
            .map(|(i, asym)| {
                format!(
                    r#"{{"id":{},"name":{{"en":"Ex {}"}},"cues":{{"en":[]}},"image":"","asym":{asym}}}"#,
                    i + 1,
                    i + 1
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    fn controller_with(
        asym: &[bool],
        config: &Configuration,
        cue: Box<dyn CuePlayer>,
    ) -> (SessionController<ManualClock>, ManualClock) {
        let catalog = ExerciseCatalog::from_json(&catalog_json(asym), "test");
        let time = ManualClock::starting_at(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        let controller = SessionController::new(
            &catalog,
            config,
            time.clone(),
            cue,
            Duration::from_millis(50),
        )
        .unwrap();
        (controller, time)
    }

    fn controller(asym: &[bool]) -> (SessionController<ManualClock>, ManualClock) {
        controller_with(asym, &Configuration::default(), Box::new(Silent))
    }

    fn store() -> StateStore {
        StateStore::load(Database::open_in_memory().unwrap()).unwrap()
    }

    fn run_to_end(controller: &mut SessionController<ManualClock>, time: &ManualClock) {
        for _ in 0..10_000 {
            if controller.status() == SessionStatus::Completed {
                return;
            }
            time.advance(Duration::from_millis(50));
            controller.tick();
        }
    }

    #[test]
    fn test_not_ready_catalog_is_refused() {
        let result = SessionController::new(
            &ExerciseCatalog::loading(),
            &Configuration::default(),
            ManualClock::default(),
            Box::new(Silent),
            Duration::from_millis(50),
        );
        assert!(matches!(result, Err(CoachError::NotReady(_))));
    }

    #[test]
    fn test_initial_state() {
        let (controller, _) = controller(&[false, false]);

        assert_eq!(controller.status(), SessionStatus::NotStarted);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.total_seconds(), 43);
        assert_eq!(controller.progress_percent(), 0);
        assert_eq!(controller.remaining_secs(), 10);
        assert!(controller.back_blocked());
    }

    #[test]
    fn test_toggle_run_pause() {
        let (mut controller, time) = controller(&[false]);

        assert_eq!(controller.toggle_run_pause(), SessionStatus::Running);
        time.advance_secs(2.0);
        assert_eq!(controller.toggle_run_pause(), SessionStatus::Paused);
        time.advance_secs(5.0);
        assert_eq!(controller.elapsed(), Duration::from_secs(2));
        assert_eq!(controller.toggle_run_pause(), SessionStatus::Running);
    }

    #[test]
    fn test_next_guard_on_phase_a() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        time.advance_secs(4.0);

        assert_eq!(controller.next(), Navigation::Refused(Guard::FinishPhaseA));
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.guard(), Some(Guard::FinishPhaseA));
        assert!(controller.next_blocked());

        time.advance_secs(6.0);
        assert_eq!(controller.next(), Navigation::Moved);
        assert_eq!(controller.index(), 1);
        assert_eq!(controller.guard(), None);
        assert_eq!(controller.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_next_guard_on_phase_b() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        assert_eq!(controller.tick(), Some(SessionEvent::Advanced(1)));

        time.advance_secs(3.0);
        assert_eq!(controller.next(), Navigation::Refused(Guard::HoldPhaseB));
        time.advance_secs(2.0);
        assert_eq!(controller.next(), Navigation::Moved);
        assert_eq!(
            controller.current_segment().map(|s| s.kind),
            Some(SegmentKind::Transition)
        );
    }

    #[test]
    fn test_next_on_transition_is_unguarded() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.tick();
        time.advance_secs(5.0);
        controller.next();

        assert_eq!(controller.index(), 2);
        assert_eq!(controller.next(), Navigation::Moved);
        assert_eq!(controller.index(), 3);
    }

    #[test]
    fn test_toggle_clears_guard() {
        let (mut controller, _) = controller(&[false]);
        controller.next();
        assert!(controller.guard().is_some());

        controller.toggle_run_pause();
        assert_eq!(controller.guard(), None);
    }

    #[test]
    fn test_back_at_start_is_ignored() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        time.advance_secs(0.05);

        assert_eq!(controller.back(), Navigation::Ignored);
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn test_back_restarts_after_threshold() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.tick();
        time.advance_secs(1.5);

        assert_eq!(controller.back(), Navigation::Moved);
        assert_eq!(controller.index(), 1);
        assert_eq!(controller.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_back_steps_to_previous_segment() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.tick();
        time.advance_secs(0.5);

        assert_eq!(controller.back(), Navigation::Moved);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.elapsed(), Duration::ZERO);
        assert_eq!(controller.status(), SessionStatus::Running);
    }

    #[test]
    fn test_back_on_first_segment_restarts() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        time.advance_secs(0.5);

        assert_eq!(controller.back(), Navigation::Moved);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_pause_does_not_drift() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        time.advance_secs(3.0);
        controller.tick();
        controller.toggle_run_pause();
        time.advance_secs(30.0);
        assert_eq!(controller.tick(), None);
        controller.toggle_run_pause();
        time.advance_secs(1.0);
        controller.tick();

        assert_eq!(controller.index(), 0);
        assert_eq!(controller.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn test_complete_and_save_once() {
        let (mut controller, time) = controller(&[false, true]);
        let mut store = store();
        controller.toggle_run_pause();
        run_to_end(&mut controller, &time);

        assert_eq!(controller.status(), SessionStatus::Completed);
        assert_eq!(controller.progress_percent(), 100);
        assert_eq!(controller.current_segment(), None);
        assert_eq!(controller.next(), Navigation::Ignored);

        controller.set_notes("tight hamstrings");
        let log = controller.save(&mut store).unwrap().unwrap();
        assert_eq!(log.exercises, vec![1, 2]);
        assert_eq!(log.duration, 20 + 3 + 43);
        assert_eq!(log.notes, "tight hamstrings");
        assert!(log.id.starts_with("session-"));

        assert_eq!(controller.save(&mut store).unwrap(), None);
        assert_eq!(store.logs().sessions.len(), 1);
    }

    #[test]
    fn test_save_snapshots_store_config() {
        let (mut controller, time) = controller(&[false]);
        let mut store = store();
        store
            .update(|s| {
                s.config.goal = Goal::Bridge;
                s.config.partner_mode = true;
            })
            .unwrap();
        controller.toggle_run_pause();
        run_to_end(&mut controller, &time);

        let log = controller.save(&mut store).unwrap().unwrap();
        assert_eq!(log.goal, Goal::Bridge);
        assert!(log.partner_mode);
    }

    #[test]
    fn test_save_before_completion_fails() {
        let (mut controller, _) = controller(&[false]);
        let mut store = store();
        assert!(matches!(controller.save(&mut store), Err(CoachError::NotReady(_))));
        assert!(store.logs().sessions.is_empty());
    }

    #[test]
    fn test_next_past_last_segment_completes() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.next();
        time.advance_secs(5.0);

        assert_eq!(controller.next(), Navigation::Completed);
        assert_eq!(controller.status(), SessionStatus::Completed);
        assert_eq!(controller.index(), 2);
    }

    #[test]
    fn test_progress() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.tick();
        time.advance_secs(10.0);
        controller.tick();
        time.advance_secs(1.5);
        controller.tick();

        // 21.5 of 43 seconds
        assert_eq!(controller.progress_percent(), 50);
        assert!(controller.progress_percent() < 100);
    }

    #[test]
    fn test_progress_reaches_100_only_when_complete() {
        let (mut controller, time) = controller(&[false, false]);
        controller.toggle_run_pause();
        for secs in [10.0, 10.0, 3.0, 10.0] {
            time.advance_secs(secs);
            controller.tick();
        }
        time.advance_secs(9.8);
        controller.tick();

        // 42.8 of 43 seconds would round up to 100.
        assert_eq!(controller.status(), SessionStatus::Running);
        assert_eq!(controller.progress_percent(), 99);

        time.advance_secs(0.2);
        controller.tick();
        assert_eq!(controller.status(), SessionStatus::Completed);
        assert_eq!(controller.progress_percent(), 100);
    }

    #[test]
    fn test_until_next_tick_follows_clock() {
        let (mut controller, time) = controller(&[false]);
        assert_eq!(controller.until_next_tick(), None);

        controller.toggle_run_pause();
        assert_eq!(controller.until_next_tick(), Some(Duration::from_millis(50)));
        time.advance(Duration::from_millis(20));
        assert_eq!(controller.until_next_tick(), Some(Duration::from_millis(30)));
        time.advance(Duration::from_millis(40));
        assert_eq!(controller.until_next_tick(), Some(Duration::ZERO));

        controller.tick();
        assert_eq!(controller.until_next_tick(), Some(Duration::from_millis(50)));
        controller.toggle_run_pause();
        assert_eq!(controller.until_next_tick(), None);
    }

    #[test]
    fn test_back_off_logs_and_pauses() {
        let (mut controller, time) = controller(&[false, false]);
        let mut store = store();
        controller.toggle_run_pause();
        time.advance_secs(2.0);

        let notice = controller.back_off(&mut store).unwrap().unwrap();
        assert_eq!(notice.exercise_id, 1);
        assert_eq!(notice.body_key, "general.discomfortWarning");
        assert_eq!(controller.status(), SessionStatus::Paused);
        assert_eq!(controller.index(), 0);
        assert_eq!(store.logs().back_off.len(), 1);
        assert_eq!(store.logs().back_off[0].exercise_id, 1);
        assert_eq!(store.logs().back_off[0].timestamp, time.wall());
    }

    #[test]
    fn test_reset_replans_with_new_config() {
        let (mut controller, time) = controller(&[true]);
        controller.toggle_run_pause();
        time.advance_secs(10.0);
        controller.tick();

        let config = Configuration {
            start_side: Side::Right,
            lang: Language::En,
            ..Configuration::default()
        };
        controller.reset(&config);

        assert_eq!(controller.status(), SessionStatus::NotStarted);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.current_segment().and_then(|s| s.side), Some(Side::Right));
    }

    #[test]
    fn test_cue_played_on_advance() {
        let mut cue = MockCuePlayer::new();
        cue.expect_play().times(1).returning(|| Ok(()));
        let config = Configuration {
            sound: true,
            ..Configuration::default()
        };
        let (mut controller, time) = controller_with(&[false], &config, Box::new(cue));
        controller.toggle_run_pause();
        time.advance_secs(10.0);

        assert_eq!(controller.tick(), Some(SessionEvent::Advanced(1)));
    }

    #[test]
    fn test_cue_failure_disables_sound() {
        let mut cue = MockCuePlayer::new();
        cue.expect_play()
            .times(1)
            .returning(|| Err(CoachError::Terminal("no audio".to_string())));
        let config = Configuration {
            sound: true,
            ..Configuration::default()
        };
        let (mut controller, time) = controller_with(&[false, false], &config, Box::new(cue));
        controller.toggle_run_pause();
        run_to_end(&mut controller, &time);

        assert!(!controller.sound_enabled());
        assert_eq!(controller.status(), SessionStatus::Completed);
    }

    #[test]
    fn test_sound_off_never_plays() {
        let mut cue = MockCuePlayer::new();
        cue.expect_play().never();
        let (mut controller, time) =
            controller_with(&[false], &Configuration::default(), Box::new(cue));
        controller.toggle_run_pause();
        run_to_end(&mut controller, &time);
    }

    #[test]
    fn test_notes_frozen_after_save() {
        let (mut controller, time) = controller(&[false]);
        let mut store = store();
        controller.toggle_run_pause();
        run_to_end(&mut controller, &time);
        controller.push_note('a');
        controller.pop_note();
        controller.push_note('b');
        controller.save(&mut store).unwrap();
        controller.push_note('c');

        assert_eq!(controller.notes(), "b");
        assert!(controller.is_saved());
    }

    #[test]
    fn test_stop_pauses() {
        let (mut controller, time) = controller(&[false]);
        controller.toggle_run_pause();
        controller.stop();
        time.advance_secs(3.0);

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_exercise_lookup() {
        let (controller, _) = controller(&[false]);
        assert_eq!(
            controller.current_exercise().map(|e| e.name_in(Language::En)),
            Some("Ex 1")
        );
    }
}
