//! Countdown for a single segment.
//!
//! Elapsed time is always derived from a captured start instant, so pausing
//! and resuming never drifts. While running, the clock holds a pending tick
//! deadline; stopping clears it and any poll arriving afterwards is ignored.

use std::time::{Duration, Instant};

/// Slack below the segment length at which a segment counts as complete.
pub const COMPLETION_EPSILON: Duration = Duration::from_millis(10);

/// Upper bound on the poll interval.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of polling the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No tick was pending; the poll was ignored.
    Idle,
    /// Still counting down.
    Running,
    /// The segment just finished; the clock has stopped.
    SegmentComplete,
}

/// Countdown engine for the current segment.
#[derive(Debug, Clone)]
pub struct SessionClock {
    duration: Duration,
    elapsed: Duration,
    started_at: Option<Instant>,
    pending: Option<Instant>,
    poll_interval: Duration,
}

impl SessionClock {
    /// A stopped clock for a segment of `duration`.
    #[must_use]
    pub fn new(duration: Duration, poll_interval: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            started_at: None,
            pending: None,
            poll_interval: poll_interval.min(MAX_POLL_INTERVAL),
        }
    }

    /// Start or resume counting. Does nothing if already running.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.started_at = Some(now.checked_sub(self.elapsed).unwrap_or(now));
        self.pending = Some(now + self.poll_interval);
    }

    /// Freeze elapsed time and stop polling.
    pub fn pause(&mut self, now: Instant) {
        if self.is_running() {
            self.elapsed = self.elapsed_at(now);
        }
        self.stop();
    }

    /// Stop polling without sampling the time again.
    pub fn stop(&mut self) {
        self.started_at = None;
        self.pending = None;
    }

    /// Begin a new segment of `duration` from zero, keeping the running state.
    pub fn restart(&mut self, duration: Duration, now: Instant) {
        let was_running = self.is_running();
        self.stop();
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        if was_running {
            self.start(now);
        }
    }

    /// Handle a poll at `now`.
    pub fn poll(&mut self, now: Instant) -> Tick {
        if self.pending.is_none() {
            return Tick::Idle;
        }

        self.elapsed = self.elapsed_at(now);
        if self.elapsed + COMPLETION_EPSILON >= self.duration {
            self.elapsed = self.duration;
            self.stop();
            return Tick::SegmentComplete;
        }

        self.pending = Some(now + self.poll_interval);
        Tick::Running
    }

    /// Elapsed time at `now`, clamped to the segment length.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.started_at.map_or(self.elapsed, |start| {
            now.saturating_duration_since(start).min(self.duration)
        })
    }

    /// Elapsed time as of the last poll or pause.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current segment length.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the clock is counting.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// When the next poll is due, if one is pending.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Interval between polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
