//! Time sources for the session engine.
//!
//! The clock never accumulates deltas; it asks a [`TimeSource`] for the
//! current monotonic instant and derives elapsed time from a captured start.
//! Tests drive a manually advanced clock instead of sleeping.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Supplies monotonic and wall-clock time.
pub trait TimeSource {
    /// Monotonic instant used for countdowns.
    fn now(&self) -> Instant;

    /// Wall-clock time used for log timestamps.
    fn wall(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use chrono::{DateTime, Utc};

    use super::TimeSource;

    /// A manually advanced clock. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        state: Rc<Cell<(Instant, DateTime<Utc>)>>,
    }

    impl ManualClock {
        /// Start at the current instant and the given wall time.
        #[must_use]
        pub fn starting_at(wall: DateTime<Utc>) -> Self {
            Self {
                state: Rc::new(Cell::new((Instant::now(), wall))),
            }
        }

        /// Move time forward.
        pub fn advance(&self, by: Duration) {
            let (instant, wall) = self.state.get();
            let wall = chrono::Duration::from_std(by).map_or(wall, |d| wall + d);
            self.state.set((instant + by, wall));
        }

        /// Move time forward by fractional seconds.
        pub fn advance_secs(&self, secs: f64) {
            self.advance(Duration::from_secs_f64(secs));
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::starting_at(Utc::now())
        }
    }

    impl TimeSource for ManualClock {
        fn now(&self) -> Instant {
            self.state.get().0
        }

        fn wall(&self) -> DateTime<Utc> {
            self.state.get().1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances_both_times() {
        let wall = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let clock = ManualClock::starting_at(wall);
        let start = clock.now();

        clock.advance_secs(2.5);

        assert_eq!(clock.now() - start, Duration::from_millis(2_500));
        assert_eq!(clock.wall(), wall + chrono::Duration::milliseconds(2_500));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::from_secs(1));

        assert_eq!(clock.now() - start, Duration::from_secs(1));
    }
}
