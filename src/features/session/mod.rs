//! Guided stretching sessions.
//!
//! - Segment planning from the exercise list and configuration
//! - A wall-clock countdown per segment
//! - The session controller with navigation guards and logging
//! - Audio cues between segments

pub mod clock;
pub mod controller;
pub mod cue;
pub mod planner;

pub use clock::{SessionClock, Tick};
pub use controller::{
    Guard, Navigation, SafetyNotice, SessionController, SessionEvent, SessionStatus,
};
pub use cue::{CuePlayer, Silent, TerminalBell};
pub use planner::{plan, routine, total_seconds, Phase, Segment, SegmentKind};
