//! Segment planning.
//!
//! Turns the exercise list and the user's configuration into the ordered,
//! timed segments a session walks through.

use std::time::Duration;

use serde::Serialize;

use crate::exercises::Exercise;
use crate::state::{Configuration, Side};

/// Exercises included when partner mode is off.
pub const SOLO_EXERCISE_COUNT: usize = 24;

/// Seconds to get into the next position.
pub const TRANSITION_SECS: u64 = 3;

/// Seconds to switch to the other side.
pub const SIDE_SWITCH_SECS: u64 = 3;

/// Seconds per hold phase.
pub const PHASE_SECS: u64 = 10;

/// Hold phase within one side of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Initial hold.
    A,
    /// Deepened hold.
    B,
}

impl Phase {
    /// Translation key for the phase label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::A => "session.phaseA",
            Self::B => "session.phaseB",
        }
    }
}

/// What a segment asks the user to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// Move into the next exercise.
    Transition,
    /// Hold the stretch.
    Phase(Phase),
    /// Change to the other side.
    SideSwitch,
}

impl SegmentKind {
    /// Translation key for the segment label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Transition => "session.transition",
            Self::Phase(phase) => phase.label_key(),
            Self::SideSwitch => "session.sideSwitch",
        }
    }
}

/// One timed step of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Kind of step.
    pub kind: SegmentKind,
    /// Side for asymmetrical exercises; a side switch carries the side being
    /// switched to.
    pub side: Option<Side>,
    /// Length in whole seconds.
    pub seconds: u64,
    /// Exercise the segment belongs to (for transitions, the upcoming one).
    pub exercise_id: u32,
    /// Position of that exercise in the routine.
    pub exercise_index: usize,
}

impl Segment {
    /// Segment length.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }

    /// Whether this is the given hold phase.
    #[must_use]
    pub fn is_phase(&self, phase: Phase) -> bool {
        self.kind == SegmentKind::Phase(phase)
    }
}

/// The exercises a session covers.
#[must_use]
pub fn routine(exercises: &[Exercise], partner_mode: bool) -> &[Exercise] {
    if partner_mode {
        exercises
    } else {
        &exercises[..exercises.len().min(SOLO_EXERCISE_COUNT)]
    }
}

/// Build the segment sequence for `config`.
///
/// Every exercise after the first is preceded by a transition. Asymmetrical
/// exercises run both phases on the configured start side, switch, and run
/// both phases on the other side.
#[must_use]
pub fn plan(exercises: &[Exercise], config: &Configuration) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (exercise_index, exercise) in routine(exercises, config.partner_mode).iter().enumerate() {
        let segment = |kind, side, seconds| Segment {
            kind,
            side,
            seconds,
            exercise_id: exercise.id,
            exercise_index,
        };

        if exercise_index > 0 {
            segments.push(segment(SegmentKind::Transition, None, TRANSITION_SECS));
        }

        let hold = |side| {
            [Phase::A, Phase::B].map(|phase| segment(SegmentKind::Phase(phase), side, PHASE_SECS))
        };

        if exercise.asym {
            let first = config.start_side;
            let second = first.opposite();
            segments.extend(hold(Some(first)));
            segments.push(segment(SegmentKind::SideSwitch, Some(second), SIDE_SWITCH_SECS));
            segments.extend(hold(Some(second)));
        } else {
            segments.extend(hold(None));
        }
    }

    segments
}

/// Sum of segment lengths in seconds.
#[must_use]
pub fn total_seconds(segments: &[Segment]) -> u64 {
    segments.iter().map(|s| s.seconds).sum()
}
