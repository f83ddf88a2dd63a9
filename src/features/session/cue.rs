//! Audio cues played between segments.

use std::io::Write;

use crate::error::CoachError;

/// Plays the short cue that marks a new segment.
#[cfg_attr(test, mockall::automock)]
pub trait CuePlayer {
    /// Play one cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device rejects the cue.
    fn play(&mut self) -> Result<(), CoachError>;
}

/// Rings the terminal bell on stdout.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn play(&mut self) -> Result<(), CoachError> {
        let mut out = std::io::stdout().lock();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// A player that never makes a sound.
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self) -> Result<(), CoachError> {
        Ok(())
    }
}
