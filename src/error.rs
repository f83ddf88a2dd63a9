//! Error types for stretch-coach.

use thiserror::Error;

/// Errors produced by the coach library.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Configuration could not be read, parsed, or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// The `SQLite` state database failed.
    #[error("database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The exercise catalog has not been loaded successfully.
    #[error("exercise data is not ready: {0}")]
    NotReady(String),

    /// A user-supplied value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON (de)serialization failed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal front-end failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<rusqlite::Error> for CoachError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoachError::NotReady("still loading".to_string());
        assert_eq!(err.to_string(), "exercise data is not ready: still loading");
    }

    #[test]
    fn test_from_serde_json() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CoachError = parse.into();
        assert!(matches!(err, CoachError::Parse(_)));
    }
}
