//! Path resolution for stretch-coach configuration and data files.
//!
//! All data is stored in `~/.stretch-coach/` unless `STRETCH_COACH_HOME`
//! points elsewhere:
//! - `config.yaml` - Application configuration
//! - `coach.db` - `SQLite` key-value store holding preferences and logs
//! - `coach.log` - Log output while the terminal UI owns the screen
//! - `exports/` - Default target for exported session logs

use std::path::PathBuf;

use crate::error::CoachError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "STRETCH_COACH_HOME";

/// Paths to configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.stretch-coach/`
    pub root: PathBuf,
    /// Config file: `~/.stretch-coach/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.stretch-coach/coach.db`
    pub database: PathBuf,
    /// Log file used by the terminal UI.
    pub log_file: PathBuf,
    /// Exports directory: `~/.stretch-coach/exports/`
    pub exports: PathBuf,
}

impl Paths {
    /// Resolve paths from `STRETCH_COACH_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, CoachError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            if !root.trim().is_empty() {
                return Ok(Self::with_root(PathBuf::from(root)));
            }
        }

        let home = std::env::var("HOME").map_err(|_| {
            CoachError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".stretch-coach")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("coach.db"),
            log_file: root.join("coach.log"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), CoachError> {
        for dir in [&self.root, &self.exports] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    CoachError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-coach");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("coach.db"));
        assert_eq!(paths.log_file, root.join("coach.log"));
        assert_eq!(paths.exports, root.join("exports"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.exports.exists());
    }
}
