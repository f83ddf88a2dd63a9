//! The exercise catalog and its readiness state.
//!
//! The catalog is loaded once. Until it is `Ready`, no session context may be
//! built; a failed load is logged and stays failed for the process lifetime.

use std::path::Path;

use tracing::{error, info};

use super::types::Exercise;
use crate::error::CoachError;

const BUNDLED_EXERCISES: &str = include_str!("../../data/exercises.json");

/// Loading state of the exercise data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Data has not arrived yet.
    Loading,
    /// Data is available.
    Ready(Vec<Exercise>),
    /// Data could not be loaded; no retry is attempted.
    Failed(String),
}

/// Read-only exercise list.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    state: CatalogState,
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::loading()
    }
}

impl ExerciseCatalog {
    /// A catalog that has not loaded yet.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            state: CatalogState::Loading,
        }
    }

    /// The exercise list compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_EXERCISES, "bundled catalog")
    }

    /// Load from a JSON file. Failures are logged and yield a failed catalog.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw, &path.display().to_string()),
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to read exercises");
                Self {
                    state: CatalogState::Failed(format!(
                        "failed to read {}: {e}",
                        path.display()
                    )),
                }
            }
        }
    }

    /// Parse a JSON array of exercises. `source` names the origin in logs.
    #[must_use]
    pub fn from_json(raw: &str, source: &str) -> Self {
        let state = match serde_json::from_str::<Vec<Exercise>>(raw) {
            Ok(exercises) if exercises.is_empty() => {
                error!(source, "exercise list is empty");
                CatalogState::Failed(format!("{source} contains no exercises"))
            }
            Ok(exercises) => {
                info!(source, count = exercises.len(), "exercises loaded");
                CatalogState::Ready(exercises)
            }
            Err(e) => {
                error!(source, error = %e, "failed to parse exercises");
                CatalogState::Failed(format!("failed to parse {source}: {e}"))
            }
        };
        Self { state }
    }

    /// Current loading state.
    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Whether exercises are available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, CatalogState::Ready(_))
    }

    /// The loaded exercises.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::NotReady`] while loading or after a failure.
    pub fn exercises(&self) -> Result<&[Exercise], CoachError> {
        match &self.state {
            CatalogState::Ready(list) => Ok(list),
            CatalogState::Loading => Err(CoachError::NotReady("still loading".to_string())),
            CatalogState::Failed(reason) => Err(CoachError::NotReady(reason.clone())),
        }
    }

    /// Look up an exercise by id.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Exercise> {
        self.exercises().ok()?.iter().find(|e| e.id == id)
    }
}
