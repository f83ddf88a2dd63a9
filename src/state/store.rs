//! The state store: durable preferences and history with synchronous
//! change notification.
//!
//! Every [`StateStore::update`] is a read-modify-write-notify sequence: the
//! mutator edits a copy, the copy is persisted, and only then does it replace
//! the in-memory state and reach subscribers. A failed write leaves the
//! current state untouched.

use tracing::{debug, warn};

use super::model::{AppState, Configuration, Logs};
use crate::error::CoachError;
use crate::storage::Database;

/// Key of the versioned state record.
pub const STATE_KEY: &str = "ssc-state-v1";

/// Handle returned by [`StateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

/// Persistent application state.
pub struct StateStore {
    db: Database,
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    recovered: bool,
}

impl StateStore {
    /// Load the persisted record from `db`.
    ///
    /// A missing record yields the defaults. A record that fails to parse is
    /// logged and replaced by the defaults; it is overwritten on the next
    /// update.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself cannot be read.
    pub fn load(db: Database) -> Result<Self, CoachError> {
        let (state, recovered) = match db.get(STATE_KEY)? {
            None => (AppState::default(), false),
            Some(raw) => match serde_json::from_str::<AppState>(&raw) {
                Ok(state) => (state, false),
                Err(e) => {
                    warn!(error = %e, "persisted state is corrupt, falling back to defaults");
                    (AppState::default(), true)
                }
            },
        };

        debug!(
            sessions = state.logs.sessions.len(),
            back_off = state.logs.back_off.len(),
            "state loaded"
        );

        Ok(Self {
            db,
            state,
            listeners: Vec::new(),
            next_id: 0,
            recovered,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.state.config
    }

    /// Current logs.
    #[must_use]
    pub const fn logs(&self) -> &Logs {
        &self.state.logs
    }

    /// Whether loading discarded a corrupt record.
    #[must_use]
    pub const fn recovered_from_corruption(&self) -> bool {
        self.recovered
    }

    /// Apply `mutator` to a copy of the state, persist it, and notify.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails; the
    /// in-memory state is unchanged in that case.
    pub fn update<F>(&mut self, mutator: F) -> Result<(), CoachError>
    where
        F: FnOnce(&mut AppState),
    {
        let mut draft = self.state.clone();
        mutator(&mut draft);
        self.commit(draft)
    }

    /// Replace everything with the defaults, keeping the display language.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn reset_all(&mut self) -> Result<(), CoachError> {
        let mut fresh = AppState::default();
        fresh.config.lang = self.state.config.lang;
        self.commit(fresh)
    }

    /// Register a listener invoked after every successful update.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// The `logs` object as pretty-printed JSON, as offered for download.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_logs(&self) -> Result<String, CoachError> {
        Ok(serde_json::to_string_pretty(&self.state.logs)?)
    }

    fn commit(&mut self, next: AppState) -> Result<(), CoachError> {
        let raw = serde_json::to_string(&next)?;
        self.db.put(STATE_KEY, &raw)?;
        self.state = next;
        self.recovered = false;

        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        Ok(())
    }
}
