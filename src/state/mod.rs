//! Persistent user state.
//!
//! The model types describe the versioned record; the store owns the
//! in-memory copy, writes it through to `SQLite`, and notifies subscribers.

mod model;
mod store;

pub use model::{
    AppState, BackOffLog, Configuration, Goal, Language, Logs, SessionLog, Side, MINUTES_OPTIONS,
};
pub use store::{StateStore, SubscriptionId, STATE_KEY};
