//! stretch-coach - An offline Suzuki stretching coach
//!
//! Plans the daily routine as timed segments, runs them on a wall-clock
//! driven session clock, and keeps preferences and history in a local
//! `SQLite` store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod exercises;
pub mod features;
pub mod i18n;
pub mod output;
pub mod state;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::CoachError;
pub use features::session::SessionController;
pub use state::StateStore;
