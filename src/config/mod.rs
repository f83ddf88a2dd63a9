//! Configuration management for stretch-coach.
//!
//! This module handles loading and saving configuration from `~/.stretch-coach/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{CatalogConfig, ColorSetting, Config, GeneralConfig, SessionConfig};
