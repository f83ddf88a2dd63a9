//! Feature implementations for stretch-coach.
//!
//! - `session`: segment planning, the session clock, and the controller
//! - `progress`: heatmap, monthly calendar, averages, and log export

pub mod progress;
pub mod session;
