//! Core helpers for stretch-coach.
//!
//! Shared date/time utilities and the time source abstraction used by the
//! session clock.

mod datetime;
mod time;

pub use datetime::{
    date_key, days_in_month, format_mmss, format_reminder, monday_index, parse_date_key,
    parse_reminder, remaining_seconds,
};
pub use time::{SystemClock, TimeSource};
#[cfg(test)]
pub use time::ManualClock;
