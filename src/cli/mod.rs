//! Command-line interface: argument definitions, the resolved context, and
//! command implementations.

pub mod args;
pub mod commands;
pub mod context;

pub use context::Context;
