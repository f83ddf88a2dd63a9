//! Storage layer for stretch-coach.
//!
//! `SQLite`-backed key-value persistence for the state store.

mod database;
mod migrations;

pub use database::Database;
