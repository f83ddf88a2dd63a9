//! Schema migrations for the state database.
//!
//! `PRAGMA user_version` records how many entries of [`MIGRATIONS`] have
//! been applied. Opening a database applies the rest, each in its own
//! transaction.

use rusqlite::Connection;
use tracing::info;

use crate::error::CoachError;

/// Schema steps in order; entry `n` upgrades version `n` to `n + 1`.
const MIGRATIONS: &[&str] = &[
    // v1: key-value table backing the state store
    r"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    ",
];

/// Schema version after every migration has run.
#[must_use]
pub fn latest_version() -> i32 {
    i32::try_from(MIGRATIONS.len()).unwrap_or(i32::MAX)
}

/// Schema version recorded in the database; 0 for a new file.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn get_version(conn: &Connection) -> Result<i32, CoachError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| CoachError::Database(format!("Failed to get schema version: {e}")))
}

/// Apply every migration newer than the recorded version.
///
/// # Errors
///
/// Returns an error if a migration fails; that step is rolled back.
pub fn run(conn: &Connection) -> Result<(), CoachError> {
    let current = get_version(conn)?;
    let pending = MIGRATIONS
        .iter()
        .enumerate()
        .skip(usize::try_from(current).unwrap_or(0));

    for (idx, sql) in pending {
        let version = i32::try_from(idx + 1).unwrap_or(i32::MAX);
        let failed = |e: rusqlite::Error| {
            CoachError::Database(format!("Migration v{version} failed: {e}"))
        };
        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))
            .map_err(failed)?;
        tx.commit().map_err(failed)?;
        info!(version, "schema migrated");
    }

    Ok(())
}
