//! `SQLite` database connection and key-value operations.
//!
//! The database lives at `~/.stretch-coach/coach.db` and holds a single
//! `kv` table. Values are opaque strings; the state store keeps its
//! versioned JSON record there.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CoachError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path` and bring its schema up
    /// to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, CoachError> {
        Connection::open(path)
            .map_err(|e| {
                CoachError::Database(format!("Failed to open database {}: {e}", path.display()))
            })
            .and_then(Self::from_connection)
    }

    /// Open a migrated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, CoachError> {
        Connection::open_in_memory()
            .map_err(|e| CoachError::Database(format!("Failed to open in-memory database: {e}")))
            .and_then(Self::from_connection)
    }

    fn from_connection(conn: Connection) -> Result<Self, CoachError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, CoachError> {
        migrations::get_version(&self.conn)
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, key: &str) -> Result<Option<String>, CoachError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| CoachError::Database(format!("Failed to read key {key}: {e}")))
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put(&self, key: &str, value: &str) -> Result<(), CoachError> {
        self.conn
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| CoachError::Database(format!("Failed to write key {key}: {e}")))?;
        Ok(())
    }

    /// Remove `key`. Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove(&self, key: &str) -> Result<bool, CoachError> {
        let rows = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| CoachError::Database(format!("Failed to delete key {key}: {e}")))?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_put_get_overwrite() {
        let db = Database::open_in_memory().unwrap();

        assert!(db.get("state").unwrap().is_none());

        db.put("state", "{\"a\":1}").unwrap();
        assert_eq!(db.get("state").unwrap().as_deref(), Some("{\"a\":1}"));

        db.put("state", "{\"a\":2}").unwrap();
        assert_eq!(db.get("state").unwrap().as_deref(), Some("{\"a\":2}"));
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        db.put("state", "x").unwrap();

        assert!(db.remove("state").unwrap());
        assert!(!db.remove("state").unwrap());
        assert!(db.get("state").unwrap().is_none());
    }

    #[test]
    fn test_reopen_file_keeps_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("coach.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.put("state", "persisted").unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        assert_eq!(db.get("state").unwrap().as_deref(), Some("persisted"));
    }
}
