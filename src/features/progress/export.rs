//! Writing the history to a JSON file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::core::date_key;
use crate::error::CoachError;
use crate::state::StateStore;

/// Default export file name for `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("suzuki-stretch-logs-{}.json", date_key(date))
}

/// Write the current logs as pretty JSON to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_export(store: &StateStore, path: &Path) -> Result<PathBuf, CoachError> {
    let json = store.export_logs()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    info!(path = %path.display(), "logs exported");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BackOffLog;
    use crate::storage::Database;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_file_name(date), "suzuki-stretch-logs-2024-05-01.json");
    }

    #[test]
    fn test_write_export_contains_logs_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = StateStore::load(Database::open_in_memory().unwrap()).unwrap();
        store
            .update(|s| {
                s.logs.back_off.push(BackOffLog {
                    exercise_id: 3,
                    timestamp: Utc::now(),
                });
            })
            .unwrap();

        let path = temp_dir.path().join("nested").join("out.json");
        write_export(&store, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["backOff"][0]["exerciseId"], 3);
        assert!(value["sessions"].as_array().unwrap().is_empty());
        assert!(value.get("lang").is_none());
    }
}
