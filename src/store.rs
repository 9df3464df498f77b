//! Local snapshot persistence.
//!
//! The whole roster is stored as one JSON document:
//!
//! ```json
//! { "employees": [ { "رقم الموظف": "60000", ... } ], "lastUpdate": "2026-06-01T08:00:00Z" }
//! ```
//!
//! Every save rewrites the file; there is no incremental update.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::types::EmployeeRecord;

/// Persisted roster state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    #[serde(rename = "lastUpdate", default = "Utc::now")]
    pub last_update: DateTime<Utc>,
}

impl Snapshot {
    /// Snapshot of `employees` stamped with the current time.
    pub fn now(employees: Vec<EmployeeRecord>) -> Self {
        Self {
            employees,
            last_update: Utc::now(),
        }
    }

    /// An empty snapshot, used when the stored file cannot be read back.
    pub fn empty() -> Self {
        Self::now(Vec::new())
    }
}

/// Snapshot file at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet. A file that exists but does not
    /// parse is logged and treated as an empty snapshot.
    pub fn load(&self) -> StoreResult<Option<Snapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Snapshot>(&text) {
            Ok(snapshot) => {
                tracing::debug!(
                    path = %self.path.display(),
                    employees = snapshot.employees.len(),
                    "snapshot loaded"
                );
                Ok(Some(snapshot))
            }
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "snapshot unreadable; starting empty");
                Ok(Some(Snapshot::empty()))
            }
        }
    }

    /// Write `employees` as the new snapshot, replacing the previous one atomically.
    pub fn save(&self, employees: &[EmployeeRecord]) -> StoreResult<Snapshot> {
        let snapshot = Snapshot::now(employees.to_vec());
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: tmp file + rename
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &bytes)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), employees = employees.len(), "snapshot saved");
        Ok(snapshot)
    }

    /// Delete the stored snapshot. Missing files are not an error.
    pub fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "snapshot cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeField;

    fn record(number: &str) -> EmployeeRecord {
        let mut rec = EmployeeRecord::new();
        rec.set(EmployeeField::EmployeeNumber, number);
        rec.set(EmployeeField::PassportExpiry, "2088/11/10");
        rec.insert_key("badge", "blue".to_string());
        rec
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("snapshot.json"));
        let saved = store.save(&[record("1"), record("2")]).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.employees, saved.employees);
        assert_eq!(loaded.employees[1].get_by_key("badge"), Some("blue"));
        assert!(!store.tmp_path().exists());

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"lastUpdate\""));
        assert!(raw.contains("\"employees\""));
    }

    #[test]
    fn reload_keeps_extra_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        let mut rec = record("1");
        rec.insert_key("zeta", "1".to_string());
        rec.insert_key("alpha", "2".to_string());
        store.save(&[rec.clone()]).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.employees, vec![rec]);
        let keys: Vec<_> = loaded.employees[0].extra.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["badge", "zeta", "alpha"]);
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{not json").unwrap();

        let loaded = SnapshotStore::new(&path).load().unwrap().unwrap();
        assert!(loaded.employees.is_empty());
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        store.save(&[record("1")]).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
