//! Application state: the roster plus where it is loaded from and saved to.
//!
//! [`App::bootstrap`] mirrors startup: the first bundled `DB.*` file that yields records wins
//! and is written through to the snapshot; otherwise the snapshot is loaded. Every mutation
//! made through [`App`] is followed by a snapshot save.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alerts::{self, AlertReport};
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::ingestion::{self, IngestionOptions, TracingObserver};
use crate::roster::Roster;
use crate::store::SnapshotStore;
use crate::types::EmployeeRecord;

/// Where the roster came from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A bundled data file.
    Bundled(PathBuf),
    /// The local snapshot.
    Snapshot,
    /// Nothing found; the roster starts empty.
    Empty,
}

/// Summary of the persisted state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub employees: usize,
    pub snapshot_path: PathBuf,
    pub last_update: Option<DateTime<Utc>>,
    pub snapshot_bytes: Option<u64>,
}

/// Roster plus its persistence.
#[derive(Debug)]
pub struct App {
    config: Config,
    store: SnapshotStore,
    roster: Roster,
    ingestion: IngestionOptions,
}

impl App {
    /// Create an app with an empty roster. Nothing is read from disk.
    pub fn new(config: Config) -> Self {
        let store = SnapshotStore::new(config.snapshot_path());
        let ingestion = IngestionOptions {
            observer: Some(Arc::new(TracingObserver)),
            ..Default::default()
        };
        Self {
            config,
            store,
            roster: Roster::new(),
            ingestion,
        }
    }

    /// Create an app and load the roster from the bundled files or the snapshot.
    pub fn bootstrap(config: Config) -> StoreResult<(Self, LoadSource)> {
        let mut app = Self::new(config);
        let source = app.load()?;
        Ok((app, source))
    }

    /// (Re)load the roster: bundled files first, then the snapshot.
    pub fn load(&mut self) -> StoreResult<LoadSource> {
        if let Some(bundled) = ingestion::load_bundled(&self.config.data.data_dir, &self.ingestion) {
            self.roster.replace_all(bundled.records);
            self.save()?;
            return Ok(LoadSource::Bundled(bundled.path));
        }

        tracing::info!("no bundled data file found; loading snapshot");
        match self.store.load()? {
            Some(snapshot) => {
                self.roster.replace_all(snapshot.employees);
                Ok(LoadSource::Snapshot)
            }
            None => {
                self.roster.clear();
                Ok(LoadSource::Empty)
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Persist the current roster.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save(self.roster.records())?;
        Ok(())
    }

    /// Replace the roster with the contents of `path`.
    ///
    /// Fails without touching the roster when the file cannot be read, does not parse, or
    /// holds no records.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let records = ingestion::ingest_from_path(path, &self.ingestion)?;
        if records.is_empty() {
            return Err(StoreError::EmptyImport {
                path: path.display().to_string(),
            });
        }

        let count = records.len();
        self.roster.replace_all(records);
        self.save()?;
        tracing::info!(path = %path.display(), records = count, "roster imported");
        Ok(count)
    }

    pub fn add(&mut self, record: EmployeeRecord) -> StoreResult<()> {
        self.roster.add(record)?;
        self.save()
    }

    pub fn update(&mut self, number: &str, record: EmployeeRecord) -> StoreResult<()> {
        self.roster.update(number, record)?;
        self.save()
    }

    pub fn remove(&mut self, number: &str) -> StoreResult<EmployeeRecord> {
        let removed = self.roster.remove(number)?;
        self.save()?;
        Ok(removed)
    }

    /// Drop every record and reset the snapshot to an empty roster.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.roster.clear();
        self.store.clear()?;
        self.save()
    }

    /// Expiry alerts as of today (UTC), using the configured window.
    pub fn alerts(&self) -> AlertReport {
        self.alerts_on(alerts::today_utc())
    }

    /// Expiry alerts as of `today`, using the configured window.
    pub fn alerts_on(&self, today: chrono::NaiveDate) -> AlertReport {
        alerts::compute_alerts(self.roster.records(), today, self.config.alerts.window_days)
    }

    /// Record count and snapshot metadata.
    pub fn system_info(&self) -> StoreResult<SystemInfo> {
        let snapshot = self.store.load()?;
        let snapshot_bytes = std::fs::metadata(self.store.path()).ok().map(|m| m.len());
        Ok(SystemInfo {
            employees: self.roster.len(),
            snapshot_path: self.store.path().to_path_buf(),
            last_update: snapshot.map(|s| s.last_update),
            snapshot_bytes,
        })
    }

    /// Write a backup workbook of the current roster into `dir`, named after today's date.
    #[cfg(feature = "export")]
    pub fn export_backup(&self, dir: impl AsRef<Path>) -> StoreResult<PathBuf> {
        let path = dir
            .as_ref()
            .join(crate::export::backup_file_name(alerts::today_utc()));
        crate::export::write_workbook(self.roster.records(), &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeField;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.data.data_dir = dir.join("db");
        config.data.snapshot_path = Some(dir.join("state").join("snapshot.json"));
        config
    }

    #[test]
    fn bootstrap_without_anything_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (app, source) = App::bootstrap(config_in(dir.path())).unwrap();
        assert_eq!(source, LoadSource::Empty);
        assert!(app.roster().is_empty());
    }

    #[test]
    fn bundled_file_wins_and_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.data.data_dir).unwrap();
        std::fs::write(
            config.data.data_dir.join("DB.json"),
            r#"[{"رقم الموظف":"1","تاريخ انتهاء البطاقة":"2030-01-02"}]"#,
        )
        .unwrap();

        let (app, source) = App::bootstrap(config.clone()).unwrap();
        assert!(matches!(source, LoadSource::Bundled(ref p) if p.ends_with("DB.json")));
        assert_eq!(
            app.roster().records()[0].get(EmployeeField::CivilIdExpiry),
            Some("2030/01/02")
        );

        let saved = app.store().load().unwrap().unwrap();
        assert_eq!(saved.employees.len(), 1);
    }

    #[test]
    fn snapshot_used_when_nothing_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut rec = EmployeeRecord::new();
        rec.set(EmployeeField::EmployeeNumber, "5");
        SnapshotStore::new(config.snapshot_path()).save(&[rec]).unwrap();

        let (app, source) = App::bootstrap(config).unwrap();
        assert_eq!(source, LoadSource::Snapshot);
        assert_eq!(app.roster().records()[0].employee_number(), "5");
    }

    #[test]
    fn failed_import_leaves_roster_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config_in(dir.path()));
        let mut rec = EmployeeRecord::new();
        rec.set(EmployeeField::EmployeeNumber, "1");
        app.roster.replace_all(vec![rec]);

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert!(matches!(app.import_file(&empty), Err(StoreError::EmptyImport { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[{").unwrap();
        assert!(matches!(app.import_file(&broken), Err(StoreError::Ingestion(_))));

        let missing = dir.path().join("missing.csv");
        assert!(app.import_file(&missing).is_err());

        assert_eq!(app.roster().len(), 1);
        assert_eq!(app.roster().records()[0].employee_number(), "1");
    }

    #[test]
    fn import_replaces_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config_in(dir.path()));
        let file = dir.path().join("new.csv");
        std::fs::write(&file, "رقم الموظف,الجنسية\n10,كويتي\n11,مصري\n").unwrap();

        assert_eq!(app.import_file(&file).unwrap(), 2);
        assert_eq!(app.roster().len(), 2);
        assert_eq!(app.store().load().unwrap().unwrap().employees.len(), 2);
        assert_eq!(app.system_info().unwrap().employees, 2);
    }

    #[test]
    fn clear_all_leaves_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config_in(dir.path()));
        let file = dir.path().join("new.csv");
        std::fs::write(&file, "رقم الموظف\n10\n").unwrap();
        app.import_file(&file).unwrap();

        app.clear_all().unwrap();
        assert!(app.roster().is_empty());
        assert!(app.store().load().unwrap().unwrap().employees.is_empty());
    }
}
