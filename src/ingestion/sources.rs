//! Bundled data file discovery.
//!
//! A deployment may ship its roster next to the binary as one of `DB.xlsx`, `DB.json`,
//! `DB.yml` or `DB.csv`. [`load_bundled`] probes them in that order and keeps the first one that
//! yields at least one record.

use std::path::{Path, PathBuf};

use crate::types::EmployeeRecord;

use super::unified::{ingest_from_path, IngestionOptions};

/// Bundled file names, highest priority first.
pub const BUNDLED_SOURCES: &[&str] = &["DB.xlsx", "DB.json", "DB.yml", "DB.csv"];

/// Result of a successful bundled load.
#[derive(Debug, Clone)]
pub struct BundledLoad {
    /// File the records came from.
    pub path: PathBuf,
    /// Canonical records (never empty).
    pub records: Vec<EmployeeRecord>,
}

/// Candidate paths under `data_dir`, in priority order.
pub fn bundled_candidates(data_dir: &Path) -> Vec<PathBuf> {
    BUNDLED_SOURCES.iter().map(|name| data_dir.join(name)).collect()
}

/// Load the first bundled file under `data_dir` that yields records.
///
/// Missing files are skipped quietly. A file that fails to ingest, or parses to nothing, is
/// logged and the next candidate is tried. Returns `None` when no candidate produced records.
pub fn load_bundled(data_dir: &Path, options: &IngestionOptions) -> Option<BundledLoad> {
    for path in bundled_candidates(data_dir) {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "bundled source not present");
            continue;
        }

        match ingest_from_path(&path, options) {
            Ok(records) if !records.is_empty() => {
                tracing::info!(path = %path.display(), records = records.len(), "loaded bundled roster");
                return Some(BundledLoad { path, records });
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "bundled source has no records; trying next");
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "bundled source failed; trying next");
            }
        }
    }
    None
}
