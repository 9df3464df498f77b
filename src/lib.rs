//! `hr-roster` is the record-keeping core of a small HR system: it ingests an employee roster
//! from common file formats into canonical [`types::EmployeeRecord`]s, keeps it in an owned
//! [`roster::Roster`], persists it as a local snapshot and derives document expiry alerts.
//!
//! The primary ingestion entrypoint is [`ingestion::ingest_from_path`], which auto-detects the
//! format from the file extension (or you can force a format via [`ingestion::IngestionOptions`]).
//!
//! ## What you can ingest
//!
//! **File formats (auto-detected by extension):**
//!
//! - **Excel/workbooks** (requires the Cargo feature `excel`, on by default): `.xlsx`, `.xls`,
//!   `.xlsm`, `.xlsb`, `.ods`
//! - **CSV**: `.csv` (plain comma split, no quoting)
//! - **JSON**: `.json` (array of objects)
//! - **YAML**: `.yml`, `.yaml` (sequence of mappings)
//!
//! Every format goes through the same normalization: keys are trimmed, and the three date
//! fields (labels containing `تاريخ`) are rewritten to `YYYY/MM/DD`, or `--` when absent or
//! invalid. See [`dates`] for the accepted date shapes.
//!
//! ## Quick example: ingest and alert
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hr_roster::alerts::compute_alerts;
//! use hr_roster::ingestion::json::ingest_json_from_str;
//!
//! let records = ingest_json_from_str(r#"[
//!     {"رقم الموظف": "60000", "اسم الموظف باللغة العربية": "حسن", "تاريخ انتهاء الجواز": "15/06/2026"}
//! ]"#).unwrap();
//! assert_eq!(records[0].passport_expiry.as_deref(), Some("2026/06/15"));
//!
//! let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
//! let report = compute_alerts(&records, today, 30);
//! assert_eq!(report.total, 1);
//! assert!(report.notices[0].message.ends_with("expires within 14 days."));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified ingestion entrypoints, format-specific readers, bundled file discovery
//! - [`dates`]: date grammar and display/input renderings
//! - [`alerts`]: expiry alert computation
//! - [`roster`]: the owned record repository (add/update/remove/find)
//! - [`processing`]: filtering, statistics and breakdowns
//! - [`store`]: snapshot persistence
//! - `export`: backup and template workbooks (Cargo feature `export`)
//! - [`app`]: bootstrap, import and write-through persistence
//! - [`config`], [`logging`], [`cli`]: ambient plumbing for the binary
//! - [`error`]: error types

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod alerts;
pub mod app;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod ingestion;
pub mod logging;
pub mod processing;
pub mod roster;
pub mod store;
pub mod types;

pub use alerts::{compute_alerts, AlertNotice, AlertReport};
pub use app::{App, LoadSource, SystemInfo};
pub use config::Config;
pub use error::{IngestionError, IngestionResult, RecordError, StoreError, StoreResult};
pub use logging::init_logging;
pub use roster::Roster;
pub use store::{Snapshot, SnapshotStore};
pub use types::{EmployeeField, EmployeeRecord};
