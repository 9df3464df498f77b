//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - turns every row into a canonical [`crate::types::EmployeeRecord`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`yaml`]
//! - `excel` (Cargo feature `excel`)
//!
//! All of them share the row normalization in [`normalize`].

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod normalize;
pub mod observability;
pub mod sources;
pub mod unified;
pub mod yaml;

pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use sources::{load_bundled, BundledLoad, BUNDLED_SOURCES};
pub use unified::{ingest_content, ingest_from_path, IngestionFormat, IngestionOptions};
