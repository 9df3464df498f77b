//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which reads a roster file into canonical
//! [`crate::types::EmployeeRecord`]s. [`ingest_content`] does the same for content that is
//! already in memory (an uploaded file, a fetched blob).
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::EmployeeRecord;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json, yaml};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionFormat {
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
    /// Comma-separated values (naive comma split).
    Csv,
    /// JSON array of objects.
    Json,
    /// YAML sequence of mappings.
    Yaml,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> IngestionResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| IngestionError::UnsupportedFormat {
                message: format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ),
            })?;

        Self::from_extension(ext).ok_or_else(|| IngestionError::UnsupportedFormat {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }

    /// Whether the format is binary (read as bytes rather than text).
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Excel)
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Excel sheet to read; `None` means the first sheet.
    pub sheet_name: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("sheet_name", &self.sheet_name)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet_name: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, format is inferred from the file extension.
/// - Either the whole file becomes records, or an error is returned.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with record count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use hr_roster::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), hr_roster::IngestionError> {
/// // Uses `.yml` to select YAML ingestion.
/// let records = ingest_from_path("db/DB.yml", &IngestionOptions::default())?;
/// println!("records={}", records.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => IngestionFormat::from_path(path)?,
    };

    let ctx = IngestionContext {
        source: path.display().to_string(),
        format: fmt,
    };

    let result = std::fs::read(path)
        .map_err(IngestionError::from)
        .and_then(|bytes| dispatch(&bytes, fmt, options));
    report(options, &ctx, &result);
    result
}

/// Unified ingestion entry point for in-memory content.
///
/// `source` only labels observer events. Text formats are decoded as UTF-8, replacing invalid
/// sequences.
///
/// ```rust
/// use hr_roster::ingestion::{ingest_content, IngestionFormat, IngestionOptions};
///
/// let records = ingest_content(b"a,b\n1,2\n", IngestionFormat::Csv, "upload", &IngestionOptions::default()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get_by_key("b"), Some("2"));
/// ```
pub fn ingest_content(
    content: &[u8],
    format: IngestionFormat,
    source: &str,
    options: &IngestionOptions,
) -> IngestionResult<Vec<EmployeeRecord>> {
    let ctx = IngestionContext {
        source: source.to_string(),
        format,
    };
    let result = dispatch(content, format, options);
    report(options, &ctx, &result);
    result
}

fn dispatch(
    content: &[u8],
    format: IngestionFormat,
    options: &IngestionOptions,
) -> IngestionResult<Vec<EmployeeRecord>> {
    match format {
        IngestionFormat::Excel => ingest_excel_dispatch(content, options.sheet_name.as_deref()),
        IngestionFormat::Csv => csv::ingest_csv_from_str(&String::from_utf8_lossy(content)),
        IngestionFormat::Json => json::ingest_json_from_str(&String::from_utf8_lossy(content)),
        IngestionFormat::Yaml => yaml::ingest_yaml_from_str(&String::from_utf8_lossy(content)),
    }
}

fn report(
    options: &IngestionOptions,
    ctx: &IngestionContext,
    result: &IngestionResult<Vec<EmployeeRecord>>,
) {
    if let Some(obs) = options.observer.as_ref() {
        match result {
            Ok(records) => obs.on_success(ctx, IngestionStats { rows: records.len() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::Json(_) | IngestionError::Yaml(_) => IngestionSeverity::Error,
        IngestionError::UnsupportedFormat { .. } => IngestionSeverity::Error,
        IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
    }
}

fn ingest_excel_dispatch(content: &[u8], sheet: Option<&str>) -> IngestionResult<Vec<EmployeeRecord>> {
    // Avoid unused warnings when the feature is off.
    let _ = (content, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::ingest_excel_from_bytes(content, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(IngestionError::UnsupportedFormat {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(IngestionFormat::from_extension("XLSX"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("yml"), Some(IngestionFormat::Yaml));
        assert_eq!(IngestionFormat::from_extension("yaml"), Some(IngestionFormat::Yaml));
        assert_eq!(IngestionFormat::from_extension("json"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("csv"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("parquet"), None);
    }

    #[test]
    fn path_without_extension_is_unsupported() {
        let err = IngestionFormat::from_path(Path::new("roster")).unwrap_err();
        assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
    }

    #[test]
    fn io_errors_are_critical() {
        let err = IngestionError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&err), IngestionSeverity::Critical);
        let err = IngestionError::SchemaMismatch { message: "x".to_string() };
        assert_eq!(severity_for_error(&err), IngestionSeverity::Error);
    }
}
