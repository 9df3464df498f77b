use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// A single error enum shared across Excel/CSV/JSON/YAML ingestion. Any of these aborts the
/// whole ingestion attempt; callers never see a partially parsed roster.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not valid YAML.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The format could not be determined, or is not enabled in this build.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The input parsed but its structure cannot be turned into records.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

/// Validation failures on the manual add/edit path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is absent or empty.
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: &'static str },

    /// Another record already carries this employee number.
    #[error("employee number '{number}' already exists")]
    DuplicateEmployeeNumber { number: String },

    /// No record carries this employee number.
    #[error("employee number '{number}' not found")]
    EmployeeNotFound { number: String },

    /// A non-empty date field did not parse.
    #[error("invalid date in field '{field}': '{raw}'")]
    InvalidDate { field: &'static str, raw: String },
}

/// Errors from the snapshot store, import, and export paths.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "export")]
    /// Workbook writer error (feature-gated behind `export`).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// An import or bundled-file load failed to ingest.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// A roster mutation was rejected.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The imported file parsed but contained no records.
    #[error("data file is empty or invalid: {path}")]
    EmptyImport { path: String },

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },
}

/// Convenience result type for store/import/export operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<figment::Error> for StoreError {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_display() {
        let err = RecordError::DuplicateEmployeeNumber {
            number: "60000".to_string(),
        };
        assert_eq!(err.to_string(), "employee number '60000' already exists");

        let err = RecordError::MissingRequiredField { field: "arabicName" };
        assert_eq!(err.to_string(), "missing required field 'arabicName'");
    }

    #[test]
    fn store_error_wraps_record_error_transparently() {
        let err: StoreError = RecordError::EmployeeNotFound {
            number: "7".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "employee number '7' not found");
    }

    #[test]
    fn ingestion_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: IngestionError = json_err.into();
        assert!(matches!(err, IngestionError::Json(_)));
        assert!(err.to_string().starts_with("json error:"));
    }
}
