//! JSON ingestion implementation.
//!
//! Supported input: a JSON array of objects, `[{"a":1}, {"a":2}]`.
//!
//! A well-formed document that is not an array (e.g. a single object) yields no records and no
//! error. Malformed JSON, or an array containing a non-object, is an error.

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{EmployeeRecord, RawRow, Value};

use super::normalize::standardize;

/// Ingest a JSON file into canonical records.
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> IngestionResult<Vec<EmployeeRecord>> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into canonical records.
pub fn ingest_json_from_str(input: &str) -> IngestionResult<Vec<EmployeeRecord>> {
    let parsed: serde_json::Value = serde_json::from_str(input)?;
    match parsed {
        serde_json::Value::Array(items) => Ok(standardize(json_rows(items)?)),
        _ => Ok(Vec::new()),
    }
}

fn json_rows(items: Vec<serde_json::Value>) -> IngestionResult<Vec<RawRow>> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx0, item)| match item {
            serde_json::Value::Object(obj) => Ok(obj
                .iter()
                .map(|(k, v)| (k.clone(), value_from_json(v)))
                .collect()),
            _ => Err(IngestionError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            }),
        })
        .collect()
}

/// Convert a JSON value into a cell [`Value`].
///
/// Nested arrays/objects are kept as compact JSON text.
pub(crate) fn value_from_json(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        serde_json::Value::String(s) => Value::Utf8(s.clone()),
        nested => Value::Utf8(nested.to_string()),
    }
}
