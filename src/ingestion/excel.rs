#![cfg(feature = "excel")]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{EmployeeRecord, RawRow, Value};

use super::normalize::standardize;

/// Ingest an Excel document (`.xlsx`, `.xls`, `.ods`, etc.) into canonical records.
///
/// Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook.
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> IngestionResult<Vec<EmployeeRecord>> {
    let bytes = fs::read(path)?;
    ingest_excel_from_bytes(&bytes, sheet_name)
}

/// Ingest an in-memory workbook into canonical records.
///
/// Behavior:
/// - Detects the first non-empty row as the header row
/// - Each later row becomes one record keyed by header text; missing cells become `""`
/// - Columns with an empty header and rows with no content are skipped
/// - Date-typed cells become native dates before normalization
pub fn ingest_excel_from_bytes(
    bytes: &[u8],
    sheet_name: Option<&str>,
) -> IngestionResult<Vec<EmployeeRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestionError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(standardize(sheet_rows(&range)))
}

fn sheet_rows(range: &calamine::Range<Data>) -> Vec<RawRow> {
    let mut rows_iter = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let Some(header_row) = rows_iter.next() else {
        return Vec::new();
    };
    let headers: Vec<(usize, String)> = header_row
        .iter()
        .map(cell_to_header_string)
        .enumerate()
        .filter(|(_, h)| !h.trim().is_empty())
        .collect();

    rows_iter
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .map(|(idx, header)| {
                    let cell = row.get(*idx).unwrap_or(&Data::Empty);
                    (header.clone(), convert_cell(cell))
                })
                .collect()
        })
        .collect()
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => Value::Float64(*f).to_text(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Utf8(String::new()),
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map_or(Value::Float64(dt.as_f64()), |d| Value::Date(d.date())),
        Data::DateTime(dt) => Value::Float64(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Utf8(s.clone()),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(e) => Value::Utf8(e.to_string()),
    }
}
