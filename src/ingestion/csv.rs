//! CSV ingestion implementation.
//!
//! The roster CSV dialect is deliberately naive: every line is split on commas with no quote
//! handling, so a value containing a comma spills into the next column. Files produced by the
//! workbook export never contain such values; files typed by hand sometimes do, and are read
//! exactly as the comma split dictates.

use std::fs;
use std::path::Path;

use crate::error::IngestionResult;
use crate::types::{EmployeeRecord, RawRow, Value};

use super::normalize::standardize;

/// Ingest a CSV file into canonical records.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<Vec<EmployeeRecord>> {
    let text = fs::read_to_string(path)?;
    ingest_csv_from_str(&text)
}

/// Ingest CSV text into canonical records.
///
/// Rules:
///
/// - the first line is the header row (trimmed)
/// - each later line is zipped positionally against the headers; missing trailing values
///   become `""`, surplus values are dropped
/// - `\n` and `\r\n` line endings are both accepted
/// - leading and trailing blank lines are dropped; an empty or whitespace-only line between
///   rows becomes a record whose values are all `""`
/// - a header-only input yields no records
pub fn ingest_csv_from_str(input: &str) -> IngestionResult<Vec<EmployeeRecord>> {
    let text = keep_blank_lines(input.trim());
    let mut rdr = reader_builder().from_reader(text.as_bytes());
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
///
/// Use [`reader_builder`] to get a reader configured for the roster dialect. Unlike
/// [`ingest_csv_from_str`], empty lines are skipped by the reader itself.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<Vec<EmployeeRecord>> {
    Ok(standardize(read_csv_rows(rdr)?))
}

/// A `csv::ReaderBuilder` for the roster dialect: headers, no quoting, ragged rows, trimmed.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// The csv reader skips empty lines but keeps whitespace-only ones, so empty lines are padded
/// to a single space.
fn keep_blank_lines(input: &str) -> String {
    input
        .lines()
        .map(|line| if line.is_empty() { " " } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_csv_rows<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Vec<RawRow>> {
    let headers = rdr.headers()?.clone();

    let mut rows: Vec<RawRow> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let raw = record.get(idx).unwrap_or("");
                (header.to_owned(), Value::Utf8(raw.to_owned()))
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_one_row() {
        let recs = ingest_csv_from_str("a,b\n1,2\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].get_by_key("a"), Some("1"));
        assert_eq!(recs[0].get_by_key("b"), Some("2"));
    }

    #[test]
    fn crlf_and_missing_trailing_values() {
        let recs = ingest_csv_from_str(" a , b ,c\r\n1\r\n4, 5 ,6\r\n").unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].get_by_key("a"), Some("1"));
        assert_eq!(recs[0].get_by_key("b"), Some(""));
        assert_eq!(recs[0].get_by_key("c"), Some(""));
        assert_eq!(recs[1].get_by_key("b"), Some("5"));
    }

    #[test]
    fn blank_interior_lines_become_empty_records() {
        let recs = ingest_csv_from_str("a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1].get_by_key("a"), Some(""));
        assert_eq!(recs[1].get_by_key("b"), Some(""));
        assert_eq!(recs[2].get_by_key("a"), Some("3"));

        let recs = ingest_csv_from_str("a,b\r\n1,2\r\n   \r\n\r\n3,4\r\n\r\n").unwrap();
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[1], recs[2]);
        assert_eq!(recs[2].get_by_key("b"), Some(""));
    }

    #[test]
    fn quotes_are_not_special() {
        let recs = ingest_csv_from_str("a,b\n\"x,y\",z\n").unwrap();
        assert_eq!(recs[0].get_by_key("a"), Some("\"x"));
        assert_eq!(recs[0].get_by_key("b"), Some("y\""));
    }

    #[test]
    fn header_only_or_empty_yields_nothing() {
        assert!(ingest_csv_from_str("a,b\n").unwrap().is_empty());
        assert!(ingest_csv_from_str("").unwrap().is_empty());
    }
}
