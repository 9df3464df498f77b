//! Shared post-extraction step: raw rows -> canonical [`EmployeeRecord`]s.
//!
//! Applied identically to every format:
//!
//! 1. keys are trimmed; when two raw keys fold to the same trimmed key the later one wins
//! 2. date fields ([`EmployeeField::is_date`]) are rewritten to `YYYY/MM/DD` or `--`
//! 3. everything else passes through as text

use crate::dates::format_date_for_display;
use crate::types::{EmployeeField, EmployeeRecord, RawRow};

/// Normalize a batch of raw rows.
pub fn standardize(rows: Vec<RawRow>) -> Vec<EmployeeRecord> {
    rows.into_iter().map(standardize_row).collect()
}

/// Normalize a single raw row.
pub fn standardize_row(row: RawRow) -> EmployeeRecord {
    let mut record = EmployeeRecord::new();
    for (key, value) in row {
        let key = key.trim();
        let text = match EmployeeField::from_label(key) {
            Some(field) if field.is_date() => format_date_for_display(&value),
            _ => value.to_text(),
        };
        record.insert_key(key, text);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn utf8(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    #[test]
    fn keys_are_trimmed_and_later_wins() {
        let row: RawRow = vec![
            ("رقم الموظف".to_string(), utf8("1")),
            ("  رقم الموظف ".to_string(), utf8("2")),
        ];
        let rec = standardize_row(row);
        assert_eq!(rec.employee_number(), "2");
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn date_fields_are_normalized() {
        let row: RawRow = vec![
            ("تاريخ انتهاء البطاقة".to_string(), utf8("29-6-2026")),
            ("تاريخ انتهاء الجواز ".to_string(), utf8("garbage")),
            ("تاريخ التعاقد".to_string(), Value::Null),
        ];
        let rec = standardize_row(row);
        assert_eq!(rec.get(EmployeeField::CivilIdExpiry), Some("2026/06/29"));
        assert_eq!(rec.get(EmployeeField::PassportExpiry), Some("--"));
        assert_eq!(rec.get(EmployeeField::ContractDate), Some("--"));
    }

    #[test]
    fn non_date_fields_pass_through() {
        let row: RawRow = vec![
            ("الراتب الحالي للموظف".to_string(), Value::Float64(800.0)),
            ("notes".to_string(), utf8("2026/02/30")),
        ];
        let rec = standardize_row(row);
        assert_eq!(rec.get(EmployeeField::CurrentSalary), Some("800"));
        assert_eq!(rec.get_by_key("notes"), Some("2026/02/30"));
    }

    #[test]
    fn absent_date_columns_stay_absent() {
        let rec = standardize_row(vec![("a".to_string(), utf8("1"))]);
        assert_eq!(rec.get(EmployeeField::CivilIdExpiry), None);
    }
}
