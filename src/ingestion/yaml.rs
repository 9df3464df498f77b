//! YAML ingestion implementation.
//!
//! Supported input: a sequence of mappings. Same shape rules as JSON: another well-formed
//! document yields no records, malformed YAML or a non-mapping entry is an error.

use std::fs;
use std::path::Path;

use serde_yaml::Value as Yaml;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{EmployeeRecord, RawRow, Value};

use super::json::value_from_json;
use super::normalize::standardize;

/// Ingest a YAML file into canonical records.
pub fn ingest_yaml_from_path(path: impl AsRef<Path>) -> IngestionResult<Vec<EmployeeRecord>> {
    let text = fs::read_to_string(path)?;
    ingest_yaml_from_str(&text)
}

/// Ingest YAML from an in-memory string into canonical records.
pub fn ingest_yaml_from_str(input: &str) -> IngestionResult<Vec<EmployeeRecord>> {
    let parsed: Yaml = serde_yaml::from_str(input)?;
    match untag(parsed) {
        Yaml::Sequence(items) => Ok(standardize(yaml_rows(items)?)),
        _ => Ok(Vec::new()),
    }
}

fn yaml_rows(items: Vec<Yaml>) -> IngestionResult<Vec<RawRow>> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx0, item)| match untag(item) {
            Yaml::Mapping(map) => Ok(map
                .iter()
                .map(|(k, v)| (key_text(k), value_from_yaml(v)))
                .collect()),
            _ => Err(IngestionError::SchemaMismatch {
                message: format!("row {} is not a yaml mapping", idx0 + 1),
            }),
        })
        .collect()
}

fn untag(v: Yaml) -> Yaml {
    match v {
        Yaml::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn key_text(k: &Yaml) -> String {
    match value_from_yaml(k) {
        Value::Null => "null".to_string(),
        other => other.to_text(),
    }
}

fn value_from_yaml(v: &Yaml) -> Value {
    match v {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        Yaml::String(s) => Value::Utf8(s.clone()),
        Yaml::Tagged(tagged) => value_from_yaml(&tagged.value),
        nested => serde_json::to_value(nested)
            .map(|json| value_from_json(&json))
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeField;

    #[test]
    fn sequence_of_mappings() {
        let input = "
- رقم الموظف: 60000
  تاريخ انتهاء الجواز: 2088-11-10
  الجنسية: كويتي
- رقم الموظف: '60001'
  تاريخ انتهاء الجواز: 10/11/2088
";
        let recs = ingest_yaml_from_str(input).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].employee_number(), "60000");
        assert_eq!(recs[0].get(EmployeeField::PassportExpiry), Some("2088/11/10"));
        assert_eq!(recs[1].get(EmployeeField::PassportExpiry), Some("2088/11/10"));
    }

    #[test]
    fn mapping_document_yields_nothing() {
        assert!(ingest_yaml_from_str("a: 1\nb: 2\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = ingest_yaml_from_str("- a: [1, 2\n").unwrap_err();
        assert!(matches!(err, IngestionError::Yaml(_)));
    }

    #[test]
    fn scalar_entry_rejects_the_document() {
        let err = ingest_yaml_from_str("- a: 1\n- 5\n").unwrap_err();
        assert!(err.to_string().contains("row 2 is not a yaml mapping"));
    }
}
