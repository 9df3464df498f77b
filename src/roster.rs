//! The in-memory employee roster.
//!
//! [`Roster`] owns the record list and is the only place records are mutated. Bulk loads go
//! through [`Roster::replace_all`]; manual entry goes through [`Roster::add`] and
//! [`Roster::update`], which validate before touching the list.

use crate::dates::{self, DATE_PLACEHOLDER};
use crate::error::RecordError;
use crate::processing::{self, EmployeeFilter, FilterOptions, RosterStats};
use crate::types::{EmployeeField, EmployeeRecord};

/// Ordered collection of employee records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<EmployeeRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already canonical record list (ingestion output or a snapshot).
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a manually entered record.
    ///
    /// Date fields are normalized, required fields must be non-empty and the employee number
    /// must not already exist. On error the roster is unchanged.
    pub fn add(&mut self, mut record: EmployeeRecord) -> Result<(), RecordError> {
        prepare(&mut record)?;
        let number = record.employee_number().trim();
        if self.position(number).is_some() {
            return Err(RecordError::DuplicateEmployeeNumber {
                number: number.to_string(),
            });
        }

        tracing::info!(number = %record.employee_number(), "employee added");
        self.records.push(record);
        Ok(())
    }

    /// Replace the record carrying `number` in place.
    ///
    /// Same validation as [`Self::add`] except the uniqueness check: the replacement may carry
    /// a different employee number.
    pub fn update(&mut self, number: &str, mut record: EmployeeRecord) -> Result<(), RecordError> {
        let idx = self.position(number).ok_or_else(|| not_found(number))?;
        prepare(&mut record)?;

        tracing::info!(number, new_number = %record.employee_number(), "employee updated");
        self.records[idx] = record;
        Ok(())
    }

    /// Remove and return the record carrying `number`.
    pub fn remove(&mut self, number: &str) -> Result<EmployeeRecord, RecordError> {
        let idx = self.position(number).ok_or_else(|| not_found(number))?;
        tracing::info!(number, "employee deleted");
        Ok(self.records.remove(idx))
    }

    /// First record carrying `number`.
    pub fn find(&self, number: &str) -> Option<&EmployeeRecord> {
        self.position(number).map(|idx| &self.records[idx])
    }

    pub fn clear(&mut self) {
        tracing::info!(removed = self.records.len(), "roster cleared");
        self.records.clear();
    }

    /// Replace the whole roster.
    pub fn replace_all(&mut self, records: Vec<EmployeeRecord>) {
        tracing::debug!(previous = self.records.len(), next = records.len(), "roster replaced");
        self.records = records;
    }

    /// The last `n` records, most recently added first.
    pub fn recent(&self, n: usize) -> Vec<&EmployeeRecord> {
        self.records.iter().rev().take(n).collect()
    }

    pub fn filter(&self, filter: &EmployeeFilter) -> Vec<&EmployeeRecord> {
        processing::filter(&self.records, filter)
    }

    pub fn filter_options(&self) -> FilterOptions {
        processing::filter_options(&self.records)
    }

    pub fn stats(&self) -> RosterStats {
        processing::stats(&self.records)
    }

    pub fn breakdown(&self, field: EmployeeField) -> Vec<(String, usize)> {
        processing::breakdown(&self.records, field)
    }

    fn position(&self, number: &str) -> Option<usize> {
        let number = number.trim();
        self.records
            .iter()
            .position(|r| r.employee_number().trim() == number)
    }
}

fn not_found(number: &str) -> RecordError {
    RecordError::EmployeeNotFound {
        number: number.trim().to_string(),
    }
}

/// Normalize date fields, then check required fields.
fn prepare(record: &mut EmployeeRecord) -> Result<(), RecordError> {
    for field in EmployeeField::date_fields() {
        let Some(raw) = record.get(field) else {
            continue;
        };
        let normalized = match dates::parse_date_str(raw) {
            Some(date) => dates::display(date),
            None if dates::is_no_date(raw) => DATE_PLACEHOLDER.to_string(),
            None => {
                return Err(RecordError::InvalidDate {
                    field: field.form_id(),
                    raw: raw.to_string(),
                });
            }
        };
        record.set(field, normalized);
    }

    for field in EmployeeField::REQUIRED {
        let value = record.get(*field).map(str::trim).unwrap_or("");
        let missing = value.is_empty() || (field.is_date() && value == DATE_PLACEHOLDER);
        if missing {
            return Err(RecordError::MissingRequiredField {
                field: field.form_id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(number: &str) -> EmployeeRecord {
        let mut rec = EmployeeRecord::new();
        for field in EmployeeField::REQUIRED {
            rec.set(*field, "x");
        }
        rec.set(EmployeeField::EmployeeNumber, number);
        rec.set(EmployeeField::CivilIdExpiry, "2027-01-05");
        rec.set(EmployeeField::ContractDate, "9/7/1993");
        rec
    }

    #[test]
    fn add_normalizes_dates() {
        let mut roster = Roster::new();
        let mut rec = complete("1");
        rec.set(EmployeeField::PassportExpiry, "");
        roster.add(rec).unwrap();

        let stored = roster.find("1").unwrap();
        assert_eq!(stored.get(EmployeeField::CivilIdExpiry), Some("2027/01/05"));
        assert_eq!(stored.get(EmployeeField::ContractDate), Some("1993/07/09"));
        assert_eq!(stored.get(EmployeeField::PassportExpiry), Some("--"));
    }

    #[test]
    fn add_rejects_duplicate_number() {
        let mut roster = Roster::new();
        roster.add(complete("1")).unwrap();
        let err = roster.add(complete(" 1 ")).unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateEmployeeNumber {
                number: "1".to_string()
            }
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn add_rejects_missing_required_field() {
        let mut roster = Roster::new();
        let mut rec = complete("1");
        rec.set(EmployeeField::JobTitle, "   ");
        assert_eq!(
            roster.add(rec).unwrap_err(),
            RecordError::MissingRequiredField { field: "jobTitle" }
        );

        let mut rec = complete("1");
        rec.set(EmployeeField::ContractDate, "--");
        assert_eq!(
            roster.add(rec).unwrap_err(),
            RecordError::MissingRequiredField { field: "contractDate" }
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn add_rejects_unparsable_date() {
        let mut roster = Roster::new();
        let mut rec = complete("1");
        rec.set(EmployeeField::CivilIdExpiry, "2026/02/30");
        assert!(matches!(
            roster.add(rec),
            Err(RecordError::InvalidDate { field: "civilIdExpiry", .. })
        ));
    }

    #[test]
    fn update_skips_uniqueness_and_replaces_in_place() {
        let mut roster = Roster::new();
        roster.add(complete("1")).unwrap();
        roster.add(complete("2")).unwrap();

        let mut edited = complete("2");
        edited.set(EmployeeField::EnglishName, "CHANGED");
        roster.update("1", edited).unwrap();

        assert_eq!(roster.records()[0].get(EmployeeField::EnglishName), Some("CHANGED"));
        assert_eq!(roster.records()[0].employee_number(), "2");
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn update_and_remove_unknown_number() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.update("9", complete("9")),
            Err(RecordError::EmployeeNotFound { .. })
        ));
        assert!(matches!(roster.remove("9"), Err(RecordError::EmployeeNotFound { .. })));
    }

    #[test]
    fn remove_recent_and_clear() {
        let mut roster = Roster::new();
        for n in ["1", "2", "3"] {
            roster.add(complete(n)).unwrap();
        }
        let recent: Vec<_> = roster.recent(2).into_iter().map(|r| r.employee_number()).collect();
        assert_eq!(recent, ["3", "2"]);

        let removed = roster.remove("2").unwrap();
        assert_eq!(removed.employee_number(), "2");
        assert_eq!(roster.len(), 2);

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn replace_all_skips_validation() {
        let mut roster = Roster::new();
        roster.add(complete("1")).unwrap();
        roster.replace_all(vec![EmployeeRecord::new(), EmployeeRecord::new()]);
        assert_eq!(roster.len(), 2);
    }
}
