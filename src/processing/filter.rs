//! Record filtering for the roster listing.

use crate::types::{EmployeeField, EmployeeRecord};

/// Listing filter. Unset criteria match everything.
///
/// Field criteria are exact matches. The search term matches, case-insensitively, any
/// substring of the Arabic name, English name or employee number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub nationality: Option<String>,
    pub contract_status: Option<String>,
    pub job_title: Option<String>,
    pub work_schedule: Option<String>,
}

const SEARCHED: [EmployeeField; 3] = [
    EmployeeField::ArabicName,
    EmployeeField::EnglishName,
    EmployeeField::EmployeeNumber,
];

impl EmployeeFilter {
    /// Whether `record` passes every criterion.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let exact = [
            (EmployeeField::Nationality, &self.nationality),
            (EmployeeField::ContractStatus, &self.contract_status),
            (EmployeeField::JobTitle, &self.job_title),
            (EmployeeField::WorkSchedule, &self.work_schedule),
        ];
        let fields_match = exact.iter().all(|(field, wanted)| match non_empty(wanted) {
            Some(wanted) => record.get(*field).unwrap_or("") == wanted,
            None => true,
        });

        fields_match && self.search_matches(record)
    }

    fn search_matches(&self, record: &EmployeeRecord) -> bool {
        let Some(term) = non_empty(&self.search) else {
            return true;
        };
        let term = term.to_lowercase();
        SEARCHED
            .iter()
            .filter_map(|f| record.get(*f))
            .any(|v| v.to_lowercase().contains(&term))
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Returns the records for which `filter` matches, in roster order.
pub fn filter<'a>(records: &'a [EmployeeRecord], filter: &EmployeeFilter) -> Vec<&'a EmployeeRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<EmployeeRecord> {
        let rows = [
            ("1", "حسن", "HASSAN FALAH", "كويتي", "نشط"),
            ("2", "علي", "ALI", "مصري", "نشط"),
            ("3", "سارة", "SARA", "كويتي", "منتهي"),
        ];
        rows.iter()
            .map(|(num, ar, en, nat, status)| {
                let mut rec = EmployeeRecord::new();
                rec.set(EmployeeField::EmployeeNumber, *num);
                rec.set(EmployeeField::ArabicName, *ar);
                rec.set(EmployeeField::EnglishName, *en);
                rec.set(EmployeeField::Nationality, *nat);
                rec.set(EmployeeField::ContractStatus, *status);
                rec
            })
            .collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, &EmployeeFilter::default()).len(), 3);
    }

    #[test]
    fn exact_field_criteria_combine() {
        let records = sample();
        let f = EmployeeFilter {
            nationality: Some("كويتي".to_string()),
            contract_status: Some("نشط".to_string()),
            ..Default::default()
        };
        let out = filter(&records, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_number(), "1");
    }

    #[test]
    fn search_is_case_insensitive_over_names_and_number() {
        let records = sample();
        let by_name = EmployeeFilter {
            search: Some("falah".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(&records, &by_name)[0].employee_number(), "1");

        let by_number = EmployeeFilter {
            search: Some("3".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(&records, &by_number)[0].employee_number(), "3");

        let by_arabic = EmployeeFilter {
            search: Some("علي".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(&records, &by_arabic).len(), 1);
    }

    #[test]
    fn empty_criteria_are_ignored() {
        let records = sample();
        let f = EmployeeFilter {
            search: Some(String::new()),
            job_title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter(&records, &f).len(), 3);
    }
}
