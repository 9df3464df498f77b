//! Reductions over the roster: headline statistics, per-value breakdowns and the distinct
//! values offered as listing filters.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::{EmployeeField, EmployeeRecord};

/// Label under which empty values are counted in a [`breakdown`].
pub const UNSPECIFIED: &str = "غير محدد";

/// Headline roster statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Mean current salary, rounded to the nearest integer. Zero for an empty roster.
    pub average_salary: i64,
}

/// Compute [`RosterStats`].
///
/// Non-numeric salaries count as zero but still count towards the mean's denominator.
pub fn stats(records: &[EmployeeRecord]) -> RosterStats {
    let total = records.len();
    let active = records.iter().filter(|r| r.is_active()).count();
    let average_salary = if total == 0 {
        0
    } else {
        let sum: f64 = records
            .iter()
            .map(|r| r.numeric(EmployeeField::CurrentSalary))
            .sum();
        (sum / total as f64).round() as i64
    };

    RosterStats {
        total,
        active,
        inactive: total - active,
        average_salary,
    }
}

/// Count records per distinct value of `field`, in first-seen order.
///
/// Absent and blank values are counted under [`UNSPECIFIED`].
pub fn breakdown(records: &[EmployeeRecord], field: EmployeeField) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let value = record
            .get(field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNSPECIFIED);
        match counts.iter_mut().find(|(k, _)| k == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Distinct non-empty values offered by the listing filters, each sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub nationalities: Vec<String>,
    pub job_titles: Vec<String>,
    pub work_schedules: Vec<String>,
}

/// Collect [`FilterOptions`] from the roster.
pub fn filter_options(records: &[EmployeeRecord]) -> FilterOptions {
    FilterOptions {
        nationalities: distinct(records, EmployeeField::Nationality),
        job_titles: distinct(records, EmployeeField::JobTitle),
        work_schedules: distinct(records, EmployeeField::WorkSchedule),
    }
}

fn distinct(records: &[EmployeeRecord], field: EmployeeField) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get(field))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
