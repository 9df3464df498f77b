//! Document expiry alerts.
//!
//! [`compute_alerts`] scans every record's civil-ID and passport expiry dates and emits one
//! [`AlertNotice`] per document expiring between today and `today + window_days` (both ends
//! inclusive). Already expired documents and documents further out are ignored.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::dates;
use crate::types::{EmployeeField, EmployeeRecord};

/// Default look-ahead window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Alert severity. Every expiry inside the window is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
}

/// The document an alert is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    CivilId,
    Passport,
}

impl DocumentKind {
    /// Monitored documents with the field holding their expiry date.
    pub const MONITORED: [(DocumentKind, EmployeeField); 2] = [
        (DocumentKind::CivilId, EmployeeField::CivilIdExpiry),
        (DocumentKind::Passport, EmployeeField::PassportExpiry),
    ];

    /// Human-readable document name.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::CivilId => "Civil ID",
            DocumentKind::Passport => "Passport",
        }
    }

    fn title(self) -> &'static str {
        match self {
            DocumentKind::CivilId => "Civil ID expiry",
            DocumentKind::Passport => "Passport expiry",
        }
    }
}

/// One derived alert. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertNotice {
    pub severity: AlertSeverity,
    pub kind: DocumentKind,
    pub title: String,
    pub message: String,
    /// Expiry date in display form (`YYYY/MM/DD`).
    pub date: String,
}

/// Sorted alerts plus their count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertReport {
    pub notices: Vec<AlertNotice>,
    pub total: usize,
}

impl AlertReport {
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Compute expiry alerts for `records` as of `today`.
///
/// Notices are ordered by expiry date, earliest first; notices sharing a date keep record
/// order (civil ID before passport within a record).
pub fn compute_alerts(records: &[EmployeeRecord], today: NaiveDate, window_days: u32) -> AlertReport {
    let window = i64::from(window_days);
    let mut notices = Vec::new();

    for record in records {
        for (kind, field) in DocumentKind::MONITORED {
            let Some(expiry) = record.get(field).and_then(dates::parse_date_str) else {
                continue;
            };
            let days = (expiry - today).num_days();
            if (0..=window).contains(&days) {
                notices.push(notice(record, kind, expiry, days));
            }
        }
    }

    notices.sort_by_key(|n| dates::sort_key(&n.date));
    let total = notices.len();
    AlertReport { notices, total }
}

fn notice(record: &EmployeeRecord, kind: DocumentKind, expiry: NaiveDate, days: i64) -> AlertNotice {
    let name = record.display_name();
    let message = if days == 0 {
        format!("{} for employee {name} expires today.", kind.name())
    } else {
        format!("{} for employee {name} expires within {days} days.", kind.name())
    };

    AlertNotice {
        severity: AlertSeverity::Critical,
        kind,
        title: kind.title().to_string(),
        message,
        date: dates::display(expiry),
    }
}
