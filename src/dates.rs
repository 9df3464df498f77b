//! Date normalization.
//!
//! Roster files carry dates in whatever shape the person typing them preferred. This module
//! accepts exactly two string shapes, tried in order:
//!
//! - year first: `YYYY-M-D` / `YYYY/MM/DD` (any mix of `-` and `/`)
//! - day first: `D-M-YYYY` / `DD/MM/YYYY`
//!
//! Only the prefix has to match, so `2026-06-29T00:00:00` is accepted. The extracted triple is
//! then validated as a real UTC calendar date; `2026/02/30` is rejected instead of rolling
//! over into March.
//!
//! Valid dates render as `YYYY/MM/DD`. Anything else renders as [`DATE_PLACEHOLDER`].

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::types::Value;

/// Display form of an absent or invalid date.
pub const DATE_PLACEHOLDER: &str = "--";

/// Inputs that mean "no date" rather than a malformed one.
const NO_DATE_SENTINELS: &[&str] = &["", DATE_PLACEHOLDER, "1/0/00"];

// ASCII digits only: `\d` would also accept Arabic-Indic digits, which `parse` then rejects.
static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})").expect("invalid year-first pattern")
});

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})[-/]([0-9]{1,2})[-/]([0-9]{4})").expect("invalid day-first pattern")
});

/// Parse any cell value into a calendar date.
///
/// Native dates pass through; strings go through [`parse_date_str`]; other values are
/// stringified first (a bare number never matches either pattern).
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Null => None,
        Value::Utf8(s) => parse_date_str(s),
        other => parse_date_str(&other.to_text()),
    }
}

/// Whether `raw` means "no date" (empty, `--`, or the `1/0/00` spreadsheet artifact).
pub fn is_no_date(raw: &str) -> bool {
    NO_DATE_SENTINELS.contains(&raw.trim())
}

/// Parse a date string. Returns `None` for sentinels and for anything invalid.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if is_no_date(s) {
        return None;
    }

    let (year, month, day): (i32, u32, u32) = if let Some(caps) = YEAR_FIRST.captures(s) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    } else if let Some(caps) = DAY_FIRST.captures(s) {
        (caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)
    } else {
        return None;
    };

    calendar_date(year, month, day)
}

/// Validate a `(year, month, day)` triple as a UTC calendar date.
///
/// Years below 100 are rejected: two-digit years are ambiguous and never round-trip.
fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year < 100 {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    // from_ymd_opt already refuses rollover; keep the round-trip check explicit.
    (date.year() == year && date.month() == month && date.day() == day).then_some(date)
}

/// Display form `YYYY/MM/DD`, zero padded.
pub fn display(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Normalize a value into its display form, or [`DATE_PLACEHOLDER`].
pub fn format_date_for_display(value: &Value) -> String {
    parse_date(value).map_or_else(|| DATE_PLACEHOLDER.to_string(), display)
}

/// Normalize a string into its display form, or [`DATE_PLACEHOLDER`].
pub fn format_str_for_display(raw: &str) -> String {
    parse_date_str(raw).map_or_else(|| DATE_PLACEHOLDER.to_string(), display)
}

/// Form-input form `YYYY-MM-DD`, or `""` when invalid.
pub fn format_str_for_input(raw: &str) -> String {
    parse_date_str(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Sort key for date strings: invalid dates are `None` and therefore sort first.
pub fn sort_key(raw: &str) -> Option<NaiveDate> {
    parse_date_str(raw)
}
