#![cfg(feature = "export")]
//! Workbook export: roster backups and the blank import template.
//!
//! Both produce a single sheet named [`SHEET_NAME`] whose header row is every canonical label
//! in schema order, followed by any extra columns in first-seen order. All cells are written as
//! text, so an exported workbook ingests back to the same values, with two exceptions:
//!
//! - empty values are left as blank cells, so a field the record did not carry comes back as
//!   `""` (every header column is present on every ingested row)
//! - a record with no non-empty value at all is a blank row, which ingestion skips

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::StoreResult;
use crate::types::{EmployeeField, EmployeeRecord};

/// Sheet name used for every exported workbook.
pub const SHEET_NAME: &str = "Employees";

/// File name of the import template.
pub const TEMPLATE_FILE_NAME: &str = "DATABASE_template.xlsx";

/// Backup file name for `date`: `hr_backup_YYYY-MM-DD.xlsx`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("hr_backup_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Header row for `records`: canonical labels, then extras.
pub fn header(records: &[EmployeeRecord]) -> Vec<String> {
    let mut columns: Vec<String> = EmployeeField::ALL.iter().map(|f| f.label().to_string()).collect();
    for record in records {
        for (key, _) in &record.extra {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Write `records` to a workbook at `path`.
pub fn write_workbook(records: &[EmployeeRecord], path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), records = records.len(), "workbook written");
    Ok(())
}

/// Render `records` as an in-memory `.xlsx` file.
pub fn workbook_to_buffer(records: &[EmployeeRecord]) -> StoreResult<Vec<u8>> {
    Ok(build_workbook(records)?.save_to_buffer()?)
}

/// The sample record shipped in the import template.
pub fn template_record() -> EmployeeRecord {
    let sample = [
        (EmployeeField::EmployeeNumber, "60000"),
        (EmployeeField::ArabicName, "حسن فلاح المعصب"),
        (EmployeeField::EnglishName, "HASSAN FALAH ALMOASB"),
        (EmployeeField::CivilId, "293293293293"),
        (EmployeeField::CivilIdExpiry, "2026/06/29"),
        (EmployeeField::Nationality, "كويتي"),
        (EmployeeField::PassportNumber, "A12345678"),
        (EmployeeField::PassportExpiry, "2088/11/10"),
        (EmployeeField::UnifiedNumber, "123456789"),
        (EmployeeField::ContractDate, "1993/07/09"),
        (EmployeeField::ContractStatus, "منتهى"),
        (EmployeeField::WorkSite, "عماله وطنية الكويتيين - الإدارة الرئيسية"),
        (EmployeeField::JobTitle, "مدير عام"),
        (EmployeeField::WorkSchedule, "دوامين"),
        (EmployeeField::CurrentSalary, "800"),
        (EmployeeField::WorkPermitSalary, "700"),
        (EmployeeField::CompanyName, "شركة بروش انترناشونال لخدمات التنظيف"),
        (EmployeeField::AdminNotes, "باب خامس (الكويتيين)"),
        (EmployeeField::AdditionalNotes, "لا توجد إضافات"),
    ];

    let mut record = EmployeeRecord::new();
    for (field, value) in sample {
        record.set(field, value);
    }
    record
}

/// Write the import template to `path`.
pub fn write_template(path: impl AsRef<Path>) -> StoreResult<()> {
    write_workbook(&[template_record()], path)
}

fn build_workbook(records: &[EmployeeRecord]) -> StoreResult<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    write_rows(sheet, records)?;
    Ok(workbook)
}

fn write_rows(sheet: &mut Worksheet, records: &[EmployeeRecord]) -> StoreResult<()> {
    let columns = header(records);
    let bold = Format::new().set_bold();

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = record.get_by_key(name).filter(|v| !v.is_empty()) {
                sheet.write_string(row, col as u16, value)?;
            }
        }
    }
    Ok(())
}
