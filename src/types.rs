//! Core data model types.
//!
//! Every ingestion path produces [`EmployeeRecord`]s: a typed record with one optional string
//! per [`EmployeeField`], plus any extra columns the source carried. [`EmployeeField`] is the
//! static schema table mapping form ids (e.g. `employeeNumber`) to the canonical header labels
//! used by data files.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Word that marks a label as a date field.
pub const DATE_WORD: &str = "تاريخ";

/// Contract status value that counts as active.
pub const ACTIVE_STATUS: &str = "نشط";

/// A single raw cell value, before normalization into record text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Native calendar date (spreadsheet date cells).
    Date(NaiveDate),
}

impl Value {
    /// Render the value as record text.
    ///
    /// Integral floats drop their fractional part (`800.0` -> `"800"`), nulls become `""`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int64(i) => i.to_string(),
            Value::Float64(f) => format_float(*f),
            Value::Bool(b) => b.to_string(),
            Value::Utf8(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// One raw row as extracted from a source, in column order.
///
/// Keys are untrimmed; duplicates are allowed and resolved during normalization.
pub type RawRow = Vec<(String, Value)>;

macro_rules! employee_schema {
    ($( $variant:ident, $attr:ident, $form_id:literal, $label:literal; )*) => {
        /// The fixed set of employee fields.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EmployeeField {
            $( $variant, )*
        }

        impl EmployeeField {
            /// All fields in schema (column) order.
            pub const ALL: &'static [EmployeeField] = &[ $( EmployeeField::$variant, )* ];

            /// Form id used by the add/edit surface (e.g. `employeeNumber`).
            pub fn form_id(self) -> &'static str {
                match self {
                    $( EmployeeField::$variant => $form_id, )*
                }
            }

            /// Canonical label used as the data-file header.
            pub fn label(self) -> &'static str {
                match self {
                    $( EmployeeField::$variant => $label, )*
                }
            }
        }

        /// A canonical employee record.
        ///
        /// `None` means the source did not carry the column at all, as opposed to an empty
        /// cell (`Some("")`).
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct EmployeeRecord {
            $( pub $attr: Option<String>, )*
            /// Columns whose trimmed key is not a known label, in first-seen order.
            pub extra: Vec<(String, String)>,
        }

        impl EmployeeRecord {
            fn slot(&self, field: EmployeeField) -> &Option<String> {
                match field {
                    $( EmployeeField::$variant => &self.$attr, )*
                }
            }

            fn slot_mut(&mut self, field: EmployeeField) -> &mut Option<String> {
                match field {
                    $( EmployeeField::$variant => &mut self.$attr, )*
                }
            }
        }
    };
}

employee_schema! {
    EmployeeNumber, employee_number, "employeeNumber", "رقم الموظف";
    ArabicName, arabic_name, "arabicName", "اسم الموظف باللغة العربية";
    EnglishName, english_name, "englishName", "اسم الموظف باللغة الإنجليزية";
    CivilId, civil_id, "civilId", "البطاقة المدنية";
    CivilIdExpiry, civil_id_expiry, "civilIdExpiry", "تاريخ انتهاء البطاقة";
    Nationality, nationality, "nationality", "الجنسية";
    PassportNumber, passport_number, "passportNumber", "رقم جواز السفر";
    PassportExpiry, passport_expiry, "passportExpiry", "تاريخ انتهاء الجواز";
    UnifiedNumber, unified_number, "unifiedNumber", "الرقم الموحد";
    ContractDate, contract_date, "contractDate", "تاريخ التعاقد";
    ContractStatus, contract_status, "contractStatus", "حالة التعاقد";
    WorkSite, work_site, "workSite", "موقع العمل";
    JobTitle, job_title, "jobTitle", "المهنة";
    WorkSchedule, work_schedule, "workSchedule", "نظام الدوام";
    CurrentSalary, current_salary, "currentSalary", "الراتب الحالي للموظف";
    WorkPermitSalary, work_permit_salary, "workPermitSalary", "الراتب حسب اذن العمل";
    CompanyName, company_name, "companyName", "اسم الشركة";
    AdminNotes, admin_notes, "adminNotes", "ملاحظات إدارية";
    AdditionalNotes, additional_notes, "additionalNotes", "اضافات اخرى";
}

impl EmployeeField {
    /// Look up a field by its canonical label (exact match, caller trims).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.label() == label)
    }

    /// Look up a field by its form id.
    pub fn from_form_id(form_id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.form_id() == form_id)
    }

    /// Whether values of this field are dates (label contains [`DATE_WORD`]).
    pub fn is_date(self) -> bool {
        self.label().contains(DATE_WORD)
    }

    /// All date fields, in schema order.
    pub fn date_fields() -> impl Iterator<Item = EmployeeField> {
        Self::ALL.iter().copied().filter(|f| f.is_date())
    }

    /// Fields the add/edit path requires to be non-empty.
    pub const REQUIRED: &'static [EmployeeField] = &[
        EmployeeField::EmployeeNumber,
        EmployeeField::ArabicName,
        EmployeeField::EnglishName,
        EmployeeField::CivilId,
        EmployeeField::CivilIdExpiry,
        EmployeeField::Nationality,
        EmployeeField::ContractDate,
        EmployeeField::ContractStatus,
        EmployeeField::JobTitle,
        EmployeeField::WorkSchedule,
        EmployeeField::CurrentSalary,
    ];
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl EmployeeRecord {
    /// Create an empty record (no columns present).
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a known field, if present.
    pub fn get(&self, field: EmployeeField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a known field.
    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Remove a known field, returning its previous value.
    pub fn take(&mut self, field: EmployeeField) -> Option<String> {
        self.slot_mut(field).take()
    }

    /// Value for an arbitrary key: known labels first, then extra columns.
    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        match EmployeeField::from_label(key) {
            Some(field) => self.get(field),
            None => self
                .extra
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Insert a value under an arbitrary key. A later insert under the same key wins.
    pub fn insert_key(&mut self, key: &str, value: String) {
        match EmployeeField::from_label(key) {
            Some(field) => self.set(field, value),
            None => match self.extra.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value,
                None => self.extra.push((key.to_string(), value)),
            },
        }
    }

    /// Set a known field by its form id. Returns `false` for an unknown id.
    pub fn set_by_form_id(&mut self, form_id: &str, value: impl Into<String>) -> bool {
        match EmployeeField::from_form_id(form_id) {
            Some(field) => {
                self.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Employee number, or `""` when absent.
    pub fn employee_number(&self) -> &str {
        self.get(EmployeeField::EmployeeNumber).unwrap_or("")
    }

    /// Display name: Arabic name, then English name, then employee number.
    pub fn display_name(&self) -> &str {
        [
            EmployeeField::ArabicName,
            EmployeeField::EnglishName,
            EmployeeField::EmployeeNumber,
        ]
        .into_iter()
        .filter_map(|f| self.get(f))
        .find(|v| !v.trim().is_empty())
        .unwrap_or("--")
    }

    /// Numeric value of a field; absent or non-numeric text counts as zero.
    pub fn numeric(&self, field: EmployeeField) -> f64 {
        self.get(field)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Whether the contract status equals [`ACTIVE_STATUS`].
    pub fn is_active(&self) -> bool {
        self.get(EmployeeField::ContractStatus) == Some(ACTIVE_STATUS)
    }

    /// Present columns: known fields in schema order, then extra columns.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        EmployeeField::ALL
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (f.label(), v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl Serialize for EmployeeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.entries() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EmployeeRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Builds a record entry by entry in document order, so extras keep their column order and
/// the later of two keys that trim to the same label wins.
struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = EmployeeRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field labels to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = EmployeeRecord::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            record.insert_key(key.trim(), crate::ingestion::json::value_from_json(&value).to_text());
        }
        Ok(record)
    }
}
