//! In-memory roster transformations.
//!
//! The processing layer operates on slices of [`crate::types::EmployeeRecord`] produced by
//! ingestion. Everything is a linear scan over the in-memory list.
//!
//! Currently implemented:
//!
//! - [`filter()`]: listing filter (exact field matches plus free-text search)
//! - [`stats()`]: headline counts and average salary
//! - [`breakdown()`]: record count per distinct field value
//! - [`filter_options()`]: distinct values offered as filter choices
//!
//! ## Example: filter → stats
//!
//! ```rust
//! use hr_roster::processing::{filter, stats, EmployeeFilter};
//! use hr_roster::types::{EmployeeField, EmployeeRecord};
//!
//! let mut a = EmployeeRecord::new();
//! a.set(EmployeeField::Nationality, "كويتي");
//! a.set(EmployeeField::CurrentSalary, "800");
//! a.set(EmployeeField::ContractStatus, "نشط");
//! let mut b = EmployeeRecord::new();
//! b.set(EmployeeField::Nationality, "مصري");
//! b.set(EmployeeField::CurrentSalary, "600");
//! let records = vec![a, b];
//!
//! let kuwaiti = filter(&records, &EmployeeFilter {
//!     nationality: Some("كويتي".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(kuwaiti.len(), 1);
//!
//! let s = stats(&records);
//! assert_eq!((s.total, s.active, s.average_salary), (2, 1, 700));
//! ```

pub mod filter;
pub mod reduce;

pub use filter::{filter, EmployeeFilter};
pub use reduce::{breakdown, filter_options, stats, FilterOptions, RosterStats, UNSPECIFIED};
