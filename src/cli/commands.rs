//! CLI command definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::dates;
use crate::processing::EmployeeFilter;
use crate::types::EmployeeField;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Free-text search over names and employee number (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact nationality
    #[arg(long)]
    pub nationality: Option<String>,

    /// Exact contract status
    #[arg(long)]
    pub status: Option<String>,

    /// Exact job title
    #[arg(long)]
    pub job: Option<String>,

    /// Exact work schedule
    #[arg(long)]
    pub schedule: Option<String>,

    /// Show only the most recently added N employees, newest first
    #[arg(long, conflicts_with_all = ["search", "nationality", "status", "job", "schedule"])]
    pub recent: Option<usize>,

    /// Print the distinct filter values instead of employees
    #[arg(long)]
    pub options: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ListCommand {
    /// The listing filter described by the flags.
    #[must_use]
    pub fn filter(&self) -> EmployeeFilter {
        EmployeeFilter {
            search: self.search.clone(),
            nationality: self.nationality.clone(),
            contract_status: self.status.clone(),
            job_title: self.job.clone(),
            work_schedule: self.schedule.clone(),
        }
    }
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Employee number
    pub number: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Alerts command arguments.
#[derive(Debug, Args)]
pub struct AlertsCommand {
    /// Evaluate as of this date instead of today (e.g. 2026-06-01 or 01/06/2026)
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,

    /// Look-ahead window in days (defaults to the configured window)
    #[arg(short, long)]
    pub window: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Break the roster down by these fields (form ids, e.g. nationality)
    #[arg(long = "by", value_parser = parse_field)]
    pub by: Vec<EmployeeField>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Field assignments by form id, e.g. --set employeeNumber=60001
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
    pub set: Vec<(EmployeeField, String)>,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Employee number of the record to edit
    pub number: String,

    /// Field assignments by form id, applied over the current values
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
    pub set: Vec<(EmployeeField, String)>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Data file (.xlsx, .xls, .csv, .json, .yml, .yaml)
    pub file: PathBuf,
}

/// Export/template command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file (defaults to the configured output directory)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Confirm deleting every record
    #[arg(long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Parse `FIELD=VALUE` where `FIELD` is a form id.
pub fn parse_assignment(s: &str) -> Result<(EmployeeField, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = parse_field(id.trim())?;
    Ok((field, value.trim().to_string()))
}

/// Parse a form id into a field.
pub fn parse_field(s: &str) -> Result<EmployeeField, String> {
    EmployeeField::from_form_id(s).ok_or_else(|| {
        let known: Vec<_> = EmployeeField::ALL.iter().map(|f| f.form_id()).collect();
        format!("unknown field '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    dates::parse_date_str(s).ok_or_else(|| format!("invalid date '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("employeeNumber= 60001 "),
            Ok((EmployeeField::EmployeeNumber, "60001".to_string()))
        );
        assert_eq!(
            parse_assignment("adminNotes=a=b"),
            Ok((EmployeeField::AdminNotes, "a=b".to_string()))
        );
        assert!(parse_assignment("employeeNumber").is_err());
        assert!(parse_assignment("salary=1").unwrap_err().contains("unknown field"));
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("01/06/2026"), Ok(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()));
        assert!(parse_day("tomorrow").is_err());
    }

    #[test]
    fn test_list_filter_mapping() {
        let cmd = ListCommand {
            search: Some("ali".to_string()),
            nationality: None,
            status: Some("نشط".to_string()),
            job: None,
            schedule: None,
            recent: None,
            options: false,
            format: OutputFormat::Table,
        };
        let filter = cmd.filter();
        assert_eq!(filter.search.as_deref(), Some("ali"));
        assert_eq!(filter.contract_status.as_deref(), Some("نشط"));
        assert!(filter.nationality.is_none());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }
}
