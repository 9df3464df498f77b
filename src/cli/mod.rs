//! Command-line interface for hr-roster.
//!
//! This module provides the CLI structure for the `hr-roster` binary; the handlers live in
//! `main.rs`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_assignment, parse_field, AddCommand, AlertsCommand, ClearCommand, ConfigCommand,
    EditCommand, ExportCommand, ImportCommand, ListCommand, OutputFormat, ShowCommand,
    StatsCommand,
};

use crate::logging::Verbosity;

/// hr-roster - employee records and document expiry alerts
///
/// Loads the roster from a bundled DB.xlsx/DB.json/DB.yml/DB.csv file or the local snapshot,
/// and lets you browse, edit, import and export it.
#[derive(Debug, Parser)]
#[command(name = "hr-roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reload the roster from the bundled data files (or the snapshot) and report the source
    Load,

    /// List employees, optionally filtered
    List(ListCommand),

    /// Show one employee
    Show(ShowCommand),

    /// Show civil ID and passport expiry alerts
    Alerts(AlertsCommand),

    /// Show roster statistics
    Stats(StatsCommand),

    /// Add an employee
    Add(AddCommand),

    /// Edit an employee
    Edit(EditCommand),

    /// Delete an employee
    Delete {
        /// Employee number
        number: String,
    },

    /// Replace the roster with the contents of a data file
    Import(ImportCommand),

    /// Write a backup workbook of the roster
    #[cfg(feature = "export")]
    Export(ExportCommand),

    /// Write the import template workbook
    #[cfg(feature = "export")]
    Template(ExportCommand),

    /// Delete every employee and reset the snapshot
    Clear(ClearCommand),

    /// Show record count and snapshot details
    Info {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeField;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "hr-roster");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["hr-roster", "-vv", "stats"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["hr-roster", "stats", "-q"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "hr-roster", "list", "--nationality", "كويتي", "-s", "hassan", "-f", "json",
        ])
        .unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.nationality.as_deref(), Some("كويتي"));
        assert_eq!(cmd.search.as_deref(), Some("hassan"));
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_recent_conflicts_with_filters() {
        assert!(Cli::try_parse_from(["hr-roster", "list", "--recent", "5", "-s", "x"]).is_err());
    }

    #[test]
    fn test_parse_add_assignments() {
        let cli = Cli::try_parse_from([
            "hr-roster",
            "add",
            "--set",
            "employeeNumber=60001",
            "--set",
            "nationality=كويتي",
        ])
        .unwrap();
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(
            cmd.set,
            vec![
                (EmployeeField::EmployeeNumber, "60001".to_string()),
                (EmployeeField::Nationality, "كويتي".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_add_requires_assignments() {
        assert!(Cli::try_parse_from(["hr-roster", "add"]).is_err());
    }

    #[test]
    fn test_parse_stats_by() {
        let cli = Cli::try_parse_from(["hr-roster", "stats", "--by", "nationality", "--by", "jobTitle"]).unwrap();
        let Command::Stats(cmd) = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(cmd.by, vec![EmployeeField::Nationality, EmployeeField::JobTitle]);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["hr-roster", "-c", "/custom/config.toml", "load"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Load));
    }
}
