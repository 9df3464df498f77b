//! `hr-roster` - CLI for the employee roster
//!
//! This binary loads the roster, runs one command against it and exits. Mutating commands
//! write the snapshot before returning.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::Parser;

use hr_roster::cli::{
    AlertsCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
    StatsCommand,
};
use hr_roster::dates;
use hr_roster::processing::FilterOptions;
use hr_roster::types::{EmployeeField, EmployeeRecord};
use hr_roster::{alerts, init_logging, App, Config, LoadSource};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    if let Command::Config(cmd) = cli.command {
        return handle_config(&config, cmd);
    }

    let (mut app, source) = App::bootstrap(config).context("loading roster")?;

    match cli.command {
        Command::Load => {
            report_source(&source, app.roster().len());
            Ok(())
        }
        Command::List(cmd) => handle_list(&app, &cmd),
        Command::Show(cmd) => handle_show(&app, &cmd),
        Command::Alerts(cmd) => handle_alerts(&app, &cmd),
        Command::Stats(cmd) => handle_stats(&app, &cmd),
        Command::Add(cmd) => {
            let mut record = blank_record();
            apply(&mut record, &cmd.set);
            app.add(record)?;
            println!("Employee saved.");
            Ok(())
        }
        Command::Edit(cmd) => {
            let mut record = app
                .roster()
                .find(&cmd.number)
                .cloned()
                .with_context(|| format!("employee number '{}' not found", cmd.number))?;
            apply(&mut record, &cmd.set);
            app.update(&cmd.number, record)?;
            println!("Employee saved.");
            Ok(())
        }
        Command::Delete { number } => {
            let removed = app.remove(&number)?;
            println!("Deleted {} ({}).", removed.employee_number(), removed.display_name());
            Ok(())
        }
        Command::Import(cmd) => {
            let count = app
                .import_file(&cmd.file)
                .with_context(|| format!("importing {}", cmd.file.display()))?;
            println!("Imported {count} employees from {}.", cmd.file.display());
            Ok(())
        }
        #[cfg(feature = "export")]
        Command::Export(cmd) => {
            let path = match cmd.out {
                Some(path) => {
                    hr_roster::export::write_workbook(app.roster().records(), &path)?;
                    path
                }
                None => app.export_backup(&app.config().export.output_dir)?,
            };
            println!("Exported {} employees to {}.", app.roster().len(), path.display());
            Ok(())
        }
        #[cfg(feature = "export")]
        Command::Template(cmd) => {
            let path = cmd.out.unwrap_or_else(|| {
                app.config()
                    .export
                    .output_dir
                    .join(hr_roster::export::TEMPLATE_FILE_NAME)
            });
            hr_roster::export::write_template(&path)?;
            println!("Template written to {}.", path.display());
            Ok(())
        }
        Command::Clear(cmd) => {
            if !cmd.yes {
                bail!("refusing to delete {} employees without --yes", app.roster().len());
            }
            app.clear_all()?;
            println!("All employee data deleted.");
            Ok(())
        }
        Command::Info { json } => {
            let info = app.system_info()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Employees:     {}", info.employees);
                println!("Snapshot:      {}", info.snapshot_path.display());
                match info.last_update {
                    Some(ts) => println!("Last update:   {}", ts.to_rfc3339()),
                    None => println!("Last update:   never"),
                }
                if let Some(bytes) = info.snapshot_bytes {
                    println!("Snapshot size: {:.2} KB", bytes as f64 / 1024.0);
                }
            }
            Ok(())
        }
        Command::Config(_) => unreachable!("handled before bootstrap"),
    }
}

fn report_source(source: &LoadSource, count: usize) {
    match source {
        LoadSource::Bundled(path) => println!("Loaded {count} employees from {}.", path.display()),
        LoadSource::Snapshot => println!("Loaded {count} employees from the local snapshot."),
        LoadSource::Empty => println!("No data file or snapshot found; roster is empty."),
    }
}

/// Every field present and empty, like a freshly reset entry form.
fn blank_record() -> EmployeeRecord {
    let mut record = EmployeeRecord::new();
    for field in EmployeeField::ALL {
        record.set(*field, "");
    }
    record
}

fn apply(record: &mut EmployeeRecord, assignments: &[(EmployeeField, String)]) {
    for (field, value) in assignments {
        record.set(*field, value.clone());
    }
}

fn handle_list(app: &App, cmd: &ListCommand) -> Result<()> {
    if cmd.options {
        return print_filter_options(&app.roster().filter_options(), cmd.format);
    }

    let records = match cmd.recent {
        Some(n) => app.roster().recent(n),
        None => app.roster().filter(&cmd.filter()),
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            println!(
                "{:<10}  {:<30}  {:<30}  {:<12}  {:<20}  {:<10}",
                "NUMBER", "ARABIC NAME", "ENGLISH NAME", "NATIONALITY", "JOB", "STATUS"
            );
            for r in &records {
                println!(
                    "{:<10}  {:<30}  {:<30}  {:<12}  {:<20}  {:<10}",
                    r.employee_number(),
                    r.get(EmployeeField::ArabicName).unwrap_or(""),
                    r.get(EmployeeField::EnglishName).unwrap_or(""),
                    r.get(EmployeeField::Nationality).unwrap_or(""),
                    r.get(EmployeeField::JobTitle).unwrap_or(""),
                    r.get(EmployeeField::ContractStatus).unwrap_or(""),
                );
            }
            println!("{} of {} employees", records.len(), app.roster().len());
        }
        OutputFormat::Plain => {
            for r in &records {
                println!("{}\t{}", r.employee_number(), r.display_name());
            }
        }
    }
    Ok(())
}

fn print_filter_options(options: &FilterOptions, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }
    println!("Nationalities:  {}", options.nationalities.join(", "));
    println!("Job titles:     {}", options.job_titles.join(", "));
    println!("Work schedules: {}", options.work_schedules.join(", "));
    Ok(())
}

fn handle_show(app: &App, cmd: &ShowCommand) -> Result<()> {
    let Some(record) = app.roster().find(&cmd.number) else {
        bail!("employee number '{}' not found", cmd.number);
    };

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    for field in EmployeeField::ALL {
        let value = record.get(*field).unwrap_or("");
        let value = if field.is_date() {
            dates::format_str_for_display(value)
        } else {
            value.to_string()
        };
        println!("{}: {}", field.label(), value);
    }
    for (key, value) in &record.extra {
        println!("{key}: {value}");
    }
    Ok(())
}

fn handle_alerts(app: &App, cmd: &AlertsCommand) -> Result<()> {
    let today = cmd.today.unwrap_or_else(alerts::today_utc);
    let window = cmd.window.unwrap_or(app.config().alerts.window_days);
    let report = alerts::compute_alerts(app.roster().records(), today, window);

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if report.is_empty() {
        println!("No alerts.");
        return Ok(());
    }
    for notice in &report.notices {
        println!("[{}] {} - {}", notice.date, notice.title, notice.message);
    }
    println!("{} alert(s)", report.total);
    Ok(())
}

fn handle_stats(app: &App, cmd: &StatsCommand) -> Result<()> {
    let stats = app.roster().stats();
    let breakdowns: Vec<_> = cmd
        .by
        .iter()
        .map(|field| (field.form_id(), app.roster().breakdown(*field)))
        .collect();

    if cmd.format == OutputFormat::Json {
        let value = serde_json::json!({
            "stats": stats,
            "breakdowns": breakdowns
                .iter()
                .map(|(id, counts)| (id.to_string(), serde_json::json!(counts)))
                .collect::<serde_json::Map<_, _>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Total employees:    {}", stats.total);
    println!("Active:             {}", stats.active);
    println!("Inactive:           {}", stats.inactive);
    println!("Average salary:     {}", stats.average_salary);
    for (id, counts) in &breakdowns {
        println!();
        println!("By {id}:");
        for (value, count) in counts {
            println!("  {value}: {count}");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  Data dir:      {}", config.data.data_dir.display());
                println!("  Snapshot path: {}", config.snapshot_path().display());
                println!();
                println!("[Alerts]");
                println!("  Window (days): {}", config.alerts.window_days);
                println!();
                println!("[Export]");
                println!("  Output dir:    {}", config.export.output_dir.display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
