//! `rollcall` - CLI for the class attendance register
//!
//! This binary provides the command-line interface for recording, viewing,
//! and deleting attendance entries.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use chrono::Local;
use clap::Parser;

use rollcall::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand, OutputFormat,
    ResetCommand, StatusCommand, SummaryCommand,
};
use rollcall::projection::{self, MonthFilter, StudentFilter};
use rollcall::store::SqliteBackend;
use rollcall::{init_logging, Config, Month, RecordStore, Result};

/// Message shown when a filtered view has nothing to display.
const NO_RECORDS: &str = "No records found for the selected filters.";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match run(&config, cli.command) {
        Ok(()) => Ok(()),
        Err(err) if err.is_corrupt_store() => {
            eprintln!("error: {err}");
            eprintln!("run `rollcall reset` to start over with an empty register");
            std::process::exit(1);
        }
        Err(err) if err.is_validation() => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}

/// Execute the parsed command.
fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Add(cmd) => handle_add(config, &cmd),
        Command::Summary(cmd) => handle_summary(config, &cmd),
        Command::List(cmd) => handle_list(config, &cmd),
        Command::Students => handle_students(config),
        Command::Delete(cmd) => handle_delete(config, &cmd),
        Command::Status(cmd) => handle_status(config, &cmd),
        Command::Reset(cmd) => handle_reset(config, &cmd),
        Command::Config(cmd) => handle_config(config, cmd),
    }
}

/// Open the record store the configuration points at.
fn open_store(config: &Config) -> Result<RecordStore<SqliteBackend>> {
    RecordStore::open(config.database_path(), config.storage.store_key.clone())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> Result<()> {
    let today = Local::now().date_naive();
    let month = cmd
        .month
        .map_or_else(|| Month::from_date(today), Month::from);
    let class_date = cmd.date.unwrap_or(today);

    let mut store = open_store(config)?;
    let record = store.append(&cmd.name, month, class_date)?;

    println!(
        "Added record #{} for {} ({}, {})",
        record.id.unwrap_or_default(),
        record.student_name,
        record.month,
        record.date
    );
    Ok(())
}

fn handle_summary(config: &Config, cmd: &SummaryCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let records = store.load()?;

    let month = MonthFilter::from(cmd.month.map(Month::from));
    let student = cmd
        .student
        .as_deref()
        .map_or(StudentFilter::All, StudentFilter::parse);
    let filtered = projection::filter(&records, &month, &student);

    let Some(summary) = projection::summarize(&filtered) else {
        println!("{NO_RECORDS}");
        return Ok(());
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            for student in &summary.students {
                println!("{}", student.name);
                for entry in &student.months {
                    println!("  {}: {}", entry.month, projection::format_count(entry.count));
                }
            }
        }
        OutputFormat::Table => {
            let name_width = column_width(
                "STUDENT",
                summary.students.iter().map(|s| s.name.as_str()),
            );
            println!("{:<name_width$}  {:<10}  CLASSES", "STUDENT", "MONTH");
            for student in &summary.students {
                for entry in &student.months {
                    println!(
                        "{:<name_width$}  {:<10}  {}",
                        student.name,
                        entry.month.name(),
                        projection::format_count(entry.count)
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let records = store.load()?;

    let month = MonthFilter::from(cmd.month.map(Month::from));
    let student = cmd
        .student
        .as_deref()
        .map_or(StudentFilter::All, StudentFilter::parse);
    let filtered = projection::filter(&records, &month, &student);

    let Some(sorted) = projection::sort_for_display(&filtered) else {
        println!("{NO_RECORDS}");
        return Ok(());
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sorted)?),
        OutputFormat::Plain => {
            for record in &sorted {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.id.unwrap_or_default(),
                    record.student_name,
                    record.month,
                    record.date
                );
            }
        }
        OutputFormat::Table => {
            let name_width =
                column_width("STUDENT", sorted.iter().map(|r| r.student_name.as_str()));
            println!("{:<6}  {:<name_width$}  {:<10}  DATE", "ID", "STUDENT", "MONTH");
            for record in &sorted {
                println!(
                    "{:<6}  {:<name_width$}  {:<10}  {}",
                    record.id.unwrap_or_default(),
                    record.student_name,
                    record.month.name(),
                    record.date
                );
            }
        }
    }
    Ok(())
}

fn handle_students(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let students = store.distinct_students()?;

    if students.is_empty() {
        println!("No students recorded.");
        return Ok(());
    }
    for name in students {
        println!("{name}");
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> Result<()> {
    let mut store = open_store(config)?;

    let Some(record) = store.get(cmd.id)? else {
        println!("No record with id {}.", cmd.id);
        return Ok(());
    };

    if !cmd.yes && config.ui.confirm_delete {
        let prompt = format!(
            "Delete record #{} ({}, {})? [y/N] ",
            cmd.id, record.student_name, record.date
        );
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    if store.delete(cmd.id)? {
        println!("Deleted record #{}.", cmd.id);
    } else {
        println!("No record with id {}.", cmd.id);
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let stats = store.stats()?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "store_key": store.key(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollcall status");
        println!("---------------");
        println!("Database:      {}", config.database_path().display());
        println!("Store key:     {}", store.key());
        println!("Records:       {}", stats.total_records);
        println!("Students:      {}", stats.distinct_students);
        println!("Oldest class:  {}", format_instant(stats.oldest_class));
        println!("Newest class:  {}", format_instant(stats.newest_class));
    }
    Ok(())
}

fn handle_reset(config: &Config, cmd: &ResetCommand) -> Result<()> {
    if !cmd.yes && config.ui.confirm_delete {
        let prompt = "This deletes every attendance record. Continue? [y/N] ";
        if !confirm(prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut store = open_store(config)?;
    store.reset()?;
    println!("Store reset to an empty record list.");
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
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Store key:      {}", config.storage.store_key);
                println!();
                println!("[UI]");
                println!("  Confirm delete: {}", config.ui.confirm_delete);
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

/// Ask the user a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Render an optional instant as its calendar date, or a dash.
fn format_instant(instant: Option<chrono::DateTime<chrono::Utc>>) -> String {
    instant.map_or_else(|| "-".to_string(), |dt| dt.date_naive().to_string())
}

/// Width of a left-aligned text column: the widest of the header and values.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
