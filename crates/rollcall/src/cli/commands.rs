//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::record::Month;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// The student's name
    pub name: String,

    /// Month to file the entry under (defaults to the current month)
    #[arg(short, long, value_enum)]
    pub month: Option<MonthArg>,

    /// Class date, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Only count entries filed under this month
    #[arg(short, long, value_enum)]
    pub month: Option<MonthArg>,

    /// Only count entries for this student ("all" for everyone)
    #[arg(short, long)]
    pub student: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only list entries filed under this month
    #[arg(short, long, value_enum)]
    pub month: Option<MonthArg>,

    /// Only list entries for this student ("all" for everyone)
    #[arg(short, long)]
    pub student: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the record to delete (see `rollcall list`)
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip the confirmation prompt
    #[arg(short, long)]
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

/// Month argument for entry and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MonthArg {
    /// January
    January,
    /// February
    February,
    /// March
    March,
    /// April
    April,
    /// May
    May,
    /// June
    June,
    /// July
    July,
    /// August
    August,
    /// September
    September,
    /// October
    October,
    /// November
    November,
    /// December
    December,
}

impl From<MonthArg> for Month {
    fn from(arg: MonthArg) -> Self {
        match arg {
            MonthArg::January => Self::January,
            MonthArg::February => Self::February,
            MonthArg::March => Self::March,
            MonthArg::April => Self::April,
            MonthArg::May => Self::May,
            MonthArg::June => Self::June,
            MonthArg::July => Self::July,
            MonthArg::August => Self::August,
            MonthArg::September => Self::September,
            MonthArg::October => Self::October,
            MonthArg::November => Self::November,
            MonthArg::December => Self::December,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_arg_conversion() {
        assert_eq!(Month::from(MonthArg::January), Month::January);
        assert_eq!(Month::from(MonthArg::May), Month::May);
        assert_eq!(Month::from(MonthArg::December), Month::December);
    }

    #[test]
    fn test_month_arg_value_names() {
        // clap derives kebab-case value names
        let may = MonthArg::from_str("may", true).unwrap();
        assert_eq!(may, MonthArg::May);

        let september = MonthArg::from_str("september", true).unwrap();
        assert_eq!(september, MonthArg::September);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            name: "Alice".to_string(),
            month: Some(MonthArg::May),
            date: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Alice"));
        assert!(debug_str.contains("May"));
    }

    #[test]
    fn test_summary_command_debug() {
        let cmd = SummaryCommand {
            month: None,
            student: Some("Alice".to_string()),
            format: OutputFormat::Plain,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("student"));
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand { id: 7, yes: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains('7'));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
