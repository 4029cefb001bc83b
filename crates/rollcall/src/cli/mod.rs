//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure and command definitions for the
//! `rollcall` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, MonthArg, OutputFormat, ResetCommand,
    StatusCommand, SummaryCommand,
};

/// rollcall - a local class attendance register
///
/// Records which classes each student attended, month by month, and shows
/// filtered summaries and record tables. All data stays in a local store.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Record a class attendance entry
    Add(AddCommand),

    /// Show grouped attendance counts
    Summary(SummaryCommand),

    /// List individual records, newest class first
    List(ListCommand),

    /// List distinct student names
    Students,

    /// Delete a record by id
    Delete(DeleteCommand),

    /// Show store statistics
    Status(StatusCommand),

    /// Reset the store to an empty record list
    Reset(ResetCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rollcall");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Students,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: Command::Students,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli {
            config: None,
            verbose: 1,
            quiet: false,
            command: Command::Students,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli {
            config: None,
            verbose: 2,
            quiet: false,
            command: Command::Students,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_add() {
        let args = vec!["rollcall", "add", "Alice", "--month", "may", "--date", "2024-05-01"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.name, "Alice");
                assert_eq!(cmd.month, Some(MonthArg::May));
                assert_eq!(
                    cmd.date,
                    Some(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = vec!["rollcall", "add", "Alice"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Add(cmd) => {
                assert!(cmd.month.is_none());
                assert!(cmd.date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_rejects_bad_date() {
        let args = vec!["rollcall", "add", "Alice", "--date", "yesterday"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_summary_filters() {
        let args = vec!["rollcall", "summary", "-m", "may", "-s", "Alice"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Summary(cmd) => {
                assert_eq!(cmd.month, Some(MonthArg::May));
                assert_eq!(cmd.student, Some("Alice".to_string()));
                assert_eq!(cmd.format, OutputFormat::Plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_default_format() {
        let args = vec!["rollcall", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Table),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_students() {
        let args = vec!["rollcall", "students"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Students));
    }

    #[test]
    fn test_parse_delete() {
        let args = vec!["rollcall", "delete", "3", "--yes"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Delete(cmd) => {
                assert_eq!(cmd.id, 3);
                assert!(cmd.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_json() {
        let args = vec!["rollcall", "status", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Status(cmd) => assert!(cmd.json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_path() {
        let args = vec!["rollcall", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["rollcall", "-c", "/custom/config.toml", "students"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let args = vec!["rollcall", "-v", "students"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["rollcall", "-q", "students"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.quiet);
    }
}
