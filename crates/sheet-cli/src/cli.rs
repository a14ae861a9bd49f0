//! CLI argument definitions for the import checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheet_model::ColumnHandling;

#[derive(Parser)]
#[command(
    name = "sheet-import",
    version,
    about = "Check a spreadsheet export against an import schema",
    long_about = "Check a CSV file against a column schema before importing it.\n\n\
                  Runs three gates in order: required headers, undeclared columns,\n\
                  and per-cell type and rule validation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a CSV file and optionally write cleaned rows and a report.
    Check(CheckArgs),

    /// Show the configured schema and any problems in it.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Import configuration (JSON).
    #[arg(long = "config", value_name = "CONFIG")]
    pub config: PathBuf,

    /// How to treat columns the schema does not declare (overrides the config).
    #[arg(long = "column-handling", value_enum)]
    pub column_handling: Option<ColumnHandlingArg>,

    /// Write the cleaned rows to this CSV file when the import can proceed.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the full gate report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Apply each column's invalid-data handling to failing cells.
    ///
    /// Flagged cells are kept for manual review, removed cells are cleared
    /// and defaulted cells take the column default. Any cell in a column
    /// that rejects invalid data still blocks the import.
    #[arg(long = "apply-handling")]
    pub apply_handling: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Import configuration (JSON).
    #[arg(long = "config", value_name = "CONFIG")]
    pub config: PathBuf,
}

/// CLI choices for undeclared column handling.
#[derive(Clone, Copy, ValueEnum)]
pub enum ColumnHandlingArg {
    Reject,
    Ignore,
    Warn,
    Include,
}

impl From<ColumnHandlingArg> for ColumnHandling {
    fn from(arg: ColumnHandlingArg) -> Self {
        match arg {
            ColumnHandlingArg::Reject => Self::Reject,
            ColumnHandlingArg::Ignore => Self::Ignore,
            ColumnHandlingArg::Warn => Self::Warn,
            ColumnHandlingArg::Include => Self::Include,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from([
            "sheet-import",
            "check",
            "data.csv",
            "--config",
            "import.json",
            "--column-handling",
            "include",
            "--apply-handling",
        ]);
        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.input, PathBuf::from("data.csv"));
        assert!(args.apply_handling);
        assert!(matches!(args.column_handling, Some(ColumnHandlingArg::Include)));
    }
}
