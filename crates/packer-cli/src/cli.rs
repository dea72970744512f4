//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use packer_cli::logging::LogFormat;
use packer_transform::{DEFAULT_DATE_FORMAT, DEFAULT_MULTI_VALUE_SEPARATOR};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "packer",
    version,
    about = "Export clinical observations as one wide table",
    long_about = "Reshape long-form clinical observations into one row per entity.\n\n\
                  Values of subjects, diagnoses and biosources are carried down to\n\
                  their descendants; Radiology and Study records are joined on.\n\
                  Reads CSV, TSV or JSON and writes a quoted TSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Include identifier values in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export an observation file as a wide TSV table.
    Export(ExportArgs),

    /// List the concept columns of an observation file in export order.
    Concepts(ConceptsArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Observation file (.csv, .tsv, .txt or .json).
    #[arg(value_name = "OBSERVATIONS")]
    pub observations: PathBuf,

    /// Keep only rows whose identifiers appear in the export of this file.
    #[arg(long = "row-filter", value_name = "OBSERVATIONS")]
    pub row_filter: Option<PathBuf>,

    /// Output directory (default: <OBSERVATIONS parent>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Export name; the file is written as <NAME>.tsv (default: input file stem).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// strftime format for date columns.
    #[arg(long = "date-format", value_name = "FMT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Separator between distinct values merged from ancestor rows.
    #[arg(long = "separator", value_name = "SEP", default_value = DEFAULT_MULTI_VALUE_SEPARATOR)]
    pub separator: String,

    /// Run the export and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ConceptsArgs {
    /// Observation file (.csv, .tsv, .txt or .json).
    #[arg(value_name = "OBSERVATIONS")]
    pub observations: PathBuf,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_defaults() {
        let cli = Cli::try_parse_from(["packer", "export", "data/obs.tsv"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.observations, PathBuf::from("data/obs.tsv"));
        assert_eq!(args.date_format, "%Y-%m-%d");
        assert_eq!(args.separator, "; ");
        assert!(args.row_filter.is_none());
        assert!(!args.dry_run);
        assert!(!cli.log_data);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "packer",
            "concepts",
            "obs.json",
            "--log-level",
            "debug",
            "--log-data",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Concepts(_)));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(cli.log_data);
    }
}
