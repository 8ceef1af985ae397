//! CLI argument definitions for the panel union tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use panel_ingest::{DEFAULT_FILE_PATTERN, DEFAULT_LABELS_SUFFIX};

#[derive(Parser)]
#[command(
    name = "panel-union",
    version,
    about = "Reconcile yearly survey extracts into one longitudinal table",
    long_about = "Reconcile yearly survey extracts into one longitudinal table.\n\n\
                  Variables whose type drifts between years are split into\n\
                  <variable>_<type> columns; level drift and partial presence\n\
                  are reported in the diagnostics outputs."
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
    /// Reconcile and union one or more file groups, writing combined and diagnostic files.
    Union(UnionArgs),

    /// Print drift diagnostics for one file group without writing anything.
    Profile(ProfileArgs),
}

/// Where the yearly extracts live and how they are named.
#[derive(Args)]
pub struct SourceArgs {
    /// Directory containing the yearly extracts.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Year labels in chronological order (comma separated).
    #[arg(long = "years", value_name = "Y1,Y2,...", value_delimiter = ',', required = true)]
    pub years: Vec<String>,

    /// File name pattern; `{group}` and `{year}` are substituted.
    #[arg(long = "pattern", default_value = DEFAULT_FILE_PATTERN)]
    pub pattern: String,

    /// Suffix of the value-label sidecar replacing the data file's extension.
    #[arg(long = "labels-suffix", default_value = DEFAULT_LABELS_SUFFIX)]
    pub labels_suffix: String,

    /// Cell values treated as missing (repeatable; replaces the default NA tokens).
    #[arg(long = "na", value_name = "TOKEN")]
    pub na_tokens: Vec<String>,

    /// Load years one after another instead of in parallel.
    #[arg(long = "sequential")]
    pub sequential: bool,
}

#[derive(Args)]
pub struct UnionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// File group to reconcile (repeatable).
    #[arg(long = "group", value_name = "GROUP", required = true)]
    pub groups: Vec<String>,

    /// Output directory (default: the data directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Reconcile and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// File group to profile.
    #[arg(long = "group", value_name = "GROUP")]
    pub group: String,

    /// Only list variables with type drift, level drift or partial presence.
    #[arg(long = "drift-only")]
    pub drift_only: bool,
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
