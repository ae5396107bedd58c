//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "medai",
    version,
    about = "Turn a directory of clinical-record bundles into a flat patient dataset",
    long_about = "Read one bundle document per file, extract age, body-mass index,\n\
                  systolic blood pressure, cholesterol, diabetes history and smoking\n\
                  status, impute missing values, derive a heart-disease risk label,\n\
                  and write the result as a CSV table."
)]
pub struct Cli {
    /// Directory holding the bundle files (overrides the config file).
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Destination CSV file (overrides the config file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Read at most this many files, in file-name order.
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// JSON file with run options.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Date ages are computed against (YYYY-MM-DD, default: today).
    #[arg(long = "reference-date", value_name = "DATE")]
    pub reference_date: Option<NaiveDate>,

    /// How blood-pressure observations without a systolic component are read.
    #[arg(long = "bp-fallback", value_enum)]
    pub bp_fallback: Option<BpFallbackArg>,

    /// Hide the file-scanning progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Allow clinical values in trace-level log events.
    #[arg(long = "log-data")]
    pub log_data: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BpFallbackArg {
    Corrected,
    Legacy,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
