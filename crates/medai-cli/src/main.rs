//! Patient dataset builder CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use medai_cli::logging::{LogConfig, LogFormat, init_logging};
use medai_cli::pipeline::run_ingestion;
use medai_model::{BloodPressureFallback, IngestConfig};

mod cli;
mod summary;

use crate::cli::{BpFallbackArg, Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let show_progress = !cli.no_progress && io::stderr().is_terminal();
    let exit_code = match ingest_config_from_cli(&cli)
        .and_then(|config| run_ingestion(&config, show_progress))
    {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn ingest_config_from_cli(cli: &Cli) -> Result<IngestConfig> {
    let mut config = match &cli.config {
        Some(path) => IngestConfig::from_json_file(path)?,
        None => IngestConfig::default(),
    };
    if let Some(dir) = &cli.source_dir {
        config.source_directory = dir.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(limit) = cli.limit {
        config = config.with_record_limit(Some(limit));
    }
    if let Some(date) = cli.reference_date {
        config = config.with_reference_date(date);
    }
    if let Some(mode) = cli.bp_fallback {
        config = config.with_blood_pressure_fallback(match mode {
            BpFallbackArg::Corrected => BloodPressureFallback::Corrected,
            BpFallbackArg::Legacy => BloodPressureFallback::Legacy,
        });
    }
    Ok(config)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
