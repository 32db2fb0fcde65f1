//! Drill-down choropleth aggregation CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use drillmap_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use drillmap_cli::commands::{run_aggregate, run_infer, run_navigate};
use drillmap_cli::logging::{LogConfig, LogFormat, init_logging};

mod summary;

use crate::summary::{print_aggregate, print_inference, print_navigation};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(command: Command) -> Result<i32> {
    match command {
        Command::Infer(args) => {
            let result = run_infer(&args)?;
            if args.json {
                print_json(&result)?;
            } else {
                print_inference(&result);
            }
            Ok(0)
        }
        Command::Aggregate(args) => {
            let result = run_aggregate(&args)?;
            if args.json {
                print_json(&result.frame)?;
            } else {
                print_aggregate(&result);
            }
            Ok(0)
        }
        Command::Navigate(args) => {
            let result = run_navigate(&args).await?;
            if args.json {
                print_json(&result.steps)?;
            } else {
                print_navigation(&result);
            }
            Ok(if result.has_errors { 1 } else { 0 })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
}
