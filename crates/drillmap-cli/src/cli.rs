//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crate::types::Step;

#[derive(Parser)]
#[command(
    name = "drillmap",
    version,
    about = "Aggregate regional data along a 6-digit administrative code hierarchy",
    long_about = "Aggregate leaf-level regional data along a 6-digit administrative code hierarchy.\n\n\
                  Infers the scope shared by a dataset, sums records per province, city or\n\
                  county, and replays drill-down / drill-up navigation against map geometry."
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
    /// Print the most specific scope shared by every record.
    Infer(InferArgs),

    /// Aggregate the dataset at one scope.
    Aggregate(AggregateArgs),

    /// Replay drill-down / drill-up steps against map geometry.
    Navigate(NavigateArgs),
}

/// Dataset location and column layout shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// CSV file with one row per leaf region.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Column holding the 6-digit region code.
    #[arg(long = "code-column", default_value = "adcode")]
    pub code_column: String,

    /// Column holding the numeric value.
    #[arg(long = "value-column", default_value = "value")]
    pub value_column: String,

    /// Series label (defaults to the value column name).
    #[arg(long = "metric-name", value_name = "NAME")]
    pub metric_name: Option<String>,
}

impl DataArgs {
    pub fn series_name(&self) -> &str {
        self.metric_name.as_deref().unwrap_or(&self.value_column)
    }
}

/// Optional region-name table.
#[derive(Args, Debug, Clone)]
pub struct NameArgs {
    /// CSV file mapping region codes to display names.
    #[arg(long = "names", value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Column of the names file holding the 6-digit region code.
    #[arg(long = "name-code-column", default_value = "adcode")]
    pub name_code_column: String,

    /// Column of the names file holding the display name.
    #[arg(long = "name-column", default_value = "name")]
    pub name_column: String,
}

#[derive(Parser, Debug)]
pub struct InferArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub names: NameArgs,

    /// Scope to aggregate at: 0, 2, 4 or 6 digits (defaults to the inferred scope).
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Print the render frame as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct NavigateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub names: NameArgs,

    /// Directory holding `<map_code>_full.json` GeoJSON files.
    #[arg(long = "geometry-dir", value_name = "DIR")]
    pub geometry_dir: PathBuf,

    /// Interaction to replay: `region:<prefix>`, `region` (no data) or `outside`.
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Print the step log as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
