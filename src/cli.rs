//! CLI argument parsing for Ritmo

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::SourceKind;
use crate::stats::MetricMode;

/// Output format for productivity reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable ranked table (default)
    Table,
    /// JSON report for machine parsing
    Json,
    /// CSV export for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "ritmo")]
#[command(version)]
#[command(about = "Productivity metrics for operational task tracking", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (ritmo.toml in the working
    /// directory is picked up automatically)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Row source backend override
    #[arg(long = "source", value_enum)]
    pub source: Option<SourceKind>,

    /// Exact report date (YYYY-MM-DD); mutually exclusive with --from/--to
    #[arg(short = 'd', long = "date", value_name = "DATE")]
    pub date: Option<String>,

    /// Range start date, inclusive (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Range end date, inclusive (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Branch filter ("all" disables)
    #[arg(short = 'b', long = "branch", default_value = "all")]
    pub branch: String,

    /// Work line filter ("all" disables)
    #[arg(short = 'l', long = "line", default_value = "all")]
    pub line: String,

    /// Worker name filter: substring match, or /REGEX/ for a pattern
    #[arg(short = 'w', long = "worker", value_name = "NAME")]
    pub worker: Option<String>,

    /// Rate metric driving ranking and goal classification
    #[arg(short = 'm', long = "mode", value_enum, default_value = "volume")]
    pub mode: MetricMode,

    /// Override the default goal target (rate per hour)
    #[arg(short = 'g', long = "goal", value_name = "RATE")]
    pub goal: Option<u64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Comma-separated column subset for CSV export
    /// (e.g. worker,volume,hours,volume_hour,status)
    #[arg(long = "columns", value_name = "LIST")]
    pub columns: Option<String>,

    /// Limit output to the top N ranked workers
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Mock source seed override (deterministic synthetic data)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// List distinct branches/lines/workers in the fetched rows, then exit
    #[arg(long = "list-filters")]
    pub list_filters: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
