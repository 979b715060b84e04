//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use pairs_core::SharpePeriod;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pairs")]
#[command(author, version, about = "Pairs trading backtester")]
pub struct Cli {
    /// Configuration file path (missing file means defaults)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overrides the config file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a pairs backtest
    Backtest(BacktestArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Result payload as JSON
    Json,
    /// Full report as JSON
    Report,
    /// Text summary
    Text,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// The two tickers, leg 1 first (comma-separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub tickers: Vec<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub end: String,

    /// Directory of <TICKER>.csv files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Rolling window length
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Entry z-score threshold
    #[arg(long)]
    pub entry: Option<f64>,

    /// Exit z-score threshold
    #[arg(long)]
    pub exit: Option<f64>,

    /// Initial capital
    #[arg(long)]
    pub capital: Option<f64>,

    /// Commission rate per fill
    #[arg(long)]
    pub commission: Option<f64>,

    /// Sharpe resampling period (daily, weekly, monthly, annual)
    #[arg(long)]
    pub sharpe_period: Option<SharpePeriod>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Save the printed output to file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the daily equity curve as CSV
    #[arg(long)]
    pub equity_csv: Option<PathBuf>,
}
