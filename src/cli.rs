//! CLI argument parsing for FlakeGuard

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the flaky-test report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "flakeguard")]
#[command(version)]
#[command(about = "Statistical flaky-test detection across repeated JUnit runs", long_about = None)]
pub struct Cli {
    /// Glob pattern for JUnit XML result files (default: *.xml)
    #[arg(long = "results", value_name = "GLOB")]
    pub results: Option<String>,

    /// CI cost per minute in USD (default: 0.008)
    #[arg(long = "cost", value_name = "USD")]
    pub cost_per_minute: Option<f64>,

    /// Minimum flaky probability to report (default: 0.5)
    #[arg(long = "threshold", value_name = "PROB")]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format json)
    #[arg(long = "json")]
    pub json: bool,

    /// Select tests to analyze (e.g., -e class=auth,core or -e name=/^auth::/)
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Read settings from a TOML file (CLI flags take precedence)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Effective output format after applying --json
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}
