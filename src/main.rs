use anyhow::{bail, Context, Result};
use clap::Parser;
use flakeguard::cli::{Cli, OutputFormat};
use flakeguard::config::DetectionConfig;
use flakeguard::csv_output::CsvReport;
use flakeguard::detect::sort_by_probability;
use flakeguard::filter::TestFilter;
use flakeguard::json_output::JsonReport;
use flakeguard::outcome::Run;
use flakeguard::{aggregate, detect, junit, text_output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the text report lists flaky tests
const FLAKY_EXIT_CODE: u8 = 2;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Merge config file and CLI flags (CLI wins)
fn load_config(args: &Cli) -> Result<DetectionConfig> {
    let mut config = match &args.config {
        Some(path) => DetectionConfig::from_file(path)?,
        None => DetectionConfig::default(),
    };

    if let Some(results) = &args.results {
        config.results = results.clone();
    }
    if let Some(cost) = args.cost_per_minute {
        config.cost_per_minute = cost;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

/// Expand the results glob into a sorted list of files
fn discover_reports(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("Invalid glob pattern {:?}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(error = %err, "unreadable glob entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("no files matching {:?}", pattern);
    }
    Ok(files)
}

/// Parse every report, skipping (with a warning) the ones that fail
fn load_runs(files: &[PathBuf], filter: &TestFilter) -> Vec<Run> {
    let mut runs = Vec::with_capacity(files.len());

    for path in files {
        match junit::parse_file(path) {
            Ok(outcomes) => {
                debug!(path = %path.display(), tests = outcomes.len(), "parsed report");
                runs.push(filter.filter_run(outcomes));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping report");
                eprintln!("warn: skip {}: {}", path.display(), err);
            }
        }
    }

    runs
}

fn run(args: Cli) -> Result<ExitCode> {
    let config = load_config(&args)?;

    let filter = match &args.filter {
        Some(expr) => TestFilter::from_expr(expr)?,
        None => TestFilter::all(),
    };

    let files = discover_reports(&config.results)?;
    let runs = load_runs(&files, &filter);
    if runs.len() < config.min_runs {
        bail!(
            "need >= {} result files for statistical detection, got {}",
            config.min_runs,
            runs.len()
        );
    }

    let records = aggregate(&runs);
    let mut flaky = detect(&records, config.cost_per_minute, config.threshold);
    sort_by_probability(&mut flaky);

    match args.output_format() {
        OutputFormat::Json => {
            let report = JsonReport::new(flaky, runs.len(), records.len());
            println!("{}", report.to_json()?);
            Ok(ExitCode::SUCCESS)
        }
        OutputFormat::Csv => {
            print!("{}", CsvReport::new(flaky).to_csv());
            Ok(ExitCode::SUCCESS)
        }
        OutputFormat::Text => {
            print!("{}", text_output::render(&flaky, runs.len(), records.len()));
            if flaky.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(FLAKY_EXIT_CODE))
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    run(args)
}
