//! CLI for the rolling-factors pipeline.
//!
//! This binary loads daily close prices from a CSV file, computes rolling beta,
//! momentum, z-score, skewness and kurtosis, and prints the trailing rows of
//! each factor group.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rolling_factors::{CsvPriceSource, FactorPipeline, MetricKind, PipelineConfig, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rolling-factors")]
#[command(about = "Rolling risk and technical factors for equity universes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rolling metrics appended per ticker
    Metrics,
    /// Compute factors from a CSV of daily close prices
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// CSV file with a `date` column and one close-price column per symbol
    #[arg(long)]
    prices: PathBuf,
    /// JSON pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated tickers, replacing the configured universe
    #[arg(long, value_delimiter = ',')]
    tickers: Option<Vec<String>>,
    /// Benchmark symbol for beta
    #[arg(long)]
    benchmark: Option<String>,
    /// Rolling window in trading days
    #[arg(long)]
    window: Option<usize>,
    /// Calendar days of history before the end date
    #[arg(long)]
    lookback_days: Option<u32>,
    /// End of the price range (exclusive), defaults to today
    #[arg(long)]
    end_date: Option<NaiveDate>,
    /// Trailing rows shown per section
    #[arg(long)]
    tail: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Metrics => {
            list_metrics();
            Ok(())
        }
        Commands::Run(args) => run(args),
    };

    if let Err(err) = outcome {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// List every metric with the table it reads from.
fn list_metrics() {
    println!("Rolling metrics ({} total)\n", MetricKind::all().len());
    for metric in MetricKind::all() {
        println!("  {:<7} [{}] {}", metric.to_string(), metric.input(), metric.description());
    }
    println!("\nRolling beta against the benchmark is reported as its own table.");
}

/// Build the configuration from the optional file and flag overrides.
fn load_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(tickers) = &args.tickers {
        config.tickers = tickers.clone();
    }
    if let Some(benchmark) = &args.benchmark {
        config.benchmark = benchmark.clone();
    }
    if let Some(window) = args.window {
        config.window = window;
    }
    if let Some(lookback_days) = args.lookback_days {
        config.lookback_days = lookback_days;
    }
    if let Some(tail) = args.tail {
        config.tail_rows = tail;
    }

    config.validate()?;
    Ok(config)
}

/// Load prices, run the pipeline and print the report.
fn run(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let tail_rows = config.tail_rows;
    let end = args.end_date.unwrap_or_else(|| Local::now().date_naive());

    let pipeline = FactorPipeline::new(config)?;
    let source = CsvPriceSource::new(args.prices);
    let report = pipeline.fetch_and_run(&source, end)?;

    print!("{}", report.render(tail_rows)?);
    Ok(())
}
