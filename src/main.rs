//! # visitor-forecast
//!
//! Command-line front end: prints the tables a dashboard renders.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use visitor_forecast::aggregate::{aggregate_visitors, Granularity};
use visitor_forecast::core::VisitorDataset;
use visitor_forecast::forecast::{ForecastConfig, ForecastOutcome, ForecastRequest, TrendForecaster};
use visitor_forecast::ingest::read_csv_path;
use visitor_forecast::models::SeasonalTrendModel;
use visitor_forecast::pivot::pivot_visitor_types;

#[derive(Parser)]
#[command(name = "visitor-forecast", version)]
#[command(about = "Visitor analytics and trend forecasting", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total visitors per day, week or month
    Aggregate {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Time frame: daily, weekly or monthly
        #[arg(short, long, default_value = "daily")]
        granularity: String,
    },

    /// Visitors per month and visitor type
    Types {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Forecast monthly visitors for one visitor type
    Forecast {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Visitor type to forecast
        #[arg(short = 't', long)]
        visitor_type: String,

        /// Weather condition, or "All"
        #[arg(short, long, default_value = "All")]
        weather: String,

        /// Months to predict past the last observation
        #[arg(long, default_value_t = 12)]
        periods: usize,

        /// Latest date a predicted month may end on (YYYY-MM-DD)
        #[arg(long)]
        horizon_date: Option<NaiveDate>,

        /// Trailing window of the prediction smoothing
        #[arg(long, default_value_t = 3)]
        smoothing_window: usize,

        /// Prior scale of the seasonal components
        #[arg(long)]
        prior_scale: Option<f64>,

        /// Fit a linear trend without seasonal components
        #[arg(long)]
        trend_only: bool,
    },

    /// List the visitor type and weather selector choices
    Options {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct ForecastRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Actual_Visitors")]
    actual: Option<u64>,
    #[serde(rename = "Predicted_Visitors")]
    predicted: Option<f64>,
}

#[derive(Serialize)]
struct OptionRow<'a> {
    #[serde(rename = "Selector")]
    selector: &'static str,
    #[serde(rename = "Value")]
    value: &'a str,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(path: &Path) -> Result<VisitorDataset> {
    read_csv_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn run_aggregate(input: &Path, granularity: &str, out: impl Write) -> Result<()> {
    let granularity: Granularity = granularity.parse()?;
    let dataset = load(input)?;
    let series = aggregate_visitors(&dataset, granularity);

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([granularity.key_column(), "Number of Visitors"])?;
    for bucket in series.buckets() {
        writer.write_record([bucket.key.to_string(), bucket.total.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn run_types(input: &Path, out: impl Write) -> Result<()> {
    let dataset = load(input)?;
    let matrix = pivot_visitor_types(&dataset);

    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["Month".to_string(), "Label".to_string()];
    header.extend(matrix.visitor_types().iter().cloned());
    header.push("Total Visitors".to_string());
    writer.write_record(&header)?;

    for ((month, row), total) in matrix
        .months()
        .iter()
        .zip(matrix.rows())
        .zip(matrix.row_totals())
    {
        let mut record = vec![month.to_string(), month.short_name()];
        record.extend(row.iter().map(u64::to_string));
        record.push(total.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

struct ForecastArgs {
    visitor_type: String,
    weather: String,
    periods: usize,
    horizon_date: Option<NaiveDate>,
    smoothing_window: usize,
    prior_scale: Option<f64>,
    trend_only: bool,
}

fn run_forecast(input: &Path, args: ForecastArgs, out: impl Write) -> Result<()> {
    let dataset = load(input)?;

    let mut config = ForecastConfig::new()
        .with_horizon_periods(args.periods)
        .with_smoothing_window(args.smoothing_window)?;
    if let Some(date) = args.horizon_date {
        config = config.with_horizon_date(date);
    }

    let mut model = if args.trend_only {
        SeasonalTrendModel::trend_only()
    } else {
        SeasonalTrendModel::new()
    };
    if let Some(scale) = args.prior_scale {
        model = model.with_seasonality_prior_scale(scale)?;
    }

    let request = ForecastRequest::new(args.visitor_type, args.weather.as_str());
    let outcome = TrendForecaster::with_oracle(model)
        .with_config(config)
        .forecast(&dataset, &request)?;

    if let Some(message) = outcome.warning() {
        warn!("{message}");
    }

    let mut writer = csv::Writer::from_writer(out);
    match outcome {
        ForecastOutcome::InsufficientData { .. } => {
            writer.write_record(["Date", "Actual_Visitors", "Predicted_Visitors"])?;
        }
        ForecastOutcome::Forecast(result) => {
            if !result.weather_applied && !result.weather.is_all() {
                warn!(
                    weather = %result.weather,
                    "weather filter left too few rows; forecasting all weather"
                );
            }
            if let Some(metrics) = result.in_sample_accuracy() {
                info!(
                    mae = metrics.mae,
                    rmse = metrics.rmse,
                    points = metrics.n,
                    "in-sample accuracy"
                );
            }
            for point in &result.points {
                writer.serialize(ForecastRow {
                    date: point.date,
                    actual: point.actual,
                    predicted: point.predicted,
                })?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn run_options(input: &Path, out: impl Write) -> Result<()> {
    let dataset = load(input)?;
    let visitor_types = dataset.visitor_types();
    let weather = dataset.weather_options();

    let mut writer = csv::Writer::from_writer(out);
    for value in &visitor_types {
        writer.serialize(OptionRow {
            selector: "visitor_type",
            value,
        })?;
    }
    for value in &weather {
        writer.serialize(OptionRow {
            selector: "weather",
            value,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout().lock();
    match cli.command {
        Commands::Aggregate { input, granularity } => run_aggregate(&input, &granularity, stdout),
        Commands::Types { input } => run_types(&input, stdout),
        Commands::Forecast {
            input,
            visitor_type,
            weather,
            periods,
            horizon_date,
            smoothing_window,
            prior_scale,
            trend_only,
        } => run_forecast(
            &input,
            ForecastArgs {
                visitor_type,
                weather,
                periods,
                horizon_date,
                smoothing_window,
                prior_scale,
                trend_only,
            },
            stdout,
        ),
        Commands::Options { input } => run_options(&input, stdout),
    }
}
