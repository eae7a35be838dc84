use clap::Parser;
use csv::{Reader, Writer};
use revenue_core::{
    DerivedPoint, ErrCode, ForecastConfig, ForecastEngine, ForecastError, ForecastReport,
    Lookback, Month, Observation,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Forecast monthly revenue from `month,amount` CSV files
#[derive(Debug, Parser)]
#[command(name = "revenue_cli", version, about)]
struct Args {
    /// CSV file, or a directory whose *.csv files are processed one by one
    path: PathBuf,

    /// Write <name>_timeline.csv and <name>_forecast.csv into this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Summary window: 1y, 2y, 3y or all
    #[arg(long, default_value = "1y")]
    lookback: Lookback,

    /// JSON object with engine settings (trend_window, horizon_months, fallback_window)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Growth rates averaged into the trend, overrides the config file
    #[arg(long)]
    trend_window: Option<usize>,

    /// Months to forecast, overrides the config file
    #[arg(long)]
    horizon: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    month: String,
    amount: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revenue_cli=info,revenue_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let engine = ForecastEngine::new(load_config(&args)?);

    if !args.path.exists() {
        return Err(ForecastError::new(
            format!("{} does not exist", args.path.display()),
            ErrCode::SrcDataNotFound,
        )
        .into());
    }

    if args.path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("csv"))
            .collect();
        files.sort();
        if files.is_empty() {
            warn!(dir = %args.path.display(), "no csv files found");
        }
        for path in files {
            process_csv_file(&engine, &path, &args)?;
        }
    } else {
        process_csv_file(&engine, &args.path, &args)?;
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<ForecastConfig, Box<dyn Error>> {
    let conf: Option<HashMap<String, serde_json::Value>> = match &args.config {
        Some(path) => Some(serde_json::from_reader(File::open(path)?)?),
        None => None,
    };
    let mut config = ForecastConfig::new(conf)?;
    if let Some(window) = args.trend_window {
        config = config.with_trend_window(window)?;
    }
    if let Some(horizon) = args.horizon {
        config = config.with_horizon(horizon)?;
    }
    info!(?config, "engine config");
    Ok(config)
}

fn process_csv_file(engine: &ForecastEngine, path: &Path, args: &Args) -> Result<(), Box<dyn Error>> {
    info!(file = %path.display(), "processing");
    let observations = read_observations(path)?;
    let report = engine.run_raw(observations)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(path, &report, args.lookback);
    }

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("series");
        let timeline_path = dir.join(format!("{}_timeline.csv", stem));
        write_points(&timeline_path, report.timeline.iter())?;
        let forecast_path = dir.join(format!("{}_forecast.csv", stem));
        write_points(&forecast_path, report.forecast.iter())?;
        info!(
            timeline = %timeline_path.display(),
            forecast = %forecast_path.display(),
            "saved"
        );
    }

    Ok(())
}

fn read_observations(path: &Path) -> Result<Vec<Observation>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);
    let mut observations = Vec::new();

    for result in rdr.deserialize() {
        let record: CsvRecord = result?;
        let period = Month::parse(&record.month)?;
        observations.push(Observation::new(period, record.amount));
    }

    Ok(observations)
}

fn write_points<'a>(
    path: &Path,
    points: impl Iterator<Item = &'a DerivedPoint>,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;
    for point in points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn print_report(path: &Path, report: &ForecastReport, lookback: Lookback) {
    println!("Forecast for {:?}", path);
    let Some(last) = report.last_observed else {
        println!("No observations");
        return;
    };

    let observed = report.classifications().count();
    let above = report.classifications().filter(|(_, s)| s.is_above()).count();
    println!("Observed months: {}", observed);
    println!(
        "First month: {}",
        report.timeline.first_month().map(|m| m.to_month_str()).unwrap_or_default()
    );
    println!("Last month: {} = {:.2}", last.period.to_month_str(), last.amount);
    println!("Current trend: {:+.2}%", report.current_trend * 100.0);
    println!("At or above expectation: {}/{}", above, observed);

    if let Some(summary) = report.summarize(lookback) {
        println!(
            "Total {} ({} .. {}]: {:.2}, previous: {}, change: {}",
            summary.lookback,
            summary.start.to_month_str(),
            summary.end.to_month_str(),
            summary.total,
            fmt_opt(summary.previous_total),
            summary
                .change
                .map_or_else(|| "-".to_string(), |c| format!("{:+.2}%", c * 100.0)),
        );
    }

    println!("month,prior_year,forecast");
    for point in &report.forecast {
        println!(
            "{},{},{}",
            point.period.to_month_str(),
            fmt_opt(point.prior_year_amount),
            fmt_opt(point.expected_amount)
        );
    }
}
