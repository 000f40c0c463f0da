//! CLI entry point for the station traffic tool.
//!
//! Loads a bike-share station roster and a day of trips once, then reports
//! per-station departures and arrivals for a single time window or for a
//! sweep of windows across the day.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use station_traffic::{
    config::SourceConfig,
    fetch::BasicClient,
    load::load_engine,
    output::{append_stats, print_json, write_markers},
    stats::WindowStats,
    traffic::{TrafficEngine, clock::MINUTES_PER_DAY, window::ANY_TIME},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "station_traffic")]
#[command(about = "Time-of-day traffic for bike-share stations", long_about = None)]
struct Cli {
    /// JSON file with source locations and window half-width
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Station roster (GBFS station_information.json), path or URL
    #[arg(long)]
    stations: Option<String>,

    /// Trip log CSV, path or URL
    #[arg(long)]
    trips: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate traffic for one window
    Snapshot {
        #[command(flatten)]
        sources: SourceArgs,

        /// Minute of day to center the window on, or -1 for the whole day
        #[arg(short, long, default_value_t = ANY_TIME, allow_negative_numbers = true)]
        minute: i32,

        /// CSV file to write marker rows to
        #[arg(short, long)]
        output: Option<String>,

        /// Also log the full snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Aggregate every window across the day and append one summary row each
    Sweep {
        #[command(flatten)]
        sources: SourceArgs,

        /// Minutes between window centers
        #[arg(short, long, default_value_t = 15)]
        step: u16,

        /// CSV file to append summary rows to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/station_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("station_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let base_config = match &cli.config {
        Some(path) => SourceConfig::load(path)?,
        None => SourceConfig::from_env()?,
    };

    match cli.command {
        Commands::Snapshot {
            sources,
            minute,
            output,
            json,
        } => {
            let config = base_config.with_overrides(sources.stations, sources.trips);
            let engine = load_engine(&BasicClient::new(), &config).await?;
            snapshot(&engine, minute, output.as_deref(), json)?;
        }
        Commands::Sweep {
            sources,
            step,
            output,
        } => {
            let config = base_config.with_overrides(sources.stations, sources.trips);
            let engine = load_engine(&BasicClient::new(), &config).await?;
            sweep(&engine, step, &output)?;
        }
    }

    Ok(())
}

/// Aggregates one window, logs its summary and optionally writes markers.
#[tracing::instrument(skip(engine, output, json))]
fn snapshot(engine: &TrafficEngine, minute: i32, output: Option<&str>, json: bool) -> Result<()> {
    let snapshot = engine.snapshot(minute)?;
    let stats = WindowStats::from_snapshot(&snapshot);

    info!(
        window = %stats.window,
        departures = stats.departures,
        arrivals = stats.arrivals,
        active_stations = stats.active_stations,
        active_pct = stats.active_pct(),
        busiest = stats.busiest_station.as_deref().unwrap_or("-"),
        busiest_traffic = stats.busiest_traffic,
        "Window summary"
    );

    if json {
        print_json(&snapshot)?;
    }

    if let Some(path) = output {
        write_markers(path, &snapshot)?;
        info!(path, stations = snapshot.stations.len(), "Markers written");
    }

    Ok(())
}

/// Steps the window center across the day, the way the slider scrubs.
#[tracing::instrument(skip(engine))]
fn sweep(engine: &TrafficEngine, step: u16, output: &str) -> Result<()> {
    anyhow::ensure!(step > 0, "step must be at least one minute");

    let mut windows = 0;
    for minute in (0..MINUTES_PER_DAY).step_by(step as usize) {
        let snapshot = engine.snapshot(minute as i32)?;
        let stats = WindowStats::from_snapshot(&snapshot);
        debug!(
            window = %stats.window,
            departures = stats.departures,
            arrivals = stats.arrivals,
            "Window aggregated"
        );
        append_stats(output, &stats)?;
        windows += 1;
    }

    info!(windows, output, "Sweep complete");
    Ok(())
}
