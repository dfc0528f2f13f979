//! swingstats - scan the WSDC points registry and export dancer summaries.
//!
//! Fetches one dancer at a time over a range of WSDC ids, derives a flat
//! summary per dancer and writes the collected table once at the end.

mod cli;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swingstats_core::export::{export_csv, export_json};
use swingstats_core::models::Region;
use swingstats_core::scan::{self, ScanOptions};
use swingstats_core::snapshot::SnapshotStore;
use swingstats_core::{ApiClient, Config, DancerSummary};

use cli::{Cli, Command, OutputArgs};

/// File name prefix for rolling log files
const LOG_FILE_NAME: &str = "swingstats.log";

/// Initialize the tracing subscriber for logging.
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

/// Load config from the given file or the default location, then apply
/// command line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(style) = &cli.style {
        config.dance_style = style.clone();
    }
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    Ok(config)
}

fn build_client(config: &Config) -> Result<ApiClient> {
    ApiClient::with_options(
        config.api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
}

fn scan_options(config: &Config, output: &OutputArgs) -> ScanOptions {
    ScanOptions {
        dance_style: config.dance_style.clone(),
        keep_all_dancers: output.all_dancers,
    }
}

fn write_outputs(config: &Config, output: &OutputArgs, summaries: &[DancerSummary]) -> Result<()> {
    let csv_path = output.output.as_deref().unwrap_or(&config.output);
    let rows = export_csv(summaries, csv_path)?;
    info!(path = %csv_path.display(), rows, "Wrote CSV");

    if let Some(json_path) = &output.json {
        let rows = export_json(summaries, json_path)?;
        info!(path = %json_path.display(), rows, "Wrote JSON");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_dir.as_deref());
    let config = load_config(&cli)?;

    match &cli.command {
        Command::Scan { range, output } => {
            let client = build_client(&config)?;
            let ids = range.resolve(&config);
            info!(start = ids.start, end = ids.end, style = %config.dance_style, "Scanning registry");

            let mut summaries = Vec::new();
            let report = scan::scan(&client, ids, &scan_options(&config, output), &mut summaries).await;
            info!(%report, "Scan finished");

            write_outputs(&config, output, &summaries)?;
        }
        Command::Dump { range, snapshot } => {
            let client = build_client(&config)?;
            let ids = range.resolve(&config);
            info!(start = ids.start, end = ids.end, "Capturing raw payloads");

            let (records, report) = scan::dump(&client, ids).await;
            info!(%report, "Capture finished");

            let store = SnapshotStore::new(snapshot.clone());
            let saved = store.save(records)?;
            info!(path = %store.path().display(), records = saved.records.len(), "Wrote snapshot");
        }
        Command::Replay { snapshot, output } => {
            let store = SnapshotStore::new(snapshot.clone());
            let captured = store
                .load()?
                .with_context(|| format!("No snapshot at {}", snapshot.display()))?;
            info!(records = captured.records.len(), age = %captured.age_display(), "Replaying snapshot");

            let mut summaries = Vec::new();
            let report = scan::replay(captured.records, &scan_options(&config, output), &mut summaries);
            info!(%report, "Replay finished");

            write_outputs(&config, output, &summaries)?;
        }
        Command::Regions { range } => {
            let client = build_client(&config)?;
            let ids = range.resolve_survey(&config);
            info!(start = ids.start, end = ids.end, style = %config.dance_style, "Surveying regions");

            let (totals, report) = scan::tally_regions(&client, ids, &config.dance_style).await;
            info!(%report, "Survey finished");

            for region in Region::ALL {
                println!("{:<12}{}", region.label(), totals.get(region));
            }
            println!("{:<12}{}", "Total", totals.total());
        }
    }

    Ok(())
}
