//! CLI entry point for the weekly hits report.
//!
//! A bare invocation reads the media sheet from Google Sheets, builds the report for the
//! current Thursday-to-Wednesday week and writes it as a `.docx` next to the working
//! directory.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use weekly_hits::config::{OutletDisplay, ReportConfig};
use weekly_hits::docx::DocumentSink;
use weekly_hits::infra::csv_export::CsvExportSource;
use weekly_hits::infra::google::GoogleSheetsSource;
use weekly_hits::pipeline::build_report;
use weekly_hits::pipeline::types::RawRow;
use weekly_hits::render::{RenderOptions, render};
use weekly_hits::services::TabularSource;

#[derive(Parser)]
#[command(name = "weekly_hits")]
#[command(about = "Builds the weekly media hits report from the mentions spreadsheet", long_about = None)]
struct Cli {
    /// Report as if today were this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Read `<source> - <view>.csv` from this directory instead of Google Sheets
    #[arg(long, value_name = "DIR")]
    csv_dir: Option<PathBuf>,

    /// Output document path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text shown before each headline link
    #[arg(long, value_enum)]
    outlet_display: Option<OutletDisplay>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/weekly_hits.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("weekly_hits.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::INFO.into()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = ReportConfig::from_env();
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(display) = cli.outlet_display {
        config.outlet_display = display;
    }
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match run(&config, today, cli.csv_dir.as_deref()).await {
        Ok(path) => {
            println!("Generated: {}", path.display());
        }
        Err(e) => {
            error!("Report run failed: {e:#}");
            // exit skips destructors; flush the file appender first
            drop(file_guard);
            std::process::exit(1);
        }
    }
}

/// Fetches, builds, renders and saves one report. Returns the written path.
#[tracing::instrument(skip(config), fields(source = %config.source, view = %config.view, today = %today))]
async fn run(config: &ReportConfig, today: NaiveDate, csv_dir: Option<&Path>) -> Result<PathBuf> {
    let rows = fetch_rows(config, csv_dir)
        .await
        .with_context(|| format!("Could not read '{}' / '{}'", config.source, config.view))?;

    let report = build_report(&rows, today, config);

    let options = RenderOptions {
        outlet_display: config.outlet_display,
        font: config.font.clone(),
        ..RenderOptions::default()
    };
    let doc = render(&report, &options)?;
    doc.save(&config.output)
        .with_context(|| format!("Could not write {}", config.output.display()))?;

    info!(
        output = %config.output.display(),
        hits = report.summary.total_hits,
        "Report written"
    );
    Ok(config.output.clone())
}

async fn fetch_rows(config: &ReportConfig, csv_dir: Option<&Path>) -> Result<Vec<RawRow>> {
    match csv_dir {
        Some(dir) => {
            CsvExportSource::new(dir)
                .get_all_rows(&config.source, &config.view)
                .await
        }
        None => {
            GoogleSheetsSource::connect(&config.credentials_path)
                .await?
                .get_all_rows(&config.source, &config.view)
                .await
        }
    }
}
