// In app/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use engine::{ResultSink, SignalJob};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

use self::tracing_layer::FileLogLayer;
mod tracing_layer;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Computes the trailing-mean signal rate of a price series.")]
struct Cli {
    /// Input CSV file with a `close` column.
    #[arg(long)]
    input: PathBuf,

    /// Run configuration file (`seed`, `window`, `version`).
    #[arg(long)]
    config: PathBuf,

    /// Output JSON metrics file.
    #[arg(long)]
    output: PathBuf,

    /// Log file path. Lines are appended.
    #[arg(long)]
    log_file: PathBuf,
}

// --- Main Application Entry Point ---

fn main() -> Result<ExitCode> {
    // Latency is reported from process start.
    let started = Instant::now();

    // Parse command-line arguments. Usage errors exit here, before any result is written.
    let cli = Cli::parse();

    init_tracing(&cli.log_file)?;
    tracing::info!("Job started");

    let job = SignalJob::new(&cli.config, &cli.input, started);
    let sink = ResultSink::new(&cli.output);

    // Sink failures have no fallback and end the process with an error.
    let result = job.run_and_publish(&sink, io::stdout().lock())?;

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Installs the file log and a stderr layer for warnings and errors.
///
/// Stdout is reserved for the result record.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file_layer = FileLogLayer::open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?
        .with_filter(LevelFilter::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(Targets::new().with_default(tracing::Level::WARN));

    tracing_subscriber::registry().with(file_layer).with(fmt_layer).init();
    Ok(())
}
