// In crates/engine/src/job.rs

use crate::error::{JobError, SinkError, StageError};
use crate::sink::ResultSink;
use analytics::AnalyticsEngine;
use app_config::RunConfig;
use core_types::{RunFailure, RunResult, RunSummary};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The states a run moves through. Any failure jumps to `ErrorAssembled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ConfigLoaded,
    DataLoaded,
    Aggregated,
    Signaled,
    MetricsAssembled,
    ErrorAssembled,
    Written,
}

/// Mutable run state threaded through the stages.
#[derive(Debug)]
struct Pipeline {
    stage: Stage,
    /// Set once the configuration loads; read back when assembling a failure.
    config: Option<RunConfig>,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            stage: Stage::Start,
            config: None,
        }
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "Pipeline stage complete");
        self.stage = next;
    }

    fn fail(&self, source: impl Into<StageError>) -> JobError {
        JobError {
            stage: self.stage,
            source: source.into(),
        }
    }
}

/// The signal-rate batch job: configuration, ingestion, rolling mean,
/// signals, and metrics, in that order.
#[derive(Debug, Clone)]
pub struct SignalJob {
    config_path: PathBuf,
    input_path: PathBuf,
    /// Latency is measured from this instant.
    started: Instant,
}

impl SignalJob {
    pub fn new(config_path: impl AsRef<Path>, input_path: impl AsRef<Path>, started: Instant) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            input_path: input_path.as_ref().to_path_buf(),
            started,
        }
    }

    /// Runs every stage and assembles exactly one result record.
    ///
    /// The first failing stage aborts the rest; its error message becomes the
    /// record's `error_message`.
    pub fn run(&self) -> RunResult {
        let mut pipeline = Pipeline::new();

        match self.execute(&mut pipeline) {
            Ok(summary) => RunResult::Success(summary),
            Err(err) => {
                tracing::error!("Job failed: {}", err);
                tracing::debug!(stage = ?err.stage, "Pipeline aborted");
                pipeline.advance(Stage::ErrorAssembled);

                let version = pipeline.config.map(|config| config.version);
                RunResult::Failure(RunFailure::new(version, err.to_string()))
            }
        }
    }

    /// Runs the job, writes the record to `sink` and echoes it to `out`.
    ///
    /// Only sink failures are returned as errors; pipeline failures are part of
    /// the returned record.
    pub fn run_and_publish<W: Write>(&self, sink: &ResultSink, out: W) -> Result<RunResult, SinkError> {
        let result = self.run();

        sink.write(&result)?;
        if let RunResult::Success(summary) = &result {
            tracing::info!("Job completed successfully in {}ms", summary.latency_ms);
        }
        sink.echo(&result, out)?;

        tracing::debug!(
            stage = ?Stage::Written,
            version = result.version(),
            path = %sink.path().display(),
            "Run result published"
        );
        Ok(result)
    }

    fn execute(&self, pipeline: &mut Pipeline) -> Result<RunSummary, JobError> {
        // --- 1. Configuration ---
        let config = app_config::load_run_config(&self.config_path).map_err(|e| pipeline.fail(e))?;
        tracing::info!(
            "Config loaded: seed={}, window={}, version={}",
            config.seed,
            config.window,
            config.version
        );
        pipeline.config = Some(config.clone());
        pipeline.advance(Stage::ConfigLoaded);

        // --- 2. Ingestion & validation ---
        let rows = dataset::load_rows(&self.input_path).map_err(|e| pipeline.fail(e))?;
        tracing::info!("Data loaded: {} rows", rows.len());
        let missing = rows.iter().filter(|row| row.is_missing()).count();
        if missing > 0 {
            tracing::debug!(missing, "Rows without a close value never signal");
        }
        pipeline.advance(Stage::DataLoaded);

        // --- 3. Trailing mean ---
        let closes: Vec<f64> = rows.iter().map(|row| row.close).collect();
        let means = strategies::trailing_means(&closes, config.window).map_err(|e| pipeline.fail(e))?;
        tracing::info!("Rolling mean calculated with window={}", config.window);
        pipeline.advance(Stage::Aggregated);

        // --- 4. Signals ---
        let signals = strategies::generate_signals(&rows, &means).map_err(|e| pipeline.fail(e))?;
        tracing::info!("Signals generated");
        pipeline.advance(Stage::Signaled);

        // --- 5. Metrics ---
        let metrics = AnalyticsEngine::new().calculate(&signals);
        let latency_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let summary = RunSummary::new(
            config.version,
            metrics.rows_processed,
            metrics.signal_rate,
            latency_ms,
            config.seed,
        );
        tracing::info!(
            "Metrics: signal_rate={:.4}, rows_processed={}",
            summary.value,
            summary.rows_processed
        );
        pipeline.advance(Stage::MetricsAssembled);

        Ok(summary)
    }
}
