// In crates/core-types/src/types.rs

use serde::Serialize;

/// The name of the only metric this job reports.
pub const SIGNAL_RATE_METRIC: &str = "signal_rate";

/// The version reported when a run fails before its configuration was loaded.
pub const UNKNOWN_VERSION: &str = "unknown";

/// A single record of the ingested price table.
///
/// A missing `close` cell is carried as `f64::NAN` so that the row still counts
/// towards `rows_processed` while never satisfying a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRow {
    pub close: f64,
}

impl InputRow {
    pub fn new(close: f64) -> Self {
        Self { close }
    }

    /// Returns `true` when the `close` cell was empty or a recognised NA token.
    pub fn is_missing(&self) -> bool {
        self.close.is_nan()
    }
}

/// The binary output of the trailing-mean comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Signal {
    /// The close did not exceed its trailing mean, or the mean was undefined.
    #[default]
    Flat,
    /// The close was strictly above its trailing mean.
    Long,
}

impl Signal {
    /// The numeric encoding used when averaging signals (1 or 0).
    pub fn value(self) -> u8 {
        match self {
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }
}

/// An `InputRow` extended with the trailing mean it was compared against and
/// the resulting signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRow {
    pub close: f64,
    /// `None` while fewer than `window` valid observations are available.
    pub trailing_mean: Option<f64>,
    pub signal: Signal,
}

// --- Run Result ---

/// The outcome tag written into every result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The success variant of the result record. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub rows_processed: usize,
    pub metric: String,
    pub value: f64,
    pub latency_ms: u64,
    pub seed: i64,
    pub status: Status,
}

impl RunSummary {
    pub fn new(version: String, rows_processed: usize, value: f64, latency_ms: u64, seed: i64) -> Self {
        Self {
            version,
            rows_processed,
            metric: SIGNAL_RATE_METRIC.to_string(),
            value,
            latency_ms,
            seed,
            status: Status::Success,
        }
    }
}

/// The failure variant of the result record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunFailure {
    pub version: String,
    pub status: Status,
    pub error_message: String,
}

impl RunFailure {
    /// Builds a failure record. `version` is `None` when the run configuration
    /// never loaded, in which case the literal `"unknown"` is reported.
    pub fn new(version: Option<String>, error_message: impl Into<String>) -> Self {
        Self {
            version: version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            status: Status::Error,
            error_message: error_message.into(),
        }
    }
}

/// The single record produced by every invocation of the job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RunResult {
    Success(RunSummary),
    Failure(RunFailure),
}

impl RunResult {
    pub fn status(&self) -> Status {
        match self {
            RunResult::Success(summary) => summary.status,
            RunResult::Failure(failure) => failure.status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }

    pub fn version(&self) -> &str {
        match self {
            RunResult::Success(summary) => &summary.version,
            RunResult::Failure(failure) => &failure.version,
        }
    }
}
