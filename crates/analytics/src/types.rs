// In crates/analytics/src/types.rs

/// Summary statistics of a signal series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalMetrics {
    /// Every row of the series, including warm-up rows.
    pub rows_processed: usize,
    pub long_signals: usize,
    /// The fraction of rows that signalled, rounded to `SIGNAL_RATE_DECIMALS`.
    pub signal_rate: f64,
}

impl SignalMetrics {
    /// Creates an empty report with zero values.
    pub fn new() -> Self {
        Self::default()
    }
}
