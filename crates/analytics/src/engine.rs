use crate::types::SignalMetrics;
use core_types::SignalRow;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places the signal rate is reported with.
pub const SIGNAL_RATE_DECIMALS: u32 = 4;

/// The engine responsible for turning a signal series into summary metrics.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the signal rate over every row of the series.
    ///
    /// Rows whose trailing mean was undefined count as flat. An empty series
    /// yields a zero report.
    pub fn calculate(&self, rows: &[SignalRow]) -> SignalMetrics {
        let mut metrics = SignalMetrics::new();
        if rows.is_empty() {
            return metrics;
        }

        metrics.rows_processed = rows.len();
        metrics.long_signals = rows.iter().map(|row| usize::from(row.signal.value())).sum();

        let raw_rate = metrics.long_signals as f64 / metrics.rows_processed as f64;
        metrics.signal_rate = round_half_even(raw_rate, SIGNAL_RATE_DECIMALS);

        metrics
    }
}

/// Converts `value` to a `Decimal` rounded to `dp` places, ties to even.
///
/// The conversion keeps the exact binary value of the float, so only values
/// that are true midpoints (such as `0.03125`) are treated as ties.
pub fn to_decimal_places(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|decimal| decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
}

/// Rounds `value` to `dp` decimal places using round-half-to-even.
///
/// Non-finite inputs are returned unchanged.
pub fn round_half_even(value: f64, dp: u32) -> f64 {
    to_decimal_places(value, dp)
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}
