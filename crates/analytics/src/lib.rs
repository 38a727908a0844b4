// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::{AnalyticsEngine, SIGNAL_RATE_DECIMALS, round_half_even};
pub use types::SignalMetrics;
