// In crates/strategies/src/lib.rs

pub mod error;
pub mod rolling;
pub mod signal;

pub use error::{Error, Result};
pub use rolling::{RollingMean, trailing_means};
pub use signal::{classify, generate_signals};
