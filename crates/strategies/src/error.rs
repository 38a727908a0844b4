// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid rolling window {0}: window must be at least 1")]
    InvalidWindow(usize),

    #[error("Trailing mean series has {means} values but the dataset has {rows} rows")]
    LengthMismatch { rows: usize, means: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
