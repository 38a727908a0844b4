// In crates/dataset/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required 'close' column in dataset.")]
    MissingCloseColumn,

    #[error("Invalid numeric value '{value}' in 'close' column at row {row}")]
    InvalidValue { row: usize, value: String },

    #[error("Expected {expected} fields at row {row}, found {found}")]
    TooManyFields { row: usize, expected: usize, found: usize },

    #[error("Dataset contains no rows.")]
    Empty,

    #[error("Failed to open dataset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
