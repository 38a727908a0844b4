// In crates/engine/src/error.rs

use crate::job::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// The failure of a single pipeline stage. Messages pass through unchanged so
/// the result record carries the underlying error text.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Config(#[from] app_config::Error),

    #[error(transparent)]
    Dataset(#[from] dataset::Error),

    #[error(transparent)]
    Strategy(#[from] strategies::Error),
}

/// A pipeline failure, tagged with the last stage that completed.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct JobError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to serialize run result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write run result to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to echo run result: {0}")]
    Echo(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;
