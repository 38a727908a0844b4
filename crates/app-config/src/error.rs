// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Missing required config key: '{0}'")]
    MissingKey(&'static str),

    #[error("Invalid value for config key '{key}': {reason}")]
    InvalidKey { key: &'static str, reason: String },

    #[error("Invalid window size {0}: window must be at least 1")]
    InvalidWindow(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
