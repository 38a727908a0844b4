// In crates/app-config/src/lib.rs

use config::{Config, ConfigError, File, FileFormat, Value, ValueKind};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::RunConfig;

/// Loads the run configuration from a structured-text file.
///
/// The format follows the file extension (`.toml`, `.json`, `.yaml`/`.yml`).
/// Anything else is read as YAML. All three keys (`seed`, `window`, `version`)
/// are mandatory; there are no defaults.
pub fn load_run_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();

    let source = Config::builder()
        .add_source(File::new(&path.to_string_lossy(), format_for(path)))
        .build()?;

    let seed = required_integer(&source, "seed")?;
    let window = required_integer(&source, "window")?;
    let version = required_scalar(&source, "version")?;

    let window = usize::try_from(window)
        .ok()
        .filter(|window| *window >= 1)
        .ok_or(Error::InvalidWindow(window))?;

    Ok(RunConfig { seed, window, version })
}

/// Picks the file format from the extension, defaulting to YAML.
fn format_for(path: &Path) -> FileFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}

/// Reads a mandatory key as its raw value, separating "absent" from "unreadable".
fn required(source: &Config, key: &'static str) -> Result<ValueKind> {
    source
        .get::<Value>(key)
        .map(|value| value.kind)
        .map_err(|err| match err {
            ConfigError::NotFound(_) => Error::MissingKey(key),
            other => Error::InvalidKey { key, reason: other.to_string() },
        })
}

/// Reads a mandatory integer. Floats, booleans and quoted numbers are rejected
/// rather than coerced.
fn required_integer(source: &Config, key: &'static str) -> Result<i64> {
    let out_of_range = || Error::InvalidKey {
        key,
        reason: "integer out of range".to_string(),
    };

    match required(source, key)? {
        ValueKind::I64(value) => Ok(value),
        ValueKind::U64(value) => i64::try_from(value).map_err(|_| out_of_range()),
        ValueKind::I128(value) => i64::try_from(value).map_err(|_| out_of_range()),
        ValueKind::U128(value) => i64::try_from(value).map_err(|_| out_of_range()),
        other => Err(Error::InvalidKey {
            key,
            reason: format!("expected an integer, found {}", kind_name(&other)),
        }),
    }
}

/// Reads a mandatory string. Numeric scalars are accepted in their string form.
fn required_scalar(source: &Config, key: &'static str) -> Result<String> {
    match required(source, key)? {
        ValueKind::String(value) => Ok(value),
        ValueKind::I64(value) => Ok(value.to_string()),
        ValueKind::U64(value) => Ok(value.to_string()),
        ValueKind::I128(value) => Ok(value.to_string()),
        ValueKind::U128(value) => Ok(value.to_string()),
        ValueKind::Float(value) => Ok(value.to_string()),
        other => Err(Error::InvalidKey {
            key,
            reason: format!("expected a string, found {}", kind_name(&other)),
        }),
    }
}

fn kind_name(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Nil => "null",
        ValueKind::Boolean(_) => "a boolean",
        ValueKind::I64(_) | ValueKind::I128(_) | ValueKind::U64(_) | ValueKind::U128(_) => "an integer",
        ValueKind::Float(_) => "a float",
        ValueKind::String(_) => "a string",
        ValueKind::Table(_) => "a table",
        ValueKind::Array(_) => "an array",
    }
}
