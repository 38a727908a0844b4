// In crates/engine/src/sink.rs

use crate::error::{Result, SinkError};
use core_types::RunResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders a result record as JSON with 4-space indentation and no trailing newline.
pub fn render(result: &RunResult) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    result.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes the result record to its output file and echoes it to a stream.
#[derive(Debug, Clone)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the output file with the rendered record.
    pub fn write(&self, result: &RunResult) -> Result<()> {
        let rendered = render(result)?;
        fs::write(&self.path, rendered).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Echoes the same rendering to `out`, followed by a line break.
    pub fn echo<W: Write>(&self, result: &RunResult, mut out: W) -> Result<()> {
        let rendered = render(result)?;
        let mut emit = || -> std::io::Result<()> {
            out.write_all(&rendered)?;
            out.write_all(b"\n")?;
            out.flush()
        };
        emit().map_err(SinkError::Echo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{RunFailure, RunSummary};

    #[test]
    fn test_render_success_uses_four_space_indent() {
        let result = RunResult::Success(RunSummary::new("v1".into(), 5, 0.4, 3, 42));
        let rendered = String::from_utf8(render(&result).unwrap()).unwrap();
        let expected = "{\n    \"version\": \"v1\",\n    \"rows_processed\": 5,\n    \"metric\": \"signal_rate\",\n    \"value\": 0.4,\n    \"latency_ms\": 3,\n    \"seed\": 42,\n    \"status\": \"success\"\n}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_failure() {
        let result = RunResult::Failure(RunFailure::new(Some("v2".into()), "bad input"));
        let rendered = String::from_utf8(render(&result).unwrap()).unwrap();
        let expected = "{\n    \"version\": \"v2\",\n    \"status\": \"error\",\n    \"error_message\": \"bad input\"\n}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_write_and_echo_match() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(dir.path().join("metrics.json"));
        let result = RunResult::Success(RunSummary::new("v1".into(), 1, 1.0, 0, -7));

        sink.write(&result).unwrap();
        let mut echoed = Vec::new();
        sink.echo(&result, &mut echoed).unwrap();

        let written = fs::read(sink.path()).unwrap();
        assert_eq!([written.as_slice(), b"\n"].concat(), echoed);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(dir.path().join("nope").join("metrics.json"));
        let result = RunResult::Failure(RunFailure::new(None, "x"));
        assert!(matches!(sink.write(&result), Err(SinkError::Write { .. })));
    }
}
