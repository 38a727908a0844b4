// In crates/engine/src/lib.rs

pub mod error;
pub mod job;
pub mod sink;

pub use error::{JobError, SinkError, StageError};
pub use job::{SignalJob, Stage};
pub use sink::ResultSink;
