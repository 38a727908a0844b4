// In app/src/tracing_layer.rs

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends every event to the job's log file as
/// `<timestamp> - <LEVEL> - <message>`.
pub struct FileLogLayer {
    file: Mutex<File>,
}

impl FileLogLayer {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl<S> Layer<S> for FileLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        // Create a visitor to extract the message from the event's fields.
        let mut visitor = LogMessageVisitor::new();
        event.record(&mut visitor);
        let line = format_line(&Local::now(), event.metadata().level(), &visitor.render());

        // Write errors and a poisoned lock drop the line.
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

fn format_line(timestamp: &DateTime<Local>, level: &Level, message: &str) -> String {
    format!("{} - {} - {}", timestamp.format(TIMESTAMP_FORMAT), level_name(level), message)
}

// Captures the `message` field, plus any structured fields as `key=value`.
struct LogMessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl LogMessageVisitor {
    fn new() -> Self {
        Self { message: String::new(), fields: Vec::new() }
    }

    fn render(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        format!("{} {}", self.message, self.fields.join(" "))
    }
}

impl tracing::field::Visit for LogMessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}
