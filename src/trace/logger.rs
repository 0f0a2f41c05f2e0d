use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::log::writer::LineWriter;

/// JSONL click trace: one serialized event per line.
pub struct TraceLogger {
    writer: LineWriter,
}

impl TraceLogger {
    pub fn new(path: &Path) -> Self {
        Self {
            writer: LineWriter::open(path),
        }
    }

    pub fn disabled() -> Self {
        Self {
            writer: LineWriter::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_enabled()
    }

    pub fn log<T: Serialize>(&self, event: &T) {
        if !self.writer.is_enabled() {
            return;
        }
        match serde_json::to_string(event) {
            Ok(json) => {
                self.writer.write_line(&json);
            }
            Err(e) => warn!(error = %e, "failed to serialize trace event"),
        }
    }
}
