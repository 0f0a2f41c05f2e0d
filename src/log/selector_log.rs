use std::path::Path;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::click::report::extract_marked;
use crate::log::writer::LineWriter;

const SESSION_RULE: (char, usize) = ('=', 60);
const PAGE_RULE: (char, usize) = ('-', 40);

/// Append-only transcript of a selector discovery session.
///
/// Write failures are reported as warnings and otherwise ignored; losing a
/// transcript line must never stop the session.
pub struct SelectorLog {
    writer: LineWriter,
}

impl SelectorLog {
    /// Open (creating the directory and file as needed) for appending.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            writer: LineWriter::open(path),
        }
    }

    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            writer: LineWriter::disabled(),
        }
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_enabled()
    }

    pub fn log(&self, message: &str, timestamped: bool) {
        let entry = if timestamped {
            stamp(message, Local::now())
        } else {
            message.to_string()
        };
        self.write_line(&entry);
    }

    pub fn write_separator(&self, ch: char, len: usize) {
        self.log(&ch.to_string().repeat(len), false);
    }

    pub fn session_start(&self, url: &str) {
        self.log("", false);
        self.write_separator(SESSION_RULE.0, SESSION_RULE.1);
        self.log("セッション開始", true);
        self.log(&format!("初期URL: {}", url), true);
        self.write_separator(SESSION_RULE.0, SESSION_RULE.1);
    }

    pub fn page_transition(&self, url: &str) {
        self.log("", false);
        self.write_separator(PAGE_RULE.0, PAGE_RULE.1);
        self.log(&format!("ページ移動: {}", url), true);
        self.write_separator(PAGE_RULE.0, PAGE_RULE.1);
    }

    /// Append a report line (without the log marker), timestamped.
    pub fn record_click(&self, line: &str) {
        self.log(line, true);
    }

    /// Record a console message if it carries the report marker. Returns the
    /// recorded payload.
    pub fn record_console(&self, message: &str) -> Option<String> {
        let payload = extract_marked(message)?;
        self.log(&payload, true);
        Some(payload)
    }

    fn write_line(&self, entry: &str) {
        if self.writer.write_line(entry) {
            debug!(entry, "selector log");
        }
    }
}

/// `[YYYY-MM-DD HH:MM:SS] message`
pub fn stamp(message: &str, at: DateTime<Local>) -> String {
    format!("[{}] {}", at.format("%Y-%m-%d %H:%M:%S"), message)
}
