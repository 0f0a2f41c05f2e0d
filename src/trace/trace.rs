use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::click::report::ClickRecord;

/// One handled click, as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct ClickTraceEvent {
    pub timestamp_ms: u128,
    pub page_url: String,

    pub record: Option<ClickRecord>,
    pub error: Option<String>,
}

impl ClickTraceEvent {
    pub fn now(page_url: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            page_url: page_url.to_string(),
            record: None,
            error: None,
        }
    }

    pub fn with_record(mut self, record: &ClickRecord) -> Self {
        self.record = Some(record.clone());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
