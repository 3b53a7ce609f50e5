//! Owned copies of call events, as kept by the in-memory logger

use super::backend::{CallEvent, Level};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A stored record of one [`CallEvent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// When the record was emitted (Unix timestamp, seconds)
    pub timestamp: f64,
    /// Name of the logger that received it
    pub logger: String,
    pub level: Level,
    /// The conventional single-line rendering
    pub message: String,
    /// The `file:line:name(args)` prefix
    pub trace_line: String,
    /// Rendered return value, for `returned` records
    pub result: Option<String>,
    /// Error text, for `threw exception` records
    pub error: Option<String>,
}

impl CallRecord {
    pub fn from_event(logger: &str, event: &CallEvent<'_>) -> Self {
        Self {
            timestamp: current_timestamp(),
            logger: logger.to_string(),
            level: event.level(),
            message: event.message(),
            trace_line: event.trace_line().to_string(),
            result: event.result().map(str::to_string),
            error: event.error().map(str::to_string),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// `[HH:MM:SS.mmm] LEVEL logger message`, in local time
    pub fn printable_summary(&self) -> String {
        let secs = self.timestamp.trunc() as i64;
        let nanos = (self.timestamp.fract() * 1_000_000_000.0) as u32;
        let time_str = DateTime::from_timestamp(secs, nanos)
            .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| "--:--:--.---".to_string());

        format!("[{}] {} {} {}", time_str, self.level, self.logger, self.message)
    }
}

fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
