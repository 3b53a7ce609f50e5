//! Structured backend on top of `tracing`
//!
//! Every record carries a fixed message (`calling`, `returned`,
//! `threw exception`) and the details as fields. `tracing` targets must be
//! static, so the logger name travels in the `logger` field instead.

use super::backend::{CallEvent, CallLogger};
use super::log_logger::ROOT_LOGGER;

/// Field holding the logger name
pub const FIELD_LOGGER: &str = "logger";
/// Field holding the trace line
pub const FIELD_CALL: &str = "call";
/// Field holding the rendered return value
pub const FIELD_RESULT: &str = "result";
/// Field holding the error text
pub const FIELD_ERROR: &str = "error";

/// Message-plus-fields logger routed through `tracing` events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(ROOT_LOGGER)
    }
}

impl CallLogger for TracingLogger {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        let logger = self.name.as_str();
        match event {
            CallEvent::Calling { trace } => {
                tracing::debug!(logger, call = %trace, "calling");
            }
            CallEvent::Returned { trace, result } => {
                tracing::debug!(logger, call = %trace, result = %result, "returned");
            }
            CallEvent::Threw { trace, error } => {
                tracing::debug!(logger, call = %trace, error = %error, "threw exception");
            }
        }
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        let logger = self.name.as_str();
        match event {
            CallEvent::Calling { trace } => {
                tracing::error!(logger, call = %trace, "calling");
            }
            CallEvent::Returned { trace, result } => {
                tracing::error!(logger, call = %trace, result = %result, "returned");
            }
            CallEvent::Threw { trace, error } => {
                tracing::error!(logger, call = %trace, error = %error, "threw exception");
            }
        }
    }
}
