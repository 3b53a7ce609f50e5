//! Null logger following the Null Object Pattern
//!
//! A tracer bound to [`NullLogger`] still wraps and invokes everything but
//! emits nothing, which silences tracing without touching call sites.

use super::backend::{CallEvent, CallLogger};

/// A backend that silently discards all records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl CallLogger for NullLogger {
    fn emit_debug(&self, _event: &CallEvent<'_>) {}

    fn emit_error(&self, _event: &CallEvent<'_>) {}
}
