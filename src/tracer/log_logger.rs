//! Conventional backend on top of the `log` facade
//!
//! Records are plain formatted messages. The logger name becomes the `log`
//! target, so per-name filtering is whatever the installed `log`
//! implementation does with targets.

use super::backend::{CallEvent, CallLogger};

/// Target of the process-default logger
pub const ROOT_LOGGER: &str = "funclog";

/// Formatted-message logger routed through `log::debug!` / `log::error!`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLogger {
    target: String,
}

impl LogLogger {
    /// A logger emitting under the given target
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            target: name.into(),
        }
    }

    /// The process-default logger
    pub fn root() -> Self {
        Self::new(ROOT_LOGGER)
    }

    pub fn name(&self) -> &str {
        &self.target
    }
}

impl Default for LogLogger {
    fn default() -> Self {
        Self::root()
    }
}

impl CallLogger for LogLogger {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        let target = self.target.as_str();
        match event {
            CallEvent::Calling { trace } => log::debug!(target: target, "calling {}", trace),
            CallEvent::Returned { trace, result } => {
                log::debug!(target: target, "{} returned: {}", trace, result)
            }
            CallEvent::Threw { trace, error } => {
                log::debug!(target: target, "{} threw exception:\n{}", trace, error)
            }
        }
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        let target = self.target.as_str();
        match event {
            CallEvent::Threw { trace, error } => {
                log::error!(target: target, "{} threw exception:\n{}", trace, error)
            }
            other => log::error!(target: target, "{}", other.message()),
        }
    }
}
