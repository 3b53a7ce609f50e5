//! The logging seam of the tracer
//!
//! A traced call produces [`CallEvent`]s and hands them to a [`CallLogger`].
//! Each backend decides how an event is shaped: a formatted message for the
//! `log` facade, a message plus named fields for `tracing`, a stored record
//! for the in-memory logger.

use super::call_site::TraceLine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Severity of a call record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => f.write_str("DEBUG"),
            Level::Error => f.write_str("ERROR"),
        }
    }
}

/// One record of a traced call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallEvent<'a> {
    /// Emitted before the wrapped function runs
    Calling { trace: &'a TraceLine },
    /// The wrapped function returned normally
    Returned { trace: &'a TraceLine, result: &'a str },
    /// The wrapped function returned `Err` or panicked
    Threw { trace: &'a TraceLine, error: &'a str },
}

impl<'a> CallEvent<'a> {
    pub fn level(&self) -> Level {
        match self {
            CallEvent::Calling { .. } | CallEvent::Returned { .. } => Level::Debug,
            CallEvent::Threw { .. } => Level::Error,
        }
    }

    pub fn trace_line(&self) -> &'a TraceLine {
        match *self {
            CallEvent::Calling { trace }
            | CallEvent::Returned { trace, .. }
            | CallEvent::Threw { trace, .. } => trace,
        }
    }

    pub fn result(&self) -> Option<&'a str> {
        match *self {
            CallEvent::Returned { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&'a str> {
        match *self {
            CallEvent::Threw { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Fixed message used by structured backends; details go in fields
    pub fn label(&self) -> &'static str {
        match self {
            CallEvent::Calling { .. } => "calling",
            CallEvent::Returned { .. } => "returned",
            CallEvent::Threw { .. } => "threw exception",
        }
    }

    /// The event as a single formatted line
    pub fn message(&self) -> String {
        match self {
            CallEvent::Calling { trace } => format!("calling {}", trace),
            CallEvent::Returned { trace, result } => format!("{} returned: {}", trace, result),
            CallEvent::Threw { trace, error } => format!("{} threw exception:\n{}", trace, error),
        }
    }
}

/// A logging backend for traced calls
///
/// Backends are bound once when a callable is wrapped and shared by every
/// call afterwards, so they must be thread-safe. Whatever a backend does on
/// failure (including panicking) propagates to the caller of the traced
/// function.
pub trait CallLogger: Send + Sync {
    fn emit_debug(&self, event: &CallEvent<'_>);

    fn emit_error(&self, event: &CallEvent<'_>);

    /// Route the event by its level
    fn emit(&self, event: &CallEvent<'_>) {
        match event.level() {
            Level::Debug => self.emit_debug(event),
            Level::Error => self.emit_error(event),
        }
    }
}

impl<L: CallLogger + ?Sized> CallLogger for &L {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        (**self).emit_debug(event)
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        (**self).emit_error(event)
    }
}

impl<L: CallLogger + ?Sized> CallLogger for Box<L> {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        (**self).emit_debug(event)
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        (**self).emit_error(event)
    }
}

impl<L: CallLogger + ?Sized> CallLogger for Arc<L> {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        (**self).emit_debug(event)
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        (**self).emit_error(event)
    }
}
