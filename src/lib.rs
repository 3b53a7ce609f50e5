//! Call logging for arbitrary functions.
//!
//! Wrap a function once and every call through the wrapper logs where it was
//! called from, what it was called with, and what came back (or what went
//! wrong), through the logging backend of your choice. See [`tracer`] for the
//! details.

pub mod error;
pub mod logging;
pub mod tracer;

#[cfg(test)]
mod test_support;

pub use error::{FunclogError, Result};
pub use tracer::{funclog, kw, CallTracer, Kw, Traced};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{FunclogError, Result};
    pub use crate::tracer::{
        funclog, kw, CallLogger, CallTracer, Kw, LogLogger, MemoryLogger, NullLogger, TraceValue,
        Traced, TracingLogger,
    };
}
