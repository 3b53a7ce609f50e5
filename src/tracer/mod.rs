//! Call tracing for arbitrary functions
//!
//! The tracer wraps a function so that every call through the wrapper is
//! logged: a `calling` record with the call site and rendered arguments before
//! the function runs, then a `returned` record with the rendered result or a
//! `threw exception` record with the error.
//!
//! # Architecture
//!
//! - **CallTracer**: binds a logging backend and wraps callables
//! - **Traced**: the wrapped callable; `call` takes the arguments as a tuple
//! - **CallLogger**: the backend seam, with four implementations:
//!   - **LogLogger**: formatted messages through the `log` facade (the default)
//!   - **TracingLogger**: fixed messages plus named fields through `tracing`
//!   - **MemoryLogger**: thread-safe record store with callbacks and summaries
//!   - **NullLogger**: Null Object Pattern, discards everything
//! - **TraceValue / Kw**: how arguments and results are rendered
//!
//! # Usage Example
//!
//! ```rust
//! use funclog::tracer::{kw, CallTracer, Kw, MemoryLogger};
//!
//! fn foo(a: i64, b: i64, c: Kw<Option<i64>>) -> f64 {
//!     match *c {
//!         Some(c) => (a + c) as f64 / b as f64,
//!         None => a as f64 / b as f64,
//!     }
//! }
//!
//! let store = MemoryLogger::named("test");
//! let foo = CallTracer::with_logger(store.clone()).wrap(foo);
//!
//! assert_eq!(foo.call((12, 3, kw("c", Some(6)))), 6.0);
//!
//! let messages = store.messages();
//! assert!(messages[0].starts_with("calling "));
//! assert!(messages[0].ends_with(":foo(12, 3, c=6)"));
//! assert!(messages[1].ends_with(":foo(12, 3, c=6) returned: 6.0"));
//! ```
//!
//! # Trace lines
//!
//! Both records of a call share one trace line, `file:line:name(args)`. The
//! file and line are those of the `call` expression. Positional arguments come
//! first in call order, then keyword arguments sorted by name; text is quoted
//! in single quotes.

pub mod backend;
pub mod call_record;
pub mod call_site;
pub mod call_tracer;
pub mod callable;
pub mod config;
pub mod log_logger;
pub mod memory_logger;
pub mod null_logger;
pub mod render;
pub mod tracing_logger;

// Re-export main types
pub use backend::{CallEvent, CallLogger, Level};
pub use call_record::CallRecord;
pub use call_site::{CallSite, TraceLine};
pub use call_tracer::{funclog, CallTracer, Traced};
pub use callable::Callable;
pub use config::TracerConfig;
pub use log_logger::{LogLogger, ROOT_LOGGER};
pub use memory_logger::{MemoryLogger, RecordCallback};
pub use null_logger::NullLogger;
pub use render::{
    kw, render_arg, render_error, render_value, ArgList, Debugged, Kw, Outcome, Shown, TraceArg,
    TraceArgs, TraceOutput, TraceValue,
};
pub use tracing_logger::{TracingLogger, FIELD_CALL, FIELD_ERROR, FIELD_LOGGER, FIELD_RESULT};
