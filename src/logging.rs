//! Subscriber bootstrap for binaries and demos
//!
//! The tracer only emits; it never installs anything. Programs that want to
//! see the records call [`init_logging`] once at startup. It installs a
//! `tracing-subscriber` fmt subscriber and, through its `log` bridge, also
//! picks up records from the conventional backend.

use crate::error::{FunclogError, Result};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "debug";

/// Build the filter: `RUST_LOG` when set and valid, `fallback` otherwise
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a global fmt subscriber
///
/// # Errors
///
/// Returns [`FunclogError::LoggingInit`] if a global subscriber or `log`
/// logger is already installed.
pub fn init_logging(fallback: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(true)
        .try_init()
        .map_err(|e| FunclogError::LoggingInit(e.to_string()))
}
