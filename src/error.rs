//! Error types and result aliases for the funclog library.
//!
//! The tracer itself never produces errors: failures of a wrapped function
//! are logged and handed back to its caller unchanged. [`FunclogError`] only
//! covers the crate's own fallible helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FunclogError {
    #[error("Logging initialization error: {0}")]
    LoggingInit(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FunclogError>;
