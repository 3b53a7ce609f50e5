//! Tracer settings

use serde::{Deserialize, Serialize};

/// Settings shared by every callable a [`CallTracer`](super::CallTracer) wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Log panics of the wrapped function as failures before resuming them
    pub capture_panics: bool,
    /// Show `Type::method` rather than the bare method name
    pub qualified_names: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            capture_panics: true,
            qualified_names: true,
        }
    }
}
