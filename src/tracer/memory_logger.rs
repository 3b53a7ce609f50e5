//! In-memory record store backend
//!
//! This module provides a thread-safe logger that keeps every call record it
//! receives, with support for a callback on each record, filtering by level,
//! and printable summaries. Clones share the same store, so a clone can be
//! bound to a tracer while the original is used for inspection.

use super::backend::{CallEvent, CallLogger, Level};
use super::call_record::CallRecord;
use super::log_logger::ROOT_LOGGER;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard};

/// Type alias for record callback functions
pub type RecordCallback = Arc<dyn Fn(&CallRecord) + Send + Sync>;

/// Logger that stores call records for later querying
#[derive(Clone)]
pub struct MemoryLogger {
    name: String,
    records: Arc<Mutex<Vec<CallRecord>>>,
    on_record: Option<RecordCallback>,
}

impl MemoryLogger {
    /// Create a new memory logger
    ///
    /// # Arguments
    ///
    /// * `name` - Logger name stamped on every record
    /// * `on_record` - Optional callback invoked with each record before it is stored
    pub fn new(name: impl Into<String>, on_record: Option<RecordCallback>) -> Self {
        Self {
            name: name.into(),
            records: Arc::new(Mutex::new(Vec::new())),
            on_record,
        }
    }

    /// Create a memory logger without a callback
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CallRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store(&self, record: CallRecord) {
        if let Some(callback) = &self.on_record {
            callback(&record);
        }

        self.lock().push(record);
    }

    /// Snapshot of all records in emission order
    pub fn records(&self) -> Vec<CallRecord> {
        self.lock().clone()
    }

    /// The conventional message of every record, in emission order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Count records, optionally only those at `level`
    pub fn count(&self, level: Option<Level>) -> usize {
        let records = self.lock();
        match level {
            Some(level) => records.iter().filter(|r| r.level == level).count(),
            None => records.len(),
        }
    }

    /// Get summaries of records matching an optional level
    pub fn summaries(&self, level: Option<Level>) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| level.map_or(true, |l| r.level == l))
            .map(CallRecord::printable_summary)
            .collect()
    }

    /// Get the last N record summaries
    ///
    /// # Arguments
    ///
    /// * `n` - Number of records to return
    /// * `level` - Only consider records at this level
    pub fn last_n_summaries(&self, n: usize, level: Option<Level>) -> Vec<String> {
        let summaries = self.summaries(level);
        let start_idx = summaries.len().saturating_sub(n);
        summaries[start_idx..].to_vec()
    }

    /// Serialize every record as a JSON array
    pub fn to_json(&self) -> Result<String> {
        let records = self.lock();
        Ok(serde_json::to_string_pretty(&*records)?)
    }

    /// Clear all records from the store
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Get the total number of records in the store
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::named(ROOT_LOGGER)
    }
}

impl std::fmt::Debug for MemoryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLogger")
            .field("name", &self.name)
            .field("records", &self.len())
            .field("has_callback", &self.on_record.is_some())
            .finish()
    }
}

impl CallLogger for MemoryLogger {
    fn emit_debug(&self, event: &CallEvent<'_>) {
        let mut record = CallRecord::from_event(&self.name, event);
        record.level = Level::Debug;
        self.store(record);
    }

    fn emit_error(&self, event: &CallEvent<'_>) {
        let mut record = CallRecord::from_event(&self.name, event);
        record.level = Level::Error;
        self.store(record);
    }
}
