//! In-memory sink

use super::EntrySink;
use async_trait::async_trait;
use cachescope_core::{CacheRecord, Result};
use parking_lot::Mutex;

/// Keeps every record in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CacheRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far
    pub fn records(&self) -> Vec<CacheRecord> {
        self.records.lock().clone()
    }

    /// Remove and return every record received so far
    pub fn drain(&self) -> Vec<CacheRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

#[async_trait]
impl EntrySink for MemorySink {
    async fn record(&self, entry: CacheRecord) -> Result<()> {
        self.records.lock().push(entry);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
