//! Sink that writes records to the tracing subscriber

use super::EntrySink;
use async_trait::async_trait;
use cachescope_core::{CacheRecord, Result};

/// Emits each record as a structured `info` event on target `cachescope::record`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EntrySink for TracingSink {
    async fn record(&self, entry: CacheRecord) -> Result<()> {
        let value = entry.value().map(|v| v.to_string());
        tracing::info!(
            target: "cachescope::record",
            uuid = %entry.uuid(),
            kind = %entry.kind(),
            key = entry.key(),
            value = value.as_deref(),
            expiration = entry.expiration(),
            batch_id = entry.batch_id(),
            "cache {}",
            entry.kind()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
