//! EntrySink implementation for JSON-lines files

use super::config::JsonLogConfig;
use super::error::JsonLogError;
use super::formatter::format_record;
use super::writer::LogWriter;
use crate::sink::EntrySink;
use async_trait::async_trait;
use cachescope_core::{CacheRecord, Result};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Appends one JSON object per record to a file
pub struct JsonLogSink {
    pub(crate) config: JsonLogConfig,
    pub(crate) writer: LogWriter,
    /// Running estimate of the file size, refreshed from disk periodically
    pub(crate) estimated_size: AtomicU64,
    pub(crate) write_counter: AtomicU64,
}

impl JsonLogSink {
    /// Create a sink writing to `file_path` with default rotation settings
    pub async fn new<P: AsRef<Path>>(file_path: P) -> std::result::Result<Self, JsonLogError> {
        Self::from_config(JsonLogConfig::new(file_path)).await
    }

    pub async fn from_config(config: JsonLogConfig) -> std::result::Result<Self, JsonLogError> {
        if let Some(parent) = config.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    JsonLogError::Io(format!("Failed to create log directory: {e}"))
                })?;
            }
        }

        let writer = LogWriter::open(&config.file_path).await?;
        let existing_size = tokio::fs::metadata(&config.file_path)
            .await
            .map(|meta| meta.len())
            .unwrap_or(0);

        Ok(Self {
            config,
            writer,
            estimated_size: AtomicU64::new(existing_size),
            write_counter: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &JsonLogConfig {
        &self.config
    }

    /// Ensure all pending writes are flushed
    pub async fn flush(&self) -> std::result::Result<(), JsonLogError> {
        self.writer.flush().await
    }

    /// Flush and close the file; later records fail with `JsonLogError::Closed`
    pub async fn close(&self) {
        self.writer.close().await;
    }
}

#[async_trait]
impl EntrySink for JsonLogSink {
    async fn record(&self, entry: CacheRecord) -> Result<()> {
        let line = format_record(&entry)?;

        self.check_rotation().await?;
        let bytes_written = self.writer.write_line(&line).await?;
        self.estimated_size
            .fetch_add(bytes_written as u64, Ordering::Relaxed);

        debug!(
            key = entry.key(),
            kind = %entry.kind(),
            log_file = %self.config.file_path.display(),
            "Cache record written"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_log"
    }
}
