//! File writer for JSON log operations

use super::error::JsonLogError;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

async fn open_append(path: &Path) -> Result<BufWriter<File>, JsonLogError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| JsonLogError::Io(format!("Failed to open log file: {e}")))?;
    Ok(BufWriter::new(file))
}

/// Append-only line writer
///
/// `None` inside the mutex means the writer was closed, either for rotation
/// or for good.
pub(crate) struct LogWriter {
    writer: Mutex<Option<BufWriter<File>>>,
}

impl LogWriter {
    pub(crate) async fn open(path: &Path) -> Result<Self, JsonLogError> {
        Ok(Self {
            writer: Mutex::new(Some(open_append(path).await?)),
        })
    }

    /// Write one line and flush it; returns bytes written including the newline
    pub(crate) async fn write_line(&self, line: &str) -> Result<usize, JsonLogError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(JsonLogError::Closed)?;

        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| JsonLogError::Io(e.to_string()))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| JsonLogError::Io(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| JsonLogError::Io(e.to_string()))?;

        Ok(line.len() + 1)
    }

    pub(crate) async fn flush(&self) -> Result<(), JsonLogError> {
        if let Some(writer) = self.writer.lock().await.as_mut() {
            writer
                .flush()
                .await
                .map_err(|e| JsonLogError::Io(e.to_string()))?;
        }
        Ok(())
    }

    pub(crate) async fn close(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.flush().await {
                tracing::warn!("Failed to flush log buffer during close: {}", e);
            }
        }
    }

    /// Close the current file, run `shift` to move it aside, then reopen `path`
    ///
    /// The size is read again under the lock, so a caller that raced another
    /// rotation finds the fresh file within `max_size` and leaves it alone.
    /// Returns whether the file was rotated; does nothing once the writer has
    /// been closed for good.
    pub(crate) async fn rotate<F, Fut>(
        &self,
        path: &Path,
        max_size: u64,
        shift: F,
    ) -> Result<bool, JsonLogError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let mut guard = self.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Ok(false);
        };
        if let Err(e) = writer.flush().await {
            tracing::warn!("Failed to flush log buffer before rotation: {}", e);
        }

        let current_size = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.len())
            .unwrap_or(0);
        if current_size <= max_size {
            return Ok(false);
        }

        drop(guard.take());
        shift().await;
        *guard = Some(open_append(path).await?);
        Ok(true)
    }
}
