//! Log file rotation logic

use super::config::JsonLogConfig;
use super::error::JsonLogError;
use super::sink::JsonLogSink;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

impl JsonLogSink {
    /// Rotate when the file has grown past the configured limit
    ///
    /// The real size is read from disk every `size_check_interval` writes, or
    /// sooner when the running byte count already exceeds the limit.
    pub(crate) async fn check_rotation(&self) -> Result<(), JsonLogError> {
        let Some(max_size) = self.config.max_file_size else {
            return Ok(());
        };

        let write_count = self.write_counter.fetch_add(1, Ordering::Relaxed);
        let estimated_size = self.estimated_size.load(Ordering::Relaxed);

        let interval = self.config.size_check_interval.max(1);
        if write_count % interval != 0 && estimated_size <= max_size {
            return Ok(());
        }

        let actual_size = match tokio::fs::metadata(&self.config.file_path).await {
            Ok(meta) => meta.len(),
            Err(_) => {
                self.estimated_size.store(0, Ordering::Relaxed);
                return Ok(());
            }
        };
        self.estimated_size.store(actual_size, Ordering::Relaxed);

        if actual_size > max_size {
            self.rotate(max_size).await?;
        }
        Ok(())
    }

    async fn rotate(&self, max_size: u64) -> Result<(), JsonLogError> {
        let config = &self.config;
        let rotated = self
            .writer
            .rotate(&config.file_path, max_size, || shift_backups(config))
            .await?;
        if !rotated {
            return Ok(());
        }

        debug!(log_file = %config.file_path.display(), "Rotated cache record log");
        self.estimated_size.store(0, Ordering::Relaxed);
        self.write_counter.store(0, Ordering::Relaxed);
        Ok(())
    }
}

/// Move `path.N-1` to `path.N` down to `path` to `path.1`, dropping the oldest
async fn shift_backups(config: &JsonLogConfig) {
    if config.backup_count == 0 {
        if let Err(e) = tokio::fs::remove_file(&config.file_path).await {
            warn!("Failed to discard full log file: {}", e);
        }
        return;
    }

    for index in (1..config.backup_count).rev() {
        let from = config.backup_path(index);
        let to = config.backup_path(index + 1);
        if tokio::fs::metadata(&from).await.is_ok() {
            if let Err(e) = tokio::fs::rename(&from, &to).await {
                warn!(
                    "Failed to rotate log file {} to {}: {}",
                    from.display(),
                    to.display(),
                    e
                );
            }
        }
    }

    if let Err(e) = tokio::fs::rename(&config.file_path, config.backup_path(1)).await {
        warn!("Failed to move current log to backup: {}", e);
    }
}
