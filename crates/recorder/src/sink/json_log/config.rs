//! Configuration for the JSON log sink

use std::path::{Path, PathBuf};

/// Default maximum log file size before rotation (10MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Default number of backup files to keep
pub const DEFAULT_BACKUP_COUNT: usize = 5;
/// Check the real file size every N writes
pub const SIZE_CHECK_INTERVAL: u64 = 100;

/// Configuration for the JSON log sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonLogConfig {
    /// Log file path
    pub file_path: PathBuf,
    /// Maximum log file size before rotation (bytes), `None` disables rotation
    pub max_file_size: Option<u64>,
    /// Number of rotated files to keep (`path.1` .. `path.N`)
    pub backup_count: usize,
    /// Check the real file size every N writes
    pub size_check_interval: u64,
}

impl JsonLogConfig {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            backup_count: DEFAULT_BACKUP_COUNT,
            size_check_interval: SIZE_CHECK_INTERVAL,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: Option<u64>) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = backup_count;
        self
    }

    /// Zero is treated as one, checking on every write
    pub fn with_size_check_interval(mut self, size_check_interval: u64) -> Self {
        self.size_check_interval = size_check_interval.max(1);
        self
    }

    pub(crate) fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}
