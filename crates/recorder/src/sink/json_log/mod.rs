//! JSON-lines file sink with size-based rotation

mod config;
mod error;
mod formatter;
mod rotation;
mod sink;
mod writer;

pub use config::{JsonLogConfig, DEFAULT_BACKUP_COUNT, DEFAULT_MAX_FILE_SIZE, SIZE_CHECK_INTERVAL};
pub use error::JsonLogError;
pub use formatter::format_record;
pub use sink::JsonLogSink;

#[cfg(test)]
mod tests;
