//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for cachescope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cachescope operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    Configuration { message: String },

    /// A key pattern that could not be compiled
    InvalidPattern { pattern: String, message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A recording sink rejected or failed to persist a record
    Sink { sink: String, message: String },
}
