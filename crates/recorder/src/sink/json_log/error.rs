//! Error types for JSON log operations

use cachescope_core::Error;

/// JSON log sink errors
#[derive(Debug, thiserror::Error)]
pub enum JsonLogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("log writer is closed")]
    Closed,
}

impl From<JsonLogError> for Error {
    fn from(error: JsonLogError) -> Self {
        Error::sink("json_log", error.to_string())
    }
}
