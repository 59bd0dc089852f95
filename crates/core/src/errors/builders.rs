//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a sink error
    #[must_use]
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from a recording sink
    pub fn is_sink(&self) -> bool {
        matches!(self, Error::Sink { .. })
    }
}
