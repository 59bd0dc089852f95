//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::InvalidPattern { pattern, message } => {
                write!(f, "invalid key pattern '{pattern}': {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                if path.as_os_str().is_empty() {
                    write!(f, "file system error during {operation}: {source}")
                } else {
                    write!(
                        f,
                        "file system error during {operation} on '{}': {source}",
                        path.display()
                    )
                }
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::Sink { sink, message } => {
                write!(f, "sink '{sink}' failed to record entry: {message}")
            }
        }
    }
}
