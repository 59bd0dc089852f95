//! Recording sinks that receive normalized cache records

pub mod json_log;
mod memory;
mod trace;

pub use self::json_log::{JsonLogConfig, JsonLogError, JsonLogSink};
pub use self::memory::MemorySink;
pub use self::trace::TracingSink;

use async_trait::async_trait;
use cachescope_core::{CacheRecord, Result};

/// Destination for cache records
///
/// A sink owns its own latency and failure behaviour. Errors returned from
/// `record` are passed back to the caller untouched.
#[async_trait]
pub trait EntrySink: Send + Sync {
    /// Persist or display one record
    async fn record(&self, entry: CacheRecord) -> Result<()>;

    /// Sink name for logs and error messages
    fn name(&self) -> &'static str;
}
