//! JSON formatting for records

use super::error::JsonLogError;
use cachescope_core::CacheRecord;

/// Format a record as a single-line JSON object
pub fn format_record(record: &CacheRecord) -> Result<String, JsonLogError> {
    serde_json::to_string(record).map_err(|e| JsonLogError::Serialization(e.to_string()))
}
