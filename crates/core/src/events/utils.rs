//! Utility functions for common event patterns

use crate::events::types::{CacheEvent, CacheHit, CacheMissed, KeyForgotten, KeyWritten};
use serde_json::Value;

/// Create a cache hit event
pub fn cache_hit(key: &str, value: impl Into<Value>) -> CacheEvent {
    CacheEvent::Hit(CacheHit {
        key: key.to_string(),
        value: value.into(),
    })
}

/// Create a cache miss event
pub fn cache_missed(key: &str) -> CacheEvent {
    CacheEvent::Missed(CacheMissed {
        key: key.to_string(),
    })
}

/// Create a key written event
pub fn key_written(
    key: &str,
    value: impl Into<Value>,
    expiration_minutes: Option<i64>,
) -> CacheEvent {
    CacheEvent::Written(KeyWritten {
        key: key.to_string(),
        value: value.into(),
        expiration_minutes,
    })
}

/// Create a key forgotten event
pub fn key_forgotten(key: &str) -> CacheEvent {
    CacheEvent::Forgotten(KeyForgotten {
        key: key.to_string(),
    })
}
