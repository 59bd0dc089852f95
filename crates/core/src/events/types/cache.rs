//! Cache lifecycle events

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A cache key was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheHit {
    pub key: String,
    pub value: Value,
}

/// A cache key was looked up and not found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMissed {
    pub key: String,
}

/// A cache key was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWritten {
    pub key: String,
    pub value: Value,
    /// `None` means the key was stored without expiry
    #[serde(default)]
    pub expiration_minutes: Option<i64>,
}

/// A cache key was removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyForgotten {
    pub key: String,
}

/// Cache events emitted by a cache subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CacheEvent {
    Hit(CacheHit),
    Missed(CacheMissed),
    Written(KeyWritten),
    Forgotten(KeyForgotten),
}

/// Event kind used for per-kind subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheEventKind {
    Hit,
    Missed,
    Written,
    Forgotten,
}

impl CacheEventKind {
    /// Every kind, in registration order
    pub const ALL: [CacheEventKind; 4] = [
        CacheEventKind::Hit,
        CacheEventKind::Missed,
        CacheEventKind::Written,
        CacheEventKind::Forgotten,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEventKind::Hit => "hit",
            CacheEventKind::Missed => "missed",
            CacheEventKind::Written => "written",
            CacheEventKind::Forgotten => "forgotten",
        }
    }
}

impl fmt::Display for CacheEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CacheEvent {
    /// The key that triggered this event
    pub fn key(&self) -> &str {
        match self {
            CacheEvent::Hit(event) => &event.key,
            CacheEvent::Missed(event) => &event.key,
            CacheEvent::Written(event) => &event.key,
            CacheEvent::Forgotten(event) => &event.key,
        }
    }

    pub fn kind(&self) -> CacheEventKind {
        match self {
            CacheEvent::Hit(_) => CacheEventKind::Hit,
            CacheEvent::Missed(_) => CacheEventKind::Missed,
            CacheEvent::Written(_) => CacheEventKind::Written,
            CacheEvent::Forgotten(_) => CacheEventKind::Forgotten,
        }
    }
}

impl From<CacheHit> for CacheEvent {
    fn from(event: CacheHit) -> Self {
        CacheEvent::Hit(event)
    }
}

impl From<CacheMissed> for CacheEvent {
    fn from(event: CacheMissed) -> Self {
        CacheEvent::Missed(event)
    }
}

impl From<KeyWritten> for CacheEvent {
    fn from(event: KeyWritten) -> Self {
        CacheEvent::Written(event)
    }
}

impl From<KeyForgotten> for CacheEvent {
    fn from(event: KeyForgotten) -> Self {
        CacheEvent::Forgotten(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserializes_from_tagged_json() {
        let event: CacheEvent =
            serde_json::from_value(json!({"event": "hit", "key": "user:42", "value": "Alice"}))
                .unwrap();
        assert_eq!(event.kind(), CacheEventKind::Hit);
        assert_eq!(event.key(), "user:42");
    }

    #[test]
    fn test_written_event_defaults_to_no_expiration() {
        let event: CacheEvent =
            serde_json::from_value(json!({"event": "written", "key": "product:7", "value": 1}))
                .unwrap();
        match event {
            CacheEvent::Written(written) => assert_eq!(written.expiration_minutes, None),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CacheEventKind::Forgotten.to_string(), "forgotten");
        assert_eq!(CacheEventKind::ALL.len(), 4);
    }
}
