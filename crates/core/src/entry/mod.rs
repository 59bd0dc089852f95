//! Normalized cache records handed to recording sinks

use crate::constants::CACHE_ENTRY_TYPE;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Kind of cache activity a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheRecordKind {
    Hit,
    Missed,
    Set,
    Forget,
}

impl fmt::Display for CacheRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheRecordKind::Hit => write!(f, "hit"),
            CacheRecordKind::Missed => write!(f, "missed"),
            CacheRecordKind::Set => write!(f, "set"),
            CacheRecordKind::Forget => write!(f, "forget"),
        }
    }
}

/// Kind-specific record payload
///
/// Only `Hit` and `Set` carry a value and only `Set` carries an expiration.
/// A `Set` without expiry serializes `"expiration": null`; `Missed` and
/// `Forget` have no `value` field at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CacheRecordContent {
    Hit {
        key: String,
        value: Value,
    },
    Missed {
        key: String,
    },
    Set {
        key: String,
        value: Value,
        expiration: Option<i64>,
    },
    Forget {
        key: String,
    },
}

impl CacheRecordContent {
    pub fn kind(&self) -> CacheRecordKind {
        match self {
            CacheRecordContent::Hit { .. } => CacheRecordKind::Hit,
            CacheRecordContent::Missed { .. } => CacheRecordKind::Missed,
            CacheRecordContent::Set { .. } => CacheRecordKind::Set,
            CacheRecordContent::Forget { .. } => CacheRecordKind::Forget,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            CacheRecordContent::Hit { key, .. }
            | CacheRecordContent::Missed { key }
            | CacheRecordContent::Set { key, .. }
            | CacheRecordContent::Forget { key } => key,
        }
    }
}

/// An immutable record of one cache event
///
/// The tag set always holds exactly the triggering key. Fields are private so
/// a record cannot change between construction and handoff to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheRecord {
    uuid: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_id: Option<String>,
    #[serde(rename = "type")]
    entry_type: &'static str,
    recorded_at: DateTime<Utc>,
    content: CacheRecordContent,
    tags: BTreeSet<String>,
}

impl CacheRecord {
    /// Build a record, tagging it with its key
    pub fn new(content: CacheRecordContent, batch_id: Option<String>) -> Self {
        let tags = BTreeSet::from([content.key().to_string()]);
        Self {
            uuid: Uuid::new_v4(),
            batch_id,
            entry_type: CACHE_ENTRY_TYPE,
            recorded_at: Utc::now(),
            content,
            tags,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Correlation id of the event batch this record belongs to
    pub fn batch_id(&self) -> Option<&str> {
        self.batch_id.as_deref()
    }

    pub fn entry_type(&self) -> &'static str {
        self.entry_type
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn content(&self) -> &CacheRecordContent {
        &self.content
    }

    pub fn kind(&self) -> CacheRecordKind {
        self.content.kind()
    }

    pub fn key(&self) -> &str {
        self.content.key()
    }

    /// The recorded value, present for hits and sets only
    pub fn value(&self) -> Option<&Value> {
        match &self.content {
            CacheRecordContent::Hit { value, .. } | CacheRecordContent::Set { value, .. } => {
                Some(value)
            }
            CacheRecordContent::Missed { .. } | CacheRecordContent::Forget { .. } => None,
        }
    }

    /// Expiration in minutes, present for sets written with an expiry
    pub fn expiration(&self) -> Option<i64> {
        match &self.content {
            CacheRecordContent::Set { expiration, .. } => *expiration,
            _ => None,
        }
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_hold_exactly_the_key() {
        let record = CacheRecord::new(
            CacheRecordContent::Missed {
                key: "user:42".to_string(),
            },
            None,
        );
        assert_eq!(record.tags().len(), 1);
        assert!(record.tags().contains("user:42"));
        assert_eq!(record.kind(), CacheRecordKind::Missed);
        assert!(record.value().is_none());
    }

    #[test]
    fn test_set_without_expiration_serializes_null() {
        let record = CacheRecord::new(
            CacheRecordContent::Set {
                key: "product:7".to_string(),
                value: json!({"price": 9.99}),
                expiration: None,
            },
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "cache");
        assert_eq!(json["content"]["type"], "set");
        assert_eq!(json["content"]["value"]["price"], 9.99);
        assert!(json["content"]["expiration"].is_null());
        assert!(json["content"].as_object().unwrap().contains_key("expiration"));
        assert_eq!(json["tags"], json!(["product:7"]));
        assert!(json.get("batch_id").is_none());
    }

    #[test]
    fn test_forget_omits_value() {
        let record = CacheRecord::new(
            CacheRecordContent::Forget {
                key: "session:abc".to_string(),
            },
            Some("batch-1".to_string()),
        );
        let json = serde_json::to_value(&record).unwrap();
        let content = json["content"].as_object().unwrap();
        assert!(!content.contains_key("value"));
        assert!(!content.contains_key("expiration"));
        assert_eq!(json["batch_id"], "batch-1");
    }
}
