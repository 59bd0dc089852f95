//! Cache watcher: turns cache events into recorded entries
//!
//! Each of the four handlers applies the ignore filter, builds one
//! `CacheRecord` tagged with the event key, and hands it to the sink. The
//! watcher holds no mutable state, so handlers are safe to call concurrently
//! from whichever task the event bus dispatches on.

use crate::config::WatcherConfig;
use crate::filter::{IgnoreFilter, KeyPatterns};
use crate::sink::EntrySink;
use async_trait::async_trait;
use cachescope_core::events::SubscriberError;
use cachescope_core::{
    CacheEvent, CacheEventKind, CacheHit, CacheMissed, CacheRecord, CacheRecordContent,
    EnhancedEvent, EventEmitter, EventSubscriber, KeyForgotten, KeyWritten, Result,
    HIDDEN_VALUE_MASK,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Records cache hits, misses, writes, and deletions to an `EntrySink`
pub struct CacheWatcher {
    sink: Arc<dyn EntrySink>,
    enabled: bool,
    ignore: IgnoreFilter,
    hidden: KeyPatterns,
}

impl CacheWatcher {
    /// Create a watcher with only the built-in ignore rules
    pub fn new(sink: Arc<dyn EntrySink>) -> Self {
        Self {
            sink,
            enabled: true,
            ignore: IgnoreFilter::default(),
            hidden: KeyPatterns::empty(),
        }
    }

    /// Create a watcher from configuration, compiling its key patterns
    pub fn with_config(sink: Arc<dyn EntrySink>, config: &WatcherConfig) -> Result<Self> {
        Ok(Self {
            sink,
            enabled: config.enabled,
            ignore: config.ignore_filter()?,
            hidden: config.hidden_patterns()?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether events for `key` are suppressed
    pub fn should_ignore(&self, key: &str) -> bool {
        self.ignore.should_ignore(key)
    }

    /// Subscribe to the four cache event kinds on `emitter`
    ///
    /// Returns the number of subscriptions made: four, or none when the
    /// watcher is disabled.
    pub async fn register(self: &Arc<Self>, emitter: &EventEmitter) -> usize {
        if !self.enabled {
            debug!(sink = self.sink.name(), "Cache watcher disabled, not subscribing");
            return 0;
        }

        for kind in CacheEventKind::ALL {
            emitter
                .listen(kind, Arc::clone(self) as Arc<dyn EventSubscriber>)
                .await;
        }
        debug!(sink = self.sink.name(), "Cache watcher registered");
        CacheEventKind::ALL.len()
    }

    /// Record a cache key was found
    ///
    /// Returns `Ok(true)` when an entry was handed to the sink and `Ok(false)`
    /// when the event was suppressed. Sink errors are returned as-is.
    pub async fn on_hit(&self, event: &CacheHit) -> Result<bool> {
        self.record_hit(event, None).await
    }

    /// Record a missing cache key
    pub async fn on_missed(&self, event: &CacheMissed) -> Result<bool> {
        self.record_missed(event, None).await
    }

    /// Record a cache key was written
    pub async fn on_written(&self, event: &KeyWritten) -> Result<bool> {
        self.record_written(event, None).await
    }

    /// Record a cache key was removed
    pub async fn on_forgotten(&self, event: &KeyForgotten) -> Result<bool> {
        self.record_forgotten(event, None).await
    }

    /// Dispatch any cache event to its handler
    pub async fn handle(&self, event: &CacheEvent) -> Result<bool> {
        self.dispatch(event, None).await
    }

    async fn dispatch(&self, event: &CacheEvent, batch_id: Option<String>) -> Result<bool> {
        match event {
            CacheEvent::Hit(hit) => self.record_hit(hit, batch_id).await,
            CacheEvent::Missed(missed) => self.record_missed(missed, batch_id).await,
            CacheEvent::Written(written) => self.record_written(written, batch_id).await,
            CacheEvent::Forgotten(forgotten) => self.record_forgotten(forgotten, batch_id).await,
        }
    }

    async fn record_hit(&self, event: &CacheHit, batch_id: Option<String>) -> Result<bool> {
        self.record(&event.key, batch_id, || CacheRecordContent::Hit {
            key: event.key.clone(),
            value: self.visible_value(&event.key, &event.value),
        })
        .await
    }

    async fn record_missed(&self, event: &CacheMissed, batch_id: Option<String>) -> Result<bool> {
        self.record(&event.key, batch_id, || CacheRecordContent::Missed {
            key: event.key.clone(),
        })
        .await
    }

    async fn record_written(&self, event: &KeyWritten, batch_id: Option<String>) -> Result<bool> {
        self.record(&event.key, batch_id, || CacheRecordContent::Set {
            key: event.key.clone(),
            value: self.visible_value(&event.key, &event.value),
            expiration: event.expiration_minutes,
        })
        .await
    }

    async fn record_forgotten(
        &self,
        event: &KeyForgotten,
        batch_id: Option<String>,
    ) -> Result<bool> {
        self.record(&event.key, batch_id, || CacheRecordContent::Forget {
            key: event.key.clone(),
        })
        .await
    }

    async fn record<F>(&self, key: &str, batch_id: Option<String>, build: F) -> Result<bool>
    where
        F: FnOnce() -> CacheRecordContent + Send,
    {
        if !self.enabled {
            return Ok(false);
        }
        if self.should_ignore(key) {
            debug!(key, "Ignoring cache event for internal key");
            return Ok(false);
        }

        let entry = CacheRecord::new(build(), batch_id);
        debug!(key, kind = %entry.kind(), sink = self.sink.name(), "Recording cache event");
        self.sink.record(entry).await?;
        Ok(true)
    }

    fn visible_value(&self, key: &str, value: &Value) -> Value {
        if self.hidden.is_match(key) {
            Value::String(HIDDEN_VALUE_MASK.to_string())
        } else {
            value.clone()
        }
    }
}

#[async_trait]
impl EventSubscriber for CacheWatcher {
    async fn handle_event(&self, event: &EnhancedEvent) -> std::result::Result<(), SubscriberError> {
        self.dispatch(&event.event, event.correlation_id.clone())
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    fn name(&self) -> &'static str {
        "cache_watcher"
    }

    fn is_interested(&self, _event: &CacheEvent) -> bool {
        self.enabled
    }
}
