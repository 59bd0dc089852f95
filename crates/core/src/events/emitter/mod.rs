//! Event emitter for publishing and managing events

use crate::constants::{CORRELATION_ID_KEY, DEFAULT_EVENT_CAPACITY};
use crate::events::subscriber::{EnhancedEvent, EventSubscriber};
use crate::events::types::{CacheEvent, CacheEventKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error};

/// A subscriber bound to one event kind, or to every kind when `kind` is `None`
struct Registration {
    kind: Option<CacheEventKind>,
    subscriber: Arc<dyn EventSubscriber>,
}

impl Registration {
    fn accepts(&self, event: &CacheEvent) -> bool {
        self.kind.map_or(true, |kind| kind == event.kind())
            && self.subscriber.is_interested(event)
    }
}

/// Snapshot of event statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStats {
    pub events_published: u64,
    pub events_handled: u64,
    pub events_failed: u64,
}

#[derive(Debug, Default)]
struct EventCounters {
    published: AtomicU64,
    handled: AtomicU64,
    failed: AtomicU64,
}

/// Event emitter for publishing cache events to subscribers
///
/// A subscriber that fails is logged and counted; the failure never reaches
/// the code that emitted the event.
pub struct EventEmitter {
    /// Event channel sender
    sender: broadcast::Sender<EnhancedEvent>,
    /// Registered subscribers
    registrations: RwLock<Vec<Registration>>,
    /// Event correlation context
    correlation_context: RwLock<HashMap<String, String>>,
    counters: EventCounters,
}

impl EventEmitter {
    /// Create a new event emitter with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            registrations: RwLock::new(Vec::new()),
            correlation_context: RwLock::new(HashMap::new()),
            counters: EventCounters::default(),
        }
    }

    /// Register a subscriber for a single event kind
    pub async fn listen(&self, kind: CacheEventKind, subscriber: Arc<dyn EventSubscriber>) {
        let name = subscriber.name();
        self.registrations.write().await.push(Registration {
            kind: Some(kind),
            subscriber,
        });
        debug!(subscriber = name, kind = %kind, "Event listener registered");
    }

    /// Register a subscriber for every event kind
    pub async fn add_subscriber(&self, subscriber: Arc<dyn EventSubscriber>) {
        let name = subscriber.name();
        self.registrations.write().await.push(Registration {
            kind: None,
            subscriber,
        });
        debug!(subscriber = name, "Event subscriber added");
    }

    /// Remove every registration of a subscriber by name
    pub async fn remove_subscriber(&self, name: &str) -> bool {
        let mut registrations = self.registrations.write().await;
        let initial_len = registrations.len();
        registrations.retain(|r| r.subscriber.name() != name);
        let removed = registrations.len() != initial_len;
        if removed {
            debug!("Event subscriber removed: {}", name);
        }
        removed
    }

    /// Set correlation context for subsequent events
    pub async fn set_correlation_context(&self, context: HashMap<String, String>) {
        *self.correlation_context.write().await = context;
    }

    /// Clear correlation context
    pub async fn clear_correlation_context(&self) {
        self.correlation_context.write().await.clear();
    }

    /// Emit an event to all interested subscribers
    pub async fn emit(&self, event: impl Into<CacheEvent>) {
        self.emit_with_metadata(event, HashMap::new()).await;
    }

    /// Emit an event with custom metadata
    pub async fn emit_with_metadata(
        &self,
        event: impl Into<CacheEvent>,
        metadata: HashMap<String, String>,
    ) {
        let enhanced_event = {
            let correlation_context = self.correlation_context.read().await;
            let mut combined_metadata = correlation_context.clone();
            combined_metadata.extend(metadata);

            EnhancedEvent {
                event: event.into(),
                timestamp: SystemTime::now(),
                correlation_id: correlation_context.get(CORRELATION_ID_KEY).cloned(),
                metadata: combined_metadata,
            }
        };

        self.counters.published.fetch_add(1, Ordering::Relaxed);

        // No receivers is the common case, not an error
        if let Err(e) = self.sender.send(enhanced_event.clone()) {
            debug!("Failed to send event to broadcast channel: {}", e);
        }

        self.notify_subscribers(&enhanced_event).await;
    }

    /// Notify all interested subscribers in parallel
    async fn notify_subscribers(&self, event: &EnhancedEvent) {
        let registrations = self.registrations.read().await;

        let interested: Vec<Arc<dyn EventSubscriber>> = registrations
            .iter()
            .filter(|registration| registration.accepts(&event.event))
            .map(|registration| Arc::clone(&registration.subscriber))
            .collect();
        drop(registrations);

        if interested.is_empty() {
            return;
        }

        let handles = interested.iter().map(|subscriber| async move {
            match subscriber.handle_event(event).await {
                Ok(()) => true,
                Err(e) => {
                    error!(
                        subscriber = subscriber.name(),
                        key = event.event.key(),
                        error = %e,
                        "Event subscriber failed to handle event"
                    );
                    false
                }
            }
        });

        let results = futures::future::join_all(handles).await;
        let failed = results.iter().filter(|ok| !**ok).count() as u64;
        self.counters
            .handled
            .fetch_add(results.len() as u64 - failed, Ordering::Relaxed);
        self.counters.failed.fetch_add(failed, Ordering::Relaxed);

        debug!(
            kind = %event.event.kind(),
            subscribers_notified = results.len(),
            "Event published to subscribers"
        );
    }

    /// Get the number of registrations, counting per-kind listeners individually
    pub async fn subscriber_count(&self) -> usize {
        self.registrations.read().await.len()
    }

    /// Get the number of registrations that would receive events of `kind`
    pub async fn listener_count(&self, kind: CacheEventKind) -> usize {
        self.registrations
            .read()
            .await
            .iter()
            .filter(|r| r.kind.map_or(true, |k| k == kind))
            .count()
    }

    /// Create a receiver for the broadcast channel (for custom handling)
    pub fn subscribe(&self) -> broadcast::Receiver<EnhancedEvent> {
        self.sender.subscribe()
    }

    /// Get current event statistics
    pub fn stats(&self) -> EventStats {
        EventStats {
            events_published: self.counters.published.load(Ordering::Relaxed),
            events_handled: self.counters.handled.load(Ordering::Relaxed),
            events_failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::subscriber::SubscriberError;
    use crate::events::types::{CacheHit, CacheMissed, KeyForgotten};
    use std::sync::Mutex;

    struct KeyCollector {
        name: &'static str,
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl KeyCollector {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                seen: Mutex::default(),
                fail: false,
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                seen: Mutex::default(),
                fail: true,
            })
        }

        fn keys(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl EventSubscriber for KeyCollector {
        async fn handle_event(&self, event: &EnhancedEvent) -> Result<(), SubscriberError> {
            self.seen.lock().unwrap().push(event.event.key().to_string());
            if self.fail {
                return Err("sink unavailable".into());
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    fn hit(key: &str) -> CacheHit {
        CacheHit {
            key: key.to_string(),
            value: serde_json::Value::Null,
        }
    }

    #[tokio::test]
    async fn test_listen_only_receives_matching_kind() {
        let emitter = EventEmitter::default();
        let collector = KeyCollector::new("hits");
        emitter.listen(CacheEventKind::Hit, collector.clone()).await;

        emitter.emit(hit("a")).await;
        emitter
            .emit(CacheMissed {
                key: "b".to_string(),
            })
            .await;

        assert_eq!(collector.keys(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_add_subscriber_receives_all_kinds() {
        let emitter = EventEmitter::default();
        let collector = KeyCollector::new("all");
        emitter.add_subscriber(collector.clone()).await;

        emitter.emit(hit("a")).await;
        emitter
            .emit(KeyForgotten {
                key: "b".to_string(),
            })
            .await;

        assert_eq!(collector.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(emitter.listener_count(CacheEventKind::Written).await, 1);
    }

    #[tokio::test]
    async fn test_failing_subscriber_is_isolated() {
        let emitter = EventEmitter::default();
        let failing = KeyCollector::failing("failing");
        let healthy = KeyCollector::new("healthy");
        emitter.add_subscriber(failing.clone()).await;
        emitter.add_subscriber(healthy.clone()).await;

        emitter.emit(hit("a")).await;

        assert_eq!(healthy.keys(), vec!["a".to_string()]);
        let stats = emitter.stats();
        assert_eq!(stats.events_published, 1);
        assert_eq!(stats.events_handled, 1);
        assert_eq!(stats.events_failed, 1);
    }

    #[tokio::test]
    async fn test_remove_subscriber_drops_all_registrations() {
        let emitter = EventEmitter::default();
        let collector = KeyCollector::new("multi");
        emitter.listen(CacheEventKind::Hit, collector.clone()).await;
        emitter.listen(CacheEventKind::Missed, collector.clone()).await;
        assert_eq!(emitter.subscriber_count().await, 2);

        assert!(emitter.remove_subscriber("multi").await);
        assert!(!emitter.remove_subscriber("multi").await);
        assert_eq!(emitter.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_correlation_context_is_attached() {
        let emitter = EventEmitter::default();
        let mut receiver = emitter.subscribe();

        let mut context = HashMap::new();
        context.insert(CORRELATION_ID_KEY.to_string(), "req-1".to_string());
        emitter.set_correlation_context(context).await;
        emitter.emit(hit("a")).await;

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.correlation_id.as_deref(), Some("req-1"));
        assert_eq!(received.event.key(), "a");

        emitter.clear_correlation_context().await;
        emitter.emit(hit("b")).await;
        let received = receiver.recv().await.unwrap();
        assert!(received.correlation_id.is_none());
    }
}
