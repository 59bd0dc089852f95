//! Event subscriber traits and enhanced events

use crate::events::types::CacheEvent;
use std::collections::HashMap;
use std::time::SystemTime;

/// Error type returned by subscribers
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// Event with metadata and correlation tracking
#[derive(Debug, Clone)]
pub struct EnhancedEvent {
    /// The actual event
    pub event: CacheEvent,
    /// Timestamp when the event occurred
    pub timestamp: SystemTime,
    /// Optional correlation ID for tracing related events
    pub correlation_id: Option<String>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
}

impl EnhancedEvent {
    /// Wrap an event with no correlation or metadata
    pub fn new(event: impl Into<CacheEvent>) -> Self {
        Self {
            event: event.into(),
            timestamp: SystemTime::now(),
            correlation_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

/// Trait for event subscribers
#[async_trait::async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Handle an event
    async fn handle_event(&self, event: &EnhancedEvent) -> Result<(), SubscriberError>;

    /// Subscriber name for debugging
    fn name(&self) -> &'static str;

    /// Check if subscriber is interested in this event
    fn is_interested(&self, event: &CacheEvent) -> bool {
        let _ = event;
        true
    }
}
