//! Event system connecting a cache subsystem to its observers
//!
//! A cache publishes `CacheEvent`s through an `EventEmitter` without knowing
//! who listens. Observers implement `EventSubscriber` and register either for
//! a single event kind (`listen`) or for every kind (`add_subscriber`).

pub mod emitter;
pub mod subscriber;
pub mod types;
pub mod utils;

pub use emitter::{EventEmitter, EventStats};
pub use subscriber::{EnhancedEvent, EventSubscriber, SubscriberError};
pub use types::{CacheEvent, CacheEventKind, CacheHit, CacheMissed, KeyForgotten, KeyWritten};
