//! Cache event recorder for cachescope
//!
//! `CacheWatcher` subscribes to cache lifecycle events on an
//! [`EventEmitter`](cachescope_core::EventEmitter), drops events for internal
//! framework keys, and forwards a normalized
//! [`CacheRecord`](cachescope_core::CacheRecord) to an [`EntrySink`].
//!
//! ```no_run
//! use cachescope_core::{events::utils::cache_hit, EventEmitter};
//! use cachescope_recorder::{CacheWatcher, MemorySink};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let sink = Arc::new(MemorySink::new());
//! let watcher = Arc::new(CacheWatcher::new(sink.clone()));
//! let emitter = EventEmitter::default();
//! watcher.register(&emitter).await;
//!
//! emitter.emit(cache_hit("user:42", "Alice")).await;
//! assert_eq!(sink.len(), 1);
//! # }
//! ```

pub mod config;
pub mod filter;
pub mod sink;
pub mod watcher;

pub use config::WatcherConfig;
pub use filter::{should_ignore, IgnoreFilter, KeyPatterns};
pub use sink::{EntrySink, JsonLogConfig, JsonLogError, JsonLogSink, MemorySink, TracingSink};
pub use watcher::CacheWatcher;
