//! Event type definitions

mod cache;

pub use cache::{CacheEvent, CacheEventKind, CacheHit, CacheMissed, KeyForgotten, KeyWritten};
