//! Core domain types, errors, and the event bus for `cachescope`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias shared by every
//!   crate in the workspace.
//! - **`events`**: cache lifecycle events, the `EventSubscriber` trait, and the
//!   `EventEmitter` bus that dispatches events to subscribers.
//! - **`entry`**: the normalized `CacheRecord` handed to recording sinks.
//! - **`constants`**: shared static values such as the built-in ignore rules
//!   and environment variable names.

pub mod constants;
pub mod entry;
pub mod errors;
pub mod events;

pub use self::{
    constants::*,
    entry::{CacheRecord, CacheRecordContent, CacheRecordKind},
    errors::{Error, Result, ResultExt},
    events::{
        CacheEvent, CacheEventKind, CacheHit, CacheMissed, EnhancedEvent, EventEmitter,
        EventSubscriber, KeyForgotten, KeyWritten,
    },
};
