/// Constants used throughout the cachescope codebase
// Built-in ignore rules
pub const QUEUE_RESTART_KEY: &str = "illuminate:queue:restart";
pub const SCHEDULE_KEY_PREFIX: &str = "framework/schedule";

// Value written in place of a hidden key's cached value
pub const HIDDEN_VALUE_MASK: &str = "********";

// Entry type tag carried by every record
pub const CACHE_ENTRY_TYPE: &str = "cache";

// Environment variable names
pub const CACHESCOPE_LOG_VAR: &str = "CACHESCOPE_LOG";
pub const CACHE_WATCHER_ENABLED_VAR: &str = "CACHESCOPE_CACHE_WATCHER";
pub const CACHE_WATCHER_IGNORE_VAR: &str = "CACHESCOPE_CACHE_IGNORE";
pub const CACHE_WATCHER_HIDDEN_VAR: &str = "CACHESCOPE_CACHE_HIDDEN";

// Event bus
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;
pub const CORRELATION_ID_KEY: &str = "correlation_id";
