//! Configuration for the cache watcher

use crate::filter::{IgnoreFilter, KeyPatterns};
use cachescope_core::{
    Error, Result, ResultExt, CACHE_WATCHER_ENABLED_VAR, CACHE_WATCHER_HIDDEN_VAR,
    CACHE_WATCHER_IGNORE_VAR,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cache watcher configuration
///
/// Loaded from a JSON file, from `CACHESCOPE_CACHE_*` environment variables,
/// or built in code. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Whether the watcher subscribes to cache events at all
    pub enabled: bool,
    /// Extra keys or globs to skip, on top of the built-in rules
    pub ignore: Vec<String>,
    /// Keys or globs whose values are masked in recorded entries
    pub hidden: Vec<String>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore: Vec::new(),
            hidden: Vec::new(),
        }
    }
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_hidden<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read watcher config", e))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid watcher config in '{}'", path.display()))
    }

    /// Load configuration from the environment, starting from defaults
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Apply environment variable overrides on top of this configuration
    ///
    /// The enabled flag is replaced; ignore and hidden lists are extended.
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(CACHE_WATCHER_ENABLED_VAR) {
            self.enabled = parse_bool(CACHE_WATCHER_ENABLED_VAR, &value)?;
        }
        if let Ok(value) = std::env::var(CACHE_WATCHER_IGNORE_VAR) {
            self.ignore.extend(split_list(&value));
        }
        if let Ok(value) = std::env::var(CACHE_WATCHER_HIDDEN_VAR) {
            self.hidden.extend(split_list(&value));
        }
        Ok(self)
    }

    /// Compile the ignore list into a filter
    pub fn ignore_filter(&self) -> Result<IgnoreFilter> {
        Ok(IgnoreFilter::new(KeyPatterns::compile(self.ignore.as_slice())?))
    }

    /// Compile the hidden list
    pub fn hidden_patterns(&self) -> Result<KeyPatterns> {
        KeyPatterns::compile(self.hidden.as_slice())
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{other}'"
        ))),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
