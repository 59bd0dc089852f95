//! Key filters deciding which cache events are worth recording

use cachescope_core::{Error, Result, QUEUE_RESTART_KEY, SCHEDULE_KEY_PREFIX};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Built-in ignore rule for internal framework keys
///
/// True for the queue restart sentinel and for every key starting with
/// `framework/schedule` (the glob `framework/schedule*`). Case-sensitive.
pub fn should_ignore(key: &str) -> bool {
    key == QUEUE_RESTART_KEY || key.starts_with(SCHEDULE_KEY_PREFIX)
}

/// A compiled list of key patterns
///
/// Patterns containing glob metacharacters (`*`, `?`, `[`, `{`) are matched as
/// globs against the whole key, where `*` also crosses `/`. Anything else is
/// an exact key.
#[derive(Debug, Clone)]
pub struct KeyPatterns {
    exact: HashSet<String>,
    globs: GlobSet,
    sources: Vec<String>,
}

impl KeyPatterns {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut exact = HashSet::new();
        let mut builder = GlobSetBuilder::new();
        let mut sources = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            if is_glob(pattern) {
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(false)
                    .build()
                    .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
                builder.add(glob);
            } else {
                exact.insert(pattern.to_string());
            }
            sources.push(pattern.to_string());
        }

        let globs = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build key globset: {e}")))?;

        Ok(Self {
            exact,
            globs,
            sources,
        })
    }

    pub fn empty() -> Self {
        Self {
            exact: HashSet::new(),
            globs: GlobSet::empty(),
            sources: Vec::new(),
        }
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.exact.contains(key) || (!self.globs.is_empty() && self.globs.is_match(key))
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The patterns this set was compiled from
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

impl Default for KeyPatterns {
    fn default() -> Self {
        Self::empty()
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Ignore filter combining the built-in rule with configured patterns
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    extra: KeyPatterns,
}

impl IgnoreFilter {
    pub fn new(extra: KeyPatterns) -> Self {
        Self { extra }
    }

    pub fn should_ignore(&self, key: &str) -> bool {
        should_ignore(key) || self.extra.is_match(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_queue_restart_sentinel_is_ignored() {
        assert!(should_ignore("illuminate:queue:restart"));
        assert!(!should_ignore("illuminate:queue:restart:extra"));
        assert!(!should_ignore("Illuminate:queue:restart"));
    }

    #[test]
    fn test_schedule_prefix_is_ignored() {
        assert!(should_ignore("framework/schedule"));
        assert!(should_ignore("framework/schedule:job1"));
        assert!(should_ignore("framework/schedule-3f2a/mutex"));
        assert!(!should_ignore("Framework/schedule:job1"));
        assert!(!should_ignore("app/framework/schedule"));
    }

    #[test]
    fn test_empty_key_is_not_ignored() {
        assert!(!should_ignore(""));
        assert!(!IgnoreFilter::default().should_ignore(""));
    }

    #[test]
    fn test_extra_patterns_extend_builtin_rules() {
        let extra = KeyPatterns::compile(&["app_session", "debugbar:*"]).unwrap();
        let filter = IgnoreFilter::new(extra);

        assert!(filter.should_ignore("app_session"));
        assert!(filter.should_ignore("debugbar:pause-recording"));
        assert!(filter.should_ignore("framework/schedule:job1"));
        assert!(!filter.should_ignore("app_session:2"));
        assert!(!filter.should_ignore("user:42"));
    }

    #[test]
    fn test_glob_star_crosses_separators() {
        let patterns = KeyPatterns::compile(&["tenant/*/config"]).unwrap();
        assert!(patterns.is_match("tenant/a/b/config"));
        assert!(!patterns.is_match("tenant/a/b/config/x"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = KeyPatterns::compile(&["user:[0-9"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_patterns_are_skipped() {
        let patterns = KeyPatterns::compile(&["", "a"]).unwrap();
        assert_eq!(patterns.sources(), &["a".to_string()]);
        assert!(!patterns.is_match(""));
    }

    proptest! {
        #[test]
        fn prop_schedule_keys_always_ignored(suffix in ".*") {
            let key = format!("framework/schedule{suffix}");
            prop_assert!(should_ignore(&key));
        }

        #[test]
        fn prop_other_keys_never_ignored(key in "[a-z0-9:/_-]{0,40}") {
            prop_assume!(key != "illuminate:queue:restart");
            prop_assume!(!key.starts_with("framework/schedule"));
            prop_assert!(!should_ignore(&key));
        }
    }
}
