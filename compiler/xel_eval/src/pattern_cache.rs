//! Compiled-regex cache for the `matches` operator.

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use tracing::trace;

/// Memoised patterns keyed by their source text.
///
/// Shared by every expression from one parser and safe to use from several
/// threads at once. Entries are never evicted; the cache lives as long as
/// its parser.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Arc<Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled form of `pattern`, anchored so it must match a whole string.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>, regex::Error> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(Arc::clone(&regex));
        }
        // Checked unwrapped: an unbalanced `)` can close the anchoring group.
        Regex::new(pattern)?;
        let regex = Arc::new(Regex::new(&format!("^(?:{pattern})$"))?);
        trace!(pattern, "compiled pattern");
        // A racing thread may have inserted the same pattern; either copy is fine.
        self.patterns
            .entry(pattern.to_owned())
            .or_insert_with(|| Arc::clone(&regex));
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests")]

    use super::*;

    #[test]
    fn patterns_match_whole_strings() {
        let cache = PatternCache::new();
        let regex = cache.get_or_compile("[a-c]+").unwrap();
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abcd"));
        let alternation = cache.get_or_compile("a|b").unwrap();
        assert!(!alternation.is_match("ab"));
    }

    #[test]
    fn compiled_once_per_pattern() {
        let cache = PatternCache::new();
        let first = cache.get_or_compile("x*").unwrap();
        let second = cache.get_or_compile("x*").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalid_pattern_is_reported_and_not_cached() {
        let cache = PatternCache::new();
        assert!(cache.get_or_compile("(").is_err());
        assert!(cache.get_or_compile("x)|(a").is_err());
        assert!(cache.is_empty());
    }
}
