//! Skip patterns value object
//!
//! Decides which entries are left alone by a sync run. A path is skipped when
//! it contains any configured pattern as a plain substring. No glob or regex
//! semantics are applied: `.git` skips `/.git/config` and `/.gitignore` alike.

use super::RelPath;

/// Ordered set of substring patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipPatterns {
    patterns: Vec<String>,
}

impl SkipPatterns {
    /// Create an empty pattern set (skips nothing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from configured patterns.
    ///
    /// Empty patterns are dropped (an empty substring would match every
    /// path) and duplicates keep their first position.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into();
            if pattern.is_empty() || out.contains(&pattern) {
                continue;
            }
            out.push(pattern);
        }
        Self { patterns: out }
    }

    /// Check whether a path should be skipped.
    pub fn should_skip(&self, path: &RelPath) -> bool {
        self.matching_pattern(path.as_str()).is_some()
    }

    /// Return the first pattern contained in `path`, if any.
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| path.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
