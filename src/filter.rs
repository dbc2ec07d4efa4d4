//! Path filtering for flat diff results.
//!
//! Glob-style patterns select or suppress dotted diff paths, letting
//! callers ignore noisy keys or focus on one area.
//!
//! # Pattern Syntax
//!
//! - `foo` - matches literal segment "foo"
//! - `*` - matches any single path segment
//! - `**` - matches any number of path segments (including zero)
//! - `foo.bar` - matches nested path "foo.bar"
//! - `**.version` - matches "version" at any depth
//!
//! # Examples
//!
//! ```
//! use jshape::filter::PathPattern;
//!
//! let pattern = PathPattern::parse("metadata.timestamp");
//! assert!(pattern.matches_path("metadata.timestamp"));
//!
//! let pattern = PathPattern::parse("**.version");
//! assert!(pattern.matches_path("package.version"));
//! assert!(pattern.matches_path("dependencies.foo.version"));
//! ```

use crate::diff::FlatDiff;

/// A single segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches an exact string
    Literal(String),
    /// Matches any single path segment (*)
    SingleWildcard,
    /// Matches any number of path segments (**)
    DoubleWildcard,
}

/// A compiled path pattern for matching against dotted diff paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Matches a dotted path string such as `user.profile.age`.
    pub fn matches_path(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        self.matches(&segments)
    }

    pub fn matches(&self, path: &[&str]) -> bool {
        self.matches_recursive(&self.segments, path)
    }

    fn matches_recursive(&self, pattern: &[PatternSegment], path: &[&str]) -> bool {
        match (pattern.first(), path.first()) {
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(_seg), None) => pattern
                .iter()
                .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
            (Some(seg), Some(path_seg)) => match seg {
                PatternSegment::Literal(lit) => {
                    if lit == path_seg {
                        self.matches_recursive(&pattern[1..], &path[1..])
                    } else {
                        false
                    }
                }
                PatternSegment::SingleWildcard => self.matches_recursive(&pattern[1..], &path[1..]),
                PatternSegment::DoubleWildcard => {
                    self.matches_recursive(&pattern[1..], path)
                        || self.matches_recursive(pattern, &path[1..])
                }
            },
        }
    }
}

/// Configuration for filtering flat diff results.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Patterns for paths to ignore (exclude from output)
    pub ignore_patterns: Vec<PathPattern>,
    /// Patterns for paths to include (if non-empty, only these are shown)
    pub only_patterns: Vec<PathPattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &str) -> bool {
        for pattern in &self.ignore_patterns {
            if pattern.matches_path(path) {
                return false;
            }
        }

        // If only patterns are specified, at least one must match
        if !self.only_patterns.is_empty() {
            for pattern in &self.only_patterns {
                if pattern.matches_path(path) {
                    return true;
                }
            }
            return false;
        }

        // No only patterns, and no ignore matched
        true
    }
}

/// Filters a flat diff based on the filter configuration.
pub fn filter_diffs(diffs: &[FlatDiff], config: &FilterConfig) -> Vec<FlatDiff> {
    if !config.has_filters() {
        return diffs.to_vec();
    }

    diffs
        .iter()
        .filter(|diff| config.should_include(&diff.key))
        .cloned()
        .collect()
}
