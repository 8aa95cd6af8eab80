//! Path matching predicates.
//!
//! # Design Decisions
//! - Matchers look at the path only (query already stripped)
//! - Case-sensitive unless the matcher says otherwise
//! - No regex; plain string operations
//! - `AnyMatcher` combines with OR semantics

use std::fmt::Debug;

/// Trait for matching a request path against a condition.
pub trait Matcher: Send + Sync + Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches paths ending with a suffix.
#[derive(Debug, Clone)]
pub struct SuffixMatcher {
    suffix: String,
}

impl SuffixMatcher {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Matcher for SuffixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }
}

/// Matches paths starting with a prefix.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches one of a set of exact paths.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    paths: Vec<String>,
}

impl ExactMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    pub fn one_of<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Matches paths containing a substring anywhere.
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    needle: String,
    ignore_case: bool,
}

impl ContainsMatcher {
    /// Case-sensitive substring match.
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive substring match. The needle is normalized to lowercase.
    pub fn ignore_case(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into().to_lowercase(),
            ignore_case: true,
        }
    }
}

impl Matcher for ContainsMatcher {
    fn matches(&self, path: &str) -> bool {
        if self.ignore_case {
            path.to_lowercase().contains(&self.needle)
        } else {
            path.contains(&self.needle)
        }
    }
}

/// Matches every path. Used as the catch-all at the end of a rule list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatcher;

impl Matcher for AlwaysMatcher {
    fn matches(&self, _path: &str) -> bool {
        true
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
