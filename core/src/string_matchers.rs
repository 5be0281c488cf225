//! Built-in [`InputMatcher`] implementations.
//!
//! The five string matchers mirror the xDS `StringMatcher` variants. Each is
//! immutable after construction: case-insensitive matchers fold their
//! comparison value once up front and fold the input per call, and
//! [`RegexMatcher`] holds a compiled automaton.
//!
//! Case folding is Unicode simple case folding (`ib-unicode`), the same
//! table the `regex` crate applies under `(?i)`, so built-in and regex
//! case-insensitivity agree on what "equal ignoring case" means.
//!
//! All string matchers return `false` for non-string values, including
//! [`MatchingData::None`].

use ib_unicode::case::StrCaseExt;
use regex::Regex;

use crate::error::MatcherError;
use crate::types::{InputMatcher, MatchingData};

fn fold(s: &str) -> String {
    s.to_simple_fold_case()
}

/// Exact string equality.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    cmp: String,
    ignore_case: bool,
}

impl ExactMatcher {
    /// Case-sensitive equality with `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            cmp: value.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive equality with `value`. The comparison value is
    /// folded here, once.
    pub fn ignoring_case(value: impl Into<String>) -> Self {
        Self {
            cmp: fold(&value.into()),
            ignore_case: true,
        }
    }
}

impl InputMatcher for ExactMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        let Some(s) = value.as_str() else { return false };
        if self.ignore_case {
            fold(s) == self.cmp
        } else {
            s == self.cmp
        }
    }
}

/// String prefix match.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    cmp: String,
    ignore_case: bool,
}

impl PrefixMatcher {
    /// Case-sensitive prefix match. An empty prefix matches every string,
    /// which makes this the conventional catch-all matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            cmp: prefix.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive prefix match.
    pub fn ignoring_case(prefix: impl Into<String>) -> Self {
        Self {
            cmp: fold(&prefix.into()),
            ignore_case: true,
        }
    }
}

impl InputMatcher for PrefixMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        let Some(s) = value.as_str() else { return false };
        if self.ignore_case {
            fold(s).starts_with(&self.cmp)
        } else {
            s.starts_with(&self.cmp)
        }
    }
}

/// String suffix match.
#[derive(Debug, Clone)]
pub struct SuffixMatcher {
    cmp: String,
    ignore_case: bool,
}

impl SuffixMatcher {
    /// Case-sensitive suffix match.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            cmp: suffix.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive suffix match.
    pub fn ignoring_case(suffix: impl Into<String>) -> Self {
        Self {
            cmp: fold(&suffix.into()),
            ignore_case: true,
        }
    }
}

impl InputMatcher for SuffixMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        let Some(s) = value.as_str() else { return false };
        if self.ignore_case {
            fold(s).ends_with(&self.cmp)
        } else {
            s.ends_with(&self.cmp)
        }
    }
}

/// Substring search.
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    cmp: String,
    ignore_case: bool,
}

impl ContainsMatcher {
    /// Case-sensitive substring search.
    pub fn new(substring: impl Into<String>) -> Self {
        Self {
            cmp: substring.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive substring search.
    pub fn ignoring_case(substring: impl Into<String>) -> Self {
        Self {
            cmp: fold(&substring.into()),
            ignore_case: true,
        }
    }
}

impl InputMatcher for ContainsMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        let Some(s) = value.as_str() else { return false };
        if self.ignore_case {
            fold(s).contains(&self.cmp)
        } else {
            s.contains(&self.cmp)
        }
    }
}

/// Regular expression match.
///
/// The pattern is compiled once at construction. Matching is an unanchored
/// search (the pattern may match anywhere in the input) and runs in time
/// linear in the input length. Backreferences and lookaround are not part
/// of the `regex` crate's language; patterns using them fail construction
/// with [`MatcherError::InvalidRegex`].
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern`. The pattern is taken literally; no anchors or
    /// other syntactic wrappers are added.
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        let regex = Regex::new(pattern).map_err(|source| MatcherError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// The source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl InputMatcher for RegexMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        let Some(s) = value.as_str() else { return false };
        self.regex.is_match(s)
    }
}

/// Boolean equality match.
///
/// The only built-in matcher for non-string data; everything else in this
/// module rejects [`MatchingData::Bool`].
#[derive(Debug, Clone)]
pub struct BoolMatcher {
    expected: bool,
}

impl BoolMatcher {
    /// Match boolean values equal to `expected`.
    #[must_use]
    pub fn new(expected: bool) -> Self {
        Self { expected }
    }
}

impl InputMatcher for BoolMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        matches!(value, MatchingData::Bool(b) if *b == self.expected)
    }
}
