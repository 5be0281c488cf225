//! The two ports every domain plugs into: extraction and matching.
//!
//! [`DataInput`] is domain-specific: it knows how to project a value out of
//! a context type (an HTTP request, a hook event, a plain map). What it
//! returns is the type-erased [`MatchingData`], and from that point on the
//! engine is domain-agnostic: an [`InputMatcher`] only ever sees
//! `MatchingData`, so the same matcher value serves every context type.

/// Type-erased value produced by a [`DataInput`].
///
/// `None` is the "data not available" sentinel, not an error: a
/// [`SinglePredicate`](crate::SinglePredicate) that extracts `None`
/// evaluates to `false` without consulting its matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingData {
    /// A string value (the common case for all built-in matchers).
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Bool(bool),
    /// An opaque byte sequence.
    Bytes(Vec<u8>),
    /// The named data is not present in the context.
    None,
}

impl MatchingData {
    /// Returns `true` if this is the absent sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, MatchingData::None)
    }

    /// Borrow the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MatchingData::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Extracts a value from a domain-specific context.
///
/// Implementations must be pure: side-effect-free and deterministic for a
/// given context. Return [`MatchingData::None`] when the named data is not
/// present, never to signal an error.
pub trait DataInput<Ctx>: std::fmt::Debug + Send + Sync {
    /// Project a value out of the context.
    fn get(&self, ctx: &Ctx) -> MatchingData;
}

/// Matches against a type-erased value.
///
/// Intentionally not parameterized by context: the same
/// [`ExactMatcher`](crate::ExactMatcher) works for HTTP headers, hook tool
/// names, and map lookups alike. Implementations must be total: every
/// `MatchingData` variant produces a boolean. Matchers that only understand
/// certain variants return `false` for all others.
pub trait InputMatcher: std::fmt::Debug + Send + Sync {
    /// Does the value match?
    fn matches(&self, value: &MatchingData) -> bool;
}
