//! Error taxonomy for matcher construction.
//!
//! Every variant is raised at construction time: parsing, loading, or
//! `Matcher::new`. The evaluation path is infallible by design: a matcher
//! either fails to construct with one of these errors, or evaluates
//! deterministically to an action or `None`.

use std::fmt;

use thiserror::Error;

/// Which factory table a type URL lookup went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeUrlKind {
    /// The `DataInput` factory table.
    Input,
    /// The `InputMatcher` factory table.
    Matcher,
}

impl fmt::Display for TypeUrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeUrlKind::Input => f.write_str("input"),
            TypeUrlKind::Matcher => f.write_str("matcher"),
        }
    }
}

/// Errors from matcher parsing, loading, and validation.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The configuration document does not have the expected shape.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A type URL was not found in the registry.
    #[error("unknown {kind} type_url {type_url:?} ({})", fmt_registered(.registered))]
    UnknownTypeUrl {
        /// Which factory table was consulted.
        kind: TypeUrlKind,
        /// The URL that failed to resolve.
        type_url: String,
        /// Every URL registered for the same kind, sorted.
        registered: Vec<String>,
    },

    /// A factory rejected its config payload.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A matcher list is wider than `MAX_FIELD_MATCHERS`.
    #[error("too many field matchers: {count} exceeds maximum {limit}")]
    TooManyFieldMatchers {
        /// Observed list length.
        count: usize,
        /// The enforced limit.
        limit: usize,
    },

    /// A compound predicate has more children than `MAX_PREDICATES_PER_COMPOUND`.
    #[error("too many predicates in compound: {count} exceeds maximum {limit}")]
    TooManyPredicates {
        /// Observed child count.
        count: usize,
        /// The enforced limit.
        limit: usize,
    },

    /// A built-in pattern exceeds its length limit.
    #[error("pattern length {length} exceeds maximum {limit}")]
    PatternTooLong {
        /// Observed pattern length in bytes.
        length: usize,
        /// The enforced limit.
        limit: usize,
    },

    /// The regex engine rejected a pattern (syntax error, or a feature such
    /// as backreferences or lookaround that linear-time matching forbids).
    #[error("invalid regex pattern {pattern:?}: {source}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// The underlying engine error.
        source: regex::Error,
    },

    /// A matcher tree nests deeper than `MAX_DEPTH`.
    #[error("matcher depth {depth} exceeds maximum allowed depth {limit}")]
    DepthExceeded {
        /// Observed tree depth.
        depth: usize,
        /// The enforced limit.
        limit: usize,
    },
}

fn fmt_registered(registered: &[String]) -> String {
    if registered.is_empty() {
        "no types registered".to_string()
    } else {
        format!("registered: {}", registered.join(", "))
    }
}
