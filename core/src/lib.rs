//! unimatch: a declarative, tree-shaped decision engine.
//!
//! An implementation of the xDS Unified Matcher model: classify an opaque
//! context into a user-defined action, driven by serialized configuration
//! rather than compiled code. The engine performs no I/O, owns no threads,
//! keeps no per-evaluation state, and, once constructed, cannot fail.
//!
//! # The two ports
//!
//! - [`DataInput<Ctx>`] extracts a type-erased [`MatchingData`] value from a
//!   domain-specific context (an HTTP request, a hook event, a map).
//! - [`InputMatcher`] matches that erased value, knowing nothing about any
//!   context. The same `ExactMatcher` serves every domain.
//!
//! Domain knowledge lives only in inputs. That split is the whole design.
//!
//! # Programmatic construction
//!
//! ```
//! use unimatch::prelude::*;
//!
//! #[derive(Debug)]
//! struct Name;
//!
//! impl DataInput<Vec<String>> for Name {
//!     fn get(&self, ctx: &Vec<String>) -> MatchingData {
//!         ctx.first()
//!             .map_or(MatchingData::None, |s| MatchingData::String(s.clone()))
//!     }
//! }
//!
//! # fn main() -> Result<(), MatcherError> {
//! let matcher: Matcher<Vec<String>, &str> = Matcher::new(
//!     vec![FieldMatcher::new(
//!         Predicate::Single(SinglePredicate::new(
//!             Box::new(Name),
//!             Box::new(ExactMatcher::new("alice")),
//!         )),
//!         OnMatch::Action("greet"),
//!     )],
//!     Some(OnMatch::Action("ignore")),
//! )?;
//!
//! assert_eq!(matcher.evaluate(&vec!["alice".to_string()]), Some("greet"));
//! assert_eq!(matcher.evaluate(&vec!["bob".to_string()]), Some("ignore"));
//! assert_eq!(matcher.evaluate(&vec![]), Some("ignore")); // absent never matches
//! # Ok(())
//! # }
//! ```
//!
//! # Config-driven construction
//!
//! With the `registry` feature, matchers load from JSON/YAML documents
//! through a frozen table of type-URL factories; see
//! [`RegistryBuilder`] and [`Registry::load_matcher`]. All resource bounds
//! (list width, pattern length, tree depth) are enforced there, at
//! construction time; the evaluation path stays infallible.
//!
//! # Evaluation semantics
//!
//! Field matchers are scanned first-match-wins, strictly in declaration
//! order. A nested matcher that yields nothing returns control to the
//! sibling scan (it neither aborts the outer matcher nor jumps to
//! `on_no_match`). Absent data (`MatchingData::None`) evaluates a single
//! predicate to `false` without consulting its matcher. Empty `And` is
//! `true`; empty `Or` is `false`.

mod error;
mod matcher;
mod predicate;
mod string_matchers;
mod types;

#[cfg(feature = "serde")]
mod config;
#[cfg(feature = "registry")]
mod registry;

pub use error::{MatcherError, TypeUrlKind};
pub use matcher::{matcher_from_predicate, FieldMatcher, Matcher, OnMatch, MAX_DEPTH};
pub use predicate::{and_predicate, or_predicate, Predicate, SinglePredicate};
pub use string_matchers::{
    BoolMatcher, ContainsMatcher, ExactMatcher, PrefixMatcher, RegexMatcher, SuffixMatcher,
};
pub use types::{DataInput, InputMatcher, MatchingData};

#[cfg(feature = "serde")]
pub use config::{
    FieldMatcherConfig, MatcherConfig, OnMatchConfig, PredicateConfig, SinglePredicateConfig,
    StringMatchSpec, TypedConfig, UnitConfig, ValueMatchConfig,
};

#[cfg(feature = "registry")]
pub use registry::{
    compile_string_match, register_core_matchers, BoolMatcherConfig, IntoDataInput,
    IntoInputMatcher, Registry, RegistryBuilder, StringMatcher, StringMatcherConfig,
    MAX_FIELD_MATCHERS, MAX_PATTERN_LENGTH, MAX_PREDICATES_PER_COMPOUND,
    MAX_REGEX_PATTERN_LENGTH,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        and_predicate, matcher_from_predicate, or_predicate, BoolMatcher, ContainsMatcher,
        DataInput, ExactMatcher, FieldMatcher, InputMatcher, Matcher, MatcherError, MatchingData,
        OnMatch, Predicate, PrefixMatcher, RegexMatcher, SinglePredicate, SuffixMatcher,
        MAX_DEPTH,
    };

    #[cfg(feature = "registry")]
    pub use crate::{register_core_matchers, Registry, RegistryBuilder};
}
