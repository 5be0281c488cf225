//! Serde-facing configuration AST.
//!
//! These types are the typed mirror of the JSON/YAML matcher document. They
//! carry no semantics of their own: no regex compilation, no limit checks,
//! no factory resolution. All of that happens when a
//! [`Registry`](crate::Registry) loads the AST into a runtime
//! [`Matcher`](crate::Matcher); the parser's only job is shape.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "matchers": [
//!     {
//!       "predicate": {
//!         "type": "single",
//!         "input": { "type_url": "unimatch.test.v1.StringInput",
//!                    "config": { "key": "role" } },
//!         "value_match": { "Exact": "admin" }
//!       },
//!       "on_match": { "type": "action", "action": "allow" }
//!     }
//!   ],
//!   "on_no_match": { "type": "action", "action": "deny" }
//! }
//! ```
//!
//! Unknown keys are ignored; missing required keys surface as structured
//! deserialization errors naming the field.

use serde::Deserialize;

use crate::error::MatcherError;

/// Configuration for a [`Matcher`](crate::Matcher).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct MatcherConfig<A> {
    /// Field matchers, evaluated in order (first-match-wins).
    pub matchers: Vec<FieldMatcherConfig<A>>,

    /// Fallback when no field matcher yields a result.
    #[serde(default)]
    pub on_no_match: Option<OnMatchConfig<A>>,
}

impl<A> MatcherConfig<A>
where
    A: serde::de::DeserializeOwned,
{
    /// Parse a JSON document into a config AST.
    ///
    /// Decode failures come back as [`MatcherError::ConfigParse`]. For YAML
    /// (or any other serde format), deserialize `MatcherConfig` directly
    /// with that format's deserializer.
    pub fn from_json_str(json: &str) -> Result<Self, MatcherError> {
        serde_json::from_str(json).map_err(|e| MatcherError::ConfigParse(e.to_string()))
    }
}

/// Configuration for a [`FieldMatcher`](crate::FieldMatcher).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct FieldMatcherConfig<A> {
    /// The gating predicate.
    pub predicate: PredicateConfig,

    /// Outcome when the predicate matches.
    pub on_match: OnMatchConfig<A>,
}

/// Configuration for a [`Predicate`](crate::Predicate).
///
/// Discriminated by the `"type"` key: `single`, `and`, `or`, `not`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredicateConfig {
    /// A single predicate: input plus value match.
    Single(SinglePredicateConfig),

    /// All children must match.
    And {
        /// Child predicates, evaluated in order.
        predicates: Vec<PredicateConfig>,
    },

    /// Any child must match.
    Or {
        /// Child predicates, evaluated in order.
        predicates: Vec<PredicateConfig>,
    },

    /// Inverts the inner predicate.
    Not {
        /// The predicate to negate.
        predicate: Box<PredicateConfig>,
    },
}

/// The five built-in string match variants, externally tagged:
/// `{ "Exact": "admin" }`, `{ "Prefix": "/api" }`, `{ "Regex": "^v[0-9]+" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum StringMatchSpec {
    /// Exact equality.
    Exact(String),
    /// Prefix match.
    Prefix(String),
    /// Suffix match.
    Suffix(String),
    /// Substring search.
    Contains(String),
    /// Unanchored regular-expression search.
    Regex(String),
}

impl StringMatchSpec {
    /// The raw pattern string, whichever variant holds it.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            StringMatchSpec::Exact(p)
            | StringMatchSpec::Prefix(p)
            | StringMatchSpec::Suffix(p)
            | StringMatchSpec::Contains(p)
            | StringMatchSpec::Regex(p) => p,
        }
    }

    /// Whether this is the regex variant (which carries its own, tighter
    /// pattern-length limit).
    #[must_use]
    pub fn is_regex(&self) -> bool {
        matches!(self, StringMatchSpec::Regex(_))
    }
}

/// How a single predicate matches the extracted value.
///
/// Mirrors the xDS `oneof` in `SinglePredicate`: either a built-in string
/// match (`value_match` key) or a registry-dispatched custom matcher
/// (`custom_match` key). The enum makes the exclusivity structural.
#[derive(Debug, Clone)]
pub enum ValueMatchConfig {
    /// Built-in string matching.
    BuiltIn(StringMatchSpec),
    /// Custom matcher resolved through the registry's matcher factories.
    Custom(TypedConfig),
}

/// Configuration for a [`SinglePredicate`](crate::SinglePredicate):
/// a typed input reference plus exactly one of `value_match` /
/// `custom_match`.
#[derive(Debug, Clone)]
pub struct SinglePredicateConfig {
    /// The input to extract data from the context, resolved at load time
    /// by type URL.
    pub input: TypedConfig,

    /// How to match the extracted value.
    pub matcher: ValueMatchConfig,
}

impl<'de> Deserialize<'de> for SinglePredicateConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Both oneof arms land in Options; exactly-one-set is checked here
        // so a malformed document fails at parse time, not load time.
        #[derive(Deserialize)]
        struct Raw {
            input: TypedConfig,
            #[serde(default)]
            value_match: Option<StringMatchSpec>,
            #[serde(default)]
            custom_match: Option<TypedConfig>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let matcher = match (raw.value_match, raw.custom_match) {
            (Some(spec), None) => ValueMatchConfig::BuiltIn(spec),
            (None, Some(tc)) => ValueMatchConfig::Custom(tc),
            (Some(_), Some(_)) => {
                return Err(serde::de::Error::custom(
                    "exactly one of `value_match` or `custom_match` must be set, got both",
                ))
            }
            (None, None) => {
                return Err(serde::de::Error::custom(
                    "one of `value_match` or `custom_match` is required",
                ))
            }
        };
        Ok(SinglePredicateConfig {
            input: raw.input,
            matcher,
        })
    }
}

/// Reference to a registered type plus its configuration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TypedConfig {
    /// Key into the registry's factory tables. Opaque; convention is a
    /// reverse-DNS-like namespace such as `unimatch.http.v1.HeaderInput`.
    pub type_url: String,

    /// Type-specific payload, handed verbatim to the factory. Defaults to
    /// an empty object when absent.
    #[serde(default = "empty_object")]
    pub config: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Accept-and-ignore config for inputs that take no parameters.
///
/// Deserializes from anything (`{}`, `null`, stray keys) and discards it.
/// Use as the `Config` associated type in
/// [`IntoDataInput`](crate::IntoDataInput) for self-contained inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConfig;

impl<'de> Deserialize<'de> for UnitConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(UnitConfig)
    }
}

/// Configuration for an [`OnMatch`](crate::OnMatch).
///
/// Discriminated by the `"type"` key: `action` or `matcher`. Exclusivity is
/// structural: the discriminator picks exactly one arm.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub enum OnMatchConfig<A> {
    /// Yield this action.
    Action {
        /// The action value.
        action: A,
    },

    /// Descend into a nested matcher.
    Matcher {
        /// The nested matcher configuration.
        matcher: Box<MatcherConfig<A>>,
    },
}
