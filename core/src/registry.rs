//! Type registry and config loader.
//!
//! The registry is the single place where untrusted configuration is mapped
//! to behavior. [`RegistryBuilder`] collects `DataInput` and `InputMatcher`
//! factories keyed by type URL; [`RegistryBuilder::build`] freezes them into
//! an immutable [`Registry`]. [`Registry::load_matcher`] then walks a
//! [`MatcherConfig`] AST and emits the runtime tree, enforcing every
//! DoS-relevant bound on the way: list width, compound width, pattern
//! length, and (through the fallible [`Matcher`] constructor) tree depth.
//! The engine itself trusts its inputs.
//!
//! ```no_run
//! # use unimatch::{MatcherConfig, RegistryBuilder, register_core_matchers};
//! # #[derive(Debug)] struct MyInput;
//! # impl unimatch::DataInput<String> for MyInput {
//! #     fn get(&self, ctx: &String) -> unimatch::MatchingData {
//! #         unimatch::MatchingData::String(ctx.clone())
//! #     }
//! # }
//! # impl unimatch::IntoDataInput<String> for MyInput {
//! #     type Config = unimatch::UnitConfig;
//! #     fn from_config(_: unimatch::UnitConfig)
//! #         -> Result<Box<dyn unimatch::DataInput<String>>, unimatch::MatcherError> {
//! #         Ok(Box::new(MyInput))
//! #     }
//! # }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = register_core_matchers(RegistryBuilder::new())
//!     .input::<MyInput>("example.v1.MyInput")
//!     .build();
//!
//! let config: MatcherConfig<String> = MatcherConfig::from_json_str(r#"{
//!     "matchers": [{
//!         "predicate": {
//!             "type": "single",
//!             "input": { "type_url": "example.v1.MyInput" },
//!             "value_match": { "Exact": "hello" }
//!         },
//!         "on_match": { "type": "action", "action": "hit" }
//!     }]
//! }"#)?;
//!
//! let matcher = registry.load_matcher(config)?;
//! assert_eq!(matcher.evaluate(&"hello".to_string()), Some("hit".to_string()));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{
    FieldMatcherConfig, MatcherConfig, OnMatchConfig, PredicateConfig, SinglePredicateConfig,
    StringMatchSpec, TypedConfig, ValueMatchConfig,
};
use crate::error::{MatcherError, TypeUrlKind};
use crate::matcher::{FieldMatcher, Matcher, OnMatch};
use crate::predicate::{Predicate, SinglePredicate};
use crate::string_matchers::{
    BoolMatcher, ContainsMatcher, ExactMatcher, PrefixMatcher, RegexMatcher, SuffixMatcher,
};
use crate::types::{DataInput, InputMatcher};

/// Maximum number of field matchers in one matcher list.
pub const MAX_FIELD_MATCHERS: usize = 256;

/// Maximum number of children in one `and`/`or` compound.
pub const MAX_PREDICATES_PER_COMPOUND: usize = 256;

/// Maximum byte length of a non-regex built-in pattern.
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum byte length of a regex pattern.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

/// Construct a [`DataInput`] from a deserialized config payload.
///
/// Implement this on each input type to make it registrable with
/// [`RegistryBuilder::input`]. Inputs without parameters use
/// [`UnitConfig`](crate::UnitConfig) as their `Config`.
pub trait IntoDataInput<Ctx> {
    /// The deserialized shape of the `config` payload.
    type Config: DeserializeOwned;

    /// Build the input, or reject the payload.
    fn from_config(config: Self::Config) -> Result<Box<dyn DataInput<Ctx>>, MatcherError>;
}

/// Construct an [`InputMatcher`] from a deserialized config payload.
///
/// The matcher-side analogue of [`IntoDataInput`], for
/// [`RegistryBuilder::matcher`].
pub trait IntoInputMatcher {
    /// The deserialized shape of the `config` payload.
    type Config: DeserializeOwned;

    /// Build the matcher, or reject the payload.
    fn from_config(config: Self::Config) -> Result<Box<dyn InputMatcher>, MatcherError>;
}

type InputFactory<Ctx> =
    Box<dyn Fn(&Value) -> Result<Box<dyn DataInput<Ctx>>, MatcherError> + Send + Sync>;
type MatcherFactory =
    Box<dyn Fn(&Value) -> Result<Box<dyn InputMatcher>, MatcherError> + Send + Sync>;

/// Builder for a [`Registry`].
///
/// Registration happens here and only here; after [`build`](Self::build)
/// the table is frozen. Re-registering a type URL replaces the earlier
/// factory.
pub struct RegistryBuilder<Ctx> {
    inputs: BTreeMap<String, InputFactory<Ctx>>,
    matchers: BTreeMap<String, MatcherFactory>,
}

impl<Ctx: 'static> Default for RegistryBuilder<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx: 'static> RegistryBuilder<Ctx> {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: BTreeMap::new(),
            matchers: BTreeMap::new(),
        }
    }

    /// Register a [`DataInput`] factory under a type URL.
    #[must_use]
    pub fn input<T>(mut self, type_url: impl Into<String>) -> Self
    where
        T: IntoDataInput<Ctx> + 'static,
    {
        self.inputs.insert(
            type_url.into(),
            Box::new(|config: &Value| {
                let config = T::Config::deserialize(config)
                    .map_err(|e| MatcherError::InvalidConfig(e.to_string()))?;
                T::from_config(config)
            }),
        );
        self
    }

    /// Register an [`InputMatcher`] factory under a type URL.
    #[must_use]
    pub fn matcher<T>(mut self, type_url: impl Into<String>) -> Self
    where
        T: IntoInputMatcher + 'static,
    {
        self.matchers.insert(
            type_url.into(),
            Box::new(|config: &Value| {
                let config = T::Config::deserialize(config)
                    .map_err(|e| MatcherError::InvalidConfig(e.to_string()))?;
                T::from_config(config)
            }),
        );
        self
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> Registry<Ctx> {
        Registry {
            inputs: self.inputs,
            matchers: self.matchers,
        }
    }
}

/// Register the core matcher types every domain shares:
///
/// - `unimatch.core.v1.StringMatcher` → the built-in string matchers, with
///   an `ignore_case` knob the plain `value_match` form does not carry
/// - `unimatch.core.v1.BoolMatcher` → boolean equality
///
/// Domain `register()` functions call this first so the core types never
/// need re-registering per domain.
#[must_use]
pub fn register_core_matchers<Ctx: 'static>(builder: RegistryBuilder<Ctx>) -> RegistryBuilder<Ctx> {
    builder
        .matcher::<StringMatcher>("unimatch.core.v1.StringMatcher")
        .matcher::<BoolMatcher>("unimatch.core.v1.BoolMatcher")
}

/// Config-driven entry point for the built-in string matchers.
///
/// Registered as `unimatch.core.v1.StringMatcher`. Accepts the same
/// externally tagged variant as `value_match`, plus `ignore_case`:
///
/// ```json
/// { "Exact": "admin", "ignore_case": true }
/// ```
pub struct StringMatcher;

/// Payload for the registered [`StringMatcher`] type.
#[derive(Debug, Clone, Deserialize)]
pub struct StringMatcherConfig {
    /// Which variant, and its pattern.
    #[serde(flatten)]
    pub spec: StringMatchSpec,

    /// Fold case on both sides. Not supported for `Regex`; embed `(?i)`
    /// in the pattern instead.
    #[serde(default)]
    pub ignore_case: bool,
}

impl IntoInputMatcher for StringMatcher {
    type Config = StringMatcherConfig;

    fn from_config(config: StringMatcherConfig) -> Result<Box<dyn InputMatcher>, MatcherError> {
        compile_string_match(&config.spec, config.ignore_case)
    }
}

/// Payload for the registered [`BoolMatcher`] type.
#[derive(Debug, Clone, Deserialize)]
pub struct BoolMatcherConfig {
    /// The boolean to match.
    pub value: bool,
}

impl IntoInputMatcher for BoolMatcher {
    type Config = BoolMatcherConfig;

    fn from_config(config: BoolMatcherConfig) -> Result<Box<dyn InputMatcher>, MatcherError> {
        Ok(Box::new(BoolMatcher::new(config.value)))
    }
}

/// Immutable registry of input and matcher factories.
///
/// The frozen tables are read-only maps, shareable across threads without
/// synchronization. Type URLs are opaque strings; the reverse-DNS-like
/// convention (`unimatch.http.v1.HeaderInput`) is just convention.
pub struct Registry<Ctx> {
    inputs: BTreeMap<String, InputFactory<Ctx>>,
    matchers: BTreeMap<String, MatcherFactory>,
}

impl<Ctx: 'static> Registry<Ctx> {
    /// Number of registered input types.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of registered matcher types.
    #[must_use]
    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    /// Is an input type URL registered?
    #[must_use]
    pub fn contains_input(&self, type_url: &str) -> bool {
        self.inputs.contains_key(type_url)
    }

    /// Is a matcher type URL registered?
    #[must_use]
    pub fn contains_matcher(&self, type_url: &str) -> bool {
        self.matchers.contains_key(type_url)
    }

    /// All registered input type URLs, sorted.
    #[must_use]
    pub fn input_type_urls(&self) -> Vec<String> {
        self.inputs.keys().cloned().collect()
    }

    /// All registered matcher type URLs, sorted.
    #[must_use]
    pub fn matcher_type_urls(&self) -> Vec<String> {
        self.matchers.keys().cloned().collect()
    }

    /// Load a [`Matcher`] from configuration.
    ///
    /// Walks the config AST, resolves inputs and matchers through the
    /// factory tables, compiles built-in string matches, and validates
    /// every width, length, and depth bound. Errors are the full
    /// [`MatcherError`] taxonomy; nothing is deferred to evaluation time.
    pub fn load_matcher<A>(&self, config: MatcherConfig<A>) -> Result<Matcher<Ctx, A>, MatcherError> {
        if config.matchers.len() > MAX_FIELD_MATCHERS {
            return Err(MatcherError::TooManyFieldMatchers {
                count: config.matchers.len(),
                limit: MAX_FIELD_MATCHERS,
            });
        }

        let matchers = config
            .matchers
            .into_iter()
            .map(|fm| self.load_field_matcher(fm))
            .collect::<Result<Vec<_>, _>>()?;

        let on_no_match = config
            .on_no_match
            .map(|om| self.load_on_match(om))
            .transpose()?;

        Matcher::new(matchers, on_no_match)
    }

    fn load_field_matcher<A>(
        &self,
        config: FieldMatcherConfig<A>,
    ) -> Result<FieldMatcher<Ctx, A>, MatcherError> {
        let predicate = self.load_predicate(config.predicate)?;
        let on_match = self.load_on_match(config.on_match)?;
        Ok(FieldMatcher::new(predicate, on_match))
    }

    fn load_predicate(&self, config: PredicateConfig) -> Result<Predicate<Ctx>, MatcherError> {
        match config {
            PredicateConfig::Single(single) => Ok(Predicate::Single(self.load_single(single)?)),
            PredicateConfig::And { predicates } => {
                Ok(Predicate::And(self.load_children(predicates)?))
            }
            PredicateConfig::Or { predicates } => Ok(Predicate::Or(self.load_children(predicates)?)),
            PredicateConfig::Not { predicate } => {
                Ok(Predicate::Not(Box::new(self.load_predicate(*predicate)?)))
            }
        }
    }

    fn load_children(
        &self,
        children: Vec<PredicateConfig>,
    ) -> Result<Vec<Predicate<Ctx>>, MatcherError> {
        if children.len() > MAX_PREDICATES_PER_COMPOUND {
            return Err(MatcherError::TooManyPredicates {
                count: children.len(),
                limit: MAX_PREDICATES_PER_COMPOUND,
            });
        }
        children
            .into_iter()
            .map(|p| self.load_predicate(p))
            .collect()
    }

    fn load_single(
        &self,
        config: SinglePredicateConfig,
    ) -> Result<SinglePredicate<Ctx>, MatcherError> {
        let factory =
            self.inputs
                .get(&config.input.type_url)
                .ok_or_else(|| MatcherError::UnknownTypeUrl {
                    kind: TypeUrlKind::Input,
                    type_url: config.input.type_url.clone(),
                    registered: self.input_type_urls(),
                })?;
        let input = factory(&config.input.config)?;
        let matcher = self.load_value_match(config.matcher)?;
        Ok(SinglePredicate::new(input, matcher))
    }

    fn load_value_match(
        &self,
        config: ValueMatchConfig,
    ) -> Result<Box<dyn InputMatcher>, MatcherError> {
        match config {
            ValueMatchConfig::BuiltIn(spec) => compile_string_match(&spec, false),
            ValueMatchConfig::Custom(tc) => self.load_custom_matcher(&tc),
        }
    }

    fn load_custom_matcher(&self, tc: &TypedConfig) -> Result<Box<dyn InputMatcher>, MatcherError> {
        let factory = self
            .matchers
            .get(&tc.type_url)
            .ok_or_else(|| MatcherError::UnknownTypeUrl {
                kind: TypeUrlKind::Matcher,
                type_url: tc.type_url.clone(),
                registered: self.matcher_type_urls(),
            })?;
        factory(&tc.config)
    }

    fn load_on_match<A>(&self, config: OnMatchConfig<A>) -> Result<OnMatch<Ctx, A>, MatcherError> {
        match config {
            OnMatchConfig::Action { action } => Ok(OnMatch::Action(action)),
            OnMatchConfig::Matcher { matcher } => Ok(OnMatch::Matcher(Box::new(
                self.load_matcher(*matcher)?,
            ))),
        }
    }
}

/// Compile a built-in string match spec into a matcher.
///
/// Pattern length is checked first (`MAX_REGEX_PATTERN_LENGTH` for the
/// regex variant, `MAX_PATTERN_LENGTH` for the rest), then the matcher is
/// constructed (compiling the regex for the regex variant).
pub fn compile_string_match(
    spec: &StringMatchSpec,
    ignore_case: bool,
) -> Result<Box<dyn InputMatcher>, MatcherError> {
    let limit = if spec.is_regex() {
        MAX_REGEX_PATTERN_LENGTH
    } else {
        MAX_PATTERN_LENGTH
    };
    let length = spec.pattern().len();
    if length > limit {
        return Err(MatcherError::PatternTooLong { length, limit });
    }

    Ok(match spec {
        StringMatchSpec::Exact(v) if ignore_case => Box::new(ExactMatcher::ignoring_case(v)),
        StringMatchSpec::Exact(v) => Box::new(ExactMatcher::new(v)),
        StringMatchSpec::Prefix(v) if ignore_case => Box::new(PrefixMatcher::ignoring_case(v)),
        StringMatchSpec::Prefix(v) => Box::new(PrefixMatcher::new(v)),
        StringMatchSpec::Suffix(v) if ignore_case => Box::new(SuffixMatcher::ignoring_case(v)),
        StringMatchSpec::Suffix(v) => Box::new(SuffixMatcher::new(v)),
        StringMatchSpec::Contains(v) if ignore_case => Box::new(ContainsMatcher::ignoring_case(v)),
        StringMatchSpec::Contains(v) => Box::new(ContainsMatcher::new(v)),
        StringMatchSpec::Regex(_) if ignore_case => {
            return Err(MatcherError::InvalidConfig(
                "ignore_case is not supported for Regex; use an inline (?i) flag".into(),
            ))
        }
        StringMatchSpec::Regex(p) => Box::new(RegexMatcher::new(p)?),
    })
}
