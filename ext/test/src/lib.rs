//! unimatch-test: dictionary-shaped contexts for tests and examples.
//!
//! Not a real domain adapter; this crate exists to cut boilerplate when
//! exercising the engine with map-shaped contexts, in unit tests, doctests,
//! and the conformance fixtures. Real domains implement
//! [`DataInput`] for their own context types.

use std::collections::HashMap;

use unimatch::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixtures;

/// The context type for this domain: a flat string map.
pub type MapContext = HashMap<String, String>;

/// Extract a value by key from a [`MapContext`].
///
/// The simplest possible [`DataInput`]: an absent key is
/// [`MatchingData::None`], so a predicate over it evaluates to `false`.
///
/// ```
/// use unimatch::prelude::*;
/// use unimatch_test::MapInput;
///
/// let p = SinglePredicate::new(
///     Box::new(MapInput::new("name")),
///     Box::new(ExactMatcher::new("alice")),
/// );
/// let ctx: unimatch_test::MapContext =
///     [("name".to_string(), "alice".to_string())].into();
/// assert!(p.evaluate(&ctx));
/// assert!(!p.evaluate(&Default::default()));
/// ```
#[derive(Debug, Clone)]
pub struct MapInput {
    key: String,
}

impl MapInput {
    /// Extract the value under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl DataInput<MapContext> for MapInput {
    fn get(&self, ctx: &MapContext) -> MatchingData {
        ctx.get(&self.key)
            .map_or(MatchingData::None, |v| MatchingData::String(v.clone()))
    }
}

/// Configuration for [`MapInput`] when loaded through the registry.
#[cfg(feature = "registry")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MapInputConfig {
    /// The map key to extract.
    pub key: String,
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<MapContext> for MapInput {
    type Config = MapInputConfig;

    fn from_config(config: MapInputConfig) -> Result<Box<dyn DataInput<MapContext>>, MatcherError> {
        if config.key.is_empty() {
            return Err(MatcherError::InvalidConfig(
                "StringInput requires a non-empty `key`".into(),
            ));
        }
        Ok(Box::new(MapInput::new(config.key)))
    }
}

/// Register the test-domain types for [`MapContext`] with the given builder.
///
/// Registers core matchers plus:
/// - `unimatch.test.v1.StringInput` → [`MapInput`], config `{ "key": ... }`
#[cfg(feature = "registry")]
#[must_use]
pub fn register(builder: RegistryBuilder<MapContext>) -> RegistryBuilder<MapContext> {
    register_core_matchers(builder).input::<MapInput>("unimatch.test.v1.StringInput")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> MapContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn present_key_extracts_string() {
        let input = MapInput::new("role");
        assert_eq!(
            input.get(&ctx(&[("role", "admin")])),
            MatchingData::String("admin".into())
        );
    }

    #[test]
    fn absent_key_is_none() {
        let input = MapInput::new("role");
        assert_eq!(input.get(&ctx(&[("other", "admin")])), MatchingData::None);
    }

    #[cfg(feature = "registry")]
    #[test]
    fn register_exposes_string_input() {
        let registry = register(RegistryBuilder::new()).build();
        assert!(registry.contains_input("unimatch.test.v1.StringInput"));
        assert!(registry.contains_matcher("unimatch.core.v1.StringMatcher"));
    }

    #[cfg(feature = "registry")]
    #[test]
    fn factory_rejects_empty_key() {
        use unimatch::IntoDataInput;
        let err = MapInput::from_config(MapInputConfig { key: String::new() }).unwrap_err();
        assert!(matches!(err, MatcherError::InvalidConfig(_)));
    }
}
