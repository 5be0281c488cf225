//! YAML conformance fixtures.
//!
//! A fixture file is a list of named matchers plus cases: a context and
//! the action it must produce (or `null` for no match). The format keys
//! single predicates by map-context key and spells value matches with
//! lowercase variant names and an optional `ignore_case`:
//!
//! ```yaml
//! - name: exact_role
//!   matcher:
//!     matchers:
//!       - predicate:
//!           single:
//!             input: { key: role }
//!             value_match: { exact: admin }
//!         on_match: { action: allow }
//!     on_no_match: { action: deny }
//!   cases:
//!     - name: admin_allows
//!       context: { role: admin }
//!       expect: allow
//! ```
//!
//! Fixtures compile straight to runtime matchers, with no registry involved,
//! so they exercise the engine semantics, not the loading pipeline.

use std::collections::HashMap;

use serde::Deserialize;
use unimatch::prelude::*;

use crate::{MapContext, MapInput};

/// One named matcher with its expectation table.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Fixture name, used in assertion messages.
    pub name: String,
    /// Optional prose describing what the fixture pins down.
    #[serde(default)]
    pub description: Option<String>,
    /// The matcher under test.
    pub matcher: MatcherSpec,
    /// Contexts and their expected outcomes.
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl Fixture {
    /// Compile this fixture's matcher.
    pub fn compile(&self) -> Result<Matcher<MapContext, String>, MatcherError> {
        compile_matcher(&self.matcher)
    }
}

/// A single context plus the action it must yield (`None` for no match).
#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    /// Case name, used in assertion messages.
    pub name: String,
    /// The map context to evaluate.
    pub context: HashMap<String, String>,
    /// The expected action; absent or `null` means no match.
    #[serde(default)]
    pub expect: Option<String>,
}

/// Matcher shape: ordered field matchers plus optional fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSpec {
    /// Field matchers in evaluation order.
    #[serde(default)]
    pub matchers: Vec<FieldMatcherSpec>,
    /// Fallback outcome.
    #[serde(default)]
    pub on_no_match: Option<OnMatchSpec>,
}

/// Predicate plus outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMatcherSpec {
    /// The gating predicate.
    pub predicate: PredicateSpec,
    /// The outcome when the predicate matches.
    pub on_match: OnMatchSpec,
}

/// Predicate shape, keyed by kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSpec {
    /// `single: { input: { key }, value_match: { ... } }`
    Single(SingleSpec),
    /// `and: [ ... ]`
    And(Vec<PredicateSpec>),
    /// `or: [ ... ]`
    Or(Vec<PredicateSpec>),
    /// `not: { ... }`
    Not(Box<PredicateSpec>),
}

/// A single predicate over one map key.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleSpec {
    /// Which key to extract.
    pub input: InputSpec,
    /// How to match the extracted value.
    pub value_match: ValueMatchSpec,
}

/// Input shape: the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    /// The map key to extract.
    pub key: String,
}

/// Value match shape: exactly one variant key, plus optional case folding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueMatchSpec {
    /// Exact equality.
    #[serde(default)]
    pub exact: Option<String>,
    /// Prefix match.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Suffix match.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Substring search.
    #[serde(default)]
    pub contains: Option<String>,
    /// Unanchored regex search (no `ignore_case`; use an inline `(?i)`).
    #[serde(default)]
    pub regex: Option<String>,
    /// Fold case on both sides for the non-regex variants.
    #[serde(default)]
    pub ignore_case: bool,
}

/// Outcome shape: `action: <string>` or `matcher: { ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnMatchSpec {
    /// Yield this action.
    Action(String),
    /// Descend into a nested matcher.
    Matcher(Box<MatcherSpec>),
}

/// Parse a fixture file (a YAML list of fixtures).
pub fn load_fixtures(yaml: &str) -> Result<Vec<Fixture>, MatcherError> {
    serde_yaml::from_str(yaml).map_err(|e| MatcherError::ConfigParse(e.to_string()))
}

fn compile_matcher(spec: &MatcherSpec) -> Result<Matcher<MapContext, String>, MatcherError> {
    let matchers = spec
        .matchers
        .iter()
        .map(|fm| {
            Ok(FieldMatcher::new(
                compile_predicate(&fm.predicate)?,
                compile_on_match(&fm.on_match)?,
            ))
        })
        .collect::<Result<Vec<_>, MatcherError>>()?;
    let on_no_match = spec
        .on_no_match
        .as_ref()
        .map(compile_on_match)
        .transpose()?;
    Matcher::new(matchers, on_no_match)
}

fn compile_on_match(spec: &OnMatchSpec) -> Result<OnMatch<MapContext, String>, MatcherError> {
    match spec {
        OnMatchSpec::Action(action) => Ok(OnMatch::Action(action.clone())),
        OnMatchSpec::Matcher(inner) => Ok(OnMatch::Matcher(Box::new(compile_matcher(inner)?))),
    }
}

fn compile_predicate(spec: &PredicateSpec) -> Result<Predicate<MapContext>, MatcherError> {
    match spec {
        PredicateSpec::Single(single) => Ok(Predicate::Single(SinglePredicate::new(
            Box::new(MapInput::new(&*single.input.key)),
            compile_value_match(&single.value_match)?,
        ))),
        PredicateSpec::And(children) => Ok(Predicate::And(
            children.iter().map(compile_predicate).collect::<Result<_, _>>()?,
        )),
        PredicateSpec::Or(children) => Ok(Predicate::Or(
            children.iter().map(compile_predicate).collect::<Result<_, _>>()?,
        )),
        PredicateSpec::Not(inner) => Ok(Predicate::Not(Box::new(compile_predicate(inner)?))),
    }
}

fn compile_value_match(spec: &ValueMatchSpec) -> Result<Box<dyn InputMatcher>, MatcherError> {
    let ic = spec.ignore_case;
    let variants = [
        spec.exact.is_some(),
        spec.prefix.is_some(),
        spec.suffix.is_some(),
        spec.contains.is_some(),
        spec.regex.is_some(),
    ];
    if variants.iter().filter(|set| **set).count() != 1 {
        return Err(MatcherError::ConfigParse(
            "value_match must set exactly one of exact/prefix/suffix/contains/regex".into(),
        ));
    }

    if let Some(v) = &spec.exact {
        return Ok(if ic {
            Box::new(ExactMatcher::ignoring_case(v))
        } else {
            Box::new(ExactMatcher::new(v))
        });
    }
    if let Some(v) = &spec.prefix {
        return Ok(if ic {
            Box::new(PrefixMatcher::ignoring_case(v))
        } else {
            Box::new(PrefixMatcher::new(v))
        });
    }
    if let Some(v) = &spec.suffix {
        return Ok(if ic {
            Box::new(SuffixMatcher::ignoring_case(v))
        } else {
            Box::new(SuffixMatcher::new(v))
        });
    }
    if let Some(v) = &spec.contains {
        return Ok(if ic {
            Box::new(ContainsMatcher::ignoring_case(v))
        } else {
            Box::new(ContainsMatcher::new(v))
        });
    }
    if let Some(p) = &spec.regex {
        if ic {
            return Err(MatcherError::ConfigParse(
                "ignore_case is not supported for regex; use an inline (?i) flag".into(),
            ));
        }
        return Ok(Box::new(RegexMatcher::new(p)?));
    }
    unreachable!("exactly-one check above guarantees a variant is set")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_compile_minimal_fixture() {
        let yaml = r"
- name: minimal
  matcher:
    matchers:
      - predicate:
          single:
            input: { key: role }
            value_match: { exact: admin }
        on_match: { action: allow }
  cases:
    - name: hit
      context: { role: admin }
      expect: allow
    - name: miss
      context: { role: viewer }
";
        let fixtures = load_fixtures(yaml).unwrap();
        assert_eq!(fixtures.len(), 1);
        let matcher = fixtures[0].compile().unwrap();
        for case in &fixtures[0].cases {
            assert_eq!(matcher.evaluate(&case.context), case.expect);
        }
    }

    #[test]
    fn value_match_requires_exactly_one_variant() {
        let spec = ValueMatchSpec {
            exact: Some("a".into()),
            prefix: Some("b".into()),
            ..Default::default()
        };
        assert!(compile_value_match(&spec).is_err());
        assert!(compile_value_match(&ValueMatchSpec::default()).is_err());
    }

    #[test]
    fn bad_yaml_is_config_parse() {
        let err = load_fixtures(": not fixtures").unwrap_err();
        assert!(matches!(err, MatcherError::ConfigParse(_)));
    }
}
