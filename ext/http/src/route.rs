//! Route compiler: Gateway-style route specs → matcher trees.
//!
//! [`RouteMatch`] mirrors the shape of a Gateway API `HTTPRouteMatch`
//! without pulling in Kubernetes types: optional path and method plus any
//! number of header and query-parameter conditions. All conditions inside
//! one `RouteMatch` are ANDed; multiple route matches are ORed by
//! [`compile_route_matches`]. A condition-free route match is a catch-all.

use unimatch::prelude::*;

use crate::inputs::{HeaderInput, MethodInput, PathInput, QueryParamInput};
use crate::request::HttpRequest;

/// A catch-all predicate that matches any request (every path starts
/// with the empty prefix).
fn catch_all() -> Predicate<HttpRequest> {
    Predicate::Single(SinglePredicate::new(
        Box::new(PathInput),
        Box::new(PrefixMatcher::new("")),
    ))
}

/// How to match the request path.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum PathMatch {
    /// Exact path equality.
    Exact(String),
    /// Path prefix.
    Prefix(String),
    /// Unanchored regular expression.
    Regex(String),
}

/// How to match a named value (header or query parameter).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum ValueMatch {
    /// Exact equality.
    Exact(String),
    /// Unanchored regular expression.
    Regex(String),
}

impl ValueMatch {
    fn to_matcher(&self) -> Result<Box<dyn InputMatcher>, MatcherError> {
        Ok(match self {
            ValueMatch::Exact(v) => Box::new(ExactMatcher::new(v)),
            ValueMatch::Regex(p) => Box::new(RegexMatcher::new(p)?),
        })
    }
}

/// A header condition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct HeaderMatch {
    /// The header name (matched case-insensitively).
    pub name: String,
    /// The value condition.
    pub value: ValueMatch,
}

/// A query-parameter condition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct QueryParamMatch {
    /// The query parameter name.
    pub name: String,
    /// The value condition.
    pub value: ValueMatch,
}

/// One route match: every present condition must hold.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteMatch {
    /// Optional path condition.
    pub path: Option<PathMatch>,
    /// Optional exact method condition.
    pub method: Option<String>,
    /// Header conditions, all required.
    pub headers: Vec<HeaderMatch>,
    /// Query-parameter conditions, all required.
    pub query_params: Vec<QueryParamMatch>,
}

impl RouteMatch {
    /// Convert this route match into a predicate tree.
    ///
    /// With no conditions this is the catch-all predicate; otherwise the
    /// conditions are ANDed in path, method, headers, query order.
    pub fn to_predicate(&self) -> Result<Predicate<HttpRequest>, MatcherError> {
        let mut predicates = Vec::new();

        if let Some(path) = &self.path {
            let matcher: Box<dyn InputMatcher> = match path {
                PathMatch::Exact(v) => Box::new(ExactMatcher::new(v)),
                PathMatch::Prefix(v) => Box::new(PrefixMatcher::new(v)),
                PathMatch::Regex(p) => Box::new(RegexMatcher::new(p)?),
            };
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(PathInput),
                matcher,
            )));
        }

        if let Some(method) = &self.method {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(MethodInput),
                Box::new(ExactMatcher::new(method)),
            )));
        }

        for header in &self.headers {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(HeaderInput::new(&*header.name)),
                header.value.to_matcher()?,
            )));
        }

        for param in &self.query_params {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(QueryParamInput::new(&*param.name)),
                param.value.to_matcher()?,
            )));
        }

        Ok(and_predicate(predicates, catch_all()))
    }

    /// Compile this route match into a single-rule matcher.
    pub fn compile<A>(&self, action: A) -> Result<Matcher<HttpRequest, A>, MatcherError> {
        matcher_from_predicate(self.to_predicate()?, action, None)
    }
}

/// Compile multiple route matches into one matcher.
///
/// The route matches are ORed (the rule fires if any of them holds), and
/// an empty slice is a catch-all, per Gateway semantics.
pub fn compile_route_matches<A>(
    matches: &[RouteMatch],
    action: A,
    on_no_match: Option<A>,
) -> Result<Matcher<HttpRequest, A>, MatcherError> {
    let predicates = matches
        .iter()
        .map(RouteMatch::to_predicate)
        .collect::<Result<Vec<_>, _>>()?;
    matcher_from_predicate(or_predicate(predicates, catch_all()), action, on_no_match)
}
