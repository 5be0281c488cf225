//! Predicate composition: data extraction plus boolean logic.
//!
//! [`SinglePredicate`] pairs a [`DataInput`] with an [`InputMatcher`];
//! [`Predicate`] composes singles with `And`/`Or`/`Not`. Children are
//! evaluated strictly in declaration order with short-circuiting, and the
//! order is part of the contract.

use crate::types::{DataInput, InputMatcher, MatchingData};

/// Extract data from the context, then match it.
///
/// If extraction yields [`MatchingData::None`] the predicate is `false`
/// without consulting the matcher: absent data never matches, even against
/// a matcher that would accept anything.
pub struct SinglePredicate<Ctx> {
    input: Box<dyn DataInput<Ctx>>,
    matcher: Box<dyn InputMatcher>,
}

impl<Ctx> SinglePredicate<Ctx> {
    /// Pair an input with a matcher.
    pub fn new(input: Box<dyn DataInput<Ctx>>, matcher: Box<dyn InputMatcher>) -> Self {
        Self { input, matcher }
    }

    /// Evaluate against a context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        match self.input.get(ctx) {
            MatchingData::None => false,
            value => self.matcher.matches(&value),
        }
    }
}

/// A boolean combination of predicates.
pub enum Predicate<Ctx> {
    /// A single extract-and-match predicate.
    Single(SinglePredicate<Ctx>),
    /// All children must match. Empty `And` is `true` (vacuous truth).
    And(Vec<Predicate<Ctx>>),
    /// Any child must match. Empty `Or` is `false`.
    Or(Vec<Predicate<Ctx>>),
    /// Inverts the inner predicate.
    Not(Box<Predicate<Ctx>>),
}

impl<Ctx> Predicate<Ctx> {
    /// Evaluate against a context.
    ///
    /// `And` short-circuits on the first `false` child, `Or` on the first
    /// `true` child, in declaration order.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        match self {
            Predicate::Single(p) => p.evaluate(ctx),
            Predicate::And(children) => children.iter().all(|p| p.evaluate(ctx)),
            Predicate::Or(children) => children.iter().any(|p| p.evaluate(ctx)),
            Predicate::Not(inner) => !inner.evaluate(ctx),
        }
    }

    /// Nesting depth of this predicate tree.
    ///
    /// `Single` is 1; compounds add one level over their deepest child
    /// (an empty compound is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Predicate::Single(_) => 1,
            Predicate::And(children) | Predicate::Or(children) => {
                1 + children.iter().map(Predicate::depth).max().unwrap_or(0)
            }
            Predicate::Not(inner) => 1 + inner.depth(),
        }
    }
}

/// Compose predicates with AND semantics, unwrapping trivial cases.
///
/// - empty → `catch_all` (no conditions means match everything)
/// - one → the child itself, unwrapped
/// - more → [`Predicate::And`]
///
/// The `catch_all` argument is only consumed for the empty case, letting
/// route compilers supply a match-anything predicate for condition-free
/// rules.
pub fn and_predicate<Ctx>(
    mut predicates: Vec<Predicate<Ctx>>,
    catch_all: Predicate<Ctx>,
) -> Predicate<Ctx> {
    match predicates.len() {
        0 => catch_all,
        1 => predicates.remove(0),
        _ => Predicate::And(predicates),
    }
}

/// Compose predicates with OR semantics. Symmetric with [`and_predicate`].
pub fn or_predicate<Ctx>(
    mut predicates: Vec<Predicate<Ctx>>,
    catch_all: Predicate<Ctx>,
) -> Predicate<Ctx> {
    match predicates.len() {
        0 => catch_all,
        1 => predicates.remove(0),
        _ => Predicate::Or(predicates),
    }
}
