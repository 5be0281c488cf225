//! The matcher tree: first-match-wins dispatch over field matchers.
//!
//! Evaluation semantics follow the xDS Unified Matcher contract:
//!
//! - Field matchers are scanned in order; the first one whose predicate
//!   holds *and* whose [`OnMatch`] yields an action wins.
//! - A nested matcher that yields nothing hands control back to the sibling
//!   scan; it does not short-circuit the outer matcher and it does not
//!   jump to `on_no_match`.
//! - `on_no_match` is consulted only after the whole scan comes up empty.
//!
//! Depth is validated in [`Matcher::new`]; a tree deeper than [`MAX_DEPTH`]
//! never constructs and therefore never evaluates.

use crate::error::MatcherError;
use crate::predicate::Predicate;

/// Maximum nesting depth of a matcher tree.
pub const MAX_DEPTH: usize = 32;

/// What to do once a predicate has matched.
///
/// Exclusive by construction: an outcome is an action or a nested matcher,
/// never both.
pub enum OnMatch<Ctx, A> {
    /// Yield this action.
    Action(A),
    /// Descend into a nested matcher. If it yields nothing, the outer scan
    /// continues with the next field matcher.
    Matcher(Box<Matcher<Ctx, A>>),
}

impl<Ctx, A> OnMatch<Ctx, A> {
    fn depth(&self) -> usize {
        match self {
            OnMatch::Action(_) => 0,
            OnMatch::Matcher(m) => m.depth(),
        }
    }
}

impl<Ctx, A: Clone> OnMatch<Ctx, A> {
    fn evaluate(&self, ctx: &Ctx) -> Option<A> {
        match self {
            OnMatch::Action(action) => Some(action.clone()),
            OnMatch::Matcher(m) => m.evaluate(ctx),
        }
    }
}

/// A predicate gating an [`OnMatch`] outcome.
pub struct FieldMatcher<Ctx, A> {
    predicate: Predicate<Ctx>,
    on_match: OnMatch<Ctx, A>,
}

impl<Ctx, A> FieldMatcher<Ctx, A> {
    /// Pair a predicate with its outcome.
    pub fn new(predicate: Predicate<Ctx>, on_match: OnMatch<Ctx, A>) -> Self {
        Self {
            predicate,
            on_match,
        }
    }
}

/// Top-level matcher with first-match-wins semantics.
///
/// Immutable after construction and free of interior state, so a built
/// matcher can be shared across threads and evaluated concurrently without
/// synchronization.
pub struct Matcher<Ctx, A> {
    matcher_list: Vec<FieldMatcher<Ctx, A>>,
    on_no_match: Option<OnMatch<Ctx, A>>,
}

impl<Ctx, A> std::fmt::Debug for Matcher<Ctx, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("matcher_list_len", &self.matcher_list.len())
            .field("has_on_no_match", &self.on_no_match.is_some())
            .finish()
    }
}

impl<Ctx, A> Matcher<Ctx, A> {
    /// Build a matcher from field matchers and an optional fallback.
    ///
    /// Depth is validated here: a tree deeper than [`MAX_DEPTH`] returns
    /// [`MatcherError::DepthExceeded`] and is never evaluated.
    pub fn new(
        matcher_list: Vec<FieldMatcher<Ctx, A>>,
        on_no_match: Option<OnMatch<Ctx, A>>,
    ) -> Result<Self, MatcherError> {
        let matcher = Self {
            matcher_list,
            on_no_match,
        };
        let depth = matcher.depth();
        if depth > MAX_DEPTH {
            return Err(MatcherError::DepthExceeded {
                depth,
                limit: MAX_DEPTH,
            });
        }
        Ok(matcher)
    }

    /// Total nesting depth of this matcher tree, for diagnostics.
    ///
    /// One level for the matcher itself, plus the deepest of its predicate
    /// trees, nested matchers, and `on_no_match`.
    #[must_use]
    pub fn depth(&self) -> usize {
        let predicates = self
            .matcher_list
            .iter()
            .map(|fm| fm.predicate.depth())
            .max()
            .unwrap_or(0);
        let nested = self
            .matcher_list
            .iter()
            .map(|fm| fm.on_match.depth())
            .max()
            .unwrap_or(0);
        let fallback = self.on_no_match.as_ref().map_or(0, OnMatch::depth);
        1 + predicates.max(nested).max(fallback)
    }
}

impl<Ctx, A: Clone> Matcher<Ctx, A> {
    /// Evaluate against a context.
    ///
    /// Returns the action of the first field matcher that matches, the
    /// `on_no_match` result if none did, or `None`. This is the sole hot
    /// path and it cannot fail.
    pub fn evaluate(&self, ctx: &Ctx) -> Option<A> {
        for fm in &self.matcher_list {
            if !fm.predicate.evaluate(ctx) {
                continue;
            }
            if let Some(action) = fm.on_match.evaluate(ctx) {
                return Some(action);
            }
            // Nested matcher yielded nothing: rejoin the sibling scan.
        }
        self.on_no_match.as_ref().and_then(|om| om.evaluate(ctx))
    }
}

/// Wrap a predicate into a single-rule matcher.
///
/// Produces a matcher with one field matcher yielding `action` and, when
/// `on_no_match` is given, an action fallback.
pub fn matcher_from_predicate<Ctx, A>(
    predicate: Predicate<Ctx>,
    action: A,
    on_no_match: Option<A>,
) -> Result<Matcher<Ctx, A>, MatcherError> {
    Matcher::new(
        vec![FieldMatcher::new(predicate, OnMatch::Action(action))],
        on_no_match.map(OnMatch::Action),
    )
}
