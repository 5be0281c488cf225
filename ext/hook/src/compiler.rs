//! Declarative hook rules compiled into matcher trees.
//!
//! [`HookMatch`] is the rule shape most callers want: one optional
//! condition per context field, everything present ANDed. Rules are
//! fail-closed: a rule with no conditions only compiles when
//! `match_all` is set explicitly, so a deserialization bug can't turn
//! into an accidental catch-all.

use serde::Deserialize;
use unimatch::prelude::*;

use crate::context::{HookContext, HookEvent};
use crate::inputs::{
    ArgumentInput, CwdInput, EventInput, GitBranchInput, SessionIdInput, ToolNameInput,
};

/// How to match a string-valued field.
///
/// In serialized rules, a bare string is shorthand for `Exact`:
/// `tool_name: Bash` and `tool_name: { Exact: Bash }` are the same rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringMatch {
    /// Exact equality.
    Exact(String),
    /// Prefix match.
    Prefix(String),
    /// Suffix match.
    Suffix(String),
    /// Substring search.
    Contains(String),
    /// Unanchored regular expression.
    Regex(String),
}

impl StringMatch {
    fn to_matcher(&self) -> Result<Box<dyn InputMatcher>, MatcherError> {
        Ok(match self {
            StringMatch::Exact(v) => Box::new(ExactMatcher::new(v)),
            StringMatch::Prefix(v) => Box::new(PrefixMatcher::new(v)),
            StringMatch::Suffix(v) => Box::new(SuffixMatcher::new(v)),
            StringMatch::Contains(v) => Box::new(ContainsMatcher::new(v)),
            StringMatch::Regex(p) => Box::new(RegexMatcher::new(p)?),
        })
    }

    fn describe(&self) -> String {
        match self {
            StringMatch::Exact(v) => format!("== {v:?}"),
            StringMatch::Prefix(v) => format!("starts with {v:?}"),
            StringMatch::Suffix(v) => format!("ends with {v:?}"),
            StringMatch::Contains(v) => format!("contains {v:?}"),
            StringMatch::Regex(p) => format!("matches /{p}/"),
        }
    }

    fn holds(&self, value: &MatchingData) -> Result<bool, MatcherError> {
        Ok(self.to_matcher()?.matches(value))
    }
}

impl From<&str> for StringMatch {
    fn from(value: &str) -> Self {
        StringMatch::Exact(value.to_string())
    }
}

impl From<String> for StringMatch {
    fn from(value: String) -> Self {
        StringMatch::Exact(value)
    }
}

impl<'de> Deserialize<'de> for StringMatch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        enum Tagged {
            Exact(String),
            Prefix(String),
            Suffix(String),
            Contains(String),
            Regex(String),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Tagged(Tagged),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(v) => StringMatch::Exact(v),
            Repr::Tagged(Tagged::Exact(v)) => StringMatch::Exact(v),
            Repr::Tagged(Tagged::Prefix(v)) => StringMatch::Prefix(v),
            Repr::Tagged(Tagged::Suffix(v)) => StringMatch::Suffix(v),
            Repr::Tagged(Tagged::Contains(v)) => StringMatch::Contains(v),
            Repr::Tagged(Tagged::Regex(v)) => StringMatch::Regex(v),
        })
    }
}

/// A condition on one tool argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArgumentMatch {
    /// The argument name.
    pub name: String,
    /// The value condition.
    pub value: StringMatch,
}

/// A declarative hook rule.
///
/// All present fields are ANDed; omitted fields match anything. An empty
/// rule is rejected at compile time unless `match_all` is set, the
/// fail-closed default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookMatch {
    /// Required event type.
    pub event: Option<HookEvent>,
    /// Condition on the tool name.
    pub tool_name: Option<StringMatch>,
    /// Conditions on tool arguments, all required.
    pub arguments: Vec<ArgumentMatch>,
    /// Condition on the session id.
    pub session_id: Option<StringMatch>,
    /// Condition on the working directory.
    pub cwd: Option<StringMatch>,
    /// Condition on the git branch. Absent branches never match.
    pub git_branch: Option<StringMatch>,
    /// Explicitly allow an otherwise-empty rule to match everything.
    pub match_all: bool,
}

impl HookMatch {
    fn is_empty(&self) -> bool {
        self.event.is_none()
            && self.tool_name.is_none()
            && self.arguments.is_empty()
            && self.session_id.is_none()
            && self.cwd.is_none()
            && self.git_branch.is_none()
    }

    /// Convert this rule into a predicate tree.
    pub fn to_predicate(&self) -> Result<Predicate<HookContext>, MatcherError> {
        if self.is_empty() && !self.match_all {
            return Err(MatcherError::InvalidConfig(
                "empty hook rule matches nothing; set match_all to match everything".into(),
            ));
        }

        let mut predicates: Vec<Predicate<HookContext>> = Vec::new();

        if let Some(event) = self.event {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(EventInput),
                Box::new(ExactMatcher::new(event.as_str())),
            )));
        }
        if let Some(tool_name) = &self.tool_name {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(ToolNameInput),
                tool_name.to_matcher()?,
            )));
        }
        for arg in &self.arguments {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(ArgumentInput::new(&*arg.name)),
                arg.value.to_matcher()?,
            )));
        }
        if let Some(session_id) = &self.session_id {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(SessionIdInput),
                session_id.to_matcher()?,
            )));
        }
        if let Some(cwd) = &self.cwd {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(CwdInput),
                cwd.to_matcher()?,
            )));
        }
        if let Some(git_branch) = &self.git_branch {
            predicates.push(Predicate::Single(SinglePredicate::new(
                Box::new(GitBranchInput),
                git_branch.to_matcher()?,
            )));
        }

        // match_all with no conditions: an empty conjunction is true.
        Ok(and_predicate(predicates, Predicate::And(vec![])))
    }

    /// Compile into a single-rule matcher with no fallback.
    pub fn compile<A>(&self, action: A) -> Result<Matcher<HookContext, A>, MatcherError> {
        matcher_from_predicate(self.to_predicate()?, action, None)
    }

    /// Compile into a single-rule matcher with an action fallback.
    pub fn compile_with_default<A>(
        &self,
        action: A,
        default: A,
    ) -> Result<Matcher<HookContext, A>, MatcherError> {
        matcher_from_predicate(self.to_predicate()?, action, Some(default))
    }

    /// Explain this rule against a context, field by field.
    ///
    /// Intended for debugging rule files: each configured field produces a
    /// step with what was expected, what the context held, and whether it
    /// matched. Fails only if a regex in the rule fails to compile.
    pub fn trace(&self, ctx: &HookContext) -> Result<HookMatchTrace, MatcherError> {
        let mut steps = Vec::new();

        if let Some(event) = self.event {
            steps.push(TraceStep {
                field: "event".into(),
                expected: format!("== {:?}", event.as_str()),
                actual: ctx.event().as_str().to_string(),
                matched: ctx.event() == event,
            });
        }
        if let Some(tool_name) = &self.tool_name {
            steps.push(TraceStep {
                field: "tool_name".into(),
                expected: tool_name.describe(),
                actual: ctx.tool_name().to_string(),
                matched: tool_name.holds(&ToolNameInput.get(ctx))?,
            });
        }
        for arg in &self.arguments {
            let value = ArgumentInput::new(&*arg.name).get(ctx);
            steps.push(TraceStep {
                field: format!("arguments.{}", arg.name),
                expected: arg.value.describe(),
                actual: value.as_str().unwrap_or("<absent>").to_string(),
                matched: !value.is_none() && arg.value.holds(&value)?,
            });
        }
        if let Some(session_id) = &self.session_id {
            steps.push(TraceStep {
                field: "session_id".into(),
                expected: session_id.describe(),
                actual: ctx.session_id().to_string(),
                matched: session_id.holds(&SessionIdInput.get(ctx))?,
            });
        }
        if let Some(cwd) = &self.cwd {
            steps.push(TraceStep {
                field: "cwd".into(),
                expected: cwd.describe(),
                actual: ctx.cwd().to_string(),
                matched: cwd.holds(&CwdInput.get(ctx))?,
            });
        }
        if let Some(git_branch) = &self.git_branch {
            let value = GitBranchInput.get(ctx);
            steps.push(TraceStep {
                field: "git_branch".into(),
                expected: git_branch.describe(),
                actual: value.as_str().unwrap_or("<absent>").to_string(),
                matched: !value.is_none() && git_branch.holds(&value)?,
            });
        }

        let matched = if steps.is_empty() {
            self.match_all
        } else {
            steps.iter().all(|s| s.matched)
        };
        Ok(HookMatchTrace { matched, steps })
    }
}

/// The per-field explanation produced by [`HookMatch::trace`].
#[derive(Debug, Clone)]
pub struct HookMatchTrace {
    /// Whether the whole rule matched.
    pub matched: bool,
    /// One step per configured field, in evaluation order.
    pub steps: Vec<TraceStep>,
}

/// One field comparison in a [`HookMatchTrace`].
#[derive(Debug, Clone)]
pub struct TraceStep {
    /// Which rule field produced this step.
    pub field: String,
    /// Human-readable description of the condition.
    pub expected: String,
    /// The value the context held (`<absent>` when missing).
    pub actual: String,
    /// Whether this field matched.
    pub matched: bool,
}

/// Compile a rule table into one first-match-wins matcher.
///
/// Rules are scanned in order; the first matching rule's action wins, and
/// `on_no_match` (when given) applies if none do.
pub fn compile_hook_matches<A>(
    rules: impl IntoIterator<Item = (HookMatch, A)>,
    on_no_match: Option<A>,
) -> Result<Matcher<HookContext, A>, MatcherError> {
    let matchers = rules
        .into_iter()
        .map(|(rule, action)| Ok(FieldMatcher::new(rule.to_predicate()?, OnMatch::Action(action))))
        .collect::<Result<Vec<_>, MatcherError>>()?;
    Matcher::new(matchers, on_no_match.map(OnMatch::Action))
}
