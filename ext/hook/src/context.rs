//! Hook event context types.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use unimatch::MatcherError;

/// The lifecycle event a hook fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HookEvent {
    /// Before a tool runs.
    PreToolUse,
    /// After a tool ran.
    PostToolUse,
    /// A prompt was submitted.
    UserPromptSubmit,
    /// A session started.
    SessionStart,
    /// A session ended.
    SessionEnd,
    /// The agent stopped.
    Stop,
    /// A subagent stopped.
    SubagentStop,
    /// Context is about to be compacted.
    PreCompact,
    /// An out-of-band notification.
    Notification,
}

impl HookEvent {
    /// The event name as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HookEvent::PreToolUse => "PreToolUse",
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::UserPromptSubmit => "UserPromptSubmit",
            HookEvent::SessionStart => "SessionStart",
            HookEvent::SessionEnd => "SessionEnd",
            HookEvent::Stop => "Stop",
            HookEvent::SubagentStop => "SubagentStop",
            HookEvent::PreCompact => "PreCompact",
            HookEvent::Notification => "Notification",
        }
    }
}

impl FromStr for HookEvent {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PreToolUse" => HookEvent::PreToolUse,
            "PostToolUse" => HookEvent::PostToolUse,
            "UserPromptSubmit" => HookEvent::UserPromptSubmit,
            "SessionStart" => HookEvent::SessionStart,
            "SessionEnd" => HookEvent::SessionEnd,
            "Stop" => HookEvent::Stop,
            "SubagentStop" => HookEvent::SubagentStop,
            "PreCompact" => HookEvent::PreCompact,
            "Notification" => HookEvent::Notification,
            other => {
                return Err(MatcherError::InvalidConfig(format!(
                    "unknown hook event: {other:?}"
                )))
            }
        })
    }
}

/// A hook invocation: the event plus whatever the runtime knows about it.
///
/// Tool fields are empty for non-tool events; the git branch is optional
/// and extracts to nothing when absent.
#[derive(Debug, Clone)]
pub struct HookContext {
    event: HookEvent,
    tool_name: String,
    arguments: HashMap<String, String>,
    session_id: String,
    cwd: String,
    git_branch: Option<String>,
}

impl HookContext {
    fn new(event: HookEvent, tool_name: impl Into<String>) -> Self {
        Self {
            event,
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            session_id: String::new(),
            cwd: String::new(),
            git_branch: None,
        }
    }

    /// A `PreToolUse` event for the given tool.
    pub fn pre_tool_use(tool_name: impl Into<String>) -> Self {
        Self::new(HookEvent::PreToolUse, tool_name)
    }

    /// A `PostToolUse` event for the given tool.
    pub fn post_tool_use(tool_name: impl Into<String>) -> Self {
        Self::new(HookEvent::PostToolUse, tool_name)
    }

    /// A `UserPromptSubmit` event.
    #[must_use]
    pub fn user_prompt_submit() -> Self {
        Self::new(HookEvent::UserPromptSubmit, "")
    }

    /// A `SessionStart` event.
    #[must_use]
    pub fn session_start() -> Self {
        Self::new(HookEvent::SessionStart, "")
    }

    /// A `SessionEnd` event.
    #[must_use]
    pub fn session_end() -> Self {
        Self::new(HookEvent::SessionEnd, "")
    }

    /// A `Stop` event.
    #[must_use]
    pub fn stop() -> Self {
        Self::new(HookEvent::Stop, "")
    }

    /// A `SubagentStop` event.
    #[must_use]
    pub fn subagent_stop() -> Self {
        Self::new(HookEvent::SubagentStop, "")
    }

    /// A `PreCompact` event.
    #[must_use]
    pub fn pre_compact() -> Self {
        Self::new(HookEvent::PreCompact, "")
    }

    /// A `Notification` event.
    #[must_use]
    pub fn notification() -> Self {
        Self::new(HookEvent::Notification, "")
    }

    /// Attach a tool argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Attach the session id.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Attach the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Attach the git branch.
    #[must_use]
    pub fn with_git_branch(mut self, branch: impl Into<String>) -> Self {
        self.git_branch = Some(branch.into());
        self
    }

    /// The event type.
    #[must_use]
    pub fn event(&self) -> HookEvent {
        self.event
    }

    /// The tool name (empty for non-tool events).
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Look up a tool argument by name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    /// The session id (empty when unknown).
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The working directory (empty when unknown).
    #[must_use]
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// The git branch, or `None` outside a repository.
    #[must_use]
    pub fn git_branch(&self) -> Option<&str> {
        self.git_branch.as_deref()
    }
}
