//! `DataInput` implementations for [`HookContext`].

use unimatch::prelude::*;

use crate::context::HookContext;

/// Extracts the hook event name as a string.
#[derive(Debug, Clone)]
pub struct EventInput;

impl DataInput<HookContext> for EventInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        MatchingData::String(ctx.event().as_str().to_string())
    }
}

/// Extracts the tool name.
#[derive(Debug, Clone)]
pub struct ToolNameInput;

impl DataInput<HookContext> for ToolNameInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        MatchingData::String(ctx.tool_name().to_string())
    }
}

/// Extracts a tool argument by name.
#[derive(Debug, Clone)]
pub struct ArgumentInput {
    name: String,
}

impl ArgumentInput {
    /// Extract the argument `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DataInput<HookContext> for ArgumentInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        ctx.argument(&self.name)
            .map_or(MatchingData::None, |v| MatchingData::String(v.to_string()))
    }
}

/// Extracts the session id.
#[derive(Debug, Clone)]
pub struct SessionIdInput;

impl DataInput<HookContext> for SessionIdInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        MatchingData::String(ctx.session_id().to_string())
    }
}

/// Extracts the working directory.
#[derive(Debug, Clone)]
pub struct CwdInput;

impl DataInput<HookContext> for CwdInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        MatchingData::String(ctx.cwd().to_string())
    }
}

/// Extracts the git branch, or nothing outside a repository.
#[derive(Debug, Clone)]
pub struct GitBranchInput;

impl DataInput<HookContext> for GitBranchInput {
    fn get(&self, ctx: &HookContext) -> MatchingData {
        ctx.git_branch()
            .map_or(MatchingData::None, |v| MatchingData::String(v.to_string()))
    }
}

// ── Registry support ───────────────────────────────────────────────────────

/// Configuration for [`ArgumentInput`].
#[cfg(feature = "registry")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ArgumentInputConfig {
    /// The argument name to extract.
    pub name: String,
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for EventInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        Ok(Box::new(EventInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for ToolNameInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        Ok(Box::new(ToolNameInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for ArgumentInput {
    type Config = ArgumentInputConfig;

    fn from_config(
        config: ArgumentInputConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        if config.name.is_empty() {
            return Err(MatcherError::InvalidConfig(
                "ArgumentInput requires a non-empty `name`".into(),
            ));
        }
        Ok(Box::new(ArgumentInput::new(config.name)))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for SessionIdInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        Ok(Box::new(SessionIdInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for CwdInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        Ok(Box::new(CwdInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HookContext> for GitBranchInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HookContext>>, MatcherError> {
        Ok(Box::new(GitBranchInput))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HookContext;

    #[test]
    fn event_input_covers_all_variants() {
        for (name, ctx) in [
            ("PreToolUse", HookContext::pre_tool_use("X")),
            ("PostToolUse", HookContext::post_tool_use("X")),
            ("UserPromptSubmit", HookContext::user_prompt_submit()),
            ("SessionStart", HookContext::session_start()),
            ("SessionEnd", HookContext::session_end()),
            ("Stop", HookContext::stop()),
            ("SubagentStop", HookContext::subagent_stop()),
            ("PreCompact", HookContext::pre_compact()),
            ("Notification", HookContext::notification()),
        ] {
            assert_eq!(
                EventInput.get(&ctx),
                MatchingData::String(name.into()),
                "EventInput failed for {name}"
            );
        }
    }

    #[test]
    fn tool_name_input() {
        let ctx = HookContext::pre_tool_use("Write");
        assert_eq!(ToolNameInput.get(&ctx), MatchingData::String("Write".into()));
        assert_eq!(
            ToolNameInput.get(&HookContext::stop()),
            MatchingData::String(String::new())
        );
    }

    #[test]
    fn argument_input_absent_is_none() {
        let ctx = HookContext::pre_tool_use("Bash").with_arg("command", "ls");
        assert_eq!(
            ArgumentInput::new("command").get(&ctx),
            MatchingData::String("ls".into())
        );
        assert_eq!(ArgumentInput::new("file").get(&ctx), MatchingData::None);
    }

    #[test]
    fn session_and_cwd_inputs() {
        let ctx = HookContext::pre_tool_use("Bash")
            .with_session_id("abc-123")
            .with_cwd("/srv/app");
        assert_eq!(
            SessionIdInput.get(&ctx),
            MatchingData::String("abc-123".into())
        );
        assert_eq!(CwdInput.get(&ctx), MatchingData::String("/srv/app".into()));
    }

    #[test]
    fn git_branch_input_absent_is_none() {
        let with_branch = HookContext::pre_tool_use("Bash").with_git_branch("main");
        assert_eq!(
            GitBranchInput.get(&with_branch),
            MatchingData::String("main".into())
        );
        assert_eq!(
            GitBranchInput.get(&HookContext::pre_tool_use("Bash")),
            MatchingData::None
        );
    }
}
