//! unimatch-hook: tool-hook domain.
//!
//! Context types, `DataInput` extractors, and a declarative rule compiler
//! for classifying tool-run hook events into actions.
//!
//! # Compiler (recommended)
//!
//! ```
//! use unimatch_hook::prelude::*;
//!
//! # fn main() -> Result<(), MatcherError> {
//! // Block dangerous shell commands, allow everything else.
//! let rule = HookMatch {
//!     event: Some(HookEvent::PreToolUse),
//!     tool_name: Some("Bash".into()),
//!     arguments: vec![ArgumentMatch {
//!         name: "command".into(),
//!         value: StringMatch::Contains("rm -rf".into()),
//!     }],
//!     ..Default::default()
//! };
//! let matcher = rule.compile_with_default("block", "allow")?;
//!
//! let ctx = HookContext::pre_tool_use("Bash").with_arg("command", "rm -rf /important");
//! assert_eq!(matcher.evaluate(&ctx), Some("block"));
//! # Ok(())
//! # }
//! ```
//!
//! # Trace (debugging)
//!
//! ```
//! # use unimatch_hook::prelude::*;
//! # fn main() -> Result<(), MatcherError> {
//! # let rule = HookMatch { tool_name: Some("Bash".into()), ..Default::default() };
//! # let ctx = HookContext::pre_tool_use("Write");
//! let trace = rule.trace(&ctx)?;
//! for step in &trace.steps {
//!     println!("{}: expected {}, got {:?} -> {}",
//!         step.field, step.expected, step.actual, step.matched);
//! }
//! # Ok(())
//! # }
//! ```

mod compiler;
mod context;
mod inputs;

pub use compiler::{
    compile_hook_matches, ArgumentMatch, HookMatch, HookMatchTrace, StringMatch, TraceStep,
};
pub use context::{HookContext, HookEvent};
pub use inputs::{
    ArgumentInput, CwdInput, EventInput, GitBranchInput, SessionIdInput, ToolNameInput,
};

#[cfg(feature = "registry")]
pub use inputs::ArgumentInputConfig;

/// Register all hook-domain types for [`HookContext`] with the given builder.
///
/// Registers core matchers and:
/// - `unimatch.hook.v1.EventInput` → [`EventInput`]
/// - `unimatch.hook.v1.ToolNameInput` → [`ToolNameInput`]
/// - `unimatch.hook.v1.ArgumentInput` → [`ArgumentInput`] (config `{ "name": ... }`)
/// - `unimatch.hook.v1.SessionIdInput` → [`SessionIdInput`]
/// - `unimatch.hook.v1.CwdInput` → [`CwdInput`]
/// - `unimatch.hook.v1.GitBranchInput` → [`GitBranchInput`]
#[cfg(feature = "registry")]
#[must_use]
pub fn register(
    builder: unimatch::RegistryBuilder<HookContext>,
) -> unimatch::RegistryBuilder<HookContext> {
    unimatch::register_core_matchers(builder)
        .input::<EventInput>("unimatch.hook.v1.EventInput")
        .input::<ToolNameInput>("unimatch.hook.v1.ToolNameInput")
        .input::<ArgumentInput>("unimatch.hook.v1.ArgumentInput")
        .input::<SessionIdInput>("unimatch.hook.v1.SessionIdInput")
        .input::<CwdInput>("unimatch.hook.v1.CwdInput")
        .input::<GitBranchInput>("unimatch.hook.v1.GitBranchInput")
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        compile_hook_matches, ArgumentInput, ArgumentMatch, CwdInput, EventInput, GitBranchInput,
        HookContext, HookEvent, HookMatch, HookMatchTrace, SessionIdInput, StringMatch,
        ToolNameInput, TraceStep,
    };
    pub use unimatch::prelude::*;
}
