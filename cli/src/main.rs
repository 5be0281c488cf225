//! unimatch CLI: load a matcher config, evaluate contexts against it.
//!
//! ```text
//! unimatch <domain> <config-file> [context-file]
//! ```
//!
//! `domain` selects the registry and context shape:
//!
//! - `map`: contexts are flat JSON string maps
//! - `http`: contexts are `{ method, path, headers, query_params }`
//! - `hook`: contexts are `{ event, tool_name, arguments, ... }`
//!
//! The config file is a matcher document, JSON or YAML by extension.
//! Contexts are read as JSON objects, one per line, from the context file
//! or stdin; the evaluated action (or `null`) prints per line. Actions are
//! opaque JSON values. Construction errors exit non-zero before any
//! context is read; evaluation itself cannot fail.

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::process::ExitCode;

use serde::Deserialize;
use serde_json::Value;
use unimatch::{Matcher, MatcherConfig, MatcherError, RegistryBuilder};
use unimatch_hook::{HookContext, HookEvent};
use unimatch_http::HttpRequest;
use unimatch_test::MapContext;

const USAGE: &str = "usage: unimatch <map|http|hook> <config-file> [context-file]

The config file is a matcher document (JSON, or YAML with a .yaml/.yml
extension). Contexts are JSON objects, one per line, from the context
file or stdin. The matched action (or null) prints per context.";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unimatch: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (domain, config_path, context_path) = match args.as_slice() {
        [domain, config] => (domain.as_str(), config.as_str(), None),
        [domain, config, context] => (domain.as_str(), config.as_str(), Some(context.as_str())),
        _ => return Err(USAGE.into()),
    };

    let config = parse_config(&fs::read_to_string(config_path)?, config_path)?;
    let lines = context_lines(context_path)?;

    match domain {
        "map" => {
            let registry = unimatch_test::register(RegistryBuilder::new()).build();
            evaluate_all(&registry.load_matcher(config)?, &lines, |line| {
                Ok(serde_json::from_str::<MapContext>(line)?)
            })
        }
        "http" => {
            let registry = unimatch_http::register(RegistryBuilder::new()).build();
            evaluate_all(&registry.load_matcher(config)?, &lines, parse_http_context)
        }
        "hook" => {
            let registry = unimatch_hook::register(RegistryBuilder::new()).build();
            evaluate_all(&registry.load_matcher(config)?, &lines, parse_hook_context)
        }
        other => Err(format!("unknown domain {other:?} (expected map, http, or hook)").into()),
    }
}

fn parse_config(text: &str, path: &str) -> Result<MatcherConfig<Value>, MatcherError> {
    if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(text).map_err(|e| MatcherError::ConfigParse(e.to_string()))
    } else {
        MatcherConfig::from_json_str(text)
    }
}

fn context_lines(path: Option<&str>) -> Result<Vec<String>, Box<dyn Error>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn evaluate_all<Ctx>(
    matcher: &Matcher<Ctx, Value>,
    lines: &[String],
    parse: impl Fn(&str) -> Result<Ctx, Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    for line in lines {
        let ctx = parse(line)?;
        println!("{}", matcher.evaluate(&ctx).unwrap_or(Value::Null));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(default)]
struct HttpContextDoc {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
}

impl Default for HttpContextDoc {
    fn default() -> Self {
        Self {
            method: "GET".into(),
            path: "/".into(),
            headers: HashMap::new(),
            query_params: HashMap::new(),
        }
    }
}

fn parse_http_context(line: &str) -> Result<HttpRequest, Box<dyn Error>> {
    let doc: HttpContextDoc = serde_json::from_str(line)?;
    let mut builder = HttpRequest::builder().method(doc.method).path(doc.path);
    for (name, value) in doc.headers {
        builder = builder.header(name, value);
    }
    for (name, value) in doc.query_params {
        builder = builder.query_param(name, value);
    }
    Ok(builder.build())
}

#[derive(Deserialize)]
struct HookContextDoc {
    event: String,
    #[serde(default)]
    tool_name: String,
    #[serde(default)]
    arguments: HashMap<String, String>,
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    cwd: String,
    #[serde(default)]
    git_branch: Option<String>,
}

fn parse_hook_context(line: &str) -> Result<HookContext, Box<dyn Error>> {
    let doc: HookContextDoc = serde_json::from_str(line)?;
    let event: HookEvent = doc.event.parse()?;

    let mut ctx = match event {
        HookEvent::PreToolUse => HookContext::pre_tool_use(doc.tool_name),
        HookEvent::PostToolUse => HookContext::post_tool_use(doc.tool_name),
        HookEvent::UserPromptSubmit => HookContext::user_prompt_submit(),
        HookEvent::SessionStart => HookContext::session_start(),
        HookEvent::SessionEnd => HookContext::session_end(),
        HookEvent::Stop => HookContext::stop(),
        HookEvent::SubagentStop => HookContext::subagent_stop(),
        HookEvent::PreCompact => HookContext::pre_compact(),
        HookEvent::Notification => HookContext::notification(),
    };
    for (name, value) in doc.arguments {
        ctx = ctx.with_arg(name, value);
    }
    ctx = ctx.with_session_id(doc.session_id).with_cwd(doc.cwd);
    if let Some(branch) = doc.git_branch {
        ctx = ctx.with_git_branch(branch);
    }
    Ok(ctx)
}
