#![forbid(unsafe_code)]

//! Task nodes
//!
//! A task is normalized into a module identity plus its keyword arguments,
//! whichever of the YAML task forms it was written in:
//!
//! ```yaml
//! - community.general.mail: { to: ops@customer.com.au }
//! - mail: to=ops@customer.com.au subject=done
//! - action: mail to=ops@customer.com.au
//! ```

use crate::error::PlaybookError;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Key holding free-form words that are not `key=value` pairs
pub const RAW_PARAMS: &str = "_raw_params";

/// Play and task keywords that can never be a module name
const TASK_KEYWORDS: &[&str] = &[
    "name",
    "action",
    "local_action",
    "args",
    "any_errors_fatal",
    "async",
    "become",
    "become_exe",
    "become_flags",
    "become_method",
    "become_user",
    "changed_when",
    "check_mode",
    "collections",
    "connection",
    "debugger",
    "delay",
    "delegate_facts",
    "delegate_to",
    "diff",
    "environment",
    "failed_when",
    "ignore_errors",
    "ignore_unreachable",
    "listen",
    "loop",
    "loop_control",
    "module_defaults",
    "no_log",
    "notify",
    "poll",
    "port",
    "register",
    "remote_user",
    "retries",
    "run_once",
    "tags",
    "throttle",
    "timeout",
    "until",
    "vars",
    "when",
    "block",
    "rescue",
    "always",
];

fn is_task_keyword(key: &str) -> bool {
    TASK_KEYWORDS.contains(&key) || key.starts_with("with_")
}

/// A single task, reduced to what rules need to inspect
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    /// Module identity as written (`mail`, `community.general.mail`, ...)
    pub module: String,

    /// Module keyword arguments
    pub args: BTreeMap<String, Value>,

    /// Task `name`, when present
    pub name: Option<String>,

    /// Source line (1-indexed), when it could be located
    pub line: Option<u32>,
}

impl TaskNode {
    /// Creates a task for `module` with no arguments
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            args: BTreeMap::new(),
            name: None,
            line: None,
        }
    }

    /// Adds a keyword argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Sets the task name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a keyword argument by name
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Builds a task from its YAML mapping
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::MissingModule` when no module can be
    /// identified, e.g. a mapping that only holds task keywords.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, PlaybookError> {
        let name = mapping
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut args = BTreeMap::new();
        if let Some(Value::Mapping(explicit)) = mapping.get("args") {
            merge_mapping(&mut args, explicit);
        }

        for key in ["action", "local_action"] {
            if let Some(value) = mapping.get(key) {
                let (module, inline) = split_action(value).ok_or_else(|| {
                    PlaybookError::MissingModule { name: name.clone() }
                })?;
                args.extend(inline);
                return Ok(Self {
                    module,
                    args,
                    name,
                    line: None,
                });
            }
        }

        let (module, value) = mapping
            .iter()
            .find_map(|(k, v)| k.as_str().filter(|k| !is_task_keyword(k)).map(|k| (k, v)))
            .ok_or_else(|| PlaybookError::MissingModule { name: name.clone() })?;

        match value {
            Value::Mapping(inline) => merge_mapping(&mut args, inline),
            Value::String(free_form) => args.extend(parse_free_form(free_form)),
            Value::Null => {}
            other => {
                args.insert(RAW_PARAMS.to_string(), other.clone());
            }
        }

        Ok(Self {
            module: module.to_string(),
            args,
            name,
            line: None,
        })
    }
}

/// Splits an `action:` / `local_action:` value into module and arguments
fn split_action(value: &Value) -> Option<(String, BTreeMap<String, Value>)> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            let (module, rest) = match s.split_once(char::is_whitespace) {
                Some((module, rest)) => (module, rest),
                None => (s, ""),
            };
            if module.is_empty() {
                return None;
            }
            Some((module.to_string(), parse_free_form(rest)))
        }
        Value::Mapping(mapping) => {
            let module = mapping.get("module").and_then(Value::as_str)?;
            let mut args = BTreeMap::new();
            merge_mapping(&mut args, mapping);
            args.remove("module");
            Some((module.to_string(), args))
        }
        _ => None,
    }
}

fn merge_mapping(args: &mut BTreeMap<String, Value>, mapping: &Mapping) {
    for (key, value) in mapping {
        if let Some(key) = key.as_str() {
            args.insert(key.to_string(), value.clone());
        }
    }
}

/// Parses `key=value` free-form arguments
///
/// Quoted values may contain whitespace. Words without `=` are collected
/// under [`RAW_PARAMS`].
pub fn parse_free_form(input: &str) -> BTreeMap<String, Value> {
    let mut args = BTreeMap::new();
    let mut raw = Vec::new();

    for token in split_words(input) {
        match token.split_once('=') {
            Some((key, value))
                if !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_') =>
            {
                args.insert(key.to_string(), Value::String(unquote(value).to_string()));
            }
            _ => raw.push(token),
        }
    }

    if !raw.is_empty() {
        args.insert(RAW_PARAMS.to_string(), Value::String(raw.join(" ")));
    }
    args
}

/// Splits on whitespace outside single or double quotes
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => {
                quote = None;
                current.push(c);
            }
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                current.push(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_mapping_form() {
        let task = TaskNode::from_mapping(&mapping(
            r#"
name: Notify
community.general.mail:
  to: ops@customer.com.au
  subject: done
when: report is changed
"#,
        ))
        .unwrap();

        assert_eq!(task.module, "community.general.mail");
        assert_eq!(task.name.as_deref(), Some("Notify"));
        assert_eq!(
            task.arg("to").and_then(Value::as_str),
            Some("ops@customer.com.au")
        );
        assert!(task.arg("when").is_none());
    }

    #[test]
    fn test_free_form() {
        let task = TaskNode::from_mapping(&mapping(
            r#"mail: to=ops@customer.com.au subject="nightly report""#,
        ))
        .unwrap();

        assert_eq!(task.module, "mail");
        assert_eq!(
            task.arg("to").and_then(Value::as_str),
            Some("ops@customer.com.au")
        );
        assert_eq!(
            task.arg("subject").and_then(Value::as_str),
            Some("nightly report")
        );
    }

    #[test]
    fn test_free_form_with_args_keyword() {
        let task = TaskNode::from_mapping(&mapping(
            r#"
mail: subject=hello
args:
  to: a@customer.com
  subject: overridden
"#,
        ))
        .unwrap();

        assert_eq!(task.arg("to").and_then(Value::as_str), Some("a@customer.com"));
        assert_eq!(task.arg("subject").and_then(Value::as_str), Some("hello"));
    }

    #[test]
    fn test_action_string() {
        let task = TaskNode::from_mapping(&mapping(
            r#"
name: Legacy
action: mail to=x@cust.com.au
"#,
        ))
        .unwrap();

        assert_eq!(task.module, "mail");
        assert_eq!(task.arg("to").and_then(Value::as_str), Some("x@cust.com.au"));
    }

    #[test]
    fn test_local_action_mapping() {
        let task = TaskNode::from_mapping(&mapping(
            r#"
local_action:
  module: community.general.mail
  cc: c@customer.com
"#,
        ))
        .unwrap();

        assert_eq!(task.module, "community.general.mail");
        assert_eq!(task.arg("cc").and_then(Value::as_str), Some("c@customer.com"));
        assert!(task.arg("module").is_none());
    }

    #[test]
    fn test_with_loop_is_not_module() {
        let task = TaskNode::from_mapping(&mapping(
            r#"
with_items: [a, b]
ansible.builtin.debug:
  msg: "{{ item }}"
"#,
        ))
        .unwrap();
        assert_eq!(task.module, "ansible.builtin.debug");
    }

    #[test]
    fn test_missing_module() {
        let err = TaskNode::from_mapping(&mapping(
            r#"
name: Only keywords
when: true
"#,
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            PlaybookError::MissingModule { name: Some(ref n) } if n == "Only keywords"
        ));
    }

    #[test]
    fn test_parse_free_form_raw_params() {
        let args = parse_free_form("echo hello chdir=/tmp");
        assert_eq!(args.get("chdir").and_then(Value::as_str), Some("/tmp"));
        assert_eq!(
            args.get(RAW_PARAMS).and_then(Value::as_str),
            Some("echo hello")
        );
    }

    #[test]
    fn test_builder() {
        let task = TaskNode::new("mail")
            .with_name("n")
            .with_arg("to", "a@customer.com");
        assert_eq!(task.module, "mail");
        assert_eq!(task.name.as_deref(), Some("n"));
        assert_eq!(task.arg("to"), Some(&Value::from("a@customer.com")));
    }
}
