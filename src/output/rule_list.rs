#![forbid(unsafe_code)]

//! Rule listing formatters
//!
//! Formatters for the `playlint list` command, in human-readable and JSONL
//! form.

use crate::rules::Rule;
use serde::Serialize;

/// Display information for a single enabled rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInfo {
    pub rule_id: String,
    pub shortdesc: String,
    pub description: String,
    pub severity: String,
    pub tags: Vec<String>,
    pub version_added: String,
    pub options: Vec<RuleOption>,
}

/// A resolved list option of a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOption {
    pub name: String,
    pub values: Vec<String>,
}

impl RuleInfo {
    pub fn from_rule(rule: &dyn Rule) -> Self {
        let meta = rule.meta();
        Self {
            rule_id: meta.id.to_string(),
            shortdesc: meta.shortdesc.to_string(),
            description: meta.description.to_string(),
            severity: meta.severity.to_string(),
            tags: meta.tags.iter().map(|t| t.to_string()).collect(),
            version_added: meta.version_added.to_string(),
            options: rule
                .options()
                .into_iter()
                .map(|(name, values)| RuleOption {
                    name: name.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }
}

/// Human-readable formatter for rule listings
pub struct RuleListHumanFormatter;

impl RuleListHumanFormatter {
    pub fn new() -> Self {
        RuleListHumanFormatter
    }

    /// Format a list of rules for human consumption
    pub fn format(&self, rules: &[RuleInfo]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Rules ({} enabled):\n", rules.len()));
        output.push('\n');

        for rule in rules {
            output.push_str(&format!("{} - {}\n", rule.rule_id, rule.shortdesc));
            output.push_str(&format!("  Description: {}\n", rule.description));
            output.push_str(&format!("  Severity: {}\n", rule.severity));
            output.push_str(&format!("  Tags: {}\n", rule.tags.join(", ")));
            for option in &rule.options {
                output.push_str(&format!("  {}: {}\n", option.name, option.values.join(", ")));
            }
            output.push('\n');
        }

        output
    }
}

impl Default for RuleListHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSONL formatter for rule listings, one object per rule
pub struct RuleListJsonlFormatter;

impl RuleListJsonlFormatter {
    pub fn new() -> Self {
        RuleListJsonlFormatter
    }

    pub fn format(&self, rules: &[RuleInfo]) -> String {
        let mut output = String::new();

        for rule in rules {
            if let Ok(json) = serde_json::to_string(rule) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }
}

impl Default for RuleListJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
