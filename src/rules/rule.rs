#![forbid(unsafe_code)]

//! Core Rule trait and the records rules produce

use crate::playbook::{PlaybookNode, TaskNode};
use crate::types::{RuleId, Severity};
use std::path::{Path, PathBuf};

/// Identity and presentation data for a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Stable rule identifier, used in configuration and output
    pub id: RuleId,

    /// One-line title
    pub shortdesc: &'static str,

    /// Longer explanation shown by `playlint list`
    pub description: &'static str,

    /// Severity attached to every finding of this rule
    pub severity: Severity,

    /// Free-form tags for grouping
    pub tags: &'static [&'static str],

    /// Version in which the rule was introduced
    pub version_added: &'static str,
}

/// Outcome of a task-level rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMatch {
    /// The task satisfies the rule
    Pass,
    /// The task violates the rule
    Fail(String),
}

impl TaskMatch {
    pub fn is_pass(&self) -> bool {
        matches!(self, TaskMatch::Pass)
    }

    /// Failure message, if the task failed
    pub fn message(&self) -> Option<&str> {
        match self {
            TaskMatch::Pass => None,
            TaskMatch::Fail(message) => Some(message),
        }
    }
}

/// A single lint finding
///
/// This structure captures all information needed to report and serialize a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// ID of the rule that produced this finding
    pub rule_id: RuleId,

    /// Severity of the rule at the time it ran
    pub severity: Severity,

    /// Human-readable message describing the problem
    pub message: String,

    /// File the finding refers to
    pub file: PathBuf,

    /// Line number (1-indexed), when known
    pub line: Option<u32>,

    /// Name of the offending task, for task-level findings
    pub task: Option<String>,
}

impl Finding {
    /// Finding for a failed task match
    pub fn for_task(
        meta: &RuleMeta,
        task: &TaskNode,
        file: &Path,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: meta.id.clone(),
            severity: meta.severity,
            message: message.into(),
            file: file.to_path_buf(),
            line: task.line,
            task: task.name.clone(),
        }
    }

    /// Finding referencing the document a play came from
    pub fn for_playbook(meta: &RuleMeta, node: &PlaybookNode, message: impl Into<String>) -> Self {
        Self {
            rule_id: meta.id.clone(),
            severity: meta.severity,
            message: message.into(),
            file: node.path.clone(),
            line: node.line,
            task: None,
        }
    }
}

/// Trait that all rules must implement
///
/// A rule overrides the match function for the node kind it inspects; the
/// other one keeps its passing default. The trait is `Send + Sync` so files
/// can be linted in parallel.
pub trait Rule: Send + Sync {
    /// Returns the rule's identity record
    fn meta(&self) -> &RuleMeta;

    /// Returns the unique identifier for this rule
    fn id(&self) -> &RuleId {
        &self.meta().id
    }

    /// Returns the severity level of findings from this rule
    fn severity(&self) -> Severity {
        self.meta().severity
    }

    /// Resolved list options, for display
    fn options(&self) -> Vec<(&'static str, &[String])> {
        Vec::new()
    }

    /// Checks a single task
    fn match_task(&self, _task: &TaskNode) -> TaskMatch {
        TaskMatch::Pass
    }

    /// Checks a play; an empty vector means the play passes
    fn match_playbook(&self, _node: &PlaybookNode) -> Vec<Finding> {
        Vec::new()
    }
}
