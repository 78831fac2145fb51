#![forbid(unsafe_code)]

//! Parallel execution engine for running rules across files
//!
//! Each file is loaded into a `Lintable` once; every playbook rule then sees
//! every play and every task rule sees every task. Files are processed in
//! parallel with rayon.

use crate::engine::file_walker::FileEntry;
use crate::error::PlaybookError;
use crate::playbook::Lintable;
use crate::rules::{Finding, Rule, RuleRegistry, TaskMatch};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// A file that could not be linted
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: PlaybookError,
}

/// Result of executing all rules against all files
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// All findings, sorted by file, line and rule id
    pub findings: Vec<Finding>,
    /// Files that failed to load, sorted by path
    pub failures: Vec<LoadFailure>,
    /// Number of files checked
    pub files_checked: usize,
    /// Number of rules executed
    pub rules_executed: usize,
}

impl ExecutionResult {
    /// True when no findings and no load failures were produced
    pub fn passed(&self) -> bool {
        self.findings.is_empty() && self.failures.is_empty()
    }
}

/// Execution engine that coordinates parallel rule execution
pub struct ExecutionEngine {
    registry: Arc<RuleRegistry>,
}

impl ExecutionEngine {
    /// Creates a new ExecutionEngine with the provided rule registry
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Execute all rules against the discovered files
    pub fn execute(&self, files: Vec<FileEntry>) -> ExecutionResult {
        let files_checked = files.len();
        let rules_executed = self.registry.len();

        let outcomes: Vec<Result<Vec<Finding>, LoadFailure>> = files
            .par_iter()
            .map(|file| {
                Lintable::load(&file.path)
                    .map(|lintable| self.lint(&lintable))
                    .map_err(|error| {
                        tracing::warn!(path = %file.path.display(), %error, "failed to load file");
                        LoadFailure {
                            path: file.path.clone(),
                            error,
                        }
                    })
            })
            .collect();

        let mut result = ExecutionResult {
            files_checked,
            rules_executed,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(findings) => result.findings.extend(findings),
                Err(failure) => result.failures.push(failure),
            }
        }

        result.findings.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
        result.failures.sort_by(|a, b| a.path.cmp(&b.path));
        result
    }

    /// Run every rule against one loaded file
    pub fn lint(&self, lintable: &Lintable) -> Vec<Finding> {
        let rules: Vec<&dyn Rule> = self.registry.iter_rules().collect();
        lint_with(&rules, lintable)
    }
}

/// Run the given rules against one loaded file
///
/// Playbook findings come first, then task findings, each in document order.
pub fn lint_with(rules: &[&dyn Rule], lintable: &Lintable) -> Vec<Finding> {
    let mut findings = Vec::new();

    for play in &lintable.plays {
        for rule in rules {
            findings.extend(rule.match_playbook(play));
        }
    }

    for task in &lintable.tasks {
        for rule in rules {
            if let TaskMatch::Fail(message) = rule.match_task(task) {
                findings.push(Finding::for_task(rule.meta(), task, &lintable.path, message));
            }
        }
    }

    tracing::debug!(
        path = %lintable.path.display(),
        findings = findings.len(),
        "linted file"
    );
    findings
}
