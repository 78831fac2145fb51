#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All finding records (sorted by file, line, rule)
//! 2. All error records for files that failed to load (sorted by file)
//! 3. One status record

use crate::engine::ExecutionResult;
use serde::Serialize;
use std::path::PathBuf;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the execution result as JSONL
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut output = String::new();

        for finding in &result.findings {
            push_record(
                &mut output,
                &FindingRecord {
                    record_type: "finding",
                    rule: finding.rule_id.as_str(),
                    severity: finding.severity.as_str(),
                    file: finding.file.clone(),
                    line: finding.line,
                    task: finding.task.as_deref(),
                    message: &finding.message,
                },
            );
        }

        for failure in &result.failures {
            push_record(
                &mut output,
                &ErrorRecord {
                    record_type: "error",
                    file: failure.path.clone(),
                    message: failure.error.to_string(),
                },
            );
        }

        push_record(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.passed(),
                files_checked: result.files_checked as u64,
                rules_executed: result.rules_executed as u64,
                findings: result.findings.len() as u64,
                errors: result.failures.len() as u64,
            },
        );

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Finding record for JSONL output
#[derive(Debug, Serialize)]
struct FindingRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    rule: &'a str,
    severity: &'static str,
    file: PathBuf,
    line: Option<u32>,
    task: Option<&'a str>,
    message: &'a str,
}

/// Load error record for JSONL output
#[derive(Debug, Serialize)]
struct ErrorRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: PathBuf,
    message: String,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    rules_executed: u64,
    findings: u64,
    errors: u64,
}
