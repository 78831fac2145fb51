#![forbid(unsafe_code)]

//! Human-readable output formatter

use crate::engine::ExecutionResult;
use crate::rules::Finding;
use crate::types::Severity;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Human output formatter
///
/// Writes one line per finding, then load errors and a summary.
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write the execution result to a (possibly colored) stream
    pub fn write(&self, out: &mut dyn WriteColor, result: &ExecutionResult) -> io::Result<()> {
        for finding in &result.findings {
            write_finding(out, finding)?;
        }

        for failure in &result.failures {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "error")?;
            out.reset()?;
            writeln!(out, ": {}: {}", failure.path.display(), failure.error)?;
        }

        if !result.findings.is_empty() || !result.failures.is_empty() {
            writeln!(out)?;
        }

        writeln!(
            out,
            "Checked {} file(s) with {} rule(s): {} finding(s), {} error(s)",
            result.files_checked,
            result.rules_executed,
            result.findings.len(),
            result.failures.len()
        )?;

        if result.passed() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            writeln!(out, "Check PASSED")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            writeln!(out, "Check FAILED")?;
        }
        out.reset()
    }

    /// Format without color, for tests and plain pipes
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut buffer = termcolor::Buffer::no_color();
        // Writing into an in-memory buffer cannot fail.
        let _ = self.write(&mut buffer, result);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::VeryHigh | Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low | Severity::VeryLow => Color::Cyan,
        Severity::Info => Color::Blue,
    }
}

fn write_finding(out: &mut dyn WriteColor, finding: &Finding) -> io::Result<()> {
    match finding.line {
        Some(line) => write!(out, "{}:{}: ", finding.file.display(), line)?,
        None => write!(out, "{}: ", finding.file.display())?,
    }

    out.set_color(ColorSpec::new().set_fg(Some(severity_color(finding.severity))))?;
    write!(out, "[{}]", finding.severity)?;
    out.reset()?;

    write!(out, " {}: {}", finding.rule_id, finding.message)?;
    if let Some(task) = &finding.task {
        write!(out, " (task: {})", task)?;
    }
    writeln!(out)
}
