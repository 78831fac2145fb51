//! Check command implementation
//!
//! This module implements the `playlint check` command, which:
//! - Loads configuration from playlint.toml (or `--config`)
//! - Discovers YAML files to check
//! - Executes all enabled rules in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_FINDINGS, EXIT_PARSE_ERROR, EXIT_SUCCESS, build_registry, discover_files,
    load_config, resolve_color,
};
use crate::engine::ExecutionEngine;
use crate::error::ConfigError;
use crate::output::{HumanFormatter, JsonlFormatter};
use termcolor::StandardStream;

/// Error type specific to check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] crate::error::RuleError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::file_walker::FileWalkerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    fn exit_code(&self) -> i32 {
        match self {
            CheckError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (no findings, every file loaded)
/// - 1: Findings (or files that could not be loaded)
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid TOML configuration)
pub fn run_check(
    paths: &[String],
    format: Option<OutputFormat>,
    config_path: Option<&str>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_check_inner(paths, format, config_path, color) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FINDINGS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_check_inner(
    paths: &[String],
    format: Option<OutputFormat>,
    config_path: Option<&str>,
    color: Option<ColorChoice>,
) -> Result<bool, CheckError> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;
    let format = format.unwrap_or_else(|| OutputFormat::from(config.output.format));

    if registry.is_empty() {
        tracing::warn!("no rules are enabled, nothing to check");
    }

    let files = discover_files(paths, &config)?;
    if files.is_empty() {
        tracing::warn!("no files found to check");
    }

    tracing::info!(
        files = files.len(),
        rules = registry.len(),
        "checking files"
    );

    let engine = ExecutionEngine::new(registry);
    let result = engine.execute(files);

    match format {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(resolve_color(color, &config));
            HumanFormatter::new().write(&mut stdout, &result)?;
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format(&result)),
    }

    Ok(result.passed())
}
