//! List command implementation
//!
//! This module implements the `playlint list` command, which prints every
//! enabled rule with its metadata and resolved options.

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, build_registry, load_config};
use crate::error::ConfigError;
use crate::output::{RuleInfo, RuleListHumanFormatter, RuleListJsonlFormatter};
use crate::rules::RuleRegistry;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] crate::error::RuleError),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error (invalid TOML configuration)
pub fn run_list(format: Option<OutputFormat>, config_path: Option<&str>) -> i32 {
    match run_list_inner(format, config_path) {
        Ok(output) => {
            print!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ListError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_list_inner(
    format: Option<OutputFormat>,
    config_path: Option<&str>,
) -> Result<String, ListError> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;
    let format = format.unwrap_or_else(|| OutputFormat::from(config.output.format));
    Ok(render(&registry, format))
}

fn render(registry: &RuleRegistry, format: OutputFormat) -> String {
    let infos: Vec<RuleInfo> = registry.iter_rules().map(RuleInfo::from_rule).collect();
    match format {
        OutputFormat::Human => RuleListHumanFormatter::new().format(&infos),
        OutputFormat::Jsonl => RuleListJsonlFormatter::new().format(&infos),
    }
}
