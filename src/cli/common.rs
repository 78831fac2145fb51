//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! discovering files, and building rule registries.

use crate::cli::args::ColorChoice;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::engine::file_walker::{FileEntry, FileWalker, FileWalkerError};
use crate::error::{ConfigError, RuleError};
use crate::rules::RuleRegistry;
use std::io::IsTerminal;
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load playlint.toml configuration
///
/// An explicit path must exist. Without one, `playlint.toml` in the working
/// directory is used when present, otherwise all rules run with defaults.
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit file cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if it is invalid.
pub(crate) fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return Config::load(path);
    }

    let default_path = Path::new(CONFIG_FILE_NAME);
    if !default_path.exists() {
        tracing::debug!("{} not found, using defaults", CONFIG_FILE_NAME);
        return Ok(Config::default());
    }

    Config::load(default_path)
}

/// Discover files to check using FileWalker
///
/// Walks the specified paths and collects all files that match the
/// include/exclude patterns from the configuration.
pub(crate) fn discover_files(
    paths: &[String],
    config: &Config,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path_str in paths {
        let walker = FileWalker::new(
            Path::new(path_str),
            &config.playlint.include,
            &config.playlint.exclude,
        )?;

        for result in walker.walk() {
            all_files.push(result?);
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok(all_files)
}

/// Build the rule registry from configuration
pub(crate) fn build_registry(config: &Config) -> Result<RuleRegistry, RuleError> {
    RuleRegistry::build_from_config(config)
}

/// Resolve the effective color choice: flag first, then config
pub(crate) fn resolve_color(flag: Option<ColorChoice>, config: &Config) -> termcolor::ColorChoice {
    let choice = flag.unwrap_or_else(|| ColorChoice::from(config.output.color));
    let choice = termcolor::ColorChoice::from(choice);

    if choice == termcolor::ColorChoice::Auto && !std::io::stdout().is_terminal() {
        return termcolor::ColorChoice::Never;
    }
    choice
}
