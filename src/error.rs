//! Error types for playlint
//!
//! Each concern gets its own error enum; `PlaylintError` wraps them for
//! callers that only need a single error type.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Rule not found in the rule table
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// An option was given to a rule that cannot use it
    #[error("Invalid option '{option}' for rule '{rule}'")]
    InvalidOption { rule: String, option: String },
}

/// Errors raised while loading a playbook or task file
#[derive(Debug, thiserror::Error)]
pub enum PlaybookError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not valid YAML
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A task mapping does not name a module
    #[error("Task has no module{}", task_suffix(.name))]
    MissingModule { name: Option<String> },

    /// A play declares `collections` with something other than a list of strings
    #[error("'collections' must be a list of strings")]
    InvalidCollections,
}

fn task_suffix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" (task '{}')", name),
        None => String::new(),
    }
}

/// Top-level error type for playlint
#[derive(Debug, thiserror::Error)]
pub enum PlaylintError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Playbook loading error
    #[error("Playbook error: {0}")]
    Playbook(#[from] PlaybookError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
