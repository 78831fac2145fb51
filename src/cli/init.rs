//! Initialize a playlint project
//!
//! Writes a commented default `playlint.toml`.

use crate::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Default content for playlint.toml
pub const DEFAULT_PLAYLINT_TOML: &str = r#"[playlint]
version = "1"

# Files to lint (defaults to all YAML files)
include = ["**/*.yml", "**/*.yaml"]

# Files to skip
# exclude = ["**/molecule/**"]

[rules]
# Every built-in rule is enabled by default.
# Disable a rule: must_include_collections = false
# Override severity: email-address-validation = { severity = "HIGH" }

email-address-validation = { allowed_email_domains = ["customer.com.au", "customer.com", "cust.com.au"] }
must_include_collections = { mandatory_collections = ["internal.collection.role"] }

[output]
format = "human"
color = "auto"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What init did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Run the init command in the current directory
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    run_init_in(Path::new("."), force)
}

/// Write `playlint.toml` into `dir`
///
/// An existing file is left alone unless `force` is set.
pub fn run_init_in(dir: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let path = dir.join(CONFIG_FILE_NAME);

    let outcome = if !path.exists() {
        InitOutcome::Created
    } else if force {
        InitOutcome::Overwritten
    } else {
        tracing::debug!(path = %path.display(), "config exists, skipping");
        return Ok(InitOutcome::Skipped);
    };

    fs::write(&path, DEFAULT_PLAYLINT_TOML)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::RuleRegistry;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_is_valid_config() {
        let config = Config::parse(DEFAULT_PLAYLINT_TOML).unwrap();
        let registry = RuleRegistry::build_from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_init_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = run_init_in(temp_dir.path(), false).unwrap();

        assert_eq!(outcome, InitOutcome::Created);
        let content = fs::read_to_string(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(content.contains("[playlint]"));
    }

    #[test]
    fn test_init_skips_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "existing content").unwrap();

        let outcome = run_init_in(temp_dir.path(), false).unwrap();
        assert_eq!(outcome, InitOutcome::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing content");
    }

    #[test]
    fn test_init_overwrites_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "old content").unwrap();

        let outcome = run_init_in(temp_dir.path(), true).unwrap();
        assert_eq!(outcome, InitOutcome::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_PLAYLINT_TOML);
    }
}
