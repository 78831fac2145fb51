//! Parsing and validation for playlint.toml configuration files

use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleId, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "playlint.toml";

/// Main configuration struct for playlint.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Playlint metadata
    #[serde(default)]
    pub playlint: PlaylintMeta,

    /// Rule configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Rule ids and option placement are checked later, when the rule table is
    /// built, since only the registry knows which rules exist.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.playlint.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.playlint.version
            )));
        }

        for pattern in &self.playlint.include {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid include glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for pattern in &self.playlint.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for (rule_id, rule_value) in &self.rules.rules {
            let RuleValue::Settings(settings) = rule_value else {
                continue;
            };

            let lists = [
                ("allowed_email_domains", &settings.allowed_email_domains),
                ("mandatory_collections", &settings.mandatory_collections),
            ];
            for (option, values) in lists {
                if let Some(values) = values
                    && values.iter().any(|v| v.trim().is_empty())
                {
                    return Err(ConfigError::Validation(format!(
                        "Empty entry in '{}' for rule '{}'",
                        option,
                        rule_id.as_str()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the configured value for a rule, if any
    pub fn rule(&self, id: &RuleId) -> Option<&RuleValue> {
        self.rules.rules.get(id)
    }
}

/// Playlint metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylintMeta {
    /// Configuration version (must be "1")
    #[serde(default = "default_version")]
    pub version: String,

    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

impl Default for PlaylintMeta {
    fn default() -> Self {
        Self {
            version: default_version(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*.yml"), GlobPattern::new("**/*.yaml")]
}

/// Rules configuration section, keyed by rule id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(flatten)]
    pub rules: BTreeMap<RuleId, RuleValue>,
}

/// A rule can be enabled with a boolean or configured with settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// Simple boolean enable/disable
    Enabled(bool),
    /// Settings table for the rule
    Settings(RuleSettings),
}

impl RuleValue {
    /// Whether the rule stays in the rule table
    ///
    /// A settings table implies the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleValue::Enabled(enabled) => *enabled,
            RuleValue::Settings(_) => true,
        }
    }

    /// Returns the settings table, if one was given
    pub fn settings(&self) -> Option<&RuleSettings> {
        match self {
            RuleValue::Enabled(_) => None,
            RuleValue::Settings(settings) => Some(settings),
        }
    }
}

/// Settings for individual rules
///
/// Unknown keys are a parse error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSettings {
    /// Severity override for this rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Domains accepted by `email-address-validation`
    #[serde(
        default,
        alias = "allowed_domains",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_email_domains: Option<Vec<String>>,

    /// Collections required by `must_include_collections`
    #[serde(
        default,
        alias = "mandatorycollections",
        skip_serializing_if = "Option::is_none"
    )]
    pub mandatory_collections: Option<Vec<String>>,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
