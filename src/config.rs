//! Configuration file parsing and validation

pub mod playlint_toml;

pub use playlint_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, OutputConfig, OutputFormat, PlaylintMeta, RuleSettings,
    RuleValue, RulesConfig,
};
