#![forbid(unsafe_code)]

//! Playlint: policy lint rules for Ansible playbooks
//!
//! Two rules ship built in. `email-address-validation` restricts the
//! recipients of mail tasks to approved domains, and
//! `must_include_collections` requires every play to declare a set of
//! collections.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod playbook;
mod regex_util;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, PlaybookError, PlaylintError, RuleError};

// Re-export core domain types for convenient access
pub use types::{FileKind, GlobPattern, RuleId, Severity};
