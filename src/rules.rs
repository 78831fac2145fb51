#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod email_address;
pub mod mandatory_collections;
mod registry;
mod rule;

// Re-export core types
pub use email_address::{EmailAddressValidationRule, EmailDomainOptions};
pub use mandatory_collections::{CollectionOptions, MustIncludeCollectionsRule};
pub use registry::{RuleRegistry, builtin_rule_ids};
pub use rule::{Finding, Rule, RuleMeta, TaskMatch};
