#![forbid(unsafe_code)]

//! Rule registry: the table of built-in rules
//!
//! The registry is responsible for:
//! - Registering every built-in rule, in a fixed order
//! - Resolving each rule's options from configuration, once
//! - Dropping rules disabled in configuration
//! - Providing access to rules by ID

use crate::config::{Config, RuleSettings};
use crate::error::RuleError;
use crate::rules::{
    EmailAddressValidationRule, MustIncludeCollectionsRule, Rule, email_address,
    mandatory_collections,
};
use crate::types::RuleId;

/// Builds a rule from its optional settings table
type RuleFactory = fn(Option<&RuleSettings>) -> Result<Box<dyn Rule>, RuleError>;

/// Every built-in rule, in registration order
const BUILTIN_RULES: &[(&str, RuleFactory)] = &[
    (email_address::ID, email_address_rule),
    (mandatory_collections::ID, mandatory_collections_rule),
];

fn email_address_rule(settings: Option<&RuleSettings>) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(EmailAddressValidationRule::from_settings(settings)?))
}

fn mandatory_collections_rule(
    settings: Option<&RuleSettings>,
) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(MustIncludeCollectionsRule::from_settings(settings)?))
}

/// Ids of all built-in rules, in registration order
pub fn builtin_rule_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN_RULES.iter().map(|(id, _)| *id)
}

/// Registry holding the enabled rules
///
/// Rules are stored as trait objects in registration order, so output and
/// iteration are deterministic.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// All built-in rules with default options
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter_map(|(_, factory)| factory(None).ok())
            .collect();
        Self { rules }
    }

    /// Build the rule table from configuration
    ///
    /// Rules are enabled by default unless explicitly disabled.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NotFound` if the configuration names a rule that
    /// does not exist, and `RuleError::InvalidOption` if a rule is given an
    /// option it does not accept.
    pub fn build_from_config(config: &Config) -> Result<Self, RuleError> {
        for rule_id in config.rules.rules.keys() {
            if !builtin_rule_ids().any(|id| id == rule_id.as_str()) {
                return Err(RuleError::NotFound(rule_id.to_string()));
            }
        }

        let mut registry = Self::new();
        for &(id, factory) in BUILTIN_RULES {
            let value = config.rule(&RuleId::from_static(id));
            let rule = factory(value.and_then(|v| v.settings()))?;

            if value.is_some_and(|v| !v.is_enabled()) {
                tracing::debug!(rule = %id, "rule disabled by configuration");
                continue;
            }
            registry.register(rule);
        }

        Ok(registry)
    }

    /// Add a rule to the table
    ///
    /// A rule with the same id replaces the existing one in place.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        match self.rules.iter().position(|r| r.id() == rule.id()) {
            Some(idx) => self.rules[idx] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by its ID
    ///
    /// Returns `None` if the rule is not found in the registry.
    pub fn get_rule(&self, id: &RuleId) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.id() == id)
            .map(|boxed| boxed.as_ref())
    }

    /// Iterate over all rules in the registry
    pub fn iter_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|boxed| boxed.as_ref())
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.id().as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
