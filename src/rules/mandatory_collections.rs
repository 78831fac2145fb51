#![forbid(unsafe_code)]

//! `must_include_collections`: playbooks must declare mandatory collections
//!
//! Configuration:
//!
//! ```toml
//! [rules.must_include_collections]
//! mandatory_collections = ["internal.collection.role"]
//! ```

use crate::config::RuleSettings;
use crate::error::RuleError;
use crate::playbook::PlaybookNode;
use crate::rules::{Finding, Rule, RuleMeta};
use crate::types::{FileKind, RuleId, Severity};

pub const ID: &str = "must_include_collections";

pub const DEFAULT_MANDATORY_COLLECTIONS: &[&str] = &["internal.collection.role"];

const DESCRIPTION: &str = "Every play of a playbook must list the mandatory collections \
in its `collections` keyword. The list is set with the `mandatory_collections` option.";

/// Mandatory collection names, in configured order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOptions {
    mandatory: Vec<String>,
}

impl CollectionOptions {
    /// Builds the mandatory set from operator-supplied names
    ///
    /// Names are trimmed and de-duplicated, keeping configured order. An
    /// empty list falls back to the defaults.
    pub fn new<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mandatory: Vec<String> = Vec::new();
        for name in collections {
            let name = name.as_ref().trim();
            if !name.is_empty() && !mandatory.iter().any(|m| m == name) {
                mandatory.push(name.to_string());
            }
        }

        if mandatory.is_empty() {
            return Self::default();
        }
        Self { mandatory }
    }

    /// Resolves the options from a rule's configuration
    pub fn from_settings(settings: Option<&RuleSettings>) -> Result<Self, RuleError> {
        let Some(settings) = settings else {
            return Ok(Self::default());
        };

        if settings.allowed_email_domains.is_some() {
            return Err(RuleError::InvalidOption {
                rule: ID.to_string(),
                option: "allowed_email_domains".to_string(),
            });
        }

        Ok(match &settings.mandatory_collections {
            Some(collections) => Self::new(collections),
            None => Self::default(),
        })
    }

    pub fn mandatory(&self) -> &[String] {
        &self.mandatory
    }
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            mandatory: DEFAULT_MANDATORY_COLLECTIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Returns the mandatory collections a play does not declare
///
/// Plays from files other than playbooks are never checked.
pub fn missing_collections<'a>(node: &PlaybookNode, options: &'a CollectionOptions) -> Vec<&'a str> {
    if node.kind != FileKind::Playbook {
        return Vec::new();
    }

    options
        .mandatory()
        .iter()
        .filter(|name| !node.declares(name))
        .map(String::as_str)
        .collect()
}

/// Message for a missing collection
pub fn missing_message(name: &str) -> String {
    format!("Collection {} needs to be included", name)
}

/// Rule requiring playbooks to declare mandatory collections
#[derive(Debug, Clone)]
pub struct MustIncludeCollectionsRule {
    meta: RuleMeta,
    options: CollectionOptions,
}

impl MustIncludeCollectionsRule {
    pub fn new(options: CollectionOptions) -> Self {
        Self {
            meta: RuleMeta {
                id: RuleId::from_static(ID),
                shortdesc: "Must Include Collections",
                description: DESCRIPTION,
                severity: Severity::VeryHigh,
                tags: &["collections", "customer"],
                version_added: "0.1.0",
            },
            options,
        }
    }

    /// Builds the rule from its configuration entry
    pub fn from_settings(settings: Option<&RuleSettings>) -> Result<Self, RuleError> {
        let mut rule = Self::new(CollectionOptions::from_settings(settings)?);
        if let Some(severity) = settings.and_then(|s| s.severity) {
            rule.meta.severity = severity;
        }
        Ok(rule)
    }

    pub fn collection_options(&self) -> &CollectionOptions {
        &self.options
    }
}

impl Default for MustIncludeCollectionsRule {
    fn default() -> Self {
        Self::new(CollectionOptions::default())
    }
}

impl Rule for MustIncludeCollectionsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn options(&self) -> Vec<(&'static str, &[String])> {
        vec![("mandatory_collections", self.options.mandatory())]
    }

    fn match_playbook(&self, node: &PlaybookNode) -> Vec<Finding> {
        missing_collections(node, &self.options)
            .into_iter()
            .map(|name| Finding::for_playbook(&self.meta, node, missing_message(name)))
            .collect()
    }
}
