#![forbid(unsafe_code)]

//! `email-address-validation`: outbound mail may only go to approved domains
//!
//! Every recipient in the `to`, `cc` and `bcc` fields of a mail task must be a
//! plain `local@domain` address whose domain is on the allow-list. Anything
//! else, including templated values, is reported.

use crate::config::RuleSettings;
use crate::error::RuleError;
use crate::playbook::TaskNode;
use crate::regex_util::static_regex;
use crate::rules::{Rule, RuleMeta, TaskMatch};
use crate::types::{RuleId, Severity};
use regex::Regex;
use serde_yaml::Value;

pub const ID: &str = "email-address-validation";

/// Module names of the mail module, short and fully qualified
pub const MAIL_MODULES: &[&str] = &["mail", "community.general.mail"];

/// Task fields holding recipients, in reporting order
pub const RECIPIENT_FIELDS: &[&str] = &["to", "cc", "bcc"];

pub const DEFAULT_ALLOWED_EMAIL_DOMAINS: &[&str] = &["customer.com.au", "customer.com", "cust.com.au"];

/// Prefix of the failure message
pub const INVALID_RECIPIENTS_MESSAGE: &str = "Email recipients must use an allowed domain";

const DESCRIPTION: &str = "Tasks using the mail module (`mail` or `community.general.mail`) \
may only address recipients in the `to`, `cc` and `bcc` fields within the allowed \
email domains, so notifications do not leak outside the organisation.";

static_regex!(fn email_pattern, r"^[a-zA-Z0-9._%+-]+@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})$");

/// Allow-list used by the rule, resolved once from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDomainOptions {
    allowed_domains: Vec<String>,
}

impl EmailDomainOptions {
    /// Builds an allow-list from operator-supplied domains
    ///
    /// Entries are trimmed, lower-cased and de-duplicated, keeping the first
    /// occurrence. An empty list falls back to the defaults.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed_domains: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref().trim().to_ascii_lowercase();
            if !domain.is_empty() && !allowed_domains.contains(&domain) {
                allowed_domains.push(domain);
            }
        }

        if allowed_domains.is_empty() {
            return Self::default();
        }
        Self { allowed_domains }
    }

    /// Resolves the options from a rule's configuration
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidOption` when the settings carry an option
    /// this rule does not understand.
    pub fn from_settings(settings: Option<&RuleSettings>) -> Result<Self, RuleError> {
        let Some(settings) = settings else {
            return Ok(Self::default());
        };

        if settings.mandatory_collections.is_some() {
            return Err(RuleError::InvalidOption {
                rule: ID.to_string(),
                option: "mandatory_collections".to_string(),
            });
        }

        Ok(match &settings.allowed_email_domains {
            Some(domains) => Self::new(domains),
            None => Self::default(),
        })
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Whether `domain` is on the allow-list (ASCII case-insensitive)
    pub fn allows(&self, domain: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain))
    }
}

impl Default for EmailDomainOptions {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_EMAIL_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

/// Whether `module` names the mail module
pub fn is_mail_module(module: &str) -> bool {
    MAIL_MODULES.contains(&module)
}

/// Extracts the domain of a plain email address
///
/// Returns `None` when `value` is not shaped like `local@domain.tld`.
pub fn email_domain(value: &str) -> Option<&str> {
    email_pattern()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collects recipient values from a task, in field order
///
/// Absent and null fields are skipped; list fields contribute each element.
pub fn recipient_values(task: &TaskNode) -> Vec<String> {
    let mut values = Vec::new();
    for field in RECIPIENT_FIELDS {
        match task.arg(field) {
            None | Some(Value::Null) => {}
            Some(Value::Sequence(items)) => {
                values.extend(items.iter().filter(|v| !v.is_null()).map(render))
            }
            Some(value) => values.push(render(value)),
        }
    }
    values
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Returns every recipient of a mail task that is not allowed
///
/// Non-mail tasks have no invalid recipients.
pub fn invalid_recipients(task: &TaskNode, options: &EmailDomainOptions) -> Vec<String> {
    if !is_mail_module(&task.module) {
        return Vec::new();
    }

    recipient_values(task)
        .into_iter()
        .filter(|value| !email_domain(value).is_some_and(|domain| options.allows(domain)))
        .collect()
}

/// Checks a task against the allow-list
pub fn check_task(task: &TaskNode, options: &EmailDomainOptions) -> TaskMatch {
    let invalid = invalid_recipients(task, options);
    if invalid.is_empty() {
        TaskMatch::Pass
    } else {
        TaskMatch::Fail(format!(
            "{}: {}",
            INVALID_RECIPIENTS_MESSAGE,
            invalid.join(", ")
        ))
    }
}

/// Rule restricting mail recipients to approved domains
#[derive(Debug, Clone)]
pub struct EmailAddressValidationRule {
    meta: RuleMeta,
    options: EmailDomainOptions,
}

impl EmailAddressValidationRule {
    pub fn new(options: EmailDomainOptions) -> Self {
        Self {
            meta: RuleMeta {
                id: RuleId::from_static(ID),
                shortdesc: "Sending email should only use valid email addresses",
                description: DESCRIPTION,
                severity: Severity::VeryHigh,
                tags: &["email", "customer"],
                version_added: "0.1.0",
            },
            options,
        }
    }

    /// Builds the rule from its configuration entry
    pub fn from_settings(settings: Option<&RuleSettings>) -> Result<Self, RuleError> {
        let mut rule = Self::new(EmailDomainOptions::from_settings(settings)?);
        if let Some(severity) = settings.and_then(|s| s.severity) {
            rule.meta.severity = severity;
        }
        Ok(rule)
    }

    pub fn email_options(&self) -> &EmailDomainOptions {
        &self.options
    }
}

impl Default for EmailAddressValidationRule {
    fn default() -> Self {
        Self::new(EmailDomainOptions::default())
    }
}

impl Rule for EmailAddressValidationRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn options(&self) -> Vec<(&'static str, &[String])> {
        vec![("allowed_email_domains", self.options.allowed_domains())]
    }

    fn match_task(&self, task: &TaskNode) -> TaskMatch {
        check_task(task, &self.options)
    }
}
