//! Per-environment allow/deny contracts.

use crate::glob::glob_match;
use cfgguard_types::{EvalResult, RuleType, Violation};
use std::collections::BTreeMap;

/// An ordered set of values for one key.
///
/// Allow rules always compare exactly. Deny rules treat values containing `*`
/// as glob patterns when `is_glob` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rule {
    pub values: Vec<String>,
    pub is_glob: bool,
}

impl Rule {
    pub fn allow<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            is_glob: false,
        }
    }

    /// Deny rule; `is_glob` is set when any value contains `*`.
    pub fn deny<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let is_glob = values.iter().any(|v| v.contains('*'));
        Self { values, is_glob }
    }

    fn first_match(&self, value: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|pattern| {
                if self.is_glob {
                    glob_match(pattern, value)
                } else {
                    pattern.as_str() == value
                }
            })
            .map(String::as_str)
    }
}

/// Allow/deny rules for one environment. A key may appear in both maps; deny wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contract {
    pub name: String,
    pub allow: BTreeMap<String, Rule>,
    pub deny: BTreeMap<String, Rule>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_allow(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.allow.insert(key.into(), rule);
        self
    }

    pub fn with_deny(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.deny.insert(key.into(), rule);
        self
    }

    /// Every key this contract constrains, either way.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.allow
            .keys()
            .chain(self.deny.keys().filter(|k| !self.allow.contains_key(*k)))
            .map(String::as_str)
    }
}

fn check_key(contract: &Contract, key: &str, value: &str) -> Option<Violation> {
    if let Some(deny) = contract.deny.get(key) {
        if let Some(pattern) = deny.first_match(value) {
            return Some(Violation {
                key: key.to_string(),
                actual_value: value.to_string(),
                rule_type: RuleType::Deny,
                expected_values: deny.values.clone(),
                pattern: Some(pattern.to_string()),
            });
        }
        // A deny rule that does not match still lets the allow list apply.
    }

    let allow = contract.allow.get(key)?;
    if allow.values.iter().any(|v| v == value) {
        return None;
    }
    Some(Violation {
        key: key.to_string(),
        actual_value: value.to_string(),
        rule_type: RuleType::Allow,
        expected_values: allow.values.clone(),
        pattern: None,
    })
}

/// Check every resolved value against the contract and collect all violations.
///
/// Keys the contract does not mention always pass.
pub fn evaluate(contract: &Contract, config_values: &BTreeMap<String, String>) -> EvalResult {
    let violations: Vec<Violation> = config_values
        .iter()
        .filter_map(|(key, value)| check_key(contract, key, value))
        .collect();

    EvalResult {
        environment: contract.name.clone(),
        passed: violations.is_empty(),
        violations,
    }
}
