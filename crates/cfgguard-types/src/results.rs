//! Result records produced by the invariant and contract evaluators.
//!
//! These are pure derived data: reporters consume them, nothing mutates them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one invariant against a resolved context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InvariantResult {
    pub name: String,
    /// Source text of the rule as declared in the schema.
    pub rule: String,
    pub passed: bool,
    pub left_value: String,
    pub right_value: String,
    /// Human-readable explanation; empty when the invariant holds.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Which side of a contract produced a violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Allow,
    Deny,
}

impl RuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Allow => "allow",
            RuleType::Deny => "deny",
        }
    }
}

/// A single contract-rule failure for one key/value pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub key: String,
    pub actual_value: String,
    pub rule_type: RuleType,
    pub expected_values: Vec<String>,
    /// The deny pattern that matched (deny violations only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Outcome of evaluating one environment contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvalResult {
    pub environment: String,
    pub passed: bool,
    pub violations: Vec<Violation>,
}
