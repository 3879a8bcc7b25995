//! The `validate` and `fmt-rule` use cases: schema and rule checks without evaluation.

use anyhow::Context;
use camino::Utf8Path;
use cfgguard_domain::rule::{RuleError, format_rule, parse};

/// Summary of a schema that loaded cleanly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateOutput {
    pub keys: usize,
    pub invariants: usize,
    pub environments: Vec<String>,
}

pub fn run_validate(schema_path: &Utf8Path) -> anyhow::Result<ValidateOutput> {
    let schema = cfgguard_schema::load_schema(schema_path)
        .with_context(|| format!("validate {schema_path}"))?;
    Ok(ValidateOutput {
        keys: schema.config.len(),
        invariants: schema.invariants.len(),
        environments: schema.environments.keys().cloned().collect(),
    })
}

/// Parse a rule without a schema and return its canonical form.
pub fn run_fmt_rule(text: &str) -> Result<String, RuleError> {
    parse(text).map(|expr| format_rule(&expr))
}
