use crate::contract::Contract;
use crate::invariant::{EvalContext, Invariant};
use crate::model::{ConfigDecl, ConfigType, Schema};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use crate::rule::parse;
use cfgguard_types::Severity;
use std::collections::BTreeMap;

pub fn ctx(pairs: &[(&str, &str)], execution_env: &str) -> EvalContext {
    EvalContext::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        execution_env,
    )
}

pub fn string_decl(required: bool) -> ConfigDecl {
    ConfigDecl {
        config_type: ConfigType::String,
        required,
        values: Vec::new(),
    }
}

pub fn enum_decl(values: &[&str]) -> ConfigDecl {
    ConfigDecl {
        config_type: ConfigType::Enum,
        required: false,
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

pub fn invariant(name: &str, rule: &str) -> Invariant {
    Invariant {
        name: name.to_string(),
        rule: rule.to_string(),
        expr: parse(rule).expect("test rule must parse"),
    }
}

/// Schema with string keys `(path, required)`, invariants `(name, rule)` and contracts.
pub fn schema_with(
    keys: &[(&str, bool)],
    invariants: &[(&str, &str)],
    contracts: Vec<Contract>,
) -> Schema {
    Schema {
        config: keys
            .iter()
            .map(|(k, required)| (k.to_string(), string_decl(*required)))
            .collect(),
        invariants: invariants
            .iter()
            .map(|(name, rule)| invariant(name, rule))
            .collect(),
        environments: contracts.into_iter().map(|c| (c.name.clone(), c)).collect(),
    }
}

pub fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(check_id.to_string(), CheckPolicy::enabled(severity));
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        environment: None,
        checks,
    }
}

pub fn config_all(severity: Severity) -> EffectiveConfig {
    let checks = cfgguard_types::ids::ALL_CHECKS
        .iter()
        .map(|id| (id.to_string(), CheckPolicy::enabled(severity)))
        .collect();
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        environment: None,
        checks,
    }
}
