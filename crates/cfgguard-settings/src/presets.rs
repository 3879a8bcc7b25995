use cfgguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use cfgguard_types::{Severity, ids};
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into `cfgguard.toml`.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        environment: None,
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        environment: None,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    ids::ALL_CHECKS
        .iter()
        .map(|id| (id.to_string(), CheckPolicy::enabled(default_severity)))
        .collect()
}
