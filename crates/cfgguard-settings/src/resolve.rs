use crate::{model::CfgguardConfigV1, presets};
use anyhow::Context;
use cfgguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use cfgguard_env::ResolverSettings;
use cfgguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub environment: Option<String>,
    pub env_prefix: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub resolver: ResolverSettings,
}

pub fn resolve_config(
    cfg: CfgguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());
    if !matches!(profile.as_str(), "strict" | "warn") {
        anyhow::bail!("unknown profile: {profile} (expected 'strict' or 'warn')");
    }

    let mut effective = presets::preset(&profile);

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    effective.environment = overrides
        .environment
        .clone()
        .or(cfg.environment.clone())
        .filter(|e| !e.is_empty());

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let mut resolver = ResolverSettings::default();
    if let Some(prefix) = overrides.env_prefix.or(cfg.env_prefix) {
        resolver.env_prefix = Some(prefix).filter(|p| !p.is_empty());
    }
    if let Some(var) = cfg.execution_env_var {
        if var.trim().is_empty() {
            anyhow::bail!("execution_env_var must not be empty");
        }
        resolver.execution_env_var = var;
    }

    Ok(ResolvedConfig {
        effective,
        resolver,
    })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
