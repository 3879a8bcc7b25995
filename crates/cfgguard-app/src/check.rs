//! The `check` use case: resolve config, evaluate the schema, and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use cfgguard_env::EnvSource;
use cfgguard_settings::{Overrides, ResolvedConfig};
use cfgguard_types::{CfgguardReport, Location, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::artifact::ConfigSnapshot;

/// Input for the check use case.
pub struct CheckInput<'a> {
    /// Schema file path.
    pub schema_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Where config values are read from.
    pub env: &'a dyn EnvSource,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: CfgguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// The values the report was computed from.
    pub snapshot: ConfigSnapshot,
}

/// Run the check use case: parse config, load schema, resolve values, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        cfgguard_settings::CfgguardConfigV1::default()
    } else {
        cfgguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = cfgguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let schema = cfgguard_schema::load_schema(input.schema_path).context("load schema")?;
    debug!(
        keys = schema.config.len(),
        invariants = schema.invariants.len(),
        environments = schema.environments.len(),
        "schema loaded"
    );

    let resolution = cfgguard_env::resolve(&schema, input.env, &resolved.resolver);
    let snapshot = ConfigSnapshot::from_resolution(&resolution);
    let config_sha256 = snapshot.sha256()?;

    let ctx = resolution.into_context();
    let domain_report = cfgguard_domain::evaluate(&schema, &ctx, &resolved.effective);
    let cfgguard_domain::report::DomainReport {
        verdict,
        mut findings,
        mut data,
        counts,
        invariants,
        contract,
    } = domain_report;

    for f in &mut findings {
        f.location = Some(Location {
            path: input.schema_path.to_string(),
            line: None,
            col: None,
        });
    }
    data.config_sha256 = Some(config_sha256);

    info!(
        verdict = ?verdict,
        errors = counts.error,
        warnings = counts.warning,
        contract = data.contract.as_deref().unwrap_or("none"),
        "check finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "cfgguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
        invariants,
        contract,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        snapshot,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
