use crate::checks::{self, CheckInput};
use crate::invariant::{self, EvalContext};
use crate::model::Schema;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use crate::contract;
use cfgguard_types::{CfgguardData, Finding, Severity, Verdict};

pub fn evaluate(schema: &Schema, ctx: &EvalContext, cfg: &EffectiveConfig) -> DomainReport {
    let invariants = invariant::evaluate_all(&schema.invariants, ctx);

    let contract_name = cfg
        .environment
        .as_deref()
        .unwrap_or(ctx.execution_env.as_str());
    let contract_result = schema
        .contract(contract_name)
        .map(|c| contract::evaluate(c, &ctx.config_values));

    let mut findings: Vec<Finding> = Vec::new();
    let input = CheckInput {
        schema,
        ctx,
        invariants: &invariants,
        contract: contract_result.as_ref(),
    };
    checks::run_all(&input, cfg, &mut findings);

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = CfgguardData {
        profile: cfg.profile.clone(),
        execution_env: ctx.execution_env.clone(),
        contract: contract_result.as_ref().map(|r| r.environment.clone()),
        keys_declared: schema.config.len() as u32,
        keys_resolved: ctx.config_values.len() as u32,
        invariants_evaluated: invariants.len() as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        config_sha256: None,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
        invariants,
        contract: contract_result,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) check_id
    // 3) code
    // 4) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
