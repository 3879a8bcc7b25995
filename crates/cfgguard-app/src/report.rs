use anyhow::Context;
use cfgguard_render::{
    RenderableData, RenderableFinding, RenderableInvariant, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
use cfgguard_types::{
    CfgguardData, CfgguardReport, Finding, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<CfgguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse cfgguard report")
}

pub fn serialize_report(report: &CfgguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CfgguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        invariants: report
            .invariants
            .iter()
            .map(|r| RenderableInvariant {
                name: r.name.clone(),
                passed: r.passed,
                message: r.message.clone(),
            })
            .collect(),
        data: RenderableData {
            execution_env: report.data.execution_env.clone(),
            contract: report.data.contract.clone(),
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.clone(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
        url: f.url.clone(),
    }
}

/// A failing report for when the tool itself could not run.
pub fn runtime_error_report(message: &str) -> CfgguardReport {
    let now = OffsetDateTime::now_utc();
    CfgguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "cfgguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run cfgguard.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: CfgguardData {
            profile: "unknown".to_string(),
            findings_total: 1,
            findings_emitted: 1,
            ..CfgguardData::default()
        },
        invariants: Vec::new(),
        contract: None,
    }
}
