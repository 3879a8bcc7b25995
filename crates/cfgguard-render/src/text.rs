use crate::{RenderableReport, RenderableSeverity};

/// Plain terminal summary.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = format!("cfgguard: {}", report.verdict.label());
    let contract = report.data.contract.as_deref().unwrap_or("none");
    out.push_str(&format!(
        " (env={}, contract={contract})\n",
        if report.data.execution_env.is_empty() {
            "unset"
        } else {
            report.data.execution_env.as_str()
        }
    ));

    if !report.invariants.is_empty() {
        let passed = report.invariants.iter().filter(|i| i.passed).count();
        out.push_str(&format!(
            "invariants: {passed}/{} passed\n",
            report.invariants.len()
        ));
        for inv in report.invariants.iter().filter(|i| !i.passed) {
            out.push_str(&format!("  FAIL {}: {}\n", inv.name, inv.message));
        }
    }

    out.push_str(&format!(
        "findings: {} (emitted) / {} (total)\n",
        report.data.findings_emitted, report.data.findings_total
    ));
    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "info",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Error => "error",
        };
        out.push_str(&format!(
            "  {sev:<7} {}/{}: {}\n",
            f.check_id.as_deref().unwrap_or("cfgguard"),
            f.code,
            f.message
        ));
    }
    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("note: {r}\n"));
    }

    out
}
