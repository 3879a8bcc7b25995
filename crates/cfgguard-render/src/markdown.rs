use crate::{RenderableReport, RenderableSeverity};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# cfgguard report\n\n");
    let env = if report.data.execution_env.is_empty() {
        "(unset)"
    } else {
        report.data.execution_env.as_str()
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Execution environment: `{}`\n- Contract: {}\n- Findings: {} (emitted) / {} (total)\n\n",
        report.verdict.label(),
        env,
        report
            .data
            .contract
            .as_deref()
            .map(|c| format!("`{c}`"))
            .unwrap_or_else(|| "none".to_string()),
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {r}\n\n"));
    }

    if !report.invariants.is_empty() {
        out.push_str("## Invariants\n\n");
        out.push_str("| Invariant | Result |\n|---|---|\n");
        for inv in &report.invariants {
            let result = if inv.passed { "pass" } else { "**fail**" };
            out.push_str(&format!("| `{}` | {} |\n", inv.name, result));
        }
        out.push('\n');
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!(
            "- [{}] `{}` / `{}`: {}\n",
            sev,
            f.check_id.as_deref().unwrap_or(""),
            f.code,
            f.message
        ));

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {help}\n"));
        }
        if let Some(url) = &f.url {
            out.push_str(&format!("  - url: {url}\n"));
        }
    }

    out
}
