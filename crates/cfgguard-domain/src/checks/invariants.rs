use super::CheckInput;
use crate::fingerprint::fingerprint_for;
use crate::policy::EffectiveConfig;
use cfgguard_types::{Finding, ids};
use serde_json::json;

pub fn run(input: &CheckInput<'_>, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_INVARIANT_RULE) else {
        return;
    };

    for result in input.invariants.iter().filter(|r| !r.passed) {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_INVARIANT_RULE.to_string(),
            code: ids::CODE_INVARIANT_VIOLATED.to_string(),
            message: format!("invariant '{}' failed: {}", result.name, result.message),
            location: None,
            help: Some(format!("Rule: {}", result.rule)),
            url: None,
            fingerprint: Some(fingerprint_for(
                ids::CHECK_INVARIANT_RULE,
                ids::CODE_INVARIANT_VIOLATED,
                &result.name,
                None,
            )),
            data: json!({
                "invariant": result.name,
                "rule": result.rule,
                "left": result.left_value,
                "right": result.right_value,
            }),
        });
    }
}
