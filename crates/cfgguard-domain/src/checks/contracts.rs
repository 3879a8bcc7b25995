use super::CheckInput;
use crate::fingerprint::fingerprint_for;
use crate::policy::EffectiveConfig;
use cfgguard_types::{Finding, RuleType, Violation, ids};
use serde_json::json;

pub fn run(input: &CheckInput<'_>, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(result) = input.contract else {
        return;
    };

    for violation in &result.violations {
        let (check_id, code) = match violation.rule_type {
            RuleType::Allow => (ids::CHECK_CONTRACT_ALLOW, ids::CODE_VALUE_NOT_ALLOWED),
            RuleType::Deny => (ids::CHECK_CONTRACT_DENY, ids::CODE_VALUE_DENIED),
        };
        let Some(policy) = cfg.check_policy(check_id) else {
            continue;
        };

        out.push(Finding {
            severity: policy.severity,
            check_id: check_id.to_string(),
            code: code.to_string(),
            message: message(&result.environment, violation),
            location: None,
            help: Some(help(violation.rule_type).to_string()),
            url: None,
            fingerprint: Some(fingerprint_for(
                check_id,
                code,
                &violation.key,
                violation.pattern.as_deref(),
            )),
            data: json!({
                "environment": result.environment,
                "key": violation.key,
                "value": violation.actual_value,
                "rule_type": violation.rule_type.as_str(),
                "expected": violation.expected_values,
                "pattern": violation.pattern,
            }),
        });
    }
}

fn message(environment: &str, v: &Violation) -> String {
    match (v.rule_type, v.pattern.as_deref()) {
        (RuleType::Deny, Some(pattern)) => format!(
            "'{}' = '{}' is denied in environment '{environment}' (matches '{pattern}')",
            v.key, v.actual_value
        ),
        _ => format!(
            "'{}' = '{}' is not allowed in environment '{environment}' (allowed: {})",
            v.key,
            v.actual_value,
            v.expected_values.join(", ")
        ),
    }
}

fn help(rule_type: RuleType) -> &'static str {
    match rule_type {
        RuleType::Allow => "Use one of the values the environment contract allows.",
        RuleType::Deny => "This value is explicitly denied for the environment; choose another.",
    }
}
