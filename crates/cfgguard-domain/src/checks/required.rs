use super::CheckInput;
use crate::fingerprint::fingerprint_for;
use crate::policy::EffectiveConfig;
use cfgguard_types::{Finding, ids};
use serde_json::json;

pub fn run(input: &CheckInput<'_>, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_CONFIG_REQUIRED) else {
        return;
    };

    for (key, decl) in &input.schema.config {
        if !decl.required || input.ctx.config_values.contains_key(key) {
            continue;
        }
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_CONFIG_REQUIRED.to_string(),
            code: ids::CODE_MISSING_REQUIRED_KEY.to_string(),
            message: format!("required config key '{key}' is not set"),
            location: None,
            help: Some("Set the corresponding environment variable for this deployment.".to_string()),
            url: None,
            fingerprint: Some(fingerprint_for(
                ids::CHECK_CONFIG_REQUIRED,
                ids::CODE_MISSING_REQUIRED_KEY,
                key,
                None,
            )),
            data: json!({
                "key": key,
                "type": decl.config_type.as_str(),
            }),
        });
    }
}
