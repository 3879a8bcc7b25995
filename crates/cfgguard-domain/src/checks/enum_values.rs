use super::CheckInput;
use crate::fingerprint::fingerprint_for;
use crate::model::ConfigType;
use crate::policy::EffectiveConfig;
use cfgguard_types::{Finding, ids};
use serde_json::json;

pub fn run(input: &CheckInput<'_>, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_CONFIG_ENUM) else {
        return;
    };

    for (key, decl) in &input.schema.config {
        if decl.config_type != ConfigType::Enum {
            continue;
        }
        let Some(value) = input.ctx.config_values.get(key) else {
            continue;
        };
        if decl.values.iter().any(|v| v == value) {
            continue;
        }
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_CONFIG_ENUM.to_string(),
            code: ids::CODE_VALUE_NOT_IN_ENUM.to_string(),
            message: format!(
                "config key '{key}' has value '{value}', expected one of: {}",
                decl.values.join(", ")
            ),
            location: None,
            help: Some("Use one of the values declared for this key in the schema.".to_string()),
            url: None,
            fingerprint: Some(fingerprint_for(
                ids::CHECK_CONFIG_ENUM,
                ids::CODE_VALUE_NOT_IN_ENUM,
                key,
                None,
            )),
            data: json!({
                "key": key,
                "type": decl.config_type.as_str(),
                "value": value,
                "allowed": decl.values,
            }),
        });
    }
}
