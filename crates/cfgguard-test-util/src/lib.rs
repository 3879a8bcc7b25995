//! Shared test utilities for the cfgguard workspace.

use serde_json::Value;

/// Normalize non-deterministic JSON fields for report comparison.
///
/// - **Root-only**: `tool.version` becomes `"__VERSION__"` when the root object
///   looks like a report envelope (`schema`, `tool`, `verdict`, `findings`, `data`).
/// - **Recursive**: `started_at` and `finished_at` become `"__TIMESTAMP__"` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "findings", "data"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_envelope_version_and_timestamps() {
        let report = json!({
            "schema": "cfgguard.report.v1",
            "tool": {"name": "cfgguard", "version": "0.1.0"},
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "pass",
            "findings": [],
            "data": {"profile": "strict"}
        });
        let n = normalize_nondeterministic(report);
        assert_eq!(n["tool"]["version"], "__VERSION__");
        assert_eq!(n["started_at"], "__TIMESTAMP__");
        assert_eq!(n["finished_at"], "__TIMESTAMP__");
        assert_eq!(n["data"]["profile"], "strict");
    }

    #[test]
    fn leaves_non_envelope_version_alone() {
        let value = json!({"tool": {"version": "1.2.3"}, "nested": [{"started_at": "x"}]});
        let n = normalize_nondeterministic(value);
        assert_eq!(n["tool"]["version"], "1.2.3");
        assert_eq!(n["nested"][0]["started_at"], "__TIMESTAMP__");
    }
}
