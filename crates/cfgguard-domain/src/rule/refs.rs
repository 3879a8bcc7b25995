use super::error::RuleError;
use super::{KnownKeys, RuleExpr};

/// Every config-key path referenced by `expr`, in traversal order
/// (antecedent before consequent, left before right).
pub fn config_refs(expr: &RuleExpr) -> Vec<&str> {
    let mut out = Vec::new();
    collect(expr, &mut out);
    out
}

fn collect<'a>(expr: &'a RuleExpr, out: &mut Vec<&'a str>) {
    match expr {
        RuleExpr::Implication {
            antecedent,
            consequent,
        } => {
            collect(antecedent, out);
            collect(consequent, out);
        }
        RuleExpr::Comparison { left, right, .. } => {
            collect(left, out);
            collect(right, out);
        }
        RuleExpr::ConfigRef(path) => out.push(path),
        RuleExpr::ExecutionEnv | RuleExpr::StringLiteral(_) => {}
    }
}

/// Referenced paths that `known` does not declare, one entry per occurrence in
/// traversal order.
pub fn undefined_refs<K>(expr: &RuleExpr, known: &K) -> Vec<String>
where
    K: KnownKeys + ?Sized,
{
    config_refs(expr)
        .into_iter()
        .filter(|path| !known.is_known(path))
        .map(str::to_string)
        .collect()
}

pub fn validate_refs<K>(expr: &RuleExpr, known: &K) -> Result<(), RuleError>
where
    K: KnownKeys + ?Sized,
{
    let keys = undefined_refs(expr, known);
    if keys.is_empty() {
        Ok(())
    } else {
        Err(RuleError::UndefinedKeys { keys })
    }
}
