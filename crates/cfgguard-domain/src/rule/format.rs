use super::{EXECUTION_ENV_PATH, RuleExpr};
use std::fmt;

/// Render a rule in canonical form. Parsing the output yields the same expression.
///
/// String literals are re-quoted verbatim; embedded `"` characters are not escaped.
pub fn format_rule(expr: &RuleExpr) -> String {
    expr.to_string()
}

impl fmt::Display for RuleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleExpr::Implication {
                antecedent,
                consequent,
            } => write!(f, "{antecedent} => {consequent}"),
            RuleExpr::Comparison { left, op, right } => write!(f, "{left} {op} {right}"),
            RuleExpr::ConfigRef(path) => f.write_str(path),
            RuleExpr::ExecutionEnv => f.write_str(EXECUTION_ENV_PATH),
            RuleExpr::StringLiteral(value) => write!(f, "\"{value}\""),
        }
    }
}
