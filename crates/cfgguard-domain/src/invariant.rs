//! Invariant evaluation: walk a rule AST against a resolved context.

use crate::rule::{CompareOp, RuleExpr};
use cfgguard_types::InvariantResult;
use std::collections::BTreeMap;

/// A named rule declared in the schema. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invariant {
    pub name: String,
    /// Source text as written in the schema.
    pub rule: String,
    pub expr: RuleExpr,
}

/// Resolved configuration for one check run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalContext {
    pub config_values: BTreeMap<String, String>,
    pub execution_env: String,
}

impl EvalContext {
    pub fn new(config_values: BTreeMap<String, String>, execution_env: impl Into<String>) -> Self {
        Self {
            config_values,
            execution_env: execution_env.into(),
        }
    }

    /// Value of a config key; unset keys read as the empty string.
    pub fn value(&self, path: &str) -> &str {
        self.config_values.get(path).map(String::as_str).unwrap_or("")
    }
}

/// Intermediate result for one node: its string value and its truthiness.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Outcome {
    value: String,
    passed: bool,
    left: String,
    right: String,
}

impl Outcome {
    fn operand(value: String, passed: bool) -> Self {
        Self {
            left: value.clone(),
            right: String::new(),
            value,
            passed,
        }
    }
}

fn bool_str(b: bool) -> String {
    if b { "true" } else { "false" }.to_string()
}

fn eval(expr: &RuleExpr, ctx: &EvalContext) -> Outcome {
    match expr {
        RuleExpr::StringLiteral(value) => Outcome::operand(value.clone(), true),
        RuleExpr::ConfigRef(path) => {
            let value = ctx.value(path);
            Outcome::operand(value.to_string(), !value.is_empty())
        }
        RuleExpr::ExecutionEnv => {
            Outcome::operand(ctx.execution_env.clone(), !ctx.execution_env.is_empty())
        }
        RuleExpr::Comparison { left, op, right } => {
            let l = operand_value(left, ctx);
            let r = operand_value(right, ctx);
            let passed = match op {
                CompareOp::Equal => l == r,
                CompareOp::NotEqual => l != r,
            };
            Outcome {
                value: bool_str(passed),
                passed,
                left: l,
                right: r,
            }
        }
        RuleExpr::Implication {
            antecedent,
            consequent,
        } => {
            let a = eval(antecedent, ctx);
            let c = eval(consequent, ctx);
            let passed = !a.passed || c.passed;
            Outcome {
                value: bool_str(passed),
                passed,
                left: c.left,
                right: c.right,
            }
        }
    }
}

/// Comparison operands compare by string; boolean sub-expressions render as `"true"`/`"false"`.
fn operand_value(expr: &RuleExpr, ctx: &EvalContext) -> String {
    match expr {
        RuleExpr::Comparison { .. } | RuleExpr::Implication { .. } => {
            bool_str(eval(expr, ctx).passed)
        }
        _ => eval(expr, ctx).value,
    }
}

fn failure_message(expr: &RuleExpr, outcome: &Outcome) -> String {
    match expr {
        RuleExpr::Implication {
            antecedent,
            consequent,
        } => format!(
            "`{antecedent}` holds but `{consequent}` does not (left=\"{}\", right=\"{}\")",
            outcome.left, outcome.right
        ),
        RuleExpr::Comparison { .. } => format!(
            "`{expr}` does not hold (left=\"{}\", right=\"{}\")",
            outcome.left, outcome.right
        ),
        _ => format!("`{expr}` resolved to an empty value"),
    }
}

/// Evaluate one invariant. Failure to hold is a result, never an error.
pub fn evaluate(invariant: &Invariant, ctx: &EvalContext) -> InvariantResult {
    let outcome = eval(&invariant.expr, ctx);
    let message = if outcome.passed {
        String::new()
    } else {
        failure_message(&invariant.expr, &outcome)
    };

    InvariantResult {
        name: invariant.name.clone(),
        rule: invariant.rule.clone(),
        passed: outcome.passed,
        left_value: outcome.left,
        right_value: outcome.right,
        message,
    }
}

/// Evaluate every invariant in input order. Earlier failures never stop later evaluations.
pub fn evaluate_all(invariants: &[Invariant], ctx: &EvalContext) -> Vec<InvariantResult> {
    invariants.iter().map(|inv| evaluate(inv, ctx)).collect()
}
