//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Rule formatting and re-parsing
//! - Implication and comparison semantics
//! - Glob matching and contract evaluation
//! - Findings ordering determinism

use crate::contract::{self, Contract, Rule};
use crate::engine::evaluate;
use crate::glob::glob_match;
use crate::invariant::{self, EvalContext, Invariant};
use crate::rule::{CompareOp, EXECUTION_ENV_PATH, RuleExpr, format_rule, parse};
use crate::test_support::{config_all, schema_with};
use cfgguard_types::{RuleType, Severity};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z_][A-Za-z0-9_-]{0,8}").unwrap()
}

/// Dotted config path; never the reserved `execution.env`.
fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_ident(), 1..4)
        .prop_map(|segments| segments.join("."))
        .prop_filter("reserved path", |p| p != EXECUTION_ENV_PATH)
}

/// Literal contents the lexer can read back: anything but `"`.
fn arb_literal() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _.:/*=>!-]{0,12}").unwrap()
}

fn arb_operand() -> impl Strategy<Value = RuleExpr> {
    prop_oneof![
        arb_path().prop_map(RuleExpr::ConfigRef),
        arb_literal().prop_map(RuleExpr::StringLiteral),
        Just(RuleExpr::ExecutionEnv),
    ]
}

fn arb_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![Just(CompareOp::Equal), Just(CompareOp::NotEqual)]
}

fn arb_comparison() -> impl Strategy<Value = RuleExpr> {
    prop_oneof![
        arb_operand(),
        (arb_operand(), arb_op(), arb_operand())
            .prop_map(|(l, op, r)| RuleExpr::comparison(l, op, r)),
    ]
}

/// Only shapes the parser can produce.
fn arb_rule() -> impl Strategy<Value = RuleExpr> {
    prop_oneof![
        arb_comparison(),
        (arb_comparison(), arb_comparison()).prop_map(|(a, c)| RuleExpr::implication(a, c)),
    ]
}

fn arb_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9:/.-]{0,16}").unwrap()
}

fn holds(expr: RuleExpr, ctx: &EvalContext) -> bool {
    let inv = Invariant {
        name: "p".to_string(),
        rule: format_rule(&expr),
        expr,
    };
    invariant::evaluate(&inv, ctx).passed
}

fn literal_cmp(passes: bool) -> RuleExpr {
    let op = if passes {
        CompareOp::Equal
    } else {
        CompareOp::NotEqual
    };
    RuleExpr::comparison(RuleExpr::literal("x"), op, RuleExpr::literal("x"))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn formatted_rule_reparses_to_same_ast(expr in arb_rule()) {
        let text = format_rule(&expr);
        let reparsed = parse(&text).expect("canonical form parses");
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn formatting_is_idempotent(expr in arb_rule()) {
        let once = format_rule(&expr);
        let twice = format_rule(&parse(&once).expect("canonical form parses"));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn implication_is_material(a in any::<bool>(), c in any::<bool>()) {
        let expr = RuleExpr::implication(literal_cmp(a), literal_cmp(c));
        prop_assert_eq!(holds(expr, &EvalContext::default()), !a || c);
    }

    #[test]
    fn equality_and_inequality_are_complementary(
        key in arb_path(),
        value in arb_value(),
        expected in arb_value(),
    ) {
        let mut values = BTreeMap::new();
        values.insert(key.clone(), value.clone());
        let ctx = EvalContext::new(values, "dev");

        let eq = RuleExpr::comparison(
            RuleExpr::config_ref(&key),
            CompareOp::Equal,
            RuleExpr::literal(&expected),
        );
        let ne = RuleExpr::comparison(
            RuleExpr::config_ref(&key),
            CompareOp::NotEqual,
            RuleExpr::literal(&expected),
        );
        let eq_holds = holds(eq, &ctx);
        prop_assert_eq!(eq_holds, value == expected);
        prop_assert_eq!(holds(ne, &ctx), !eq_holds);
    }

    #[test]
    fn star_matches_everything(value in arb_value()) {
        prop_assert!(glob_match("*", &value));
    }

    #[test]
    fn pattern_without_star_is_equality(pattern in arb_value(), value in arb_value()) {
        prop_assert_eq!(glob_match(&pattern, &value), pattern == value);
    }

    #[test]
    fn contains_pattern_matches_substring(
        prefix in arb_value(),
        needle in "[a-z]{1,6}",
        suffix in arb_value(),
    ) {
        let value = format!("{prefix}{needle}{suffix}");
        let contains = format!("*{needle}*");
        let starts_with = format!("{prefix}*");
        let ends_with = format!("*{suffix}");
        prop_assert!(glob_match(&contains, &value), "{contains} vs {value}");
        prop_assert!(glob_match(&starts_with, &value), "{starts_with} vs {value}");
        prop_assert!(glob_match(&ends_with, &value), "{ends_with} vs {value}");
    }

    #[test]
    fn deny_wins_over_allow_for_same_value(value in arb_value()) {
        let contract = Contract::new("prod")
            .with_allow("k", Rule::allow([value.clone()]))
            .with_deny("k", Rule::deny([value.clone()]));
        let mut values = BTreeMap::new();
        values.insert("k".to_string(), value);

        let result = contract::evaluate(&contract, &values);
        prop_assert_eq!(result.violations.len(), 1);
        prop_assert_eq!(result.violations[0].rule_type, RuleType::Deny);
    }

    #[test]
    fn unmentioned_keys_always_pass(
        values in prop::collection::btree_map(arb_path(), arb_value(), 0..8),
    ) {
        let contract = Contract::new("prod")
            .with_allow("__constrained", Rule::allow(["x"]))
            .with_deny("__constrained", Rule::deny(["*"]));
        let result = contract::evaluate(&contract, &values);
        prop_assert!(result.passed);
    }

    #[test]
    fn every_violating_key_is_reported(count in 1usize..8) {
        let mut contract = Contract::new("prod");
        let mut values = BTreeMap::new();
        for i in 0..count {
            let key = format!("key{i}");
            contract = contract.with_allow(key.clone(), Rule::allow(["ok"]));
            values.insert(key, "bad".to_string());
        }
        let result = contract::evaluate(&contract, &values);
        prop_assert!(!result.passed);
        prop_assert_eq!(result.violations.len(), count);
    }

    #[test]
    fn evaluation_is_deterministic(
        required in prop::collection::vec((arb_path(), any::<bool>()), 0..6),
        present in prop::collection::btree_map(arb_path(), arb_value(), 0..6),
    ) {
        let keys: Vec<(&str, bool)> = required.iter().map(|(k, r)| (k.as_str(), *r)).collect();
        let schema = schema_with(&keys, &[], Vec::new());
        let cfg = config_all(Severity::Error);
        let ctx = EvalContext::new(present, "dev");

        let a = evaluate(&schema, &ctx, &cfg);
        let b = evaluate(&schema, &ctx, &cfg);
        prop_assert_eq!(a.findings, b.findings);
        prop_assert_eq!(a.verdict, b.verdict);
    }
}
