//! The invariant rule language.
//!
//! ```text
//! Rule        := Comparison ( ImplyOp Comparison )?
//! Comparison  := Operand ( CompOp Operand )?
//! Operand     := StringLit | Ref
//! Ref         := Ident ( '.' Ident )*
//! ```
//!
//! `ImplyOp` is `=>` or `⇒`, `CompOp` is `==` or `!=`. The chain `execution.env`
//! refers to the ambient execution environment rather than a config key.
//!
//! Parsing and reference validation are separate steps: [`parse`] only checks
//! syntax, [`parse_rule`] additionally checks every referenced key against a
//! set of declared keys.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;

mod error;
mod format;
mod lexer;
mod parser;
mod refs;

pub use error::RuleError;
pub use format::format_rule;
pub use refs::{config_refs, undefined_refs, validate_refs};

/// Path that denotes the execution environment instead of a config key.
pub const EXECUTION_ENV_PATH: &str = "execution.env";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed rule expression.
///
/// The parser never nests an implication inside another expression; the
/// evaluator still accepts any shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleExpr {
    Implication {
        antecedent: Box<RuleExpr>,
        consequent: Box<RuleExpr>,
    },
    Comparison {
        left: Box<RuleExpr>,
        op: CompareOp,
        right: Box<RuleExpr>,
    },
    ConfigRef(String),
    ExecutionEnv,
    StringLiteral(String),
}

impl RuleExpr {
    pub fn implication(antecedent: RuleExpr, consequent: RuleExpr) -> Self {
        RuleExpr::Implication {
            antecedent: Box::new(antecedent),
            consequent: Box::new(consequent),
        }
    }

    pub fn comparison(left: RuleExpr, op: CompareOp, right: RuleExpr) -> Self {
        RuleExpr::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn config_ref(path: impl Into<String>) -> Self {
        RuleExpr::ConfigRef(path.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        RuleExpr::StringLiteral(value.into())
    }
}

/// A set of declared config-key paths that rules may reference.
pub trait KnownKeys {
    fn is_known(&self, path: &str) -> bool;
}

impl KnownKeys for BTreeSet<String> {
    fn is_known(&self, path: &str) -> bool {
        self.contains(path)
    }
}

impl<S: BuildHasher> KnownKeys for HashSet<String, S> {
    fn is_known(&self, path: &str) -> bool {
        self.contains(path)
    }
}

impl<V> KnownKeys for BTreeMap<String, V> {
    fn is_known(&self, path: &str) -> bool {
        self.contains_key(path)
    }
}

impl<V, S: BuildHasher> KnownKeys for HashMap<String, V, S> {
    fn is_known(&self, path: &str) -> bool {
        self.contains_key(path)
    }
}

impl KnownKeys for [&str] {
    fn is_known(&self, path: &str) -> bool {
        self.contains(&path)
    }
}

/// Parse a rule without checking which config keys it references.
pub fn parse(text: &str) -> Result<RuleExpr, RuleError> {
    let tokens = lexer::Lexer::new(text).lex()?;
    let mut parser = parser::Parser::new(tokens);
    let expr = parser.parse_rule()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parse a rule and, when `known` is given, reject references to undeclared keys.
///
/// All undeclared keys are reported together in a single [`RuleError::UndefinedKeys`].
pub fn parse_rule<K>(text: &str, known: Option<&K>) -> Result<RuleExpr, RuleError>
where
    K: KnownKeys + ?Sized,
{
    let expr = parse(text)?;
    if let Some(known) = known {
        validate_refs(&expr, known)?;
    }
    Ok(expr)
}
