use super::error::RuleError;
use super::lexer::{SpannedToken, Token};
use super::{CompareOp, EXECUTION_ENV_PATH, RuleExpr};

/// Recursive-descent parser with one token of lookahead and no backtracking.
pub(super) struct Parser<'a> {
    tokens: Vec<SpannedToken<'a>>,
    index: usize,
}

impl<'a> Parser<'a> {
    /// `tokens` must be terminated by `Token::Eof`, as produced by the lexer.
    pub(super) fn new(tokens: Vec<SpannedToken<'a>>) -> Self {
        Self { tokens, index: 0 }
    }

    /// `Rule := Comparison ( ImplyOp Comparison )?`
    pub(super) fn parse_rule(&mut self) -> Result<RuleExpr, RuleError> {
        let antecedent = self.parse_comparison()?;
        if self.matches(Token::Implies) {
            let consequent = self.parse_comparison()?;
            return Ok(RuleExpr::implication(antecedent, consequent));
        }
        Ok(antecedent)
    }

    pub(super) fn expect_eof(&self) -> Result<(), RuleError> {
        let current = self.current();
        match current.token {
            Token::Eof => Ok(()),
            other => Err(RuleError::TrailingToken {
                found: other.describe(),
                position: current.position,
            }),
        }
    }

    /// `Comparison := Operand ( CompOp Operand )?`
    fn parse_comparison(&mut self) -> Result<RuleExpr, RuleError> {
        let left = self.parse_operand()?;
        let op = match self.current().token {
            Token::Eq => CompareOp::Equal,
            Token::NotEq => CompareOp::NotEqual,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_operand()?;
        Ok(RuleExpr::comparison(left, op, right))
    }

    /// `Operand := StringLit | Ref`
    fn parse_operand(&mut self) -> Result<RuleExpr, RuleError> {
        let current = self.current();
        match current.token {
            Token::Str(value) => {
                self.advance();
                Ok(RuleExpr::StringLiteral(value.to_string()))
            }
            Token::Ident(first) => {
                self.advance();
                self.parse_ref(first)
            }
            other => Err(RuleError::ExpectedOperand {
                found: other.describe(),
                position: current.position,
            }),
        }
    }

    /// `Ref := Ident ( '.' Ident )*`, with the leading identifier already consumed.
    fn parse_ref(&mut self, first: &'a str) -> Result<RuleExpr, RuleError> {
        let mut segments = vec![first];
        while self.matches(Token::Dot) {
            let current = self.current();
            let Token::Ident(segment) = current.token else {
                return Err(RuleError::ExpectedIdentAfterDot {
                    position: current.position,
                });
            };
            segments.push(segment);
            self.advance();
        }

        let path = segments.join(".");
        if path == EXECUTION_ENV_PATH {
            Ok(RuleExpr::ExecutionEnv)
        } else {
            Ok(RuleExpr::ConfigRef(path))
        }
    }

    fn current(&self) -> SpannedToken<'a> {
        // The stream always ends with Eof and the parser never advances past it.
        self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn matches(&mut self, token: Token<'_>) -> bool {
        if self.current().token == token {
            self.advance();
            true
        } else {
            false
        }
    }
}
