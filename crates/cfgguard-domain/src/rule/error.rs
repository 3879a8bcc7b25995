use thiserror::Error;

/// Errors produced while lexing, parsing, or validating a rule.
///
/// Positions are byte offsets into the rule text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule is empty")]
    Empty,

    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: usize },

    #[error("unexpected character `{found}` at {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("expected identifier after `.` at {position}")]
    ExpectedIdentAfterDot { position: usize },

    #[error("expected string literal or config key at {position}, found {found}")]
    ExpectedOperand { found: String, position: usize },

    #[error("unexpected token after expression: {found} at {position}")]
    TrailingToken { found: String, position: usize },

    #[error("undefined config keys: {}", .keys.join(", "))]
    UndefinedKeys { keys: Vec<String> },
}
