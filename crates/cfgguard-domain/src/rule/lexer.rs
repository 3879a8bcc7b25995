use super::error::RuleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    Ident(&'a str),
    /// String literal body, without the quotes.
    Str(&'a str),
    Dot,
    Eq,
    NotEq,
    Implies,
    Eof,
}

impl Token<'_> {
    pub(super) fn describe(&self) -> String {
        match self {
            Token::Ident(s) => format!("`{s}`"),
            Token::Str(s) => format!("\"{s}\""),
            Token::Dot => "`.`".to_string(),
            Token::Eq => "`==`".to_string(),
            Token::NotEq => "`!=`".to_string(),
            Token::Implies => "`=>`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct SpannedToken<'a> {
    pub(super) token: Token<'a>,
    pub(super) position: usize,
}

pub(super) struct Lexer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Tokenize the whole input. The returned stream always ends with `Eof`.
    pub(super) fn lex(mut self) -> Result<Vec<SpannedToken<'a>>, RuleError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.input[self.offset..].chars().next() {
            let rest = &self.input[self.offset..];
            match ch {
                c if c.is_whitespace() => {
                    self.offset += c.len_utf8();
                }
                '"' => tokens.push(self.string_literal()?),
                '.' => tokens.push(self.operator(Token::Dot, 1)),
                '=' if rest.starts_with("==") => tokens.push(self.operator(Token::Eq, 2)),
                '=' if rest.starts_with("=>") => tokens.push(self.operator(Token::Implies, 2)),
                '!' if rest.starts_with("!=") => tokens.push(self.operator(Token::NotEq, 2)),
                '⇒' => tokens.push(self.operator(Token::Implies, '⇒'.len_utf8())),
                c if c.is_ascii_alphabetic() || c == '_' => tokens.push(self.identifier()),
                other => {
                    return Err(RuleError::UnexpectedChar {
                        found: other,
                        position: self.offset,
                    });
                }
            }
        }

        if tokens.is_empty() {
            return Err(RuleError::Empty);
        }

        tokens.push(SpannedToken {
            token: Token::Eof,
            position: self.offset,
        });
        Ok(tokens)
    }

    fn operator(&mut self, token: Token<'a>, width: usize) -> SpannedToken<'a> {
        let spanned = SpannedToken {
            token,
            position: self.offset,
        };
        self.offset += width;
        spanned
    }

    fn string_literal(&mut self) -> Result<SpannedToken<'a>, RuleError> {
        let start = self.offset;
        let body_start = start + 1;
        let Some(len) = self.input[body_start..].find('"') else {
            return Err(RuleError::UnterminatedString { position: start });
        };
        self.offset = body_start + len + 1;
        Ok(SpannedToken {
            token: Token::Str(&self.input[body_start..body_start + len]),
            position: start,
        })
    }

    fn identifier(&mut self) -> SpannedToken<'a> {
        let start = self.offset;
        let len = self.input[start..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
            .count();
        self.offset += len;
        SpannedToken {
            token: Token::Ident(&self.input[start..self.offset]),
            position: start,
        }
    }
}
