//! Parse error type.

use std::fmt;

use garnet_diagnostic::{Diagnostic, Location};
use garnet_ir::{Token, TokenKind};

/// A syntax error at a specific token.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The token the parser was looking at.
    pub token: Token,
    pub message: String,
}

impl ParseError {
    #[cold]
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        ParseError {
            token,
            message: message.into(),
        }
    }

    /// Render for the diagnostic queue, pointing at the offending token.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let location = match self.token.kind {
            TokenKind::Eof => Location::AtEnd,
            TokenKind::Newline => Location::AtEndOfLine,
            _ => Location::AtLexeme(self.token.lexeme.clone()),
        };
        Diagnostic::error(self.token.line, self.message.clone()).at(location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_diagnostic().fmt(f)
    }
}

impl std::error::Error for ParseError {}
