//! Lexer error types.

use std::fmt;

use garnet_diagnostic::Diagnostic;

/// A problem found while scanning. Scanning always continues past it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// Line the offending text starts on.
    pub line: u32,
    pub kind: LexErrorKind,
}

/// What went wrong.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character no token starts with.
    UnexpectedCharacter(char),
    /// Input ended inside a string literal.
    UnterminatedString,
    /// Input ended inside `=begin` without a closing `=end`.
    UnterminatedBlockComment,
    /// Letters glued to a numeric literal, e.g. `12abc`.
    InvalidIdentifier,
    /// Integer literal does not fit in 64 bits.
    NumberOutOfRange,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(c) => {
                write!(f, "Unexpected character '{}'.", c.escape_debug())
            }
            LexErrorKind::UnterminatedString => f.write_str("Unterminated string."),
            LexErrorKind::UnterminatedBlockComment => {
                f.write_str("Unterminated block comment, expected '=end'.")
            }
            LexErrorKind::InvalidIdentifier => f.write_str("Invalid identifier."),
            LexErrorKind::NumberOutOfRange => f.write_str("Number literal is out of range."),
        }
    }
}

impl LexError {
    #[cold]
    pub(crate) fn new(line: u32, kind: LexErrorKind) -> Self {
        LexError { line, kind }
    }

    /// Render for the diagnostic queue. Lexer errors carry no location.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.line, self.kind.to_string())
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_diagnostic().fmt(f)
    }
}
