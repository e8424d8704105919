use std::fmt;

/// Where on its line a diagnostic points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// No token context (lexer errors).
    None,
    /// At the end of input.
    AtEnd,
    /// At a line break token.
    AtEndOfLine,
    /// At a specific token, identified by its lexeme.
    AtLexeme(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => Ok(()),
            Location::AtEnd => f.write_str(" at end"),
            Location::AtEndOfLine => f.write_str(" at end of line"),
            Location::AtLexeme(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

/// A compile-time error, rendered as `[line <n>] Error<location>: <message>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: u32,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with no location context.
    #[cold]
    pub fn error(line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            location: Location::None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn at_lexeme(self, lexeme: impl Into<String>) -> Self {
        self.at(Location::AtLexeme(lexeme.into()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}
