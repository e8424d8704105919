//! Recursive-descent parser for Garnet.
//!
//! Turns the lexer's token list into a list of [`Stmt`]s. Statements are
//! newline-terminated and blocks are closed by `end` (or by the next
//! `elsif`/`else`/`when` clause), Ruby style.
//!
//! # Error recovery
//!
//! A syntax error never escapes [`parse`]. The failing statement is
//! dropped, the error is recorded in [`ParseOutput::errors`], and the
//! parser skips ahead to the next statement boundary and carries on.
//! A few errors (an invalid assignment target, too many arguments) do not
//! even cost the statement: they are recorded and parsing continues in
//! place.

mod cursor;
mod error;
mod grammar;
mod recovery;

use garnet_diagnostic::Diagnostic;
use garnet_ir::{Stmt, Token};

pub use error::ParseError;
pub use recovery::TokenSet;

use cursor::Cursor;

/// Maximum number of call arguments or function parameters.
pub const MAX_ARGS: usize = 255;

/// Result of parsing one token stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseOutput {
    /// Successfully parsed top-level statements.
    pub statements: Vec<Stmt>,
    /// Syntax errors, in the order they were found.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors rendered for a `DiagnosticQueue`.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(ParseError::to_diagnostic)
    }
}

/// Parser state: a cursor plus the errors found so far.
pub(crate) struct Parser<'t> {
    cursor: Cursor<'t>,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    /// Record an error without abandoning the current statement.
    fn report(&mut self, error: ParseError) {
        tracing::debug!(line = error.token.line, message = %error.message, "parse error");
        self.errors.push(error);
    }
}

/// Parse a token stream produced by `garnet_lexer::lex`.
///
/// The stream must end in `Eof`; an empty slice parses to nothing.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    if tokens.is_empty() {
        return ParseOutput::default();
    }

    let mut parser = Parser::new(tokens);
    let statements = parser.program();
    ParseOutput {
        statements,
        errors: parser.errors,
    }
}
