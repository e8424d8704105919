//! Lexer for Garnet.
//!
//! One left-to-right pass over the source producing a token list that
//! always ends in a single `Eof` token. Line breaks are tokens
//! (`Newline`) because the grammar uses them as statement terminators.
//!
//! Errors never stop the scan: each one is recorded in
//! [`LexOutput::errors`] and scanning resumes at the next character, so one
//! stray byte does not hide the problems after it.

mod cursor;
mod escape;
mod keywords;
mod lex_error;
mod scanner;

use garnet_diagnostic::Diagnostic;
use garnet_ir::Token;

pub use lex_error::{LexError, LexErrorKind};

/// Result of lexing one source string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexOutput {
    /// Scanned tokens, terminated by `Eof`.
    pub tokens: Vec<Token>,
    /// Problems found while scanning, in source order.
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors rendered for a `DiagnosticQueue`.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(LexError::to_diagnostic)
    }
}

/// Scan `source` into tokens.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    let output = scanner::Scanner::new(source).run();
    tracing::debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "lexed"
    );
    output
}

#[cfg(test)]
mod tests;
