//! Token cursor for navigating the token stream.
//!
//! The stream always ends in `Eof`; the cursor never moves past it, so
//! `current()` is valid at every position.

use garnet_ir::{Token, TokenKind};
use tracing::trace;

use crate::recovery::TokenSet;
use crate::ParseError;

pub(crate) struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    /// `tokens` must be non-empty and end in `Eof`.
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.is(TokenKind::Eof)),
            "token stream must end in Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub(crate) fn current(&self) -> &'t Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind `n` tokens ahead, clamped to `Eof`.
    pub(crate) fn peek_kind_at(&self, n: usize) -> TokenKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// The most recently consumed token.
    pub(crate) fn previous(&self) -> &'t Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn check_set(&self, set: TokenSet) -> bool {
        set.contains(self.current_kind())
    }

    /// Consume the current token and return it. Stays put at `Eof`.
    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if !self.is_at_end() {
            trace!(kind = ?token.kind, line = token.line, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `message`.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError::new(self.current().clone(), message))
        }
    }

    /// Skip statement separators (`Newline`, `;`).
    pub(crate) fn skip_separators(&mut self) {
        while matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests;
