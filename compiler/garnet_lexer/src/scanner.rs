//! The scanning loop: source bytes in, tokens and errors out.

use garnet_ir::{Literal, Token, TokenKind};
use tracing::trace;

use crate::cursor::Cursor;
use crate::lex_error::{LexError, LexErrorKind};
use crate::{escape, keywords, LexOutput};

/// `$` is only valid as the leading sigil of a global name.
#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    /// Start offset of the token being scanned.
    start: usize,
    line: u32,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            start: 0,
            line: 1,
            // Roughly one token per four bytes of typical source.
            tokens: Vec::with_capacity(source.len() / 4 + 1),
            errors: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> LexOutput {
        while !self.cursor.is_eof() {
            self.start = self.cursor.pos();
            self.scan_token();
        }
        self.tokens.push(Token::eof(self.line));
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let b = self.cursor.current();
        if !b.is_ascii() {
            if let Some(c) = self.cursor.advance_char() {
                self.error(LexErrorKind::UnexpectedCharacter(c));
            }
            return;
        }
        self.cursor.advance();

        match b {
            b'(' => self.add(TokenKind::LeftParen),
            b')' => self.add(TokenKind::RightParen),
            b'{' => self.add(TokenKind::LeftBrace),
            b'}' => self.add(TokenKind::RightBrace),
            b'[' => self.add(TokenKind::LeftBracket),
            b']' => self.add(TokenKind::RightBracket),
            b',' => self.add(TokenKind::Comma),
            b';' => self.add(TokenKind::Semicolon),
            b'?' => self.add(TokenKind::Question),
            b'^' => self.add(TokenKind::Caret),
            b'~' => self.add(TokenKind::Tilde),
            b'.' => {
                let kind = if !self.cursor.eat(b'.') {
                    TokenKind::Dot
                } else if self.cursor.eat(b'.') {
                    TokenKind::DotDotDot
                } else {
                    TokenKind::DotDot
                };
                self.add(kind);
            }
            b'-' => self.add_if(b'=', TokenKind::MinusEqual, TokenKind::Minus),
            b'+' => self.add_if(b'=', TokenKind::PlusEqual, TokenKind::Plus),
            b'/' => self.add_if(b'=', TokenKind::SlashEqual, TokenKind::Slash),
            b'%' => self.add_if(b'=', TokenKind::PercentEqual, TokenKind::Percent),
            b'!' => self.add_if(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b':' => self.add_if(b':', TokenKind::ColonColon, TokenKind::Colon),
            b'&' => self.add_if(b'&', TokenKind::And, TokenKind::Ampersand),
            b'|' => self.add_if(b'|', TokenKind::Or, TokenKind::Pipe),
            b'*' => {
                let kind = if self.cursor.eat(b'=') {
                    TokenKind::StarEqual
                } else if self.cursor.eat(b'*') {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                };
                self.add(kind);
            }
            b'<' => {
                let kind = if self.cursor.eat(b'=') {
                    TokenKind::LessEqual
                } else if self.cursor.eat(b'<') {
                    TokenKind::LeftShift
                } else {
                    TokenKind::Less
                };
                self.add(kind);
            }
            b'>' => {
                let kind = if self.cursor.eat(b'=') {
                    TokenKind::GreaterEqual
                } else if self.cursor.eat(b'>') {
                    TokenKind::RightShift
                } else {
                    TokenKind::Greater
                };
                self.add(kind);
            }
            b'=' => {
                if self.cursor.eat(b'=') {
                    self.add(TokenKind::EqualEqual);
                } else {
                    self.equal_or_block_comment();
                }
            }
            b'#' => self.cursor.skip_to_newline(),
            b' ' | b'\r' | b'\t' => {}
            b'\n' => {
                self.add(TokenKind::Newline);
                self.line += 1;
            }
            b'"' | b'\'' => self.string(b),
            b'0'..=b'9' => self.number(),
            b if is_ident_start(b) => self.identifier(),
            _ => self.error(LexErrorKind::UnexpectedCharacter(char::from(b))),
        }
    }

    fn add(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.cursor.slice_from(self.start), self.line);
        self.push(token);
    }

    fn add_if(&mut self, next: u8, matched: TokenKind, otherwise: TokenKind) {
        let kind = if self.cursor.eat(next) { matched } else { otherwise };
        self.add(kind);
    }

    fn push(&mut self, token: Token) {
        trace!(kind = ?token.kind, line = token.line, lexeme = %token.lexeme, "token");
        self.tokens.push(token);
    }

    fn error(&mut self, kind: LexErrorKind) {
        self.error_at(self.line, kind);
    }

    fn error_at(&mut self, line: u32, kind: LexErrorKind) {
        trace!(line, ?kind, "lex error");
        self.errors.push(LexError::new(line, kind));
    }

    /// After a lone `=`: either the start of `=begin ... =end` or `EQUAL`.
    ///
    /// The letters after `=` are consumed to read the word; if it is not
    /// exactly `begin`, the cursor backs up so they scan as an identifier.
    fn equal_or_block_comment(&mut self) {
        let word_start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_alphabetic());
        if self.cursor.slice_from(word_start) == "begin" {
            self.block_comment();
        } else {
            self.cursor.rewind_to(word_start);
            self.add(TokenKind::Equal);
        }
    }

    /// Skip to the first `=end` not followed by a letter, then to the end of
    /// that line. The line break itself is left for the main loop.
    fn block_comment(&mut self) {
        let opened_on = self.line;
        loop {
            let Some(offset) = self.cursor.find(b"=end") else {
                self.line += self.cursor.skip_to_end();
                self.error_at(opened_on, LexErrorKind::UnterminatedBlockComment);
                return;
            };
            self.line += self.cursor.skip_counting_newlines(offset + "=end".len());
            if !self.cursor.current().is_ascii_alphabetic() {
                self.cursor.skip_to_newline();
                return;
            }
        }
    }

    /// String literal in either quote style. May span lines. A backslash
    /// always takes the following character with it, so `\"` does not close.
    fn string(&mut self, quote: u8) {
        let opened_on = self.line;
        loop {
            let Some(offset) = self.cursor.find3(quote, b'\\', b'\n') else {
                self.line += self.cursor.skip_to_end();
                self.error_at(opened_on, LexErrorKind::UnterminatedString);
                return;
            };
            self.line += self.cursor.skip_counting_newlines(offset);
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    if self.cursor.current() == b'\n' {
                        self.line += 1;
                    }
                    self.cursor.advance_char();
                }
                b'\n' => {
                    self.line += 1;
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                    break;
                }
            }
        }

        let lexeme = self.cursor.slice_from(self.start);
        let body = &lexeme[1..lexeme.len() - 1];
        let token = Token::new(TokenKind::String, lexeme, opened_on)
            .with_literal(Literal::Str(escape::unescape(body)));
        self.push(token);
    }

    /// Integer or float. A float needs a digit on both sides of the `.`, so
    /// `1..3` and `3.times` scan the `1`/`3` as integers.
    fn number(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut is_float = false;
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        if is_ident_continue(self.cursor.current()) {
            self.cursor.eat_while(is_ident_continue);
            self.error(LexErrorKind::InvalidIdentifier);
            return;
        }

        let text = self.cursor.slice_from(self.start);
        let (kind, literal) = if is_float {
            (TokenKind::Float, text.parse().ok().map(Literal::Float))
        } else {
            (TokenKind::Integer, text.parse().ok().map(Literal::Int))
        };
        match literal {
            Some(literal) => {
                let token = Token::new(kind, text, self.line).with_literal(literal);
                self.push(token);
            }
            None => self.error(LexErrorKind::NumberOutOfRange),
        }
    }

    fn identifier(&mut self) {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(self.start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Identifier);
        self.add(kind);
    }
}
