//! Tokens produced by the lexer.

use std::fmt;

/// Token kinds for Garnet.
///
/// The enum is fieldless so it is `Copy` and its discriminant fits in a
/// `u8`; literal payloads live on [`Token::literal`]. The parser's
/// `TokenSet` relies on every discriminant being below 128.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    DotDot,
    DotDotDot,
    Semicolon,
    Question,
    Colon,
    ColonColon,

    // Arithmetic and compound assignment
    Minus,
    MinusEqual,
    Plus,
    PlusEqual,
    Slash,
    SlashEqual,
    Star,
    StarEqual,
    StarStar,
    Percent,
    PercentEqual,

    // Comparison and assignment
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Bitwise (lexed, not evaluated)
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    LeftShift,
    RightShift,

    // Literals
    Identifier,
    String,
    Integer,
    Float,

    // Keywords
    And,
    Begin,
    Break,
    Case,
    Class,
    Def,
    Do,
    Else,
    Elsif,
    End,
    Ensure,
    False,
    For,
    If,
    In,
    Loop,
    Module,
    Next,
    Nil,
    Not,
    Or,
    Print,
    Puts,
    Redo,
    Rescue,
    Retry,
    Return,
    SelfValue,
    Super,
    Then,
    True,
    Unless,
    Until,
    When,
    While,

    Newline,
    Eof,
}

impl TokenKind {
    /// Every token kind, indexed by discriminant.
    pub const ALL: [TokenKind; 80] = [
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::DotDot,
        TokenKind::DotDotDot,
        TokenKind::Semicolon,
        TokenKind::Question,
        TokenKind::Colon,
        TokenKind::ColonColon,
        TokenKind::Minus,
        TokenKind::MinusEqual,
        TokenKind::Plus,
        TokenKind::PlusEqual,
        TokenKind::Slash,
        TokenKind::SlashEqual,
        TokenKind::Star,
        TokenKind::StarEqual,
        TokenKind::StarStar,
        TokenKind::Percent,
        TokenKind::PercentEqual,
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Ampersand,
        TokenKind::Pipe,
        TokenKind::Caret,
        TokenKind::Tilde,
        TokenKind::LeftShift,
        TokenKind::RightShift,
        TokenKind::Identifier,
        TokenKind::String,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::And,
        TokenKind::Begin,
        TokenKind::Break,
        TokenKind::Case,
        TokenKind::Class,
        TokenKind::Def,
        TokenKind::Do,
        TokenKind::Else,
        TokenKind::Elsif,
        TokenKind::End,
        TokenKind::Ensure,
        TokenKind::False,
        TokenKind::For,
        TokenKind::If,
        TokenKind::In,
        TokenKind::Loop,
        TokenKind::Module,
        TokenKind::Next,
        TokenKind::Nil,
        TokenKind::Not,
        TokenKind::Or,
        TokenKind::Print,
        TokenKind::Puts,
        TokenKind::Redo,
        TokenKind::Rescue,
        TokenKind::Retry,
        TokenKind::Return,
        TokenKind::SelfValue,
        TokenKind::Super,
        TokenKind::Then,
        TokenKind::True,
        TokenKind::Unless,
        TokenKind::Until,
        TokenKind::When,
        TokenKind::While,
        TokenKind::Newline,
        TokenKind::Eof,
    ];

    /// Discriminant as a dense index (used by bitset token sets).
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Convert a discriminant index back into a kind.
    pub fn from_discriminant_index(index: u8) -> Option<TokenKind> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Returns `true` for reserved words.
    pub fn is_keyword(self) -> bool {
        (TokenKind::And as u8..=TokenKind::While as u8).contains(&(self as u8))
    }

    /// Human-readable name used in "expected ..." messages.
    pub fn friendly_name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::DotDotDot => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Minus => "-",
            TokenKind::MinusEqual => "-=",
            TokenKind::Plus => "+",
            TokenKind::PlusEqual => "+=",
            TokenKind::Slash => "/",
            TokenKind::SlashEqual => "/=",
            TokenKind::Star => "*",
            TokenKind::StarEqual => "*=",
            TokenKind::StarStar => "**",
            TokenKind::Percent => "%",
            TokenKind::PercentEqual => "%=",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::And => "and",
            TokenKind::Begin => "begin",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Class => "class",
            TokenKind::Def => "def",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Elsif => "elsif",
            TokenKind::End => "end",
            TokenKind::Ensure => "ensure",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::In => "in",
            TokenKind::Loop => "loop",
            TokenKind::Module => "module",
            TokenKind::Next => "next",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Puts => "puts",
            TokenKind::Redo => "redo",
            TokenKind::Rescue => "rescue",
            TokenKind::Retry => "retry",
            TokenKind::Return => "return",
            TokenKind::SelfValue => "self",
            TokenKind::Super => "super",
            TokenKind::Then => "then",
            TokenKind::True => "true",
            TokenKind::Unless => "unless",
            TokenKind::Until => "until",
            TokenKind::When => "when",
            TokenKind::While => "while",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}

/// A literal value, as carried by tokens and `Expr::Literal`.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("nil"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Str(s) => f.write_str(s),
        }
    }
}

/// A scanned token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text the token was scanned from.
    pub lexeme: String,
    /// Decoded payload for `String`, `Integer` and `Float` tokens.
    pub literal: Option<Literal>,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// End-of-input marker.
    pub fn eof(line: u32) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}'", self.kind, self.lexeme.escape_debug())?;
        if let Some(literal) = &self.literal {
            write!(f, " {literal}")?;
        }
        Ok(())
    }
}
