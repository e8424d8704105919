//! Error recovery for the parser.
//!
//! Token sets are `u128` bitsets indexed by `TokenKind` discriminant, so
//! membership is a single AND.

use garnet_ir::TokenKind;
use tracing::debug;

use crate::cursor::Cursor;

const _: () = assert!(
    TokenKind::ALL.len() <= 128,
    "TokenSet uses a u128 bitset; every discriminant must be below 128"
);

/// A set of token kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        TokenSet(0)
    }

    /// Add a kind (builder form, usable in `const` items).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        TokenSet(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: TokenSet) -> Self {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1u128 << kind.discriminant_index()) != 0
    }

    /// Kinds in the set, in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }

    /// Human-readable list for error messages, e.g. "'else', 'elsif' or 'end'".
    pub fn format_expected(self) -> String {
        let names: Vec<String> = self.iter().map(|k| format!("'{}'", k.friendly_name())).collect();
        match names.as_slice() {
            [] => "nothing".to_owned(),
            [single] => single.clone(),
            [rest @ .., last] => format!("{} or {last}", rest.join(", ")),
        }
    }
}

/// Assignment operators, plain and compound.
pub const ASSIGN_OPS: TokenSet = TokenSet::new()
    .with(TokenKind::Equal)
    .with(TokenKind::PlusEqual)
    .with(TokenKind::MinusEqual)
    .with(TokenKind::StarEqual)
    .with(TokenKind::SlashEqual)
    .with(TokenKind::PercentEqual);

/// Closes a `def`, `begin`, loop or the last branch of a conditional.
pub const END: TokenSet = TokenSet::new().with(TokenKind::End);

/// Closes an `if`/`elsif` branch.
pub const IF_BRANCH_END: TokenSet = END.with(TokenKind::Elsif).with(TokenKind::Else);

/// Closes an `unless` branch.
pub const UNLESS_BRANCH_END: TokenSet = END.with(TokenKind::Else);

/// Closes a `when` branch.
pub const WHEN_BRANCH_END: TokenSet = END.with(TokenKind::When).with(TokenKind::Else);

/// Keywords that end the enclosing block. A simple statement directly
/// before one of these needs no newline of its own (`if x then y end`).
pub const BLOCK_END: TokenSet = IF_BRANCH_END.with(TokenKind::When);

/// Tokens that plausibly begin a statement, or close a block.
pub const STMT_BOUNDARY: TokenSet = BLOCK_END
    .with(TokenKind::Def)
    .with(TokenKind::If)
    .with(TokenKind::Unless)
    .with(TokenKind::While)
    .with(TokenKind::Until)
    .with(TokenKind::For)
    .with(TokenKind::Loop)
    .with(TokenKind::Case)
    .with(TokenKind::Begin)
    .with(TokenKind::Print)
    .with(TokenKind::Puts)
    .with(TokenKind::Return)
    .with(TokenKind::Break)
    .with(TokenKind::Next);

/// Skip to the next statement boundary after an error.
///
/// Always consumes at least one token (unless at `Eof`), so a statement
/// that fails on its first token cannot stall the parser. Stops after a
/// `Newline` or `;`, or before a token in [`STMT_BOUNDARY`].
pub(crate) fn synchronize(cursor: &mut Cursor<'_>) {
    let mut skipped = 0usize;
    cursor.advance();
    while !cursor.is_at_end() {
        if matches!(
            cursor.previous().kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            break;
        }
        if cursor.check_set(STMT_BOUNDARY) {
            break;
        }
        cursor.advance();
        skipped += 1;
    }
    debug!(
        skipped,
        resume_line = cursor.current().line,
        resume_at = ?cursor.current_kind(),
        "parser recovered"
    );
}
