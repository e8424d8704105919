//! Reserved word lookup.
//!
//! Length-bucketed: every keyword is 2 to 6 ASCII letters, so anything
//! outside that range (or starting with `$` or `_`) is rejected before any
//! string comparison.

use garnet_ir::TokenKind;

/// Resolve `text` to its keyword kind, or `None` for a plain identifier.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=6).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "do" => Some(TokenKind::Do),
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            "or" => Some(TokenKind::Or),
            _ => None,
        },
        3 => match text {
            "and" => Some(TokenKind::And),
            "def" => Some(TokenKind::Def),
            "end" => Some(TokenKind::End),
            "for" => Some(TokenKind::For),
            "nil" => Some(TokenKind::Nil),
            "not" => Some(TokenKind::Not),
            _ => None,
        },
        4 => match text {
            "case" => Some(TokenKind::Case),
            "else" => Some(TokenKind::Else),
            "loop" => Some(TokenKind::Loop),
            "next" => Some(TokenKind::Next),
            "puts" => Some(TokenKind::Puts),
            "redo" => Some(TokenKind::Redo),
            "self" => Some(TokenKind::SelfValue),
            "then" => Some(TokenKind::Then),
            "true" => Some(TokenKind::True),
            "when" => Some(TokenKind::When),
            _ => None,
        },
        5 => match text {
            "begin" => Some(TokenKind::Begin),
            "break" => Some(TokenKind::Break),
            "class" => Some(TokenKind::Class),
            "elsif" => Some(TokenKind::Elsif),
            "false" => Some(TokenKind::False),
            "print" => Some(TokenKind::Print),
            "retry" => Some(TokenKind::Retry),
            "super" => Some(TokenKind::Super),
            "until" => Some(TokenKind::Until),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "ensure" => Some(TokenKind::Ensure),
            "module" => Some(TokenKind::Module),
            "rescue" => Some(TokenKind::Rescue),
            "return" => Some(TokenKind::Return),
            "unless" => Some(TokenKind::Unless),
            _ => None,
        },
        _ => None,
    }
}
