#![allow(clippy::unwrap_used)]

use super::*;

fn tokens() -> Vec<Token> {
    vec![
        Token::new(TokenKind::Identifier, "x", 1),
        Token::new(TokenKind::Newline, "\n", 1),
        Token::new(TokenKind::Semicolon, ";", 2),
        Token::new(TokenKind::Integer, "1", 2),
        Token::eof(2),
    ]
}

#[test]
fn advance_stops_at_eof() {
    let tokens = tokens();
    let mut cursor = Cursor::new(&tokens);
    for _ in 0..10 {
        cursor.advance();
    }
    assert!(cursor.is_at_end());
    assert_eq!(cursor.previous().kind, TokenKind::Integer);
}

#[test]
fn peek_clamps_to_eof() {
    let tokens = tokens();
    let cursor = Cursor::new(&tokens);
    assert_eq!(cursor.peek_kind_at(1), TokenKind::Newline);
    assert_eq!(cursor.peek_kind_at(99), TokenKind::Eof);
}

#[test]
fn skip_separators_then_expect() {
    let tokens = tokens();
    let mut cursor = Cursor::new(&tokens);
    assert!(cursor.eat(TokenKind::Identifier));
    cursor.skip_separators();
    assert_eq!(cursor.expect(TokenKind::Integer, "number").unwrap().lexeme, "1");

    let err = cursor.expect(TokenKind::RightParen, "Expect ')'.").unwrap_err();
    assert_eq!(err.message, "Expect ')'.");
    assert!(err.token.is(TokenKind::Eof));
}
