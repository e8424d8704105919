#![allow(clippy::unwrap_used, clippy::expect_used)]

use garnet_ir::{Literal, TokenKind};
use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_is_only_eof() {
    let output = lex("");
    assert_eq!(output.tokens, vec![Token::eof(1)]);
    assert!(!output.has_errors());
}

#[test]
fn maximal_munch_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("** *= * == = <= << < >= >> > ... .. . != ! :: :"),
        vec![
            StarStar, StarEqual, Star, EqualEqual, Equal, LessEqual, LeftShift, Less,
            GreaterEqual, RightShift, Greater, DotDotDot, DotDot, Dot, BangEqual, Bang,
            ColonColon, Colon, Eof,
        ]
    );
    assert_eq!(
        kinds("+= -= /= %= + - / %"),
        vec![PlusEqual, MinusEqual, SlashEqual, PercentEqual, Plus, Minus, Slash, Percent, Eof]
    );
}

#[test]
fn double_ampersand_and_pipe_are_logical_keywords() {
    use TokenKind::*;
    assert_eq!(kinds("a && b || c & d | e"), vec![
        Identifier, And, Identifier, Or, Identifier, Ampersand, Identifier, Pipe, Identifier,
        Eof,
    ]);
}

#[test]
fn newlines_are_tokens_and_advance_line() {
    let output = lex("x = 1\ny = 2\n");
    let newline_lines: Vec<u32> = output
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::Newline))
        .map(|t| t.line)
        .collect();
    assert_eq!(newline_lines, vec![1, 2]);
    assert_eq!(output.tokens.last().unwrap(), &Token::eof(3));
}

#[test]
fn line_comment_keeps_its_newline() {
    use TokenKind::*;
    assert_eq!(kinds("x # trailing note\ny"), vec![Identifier, Newline, Identifier, Eof]);
    let output = lex("# only a comment\nputs 1");
    assert_eq!(output.tokens[1].line, 2);
}

#[test]
fn keywords_and_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("def foo_1 $count Max unless elsif self"),
        vec![Def, Identifier, Identifier, Identifier, Unless, Elsif, SelfValue, Eof]
    );
    let output = lex("$count");
    assert_eq!(output.tokens[0].lexeme, "$count");
}

#[test]
fn dollar_only_leads_a_name() {
    let output = lex("$a$b");
    let lexemes: Vec<&str> = output.tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["$a", "$b", ""]);
    assert_eq!(output.tokens[1].kind, TokenKind::Identifier);

    let output = lex("a$b");
    let lexemes: Vec<&str> = output.tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["a", "$b", ""]);
}

#[test]
fn integer_and_float_literals() {
    let output = lex("42 3.25 7");
    assert_eq!(output.tokens[0].literal, Some(Literal::Int(42)));
    assert_eq!(output.tokens[1].literal, Some(Literal::Float(3.25)));
    assert_eq!(output.tokens[1].lexeme, "3.25");
    assert_eq!(output.tokens[2].kind, TokenKind::Integer);
}

#[test]
fn range_after_integer_is_not_a_float() {
    use TokenKind::*;
    assert_eq!(kinds("1..3"), vec![Integer, DotDot, Integer, Eof]);
    assert_eq!(kinds("1...3"), vec![Integer, DotDotDot, Integer, Eof]);
    assert_eq!(kinds("3.times"), vec![Integer, Dot, Identifier, Eof]);
}

#[test]
fn letter_after_number_is_invalid_identifier() {
    let output = lex("x = 12abc\ny");
    assert_eq!(
        output.errors,
        vec![LexError {
            line: 1,
            kind: LexErrorKind::InvalidIdentifier,
        }]
    );
    let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Newline,
        TokenKind::Identifier,
        TokenKind::Eof,
    ]);
}

#[test]
fn oversized_integer_is_reported() {
    let output = lex("99999999999999999999");
    assert_eq!(output.errors[0].kind, LexErrorKind::NumberOutOfRange);
    assert_eq!(output.tokens.len(), 1);
}

#[test]
fn strings_in_both_quote_styles_decode_escapes() {
    let output = lex(r#""a\tb" 'it\'s' "say \"hi\"""#);
    let values: Vec<Literal> = output.tokens.iter().filter_map(|t| t.literal.clone()).collect();
    assert_eq!(values, vec![
        Literal::Str("a\tb".into()),
        Literal::Str("it's".into()),
        Literal::Str("say \"hi\"".into()),
    ]);
    assert_eq!(output.tokens[0].lexeme, r#""a\tb""#);
    assert!(!output.has_errors());
}

#[test]
fn multiline_string_counts_lines() {
    let output = lex("\"one\ntwo\"\nx");
    assert_eq!(output.tokens[0].line, 1);
    assert_eq!(output.tokens[0].literal, Some(Literal::Str("one\ntwo".into())));
    assert_eq!(output.tokens[1].kind, TokenKind::Newline);
    assert_eq!(output.tokens[1].line, 2);
    assert_eq!(output.tokens[2].line, 3);
}

#[test]
fn unterminated_string_reports_and_ends() {
    let output = lex("puts \"oops\n");
    assert_eq!(output.errors, vec![LexError {
        line: 1,
        kind: LexErrorKind::UnterminatedString,
    }]);
    assert_eq!(output.tokens.last().unwrap(), &Token::eof(2));
}

#[test]
fn block_comment_is_skipped() {
    use TokenKind::*;
    let source = "a\n=begin\nanything ( goes\n=end trailing words\nb";
    let output = lex(source);
    assert!(!output.has_errors());
    let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Identifier, Newline, Newline, Identifier, Eof]);
    assert_eq!(output.tokens[3].line, 5);
}

#[test]
fn block_comment_end_must_not_be_followed_by_letter() {
    let output = lex("=begin\n=ending\nstill comment\n=end\nx");
    assert!(!output.has_errors());
    assert_eq!(output.tokens[1].lexeme, "x");
    assert_eq!(output.tokens[1].line, 5);
}

#[test]
fn equal_followed_by_other_word_backtracks() {
    use TokenKind::*;
    let output = lex("x =beginning");
    let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Identifier, Equal, Identifier, Eof]);
    assert_eq!(output.tokens[2].lexeme, "beginning");
}

#[test]
fn unterminated_block_comment_reports_opening_line() {
    let output = lex("x\n=begin\nnever closed\n");
    assert_eq!(output.errors, vec![LexError {
        line: 2,
        kind: LexErrorKind::UnterminatedBlockComment,
    }]);
}

#[test]
fn unknown_characters_do_not_stop_scanning() {
    let output = lex("a @ b é c");
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnexpectedCharacter('@'));
    assert_eq!(output.errors[1].kind, LexErrorKind::UnexpectedCharacter('é'));
    let names: Vec<&str> = output
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::Identifier))
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn diagnostics_render_without_location() {
    let output = lex("\n\n@");
    let rendered: Vec<String> = output.diagnostics().map(|d| d.to_string()).collect();
    assert_eq!(rendered, vec!["[line 3] Error: Unexpected character '@'."]);
}

mod proptest_round_trip {
    use proptest::prelude::*;

    use super::*;

    fn literal_piece() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9]{1,18}",
            "[0-9]{1,6}\\.[0-9]{1,6}",
            "\"[a-zA-Z0-9 ]{0,12}\"",
            "'[a-zA-Z0-9 ]{0,12}'",
            "[a-z_][a-z0-9_]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn lexemes_reassemble_source(
            pieces in proptest::collection::vec(literal_piece(), 0..24),
            separators in proptest::collection::vec(prop_oneof![Just(" "), Just("\t"), Just("\n")], 24),
        ) {
            let mut source = String::new();
            let mut expected = String::new();
            for (piece, sep) in pieces.iter().zip(&separators) {
                source.push_str(piece);
                source.push_str(sep);
                expected.push_str(piece);
            }

            let output = lex(&source);
            prop_assert!(output.errors.is_empty(), "{:?}", output.errors);

            let rebuilt: String = output
                .tokens
                .iter()
                .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
                .map(|t| t.lexeme.as_str())
                .collect();
            prop_assert_eq!(rebuilt, expected);
        }
    }
}
