//! Debug renderings for `garnet lex` and `garnet parse`.

use std::fmt::Write;

use garnet_ir::{AstPrinter, Stmt, Token};

/// One token per line: `<line> <Kind> '<lexeme>' [literal]`.
pub fn token_listing(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} {token}", token.line);
    }
    out
}

/// One parenthesised statement per line.
pub fn ast_listing(statements: &[Stmt]) -> String {
    let mut out = AstPrinter::print_program(statements);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
