//! Garnet - a small Ruby-flavoured scripting language.
//!
//! This crate ties the pipeline together: source text goes through
//! `garnet_lexer`, `garnet_parse` and `garnet_eval`, with compile-time
//! problems gathered in a `garnet_diagnostic::DiagnosticQueue`.
//!
//! [`Session`] is the unit of execution. The `garnet` binary creates one per
//! script, or one for a whole REPL session so definitions accumulate.
//!
//! # Exit codes
//!
//! | code | meaning                               |
//! |------|---------------------------------------|
//! | 0    | success                               |
//! | 64   | bad command-line usage                |
//! | 65   | lexer or parser diagnostics           |
//! | 66   | script file could not be read         |
//! | 70   | runtime error                         |

mod debug;
mod session;

pub use debug::{ast_listing, token_listing};
pub use session::{exit_code, CompileErrors, RunError, Session};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 64;
pub const EXIT_COMPILE_ERROR: i32 = 65;
pub const EXIT_NO_INPUT: i32 = 66;
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Run `source` once in a fresh stdout session.
pub fn run_source(source: &str) -> Result<(), RunError> {
    Session::new().run(source)
}
