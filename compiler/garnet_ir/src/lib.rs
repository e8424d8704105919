//! Garnet IR - token and syntax tree types shared by every pipeline stage.
//!
//! This crate contains:
//! - `TokenKind`, `Token` and `Literal` produced by the lexer
//! - `Expr` and `Stmt`, the syntax tree built by the parser and walked by
//!   the interpreter
//! - `AstPrinter`, a parenthesised debug rendering of the tree
//!
//! # Design Philosophy
//!
//! - **Closed enums**: each AST family is one enum, consumers match
//!   exhaustively instead of implementing visitors.
//! - **Immutable after construction**: nothing in this crate mutates a node
//!   once the parser has built it. Function bodies are shared through `Rc`
//!   so runtime closures can hold them without copying the tree.

pub mod ast;
mod printer;
mod token;

pub use ast::{Expr, FunctionDecl, Stmt};
pub use printer::AstPrinter;
pub use token::{Literal, Token, TokenKind};
