//! Garnet Eval - tree-walking interpreter for Garnet programs.
//!
//! # Architecture
//!
//! - `Value`: the closed runtime value union, with `Callable` for native
//!   and user functions
//! - `Environment`: parent-linked scopes behind `LocalScope` handles, with
//!   the constant and `$global` naming rules
//! - `evaluate_binary` / `evaluate_unary`: operator semantics
//! - `Interpreter`: walks `Stmt`/`Expr`, threading `Flow` signals for
//!   `break`, `next` and `return`
//! - `PrintHandlerImpl`: where `print` and `puts` write

mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use environment::{
    is_constant_name, is_global_name, AssignError, DefineError, Environment, LocalScope, Scope,
};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary, materialize_range, BinaryOp, UnaryOp};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{Callable, FunctionValue, NativeFn, NativeFunction, Value};
