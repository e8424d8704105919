//! Tree-walking interpreter.
//!
//! # Module Structure
//!
//! - `mod.rs`: `Interpreter` state and the `interpret` entry point
//! - `builder.rs`: `InterpreterBuilder`
//! - `scope_guard.rs`: RAII scope and frame guards
//! - `eval.rs`: expression evaluation
//! - `exec.rs`: statement execution and the `Flow` signal
//! - `call.rs`: function invocation and built-ins

mod builder;
mod call;
mod eval;
mod exec;
mod scope_guard;

use garnet_ir::{Stmt, Token};

use crate::environment::{AssignError, DefineError};
use crate::errors::{undefined_variable, EvalError, EvalErrorKind};
use crate::{Environment, SharedPrintHandler, Value};

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use exec::Flow;
pub use scope_guard::ScopedInterpreter;

/// Walks a parsed program against a persistent global scope.
///
/// One interpreter can run many programs in turn (one per REPL line);
/// definitions accumulate in its global scope.
pub struct Interpreter {
    /// Scope stack of the running frame.
    pub(crate) env: Environment,
    pub(crate) print_handler: SharedPrintHandler,
    /// User function calls currently on the stack.
    pub(crate) call_depth: usize,
    pub(crate) max_call_depth: usize,
}

impl Interpreter {
    /// An interpreter printing to stdout with the standard built-ins.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Execute a program.
    ///
    /// A runtime error stops execution at the failing statement. A
    /// top-level `return` stops it silently.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), EvalError> {
        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Normal => {}
                Flow::Return(_) => break,
                Flow::Break { line } => return Err(EvalErrorKind::InvalidBreak.at(line)),
                Flow::Next { line } => return Err(EvalErrorKind::InvalidNext.at(line)),
            }
        }
        Ok(())
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Read a global binding (for hosts and tests).
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.global().borrow().lookup(name)
    }

    pub(crate) fn lookup(&self, name: &Token) -> Result<Value, EvalError> {
        self.env
            .lookup(&name.lexeme)
            .ok_or_else(|| undefined_variable(&name.lexeme, name.line))
    }

    /// Bind `name` in the current scope.
    pub(crate) fn define(&mut self, name: &Token, value: Value) -> Result<(), EvalError> {
        self.env.define(&name.lexeme, value).map_err(|err| {
            tracing::debug!(name = %name.lexeme, line = name.line, ?err, "define rejected");
            match err {
                DefineError::ConstantReassignment => {
                    EvalErrorKind::ConstantReassignment(name.lexeme.clone()).at(name.line)
                }
                DefineError::DynamicConstant => {
                    EvalErrorKind::DynamicConstantAssignment.at(name.line)
                }
            }
        })
    }

    /// Overwrite an existing binding.
    pub(crate) fn assign(&mut self, name: &Token, value: Value) -> Result<(), EvalError> {
        self.env.assign(&name.lexeme, value).map_err(|err| {
            tracing::debug!(name = %name.lexeme, line = name.line, ?err, "assign rejected");
            match err {
                AssignError::Undefined => undefined_variable(&name.lexeme, name.line),
                AssignError::Constant => {
                    EvalErrorKind::ConstantReassignment(name.lexeme.clone()).at(name.line)
                }
            }
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
