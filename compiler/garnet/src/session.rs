//! A persistent lex → parse → interpret pipeline.

use std::fmt;

use garnet_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorGuaranteed};
use garnet_eval::{EvalError, Interpreter, InterpreterBuilder, SharedPrintHandler};
use garnet_ir::Stmt;

use crate::{EXIT_COMPILE_ERROR, EXIT_OK, EXIT_RUNTIME_ERROR};

/// Lexer and parser diagnostics for one source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileErrors {
    pub diagnostics: Vec<Diagnostic>,
    /// Errors discarded past the queue's limit.
    pub dropped: usize,
    pub guarantee: ErrorGuaranteed,
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diag}")?;
        }
        if self.dropped > 0 {
            write!(f, "\n... and {} more error(s)", self.dropped)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}

/// Why a run did not complete.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Nothing was executed.
    #[error(transparent)]
    Compile(#[from] CompileErrors),
    /// Execution stopped at the failing statement.
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Compile(_) => EXIT_COMPILE_ERROR,
            RunError::Runtime(_) => EXIT_RUNTIME_ERROR,
        }
    }
}

/// Process exit code for a run result.
pub fn exit_code(result: &Result<(), RunError>) -> i32 {
    result.as_ref().map_or_else(RunError::exit_code, |_| EXIT_OK)
}

/// One interpreter plus the settings used to compile each source text.
///
/// Every call to [`Session::run`] is compiled independently but executes
/// against the same global scope.
pub struct Session {
    interpreter: Interpreter,
    diagnostic_config: DiagnosticConfig,
}

impl Session {
    /// A session printing to stdout.
    pub fn new() -> Self {
        Session::with_interpreter(Interpreter::new())
    }

    pub fn with_print_handler(handler: SharedPrintHandler) -> Self {
        Session::with_interpreter(InterpreterBuilder::new().print_handler(handler).build())
    }

    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        Session {
            interpreter,
            diagnostic_config: DiagnosticConfig::default(),
        }
    }

    #[must_use]
    pub fn diagnostic_config(mut self, config: DiagnosticConfig) -> Self {
        self.diagnostic_config = config;
        self
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Lex and parse `source`, collecting every diagnostic.
    ///
    /// The parser runs even when the lexer reported errors, so one pass
    /// reports as much as possible.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn compile(&self, source: &str) -> Result<Vec<Stmt>, CompileErrors> {
        let lexed = garnet_lexer::lex(source);
        let parsed = garnet_parse::parse(&lexed.tokens);

        let mut queue = DiagnosticQueue::with_config(self.diagnostic_config.clone());
        queue.extend(lexed.diagnostics());
        queue.extend(parsed.diagnostics());

        match queue.has_errors() {
            Some(guarantee) => {
                let dropped = queue.dropped_count();
                tracing::debug!(errors = queue.error_count(), dropped, "compile failed");
                Err(CompileErrors {
                    diagnostics: queue.flush(),
                    dropped,
                    guarantee,
                })
            }
            None => Ok(parsed.statements),
        }
    }

    /// Compile and execute `source`.
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let statements = self.compile(source)?;
        self.interpreter.interpret(&statements)?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
