//! `InterpreterBuilder` for creating `Interpreter` instances.

use super::{call, Interpreter};
use crate::{stdout_handler, Callable, Environment, SharedPrintHandler, Value};

/// Builder for `Interpreter` instances.
///
/// Defaults: output to stdout, globals seeded with the built-ins.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    globals: Vec<(String, Value)>,
    builtins: bool,
    max_call_depth: usize,
}

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            globals: Vec::new(),
            builtins: true,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Direct `print`/`puts` output somewhere other than stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Pre-bind a global before any program runs.
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    /// Start from an empty global scope.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Limit on nested user function calls before "stack level too deep".
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut env = Environment::new();
        if self.builtins {
            for native in call::BUILTINS {
                env.define_global(native.name, Value::Callable(Callable::Native(*native)));
            }
        }
        for (name, value) in self.globals {
            env.define_global(&name, value);
        }

        Interpreter {
            env,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
