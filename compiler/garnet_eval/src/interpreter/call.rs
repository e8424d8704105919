//! Function invocation and built-in functions.

use std::time::{SystemTime, UNIX_EPOCH};

use garnet_ir::{Expr, Token};
use garnet_stack::ensure_sufficient_stack;

use super::{Flow, Interpreter};
use crate::errors::{arity_mismatch, not_callable, EvalErrorKind, EvalResult};
use crate::{Callable, FunctionValue, NativeFunction, Value};

/// Built-ins bound in every new global scope.
pub(super) const BUILTINS: &[NativeFunction] = &[NativeFunction {
    name: "clock",
    arity: 0,
    func: clock,
}];

/// Seconds since the Unix epoch.
fn clock(_: &[Value]) -> Result<Value, EvalErrorKind> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::Float(elapsed.as_secs_f64()))
}

impl Interpreter {
    pub(super) fn eval_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        arguments: &[Expr],
    ) -> EvalResult {
        let callee = self.evaluate(callee)?;
        let args = arguments
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let Value::Callable(callable) = callee else {
            return Err(not_callable(paren.line));
        };
        if args.len() != callable.arity() {
            return Err(arity_mismatch(callable.arity(), args.len(), paren.line));
        }

        match callable {
            Callable::Native(native) => (native.func)(&args).map_err(|kind| kind.at(paren.line)),
            Callable::User(function) => self.call_function(&function, args, paren.line),
        }
    }

    /// Run a user function in a new scope under its closure.
    ///
    /// `return` ends the call; falling off the end yields `nil`.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name(), line = line))]
    pub(super) fn call_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
        line: u32,
    ) -> EvalResult {
        if self.call_depth >= self.max_call_depth {
            return Err(EvalErrorKind::StackTooDeep.at(line));
        }

        let frame = self.env.enclosed(function.closure.clone());
        self.call_depth += 1;
        let flow = self.with_frame(frame, |interp| {
            ensure_sufficient_stack(|| {
                let mut scoped = interp.scoped();
                for (param, arg) in function.decl.params.iter().zip(args) {
                    scoped.define(param, arg)?;
                }
                scoped.execute_block(&function.decl.body)
            })
        });
        self.call_depth -= 1;

        match flow? {
            Flow::Normal => Ok(Value::Nil),
            Flow::Return(value) => Ok(value),
            Flow::Break { line } => Err(EvalErrorKind::InvalidBreak.at(line)),
            Flow::Next { line } => Err(EvalErrorKind::InvalidNext.at(line)),
        }
    }
}
