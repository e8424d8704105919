//! Statement execution.
//!
//! Non-local exits are values, not unwinding: every statement returns a
//! [`Flow`] that enclosing loops and calls inspect and either consume or
//! pass outward.

use std::rc::Rc;

use garnet_ir::{Expr, FunctionDecl, Stmt, Token};

use super::Interpreter;
use crate::errors::{not_iterable, EvalError};
use crate::{Callable, FunctionValue, Value};

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Normal,
    /// `break`, bound for the innermost loop.
    Break { line: u32 },
    /// `next`, bound for the innermost loop.
    Next { line: u32 },
    /// `return`, bound for the innermost function call.
    Return(Value),
}

type ExecResult = Result<Flow, EvalError>;

/// What a loop does after one run of its body.
enum LoopStep {
    Continue,
    Exit,
    Propagate(Flow),
}

impl From<Flow> for LoopStep {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Normal | Flow::Next { .. } => LoopStep::Continue,
            Flow::Break { .. } => LoopStep::Exit,
            ret @ Flow::Return(_) => LoopStep::Propagate(ret),
        }
    }
}

/// `when` matching: value equality, then the printed forms.
fn case_matches(subject: &Value, candidate: &Value) -> bool {
    subject == candidate || subject.to_string() == candidate.to_string()
}

impl Interpreter {
    /// Execute one statement.
    pub fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print {
                expressions,
                newline,
                ..
            } => self.execute_print(expressions, *newline),
            Stmt::Var {
                names,
                initializers,
            } => self.execute_parallel_assignment(names, initializers),
            Stmt::Block(statements) => self.scoped().execute_block(statements),
            Stmt::If {
                conditions,
                branches,
                else_branch,
            } => {
                for (condition, branch) in conditions.iter().zip(branches) {
                    if self.evaluate(condition)?.is_truthy() {
                        return self.execute_block(branch);
                    }
                }
                self.execute_else(else_branch.as_deref())
            }
            Stmt::Unless {
                condition,
                branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute_else(else_branch.as_deref())
                } else {
                    self.execute_block(branch)
                }
            }
            Stmt::While { condition, body } => self.execute_conditional_loop(condition, body, true),
            Stmt::Until { condition, body } => {
                self.execute_conditional_loop(condition, body, false)
            }
            Stmt::Loop { body } => self.execute_loop(body),
            Stmt::For {
                variable,
                iterable,
                body,
            } => self.execute_for(variable, iterable, body),
            Stmt::Case {
                subject,
                when_conditions,
                when_branches,
                else_branch,
            } => {
                let subject = self.evaluate(subject)?;
                for (condition, branch) in when_conditions.iter().zip(when_branches) {
                    let candidate = self.evaluate(condition)?;
                    if case_matches(&subject, &candidate) {
                        return self.execute_block(branch);
                    }
                }
                self.execute_else(else_branch.as_deref())
            }
            Stmt::Function(decl) => self.declare_function(decl),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Break(keyword) => Ok(Flow::Break { line: keyword.line }),
            Stmt::Next(keyword) => Ok(Flow::Next { line: keyword.line }),
        }
    }

    /// Run statements in the current scope, stopping at the first signal.
    pub fn execute_block(&mut self, statements: &[Stmt]) -> ExecResult {
        for stmt in statements {
            let flow = self.execute(stmt)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_else(&mut self, else_branch: Option<&[Stmt]>) -> ExecResult {
        match else_branch {
            Some(branch) => self.execute_block(branch),
            None => Ok(Flow::Normal),
        }
    }

    fn execute_print(&mut self, expressions: &[Expr], newline: bool) -> ExecResult {
        if expressions.is_empty() && newline {
            self.print_handler.println("");
        }
        for expr in expressions {
            let text = self.evaluate(expr)?.to_string();
            if newline {
                self.print_handler.println(&text);
            } else {
                self.print_handler.print(&text);
            }
        }
        Ok(Flow::Normal)
    }

    /// Every initializer is evaluated before any name is bound, so
    /// `a, b = b, a` swaps.
    fn execute_parallel_assignment(&mut self, names: &[Token], initializers: &[Expr]) -> ExecResult {
        let values = initializers
            .iter()
            .map(|expr| self.evaluate(expr))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, value) in names.iter().zip(values) {
            self.define(name, value)?;
        }
        Ok(Flow::Normal)
    }

    /// `while` runs while the condition is truthy, `until` while it is
    /// falsy. Each iteration gets a fresh scope.
    fn execute_conditional_loop(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
        run_while: bool,
    ) -> ExecResult {
        while self.evaluate(condition)?.is_truthy() == run_while {
            let flow = self.scoped().execute_block(body)?;
            match LoopStep::from(flow) {
                LoopStep::Continue => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(flow) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// `loop do ... end` keeps one scope for all iterations.
    fn execute_loop(&mut self, body: &[Stmt]) -> ExecResult {
        let mut scoped = self.scoped();
        loop {
            let flow = scoped.execute_block(body)?;
            match LoopStep::from(flow) {
                LoopStep::Continue => {}
                LoopStep::Exit => return Ok(Flow::Normal),
                LoopStep::Propagate(flow) => return Ok(flow),
            }
        }
    }

    /// The iterable is evaluated once; each element runs in its own scope
    /// with the loop variable bound.
    fn execute_for(&mut self, variable: &Token, iterable: &Expr, body: &[Stmt]) -> ExecResult {
        let items = match self.evaluate(iterable)? {
            Value::List(items) => items,
            other => return Err(not_iterable(&other, variable.line)),
        };

        for item in items.iter() {
            let mut scoped = self.scoped();
            scoped.define(variable, item.clone())?;
            let flow = scoped.execute_block(body)?;
            match LoopStep::from(flow) {
                LoopStep::Continue => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(flow) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// `def` captures the current scope and binds the function in it.
    fn declare_function(&mut self, decl: &Rc<FunctionDecl>) -> ExecResult {
        let function = FunctionValue {
            decl: Rc::clone(decl),
            closure: self.env.current_scope(),
        };
        let value = Value::Callable(Callable::User(Rc::new(function)));
        self.define(&decl.name, value)?;
        Ok(Flow::Normal)
    }
}
