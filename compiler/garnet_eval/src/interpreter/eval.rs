//! Expression evaluation.

use garnet_ir::{Expr, Token, TokenKind};
use garnet_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{EvalErrorKind, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary, materialize_range, BinaryOp, UnaryOp};
use crate::Value;

#[cold]
fn unsupported_operator(op: &Token) -> crate::EvalError {
    EvalErrorKind::UnsupportedOperator(op.lexeme.clone()).at(op.line)
}

impl Interpreter {
    /// Evaluate an expression to a value.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                let unary = UnaryOp::from_token(op.kind).ok_or_else(|| unsupported_operator(op))?;
                evaluate_unary(unary, &value).map_err(|kind| kind.at(op.line))
            }
            Expr::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                let binary =
                    BinaryOp::from_token(op.kind).ok_or_else(|| unsupported_operator(op))?;
                evaluate_binary(&left, &right, binary).map_err(|kind| kind.at(op.line))
            }
            Expr::Logical { left, op, right } => {
                let left = self.evaluate(left)?;
                let decided = if op.is(TokenKind::Or) {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };
                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Range {
                left,
                op,
                right,
                inclusive,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                materialize_range(&left, &right, *inclusive).map_err(|kind| kind.at(op.line))
            }
            Expr::Variable(name) => self.lookup(name),
            Expr::Assign { name, op, value } => self.eval_assign(name, op, value),
            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.eval_call(callee, paren, arguments),
            Expr::PrintList { left, right } => {
                self.evaluate(left)?;
                self.evaluate(right)
            }
        }
    }

    /// `name = value` defines in the current scope; `name op= value`
    /// updates the nearest existing binding.
    fn eval_assign(&mut self, name: &Token, op: &Token, value: &Expr) -> EvalResult {
        let value = self.evaluate(value)?;
        if op.is(TokenKind::Equal) {
            self.define(name, value.clone())?;
            return Ok(value);
        }

        let binary = BinaryOp::from_compound(op.kind).ok_or_else(|| unsupported_operator(op))?;
        let current = self.lookup(name)?;
        let updated = evaluate_binary(&current, &value, binary).map_err(|kind| kind.at(op.line))?;
        self.assign(name, updated.clone())?;
        Ok(updated)
    }
}
