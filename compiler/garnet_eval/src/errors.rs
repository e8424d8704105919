//! Runtime errors.
//!
//! Operators and built-ins fail with a bare [`EvalErrorKind`]; the
//! interpreter attaches the source line of the offending token to produce
//! an [`EvalError`]. Messages live on the variants so every constructor
//! shares one wording.

use thiserror::Error;

use crate::Value;

/// What went wrong, without a location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),

    #[error("Unsupported operands for '{op}': {left} and {right}.")]
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("Operand of '{0}' must be a number.")]
    OperandMustBeNumber(&'static str),

    #[error("Unsupported operator '{0}'.")]
    UnsupportedOperator(String),

    #[error("Can only call functions.")]
    NotCallable,

    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Constant '{0}' cannot be reassigned.")]
    ConstantReassignment(String),

    #[error("dynamic constant assignment")]
    DynamicConstantAssignment,

    #[error("Can only iterate over a list, got {0}.")]
    NotIterable(&'static str),

    #[error("invalid break")]
    InvalidBreak,

    #[error("invalid next")]
    InvalidNext,

    #[error("divided by 0")]
    DivisionByZero,

    #[error("integer overflow in {0}")]
    IntegerOverflow(&'static str),

    #[error("negative argument")]
    NegativeArgument,

    #[error("stack level too deep")]
    StackTooDeep,

    #[error("failed to allocate memory")]
    OutOfMemory,
}

impl EvalErrorKind {
    /// Attach a source line.
    #[inline]
    pub fn at(self, line: u32) -> EvalError {
        EvalError { kind: self, line }
    }
}

/// A runtime error that aborted `interpret`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}\n[line {line}]")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub line: u32,
}

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

#[cold]
pub fn undefined_variable(name: &str, line: u32) -> EvalError {
    EvalErrorKind::UndefinedVariable(name.to_owned()).at(line)
}

#[cold]
pub fn binary_type_mismatch(op: &'static str, left: &Value, right: &Value) -> EvalErrorKind {
    EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.inspect(),
        right: right.inspect(),
    }
}

#[cold]
pub fn not_callable(line: u32) -> EvalError {
    EvalErrorKind::NotCallable.at(line)
}

#[cold]
pub fn arity_mismatch(expected: usize, got: usize, line: u32) -> EvalError {
    EvalErrorKind::ArityMismatch { expected, got }.at(line)
}

#[cold]
pub fn not_iterable(value: &Value, line: u32) -> EvalError {
    EvalErrorKind::NotIterable(value.type_name()).at(line)
}

#[cold]
pub fn division_by_zero() -> EvalErrorKind {
    EvalErrorKind::DivisionByZero
}

#[cold]
pub fn integer_overflow(op: &'static str) -> EvalErrorKind {
    EvalErrorKind::IntegerOverflow(op)
}
