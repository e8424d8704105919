//! Runtime values.
//!
//! `Value` is a closed union. Heap payloads (`Str`, `List`, user functions)
//! sit behind `Rc`, so cloning a value never copies its contents.

use std::fmt;
use std::rc::Rc;

use garnet_ir::{FunctionDecl, Literal};

use crate::environment::{LocalScope, Scope};
use crate::errors::EvalErrorKind;

/// A Garnet runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<[Value]>),
    Callable(Callable),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::from(items))
    }

    /// Only `nil` and `false` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Callable(_) => "function",
        }
    }

    /// Rendering used inside lists and error messages: strings are quoted.
    pub fn inspect(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", &**s),
            other => other.to_string(),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::string(s.as_str()),
        }
    }
}

/// Equality as seen by `==` and `case`: integers and floats compare by
/// numeric value, lists element-wise, functions by identity.
impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "language equality is exact")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                crate::operators::int_to_float(*a) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&item.inspect())?;
                }
                f.write_str("]")
            }
            Value::Callable(callable) => write!(f, "{callable}"),
        }
    }
}

/// Signature of a built-in function body.
pub type NativeFn = fn(&[Value]) -> Result<Value, EvalErrorKind>;

/// A built-in function.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

/// A user-defined function: its declaration plus the scope it closed over.
pub struct FunctionValue {
    pub decl: Rc<FunctionDecl>,
    pub closure: LocalScope<Scope>,
}

impl FunctionValue {
    pub fn name(&self) -> &str {
        &self.decl.name.lexeme
    }
}

/// Anything that can appear in call position.
#[derive(Clone)]
pub enum Callable {
    Native(NativeFunction),
    User(Rc<FunctionValue>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Native(native) => native.name,
            Callable::User(function) => function.name(),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::User(function) => function.decl.params.len(),
        }
    }

    fn same_as(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => a.name == b.name,
            (Callable::User(a), Callable::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Closures reach back into their scope chain, so Debug stays shallow.
impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => f
                .debug_struct("Native")
                .field("name", &native.name)
                .field("arity", &native.arity)
                .finish(),
            Callable::User(function) => f
                .debug_struct("User")
                .field("name", &function.name())
                .field("arity", &function.decl.params.len())
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => write!(f, "<native fn {}>", native.name),
            Callable::User(function) => write!(f, "<fn {}>", function.name()),
        }
    }
}

#[cfg(test)]
mod tests;
