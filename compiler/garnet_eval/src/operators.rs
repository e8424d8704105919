//! Binary and unary operator semantics.
//!
//! Direct enum dispatch over the fixed value set. Integer arithmetic is
//! checked; mixing an integer with a float promotes to float.

use garnet_ir::TokenKind;

use crate::errors::{binary_type_mismatch, division_by_zero, integer_overflow, EvalErrorKind};
use crate::Value;

/// A binary operator, resolved from its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            TokenKind::StarStar => BinaryOp::Pow,
            TokenKind::EqualEqual => BinaryOp::Eq,
            TokenKind::BangEqual => BinaryOp::NotEq,
            TokenKind::Less => BinaryOp::Lt,
            TokenKind::LessEqual => BinaryOp::LtEq,
            TokenKind::Greater => BinaryOp::Gt,
            TokenKind::GreaterEqual => BinaryOp::GtEq,
            _ => return None,
        })
    }

    /// The operator applied by a compound assignment (`+=` and friends).
    pub fn from_compound(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusEqual => BinaryOp::Add,
            TokenKind::MinusEqual => BinaryOp::Sub,
            TokenKind::StarEqual => BinaryOp::Mul,
            TokenKind::SlashEqual => BinaryOp::Div,
            TokenKind::PercentEqual => BinaryOp::Rem,
            _ => return None,
        })
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

/// A prefix operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang | TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "integer to float promotion is the language's coercion rule"
)]
#[inline]
pub(crate) fn int_to_float(n: i64) -> f64 {
    n as f64
}

type OpResult = Result<Value, EvalErrorKind>;

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => Ok(eval_float_binary(*a, *b, op)),
        (Value::Int(a), Value::Float(b)) => Ok(eval_float_binary(int_to_float(*a), *b, op)),
        (Value::Float(a), Value::Int(b)) => Ok(eval_float_binary(*a, int_to_float(*b), op)),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op)
            .ok_or_else(|| binary_type_mismatch(op.as_symbol(), left, right)),
        (Value::Str(s), Value::Int(count)) if op == BinaryOp::Mul => replicate(s, *count),
        _ => Err(binary_type_mismatch(op.as_symbol(), left, right)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    let checked = |result: Option<i64>| {
        result
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(op.as_symbol()))
    };
    match op {
        BinaryOp::Add => checked(a.checked_add(b)),
        BinaryOp::Sub => checked(a.checked_sub(b)),
        BinaryOp::Mul => checked(a.checked_mul(b)),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked(a.checked_div(b)),
        BinaryOp::Rem if b == 0 => Err(division_by_zero()),
        BinaryOp::Rem => checked(a.checked_rem(b)),
        BinaryOp::Pow => int_pow(a, b),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
    }
}

/// Integer power. A negative exponent yields the string `"1/<base**|exp|>"`
/// rather than a fraction.
fn int_pow(base: i64, exp: i64) -> OpResult {
    let magnitude =
        u32::try_from(exp.unsigned_abs()).map_err(|_| integer_overflow("**"))?;
    let power = base
        .checked_pow(magnitude)
        .ok_or_else(|| integer_overflow("**"))?;
    if exp < 0 {
        Ok(Value::string(format!("1/{power}")))
    } else {
        Ok(Value::Int(power))
    }
}

#[allow(clippy::float_cmp, reason = "language equality is exact")]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Rem => Value::Float(a % b),
        BinaryOp::Pow => Value::Float(a.powf(b)),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
    }
}

/// `+` concatenates, relational operators compare lexicographically.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<Value> {
    Some(match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Value::string(joined)
        }
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        _ => return None,
    })
}

/// `"ab" * 3` is `"ababab"`.
fn replicate(s: &str, count: i64) -> OpResult {
    let count = usize::try_from(count).map_err(|_| EvalErrorKind::NegativeArgument)?;
    let total = s.len().checked_mul(count).ok_or(EvalErrorKind::OutOfMemory)?;
    let mut out = String::new();
    out.try_reserve_exact(total)
        .map_err(|_| EvalErrorKind::OutOfMemory)?;
    for _ in 0..count {
        out.push_str(s);
    }
    Ok(Value::string(out))
}

/// Evaluate a prefix operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> OpResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("-")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, _) => Err(EvalErrorKind::OperandMustBeNumber("-")),
    }
}

/// Materialize `left..right` (or `left...right`) as a list of integers.
///
/// Non-integer bounds produce `nil`. The list is allocated up front, so a
/// range too large to hold fails with `OutOfMemory` instead of aborting.
pub fn materialize_range(left: &Value, right: &Value, inclusive: bool) -> OpResult {
    let (&Value::Int(start), &Value::Int(end)) = (left, right) else {
        return Ok(Value::Nil);
    };
    let span = i128::from(end) - i128::from(start) + i128::from(inclusive);
    let len = usize::try_from(span.max(0)).map_err(|_| EvalErrorKind::OutOfMemory)?;

    let mut items = Vec::new();
    items
        .try_reserve_exact(len)
        .map_err(|_| EvalErrorKind::OutOfMemory)?;
    if inclusive {
        items.extend((start..=end).map(Value::Int));
    } else {
        items.extend((start..end).map(Value::Int));
    }
    Ok(Value::list(items))
}
