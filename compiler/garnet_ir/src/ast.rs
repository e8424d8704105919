//! Syntax tree for Garnet programs.
//!
//! Two closed families: [`Expr`] evaluates to a value, [`Stmt`] executes
//! for effect. Operator nodes keep their operator `Token` so runtime errors
//! can report the source line.

use std::rc::Rc;

use crate::{Literal, Token};

/// Expression nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Grouping(Box<Expr>),
    Unary {
        op: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// `and` / `or` with short-circuit evaluation.
    Logical {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// `a..b` (inclusive) or `a...b` (exclusive).
    Range {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
        inclusive: bool,
    },
    Variable(Token),
    /// `name = value` or a compound form (`+=`, `-=`, `*=`, `/=`, `%=`).
    Assign {
        name: Token,
        op: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// Closing paren, used for error lines.
        paren: Token,
        arguments: Vec<Expr>,
    },
    /// Comma sequence: evaluates `left`, then yields `right`.
    PrintList {
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(value: Literal) -> Self {
        Expr::Literal(value)
    }

    pub fn binary(left: Expr, op: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, op: Token, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: Token, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

/// A `def` declaration. Shared by `Rc` between the tree and the runtime
/// function values created from it.
#[derive(Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Statement nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    /// `print` (no line terminator) or `puts` (one line per expression).
    Print {
        keyword: Token,
        expressions: Vec<Expr>,
        newline: bool,
    },
    /// Parallel assignment `a, b = x, y`.
    Var {
        names: Vec<Token>,
        initializers: Vec<Expr>,
    },
    /// `begin ... end`.
    Block(Vec<Stmt>),
    If {
        conditions: Vec<Expr>,
        branches: Vec<Vec<Stmt>>,
        else_branch: Option<Vec<Stmt>>,
    },
    Unless {
        condition: Expr,
        branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Until {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Loop {
        body: Vec<Stmt>,
    },
    For {
        variable: Token,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Case {
        subject: Expr,
        when_conditions: Vec<Expr>,
        when_branches: Vec<Vec<Stmt>>,
        else_branch: Option<Vec<Stmt>>,
    },
    Function(Rc<FunctionDecl>),
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
    Break(Token),
    Next(Token),
}
