//! Parenthesised prefix rendering of the syntax tree.
//!
//! Used by `garnet parse` to inspect what the parser built. The output is
//! for humans only and is not read back.

use std::fmt::Write;

use crate::{Expr, Literal, Stmt};

/// Renders expressions and statements as s-expressions, e.g. `(+ 1 (* 2 3))`.
#[derive(Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter::default()
    }

    /// Render a whole program, one top-level statement per line.
    pub fn print_program(statements: &[Stmt]) -> String {
        let mut lines = Vec::with_capacity(statements.len());
        for stmt in statements {
            lines.push(Self::print_stmt(stmt));
        }
        lines.join("\n")
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        let mut printer = AstPrinter::new();
        printer.stmt(stmt);
        printer.out
    }

    pub fn print_expr(expr: &Expr) -> String {
        let mut printer = AstPrinter::new();
        printer.expr(expr);
        printer.out
    }

    fn open(&mut self, head: &str) {
        self.out.push('(');
        self.out.push_str(head);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(Literal::Str(s)) => {
                let _ = write!(self.out, "{s:?}");
            }
            Expr::Literal(value) => {
                let _ = write!(self.out, "{value}");
            }
            Expr::Grouping(inner) => self.parenthesize("group", [inner.as_ref()]),
            Expr::Unary { op, operand } => self.parenthesize(&op.lexeme, [operand.as_ref()]),
            Expr::Binary { left, op, right }
            | Expr::Logical { left, op, right }
            | Expr::Range {
                left, op, right, ..
            } => self.parenthesize(&op.lexeme, [left.as_ref(), right.as_ref()]),
            Expr::Variable(name) => self.out.push_str(&name.lexeme),
            Expr::Assign { name, op, value } => {
                self.open(&op.lexeme);
                self.out.push(' ');
                self.out.push_str(&name.lexeme);
                self.out.push(' ');
                self.expr(value);
                self.close();
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                self.open("call ");
                self.expr(callee);
                for arg in arguments {
                    self.out.push(' ');
                    self.expr(arg);
                }
                self.close();
            }
            Expr::PrintList { left, right } => {
                self.parenthesize(",", [left.as_ref(), right.as_ref()]);
            }
        }
    }

    fn parenthesize<'e>(&mut self, head: &str, exprs: impl IntoIterator<Item = &'e Expr>) {
        self.open(head);
        for expr in exprs {
            self.out.push(' ');
            self.expr(expr);
        }
        self.close();
    }

    fn body(&mut self, head: &str, stmts: &[Stmt]) {
        self.open(head);
        for stmt in stmts {
            self.out.push(' ');
            self.stmt(stmt);
        }
        self.close();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.parenthesize("expr", [expr]),
            Stmt::Print {
                keyword,
                expressions,
                ..
            } => self.parenthesize(&keyword.lexeme, expressions),
            Stmt::Var {
                names,
                initializers,
            } => {
                self.open("= (");
                let joined: Vec<&str> = names.iter().map(|n| n.lexeme.as_str()).collect();
                self.out.push_str(&joined.join(" "));
                self.out.push(')');
                for init in initializers {
                    self.out.push(' ');
                    self.expr(init);
                }
                self.close();
            }
            Stmt::Block(stmts) => self.body("block", stmts),
            Stmt::If {
                conditions,
                branches,
                else_branch,
            } => {
                self.open("if");
                for (condition, branch) in conditions.iter().zip(branches) {
                    self.out.push(' ');
                    self.expr(condition);
                    self.out.push(' ');
                    self.body("then", branch);
                }
                self.else_branch(else_branch.as_deref());
                self.close();
            }
            Stmt::Unless {
                condition,
                branch,
                else_branch,
            } => {
                self.open("unless ");
                self.expr(condition);
                self.out.push(' ');
                self.body("then", branch);
                self.else_branch(else_branch.as_deref());
                self.close();
            }
            Stmt::While { condition, body } => self.conditional_loop("while", condition, body),
            Stmt::Until { condition, body } => self.conditional_loop("until", condition, body),
            Stmt::Loop { body } => self.body("loop", body),
            Stmt::For {
                variable,
                iterable,
                body,
            } => {
                self.open("for ");
                self.out.push_str(&variable.lexeme);
                self.out.push(' ');
                self.expr(iterable);
                for stmt in body {
                    self.out.push(' ');
                    self.stmt(stmt);
                }
                self.close();
            }
            Stmt::Case {
                subject,
                when_conditions,
                when_branches,
                else_branch,
            } => {
                self.open("case ");
                self.expr(subject);
                for (condition, branch) in when_conditions.iter().zip(when_branches) {
                    self.out.push_str(" (when ");
                    self.expr(condition);
                    for stmt in branch {
                        self.out.push(' ');
                        self.stmt(stmt);
                    }
                    self.close();
                }
                self.else_branch(else_branch.as_deref());
                self.close();
            }
            Stmt::Function(decl) => {
                self.open("def ");
                self.out.push_str(&decl.name.lexeme);
                let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
                let _ = write!(self.out, " ({})", params.join(" "));
                for stmt in &decl.body {
                    self.out.push(' ');
                    self.stmt(stmt);
                }
                self.close();
            }
            Stmt::Return { value, .. } => match value {
                Some(value) => self.parenthesize("return", [value]),
                None => self.out.push_str("(return)"),
            },
            Stmt::Break(_) => self.out.push_str("(break)"),
            Stmt::Next(_) => self.out.push_str("(next)"),
        }
    }

    fn conditional_loop(&mut self, head: &str, condition: &Expr, body: &[Stmt]) {
        self.open(head);
        self.out.push(' ');
        self.expr(condition);
        for stmt in body {
            self.out.push(' ');
            self.stmt(stmt);
        }
        self.close();
    }

    fn else_branch(&mut self, else_branch: Option<&[Stmt]>) {
        if let Some(stmts) = else_branch {
            self.out.push(' ');
            self.body("else", stmts);
        }
    }
}
