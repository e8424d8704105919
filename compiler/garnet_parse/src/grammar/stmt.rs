//! Statement parsing.

use std::rc::Rc;

use garnet_ir::{Expr, FunctionDecl, Stmt, Token, TokenKind};
use tracing::debug;

use crate::recovery::{
    synchronize, TokenSet, BLOCK_END, END, IF_BRANCH_END, UNLESS_BRANCH_END, WHEN_BRANCH_END,
};
use crate::{ParseError, Parser, MAX_ARGS};

impl Parser<'_> {
    /// Top level: statements until `Eof`.
    pub(crate) fn program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.is_at_end() {
                break;
            }
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// One statement, recovering on error. `None` means the statement was
    /// dropped and the error recorded.
    fn declaration(&mut self) -> Option<Stmt> {
        match self.statement() {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                debug!(
                    line = error.token.line,
                    message = %error.message,
                    "dropping statement"
                );
                self.errors.push(error);
                synchronize(&mut self.cursor);
                None
            }
        }
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Def => self.function(),
            TokenKind::Identifier if self.at_parallel_assignment() => self.parallel_assignment(),
            TokenKind::Unless => self.unless_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::Print | TokenKind::Puts => self.print_statement(),
            TokenKind::Begin => self.begin_block(),
            TokenKind::While | TokenKind::Until => self.conditional_loop(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Break => {
                let keyword = self.cursor.advance().clone();
                self.expect_terminator()?;
                Ok(Stmt::Break(keyword))
            }
            TokenKind::Next => {
                let keyword = self.cursor.advance().clone();
                self.expect_terminator()?;
                Ok(Stmt::Next(keyword))
            }
            TokenKind::Loop => self.loop_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Case => self.case_statement(),
            _ => self.expression_statement(),
        }
    }

    /// Statements up to (not including) a token in `closers`.
    ///
    /// Reaching `Eof` first is an error naming the construct opened by
    /// `opener`.
    fn block_until(&mut self, closers: TokenSet, opener: &Token) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.check_set(closers) {
                return Ok(statements);
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::new(
                    self.cursor.current().clone(),
                    format!(
                        "Expect {} to close '{}' from line {}.",
                        closers.format_expected(),
                        opener.lexeme,
                        opener.line
                    ),
                ));
            }
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
    }

    /// A simple statement ends at a newline, `;`, end of input, or right
    /// before a block-closing keyword (left for the enclosing construct).
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Newline)
            || self.cursor.eat(TokenKind::Semicolon)
            || self.cursor.is_at_end()
            || self.cursor.check_set(BLOCK_END)
        {
            Ok(())
        } else {
            Err(ParseError::new(
                self.cursor.current().clone(),
                "Expect newline after statement.",
            ))
        }
    }

    fn at_terminator(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        ) || self.cursor.check_set(BLOCK_END)
    }

    /// `def name(a, b) ... end`; the parentheses are optional.
    fn function(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let name = self
            .cursor
            .expect(TokenKind::Identifier, "Expect function name.")?;

        let mut params = Vec::new();
        let parenthesized = self.cursor.eat(TokenKind::LeftParen);
        if !parenthesized || !self.cursor.check(TokenKind::RightParen) {
            while self.cursor.check(TokenKind::Identifier) {
                if params.len() >= MAX_ARGS {
                    let at = self.cursor.current().clone();
                    self.report(ParseError::new(at, "Can't have more than 255 parameters."));
                }
                params.push(self.cursor.advance().clone());
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
                if !self.cursor.check(TokenKind::Identifier) {
                    return Err(ParseError::new(
                        self.cursor.current().clone(),
                        "Expect parameter name.",
                    ));
                }
            }
        }
        if parenthesized {
            self.cursor
                .expect(TokenKind::RightParen, "Expect ')' after parameters.")?;
        }

        let body = self.block_until(END, &keyword)?;
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after function body.")?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    /// `a, b = x, y`. Both sides must have the same length.
    /// Lookahead for `name (, name)+ =`. Anything else starting with a name
    /// is an expression statement, including a bare `a, b` sequence.
    fn at_parallel_assignment(&self) -> bool {
        let mut offset = 1;
        while self.cursor.peek_kind_at(offset) == TokenKind::Comma
            && self.cursor.peek_kind_at(offset + 1) == TokenKind::Identifier
        {
            offset += 2;
        }
        offset > 1 && self.cursor.peek_kind_at(offset) == TokenKind::Equal
    }

    fn parallel_assignment(&mut self) -> Result<Stmt, ParseError> {
        let mut names = vec![self.cursor.advance().clone()];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(
                self.cursor
                    .expect(TokenKind::Identifier, "Expect variable name.")?,
            );
        }
        let equals = self.cursor.expect(
            TokenKind::Equal,
            "Expect '=' after variable names in parallel assignment.",
        )?;

        let mut initializers = vec![self.expression()?];
        while self.cursor.eat(TokenKind::Comma) {
            initializers.push(self.expression()?);
        }
        if initializers.len() != names.len() {
            return Err(ParseError::new(
                equals,
                format!(
                    "Expect {} values on the right-hand side of parallel assignment.",
                    names.len()
                ),
            ));
        }
        self.expect_terminator()?;

        Ok(Stmt::Var {
            names,
            initializers,
        })
    }

    /// `if c [then] ... {elsif c [then] ...} [else ...] end`
    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let mut conditions = Vec::new();
        let mut branches = Vec::new();

        loop {
            conditions.push(self.expression()?);
            self.cursor.eat(TokenKind::Then);
            branches.push(self.block_until(IF_BRANCH_END, &keyword)?);
            if !self.cursor.eat(TokenKind::Elsif) {
                break;
            }
        }

        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(self.block_until(END, &keyword)?)
        } else {
            None
        };
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after if statement.")?;

        Ok(Stmt::If {
            conditions,
            branches,
            else_branch,
        })
    }

    /// `unless c [then] ... [else ...] end`
    fn unless_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let condition = self.expression()?;
        self.cursor.eat(TokenKind::Then);
        let branch = self.block_until(UNLESS_BRANCH_END, &keyword)?;

        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(self.block_until(END, &keyword)?)
        } else {
            None
        };
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after unless statement.")?;

        Ok(Stmt::Unless {
            condition,
            branch,
            else_branch,
        })
    }

    /// `print a, b` / `puts a, b`. An empty list is allowed.
    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let newline = keyword.is(TokenKind::Puts);

        let mut expressions = Vec::new();
        if !self.at_terminator() {
            expressions.push(self.expression()?);
            while self.cursor.eat(TokenKind::Comma) {
                expressions.push(self.expression()?);
            }
        }
        self.expect_terminator()?;

        Ok(Stmt::Print {
            keyword,
            expressions,
            newline,
        })
    }

    /// `begin ... end`
    fn begin_block(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let body = self.block_until(END, &keyword)?;
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after block.")?;
        Ok(Stmt::Block(body))
    }

    /// `while c [do] ... end` and `until c [do] ... end`.
    fn conditional_loop(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let condition = self.expression()?;
        self.cursor.eat(TokenKind::Do);
        let body = self.block_until(END, &keyword)?;
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after loop body.")?;

        if keyword.is(TokenKind::While) {
            Ok(Stmt::While { condition, body })
        } else {
            Ok(Stmt::Until { condition, body })
        }
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let value = if self.at_terminator() {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_terminator()?;
        Ok(Stmt::Return { keyword, value })
    }

    /// `loop do ... end`
    fn loop_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        self.cursor
            .expect(TokenKind::Do, "Expect 'do' after 'loop'.")?;
        let body = self.block_until(END, &keyword)?;
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after loop body.")?;
        Ok(Stmt::Loop { body })
    }

    /// `for x in iterable [do] ... end`
    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let variable = self
            .cursor
            .expect(TokenKind::Identifier, "Expect loop variable name.")?;
        self.cursor
            .expect(TokenKind::In, "Expect 'in' after loop variable.")?;
        let iterable = self.expression()?;
        self.cursor.eat(TokenKind::Do);
        let body = self.block_until(END, &keyword)?;
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after loop body.")?;

        Ok(Stmt::For {
            variable,
            iterable,
            body,
        })
    }

    /// `case subject {when c [then] ...} [else ...] end`
    fn case_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance().clone();
        let subject = self.expression()?;
        self.cursor.skip_separators();

        let mut when_conditions = Vec::new();
        let mut when_branches = Vec::new();
        while self.cursor.eat(TokenKind::When) {
            when_conditions.push(self.expression()?);
            self.cursor.eat(TokenKind::Then);
            when_branches.push(self.block_until(WHEN_BRANCH_END, &keyword)?);
        }
        if when_conditions.is_empty() {
            return Err(ParseError::new(
                self.cursor.current().clone(),
                "Expect 'when' after case subject.",
            ));
        }

        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(self.block_until(END, &keyword)?)
        } else {
            None
        };
        self.cursor
            .expect(TokenKind::End, "Expect 'end' after case statement.")?;

        Ok(Stmt::Case {
            subject,
            when_conditions,
            when_branches,
            else_branch,
        })
    }

    /// An expression, or a comma sequence of them (`f(1), g(2)`).
    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let mut expr = self.expression()?;
        while self.cursor.eat(TokenKind::Comma) {
            let right = self.expression()?;
            expr = Expr::PrintList {
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        self.expect_terminator()?;
        Ok(Stmt::Expression(expr))
    }
}
