//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! | Level      | Operators                       | Assoc |
//! |------------|---------------------------------|-------|
//! | assignment | `=` `+=` `-=` `*=` `/=` `%=`    | right |
//! | or         | `or` `\|\|`                     | left  |
//! | and        | `and` `&&`                      | left  |
//! | equality   | `==` `!=`                       | left  |
//! | comparison | `<` `<=` `>` `>=` `..` `...`    | left  |
//! | term       | `+` `-`                         | left  |
//! | factor     | `*` `/` `%`                     | left  |
//! | power      | `**`                            | right |
//! | unary      | `!` `not` `-`                   | right |
//! | call       | `f(...)`                        | left  |

use garnet_ir::{Expr, Literal, TokenKind};
use garnet_stack::ensure_sufficient_stack;

use crate::recovery::ASSIGN_OPS;
use crate::{ParseError, Parser, MAX_ARGS};

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.assignment())
    }

    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.or()?;

        if !self.cursor.check_set(ASSIGN_OPS) {
            return Ok(target);
        }
        let op = self.cursor.advance().clone();
        let value = self.assignment()?;

        match target {
            Expr::Variable(name) => Ok(Expr::Assign {
                name,
                op,
                value: Box::new(value),
            }),
            other => {
                self.report(ParseError::new(op, "Invalid assignment target."));
                Ok(other)
            }
        }
    }

    fn or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and()?;
        while self.cursor.check(TokenKind::Or) {
            let op = self.cursor.advance().clone();
            let right = self.and()?;
            expr = Expr::logical(expr, op, right);
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.equality()?;
        while self.cursor.check(TokenKind::And) {
            let op = self.cursor.advance().clone();
            let right = self.equality()?;
            expr = Expr::logical(expr, op, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;
        while matches!(
            self.cursor.current_kind(),
            TokenKind::EqualEqual | TokenKind::BangEqual
        ) {
            let op = self.cursor.advance().clone();
            let right = self.comparison()?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    /// Relational operators and ranges share a level.
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::Less
                | TokenKind::LessEqual => {
                    let op = self.cursor.advance().clone();
                    let right = self.term()?;
                    expr = Expr::binary(expr, op, right);
                }
                TokenKind::DotDot | TokenKind::DotDotDot => {
                    let op = self.cursor.advance().clone();
                    let right = self.term()?;
                    let inclusive = op.is(TokenKind::DotDot);
                    expr = Expr::Range {
                        left: Box::new(expr),
                        op,
                        right: Box::new(right),
                        inclusive,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        while matches!(
            self.cursor.current_kind(),
            TokenKind::Plus | TokenKind::Minus
        ) {
            let op = self.cursor.advance().clone();
            let right = self.factor()?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.power()?;
        while matches!(
            self.cursor.current_kind(),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let op = self.cursor.advance().clone();
            let right = self.power()?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    /// `**` is right-associative: `2 ** 3 ** 2` is `2 ** 9`.
    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.unary()?;
        if !self.cursor.check(TokenKind::StarStar) {
            return Ok(base);
        }
        let op = self.cursor.advance().clone();
        let exponent = ensure_sufficient_stack(|| self.power())?;
        Ok(Expr::binary(base, op, exponent))
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Bang | TokenKind::Not | TokenKind::Minus
        ) {
            let op = self.cursor.advance().clone();
            let operand = ensure_sufficient_stack(|| self.unary())?;
            return Ok(Expr::unary(op, operand));
        }
        self.call()
    }

    fn call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while self.cursor.eat(TokenKind::LeftParen) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    let at = self.cursor.current().clone();
                    self.report(ParseError::new(at, "Can't have more than 255 arguments."));
                }
                arguments.push(self.expression()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let paren = self
            .cursor
            .expect(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let expr = match token.kind {
            TokenKind::False => Expr::literal(Literal::Bool(false)),
            TokenKind::True => Expr::literal(Literal::Bool(true)),
            TokenKind::Nil => Expr::literal(Literal::Nil),
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                Expr::literal(token.literal.clone().unwrap_or(Literal::Nil))
            }
            TokenKind::Identifier => Expr::Variable(token.clone()),
            TokenKind::LeftParen => {
                self.cursor.advance();
                let inner = self.expression()?;
                self.cursor
                    .expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping(Box::new(inner)));
            }
            _ => return Err(ParseError::new(token.clone(), "Expect expression.")),
        };
        self.cursor.advance();
        Ok(expr)
    }
}
