//! Variable declarations and assignment.

use crate::ast::{Assignment, DestructuringAssign, Stmt, VarDecl};
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse a `let` statement: either a plain declaration
    /// `let [mut] name[: T] [= expr]` or a destructuring
    /// `let [mut] (a, b, ...) = expr`.
    pub(crate) fn parse_let_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(Token::KwLet)?;

        let mutable = if self.check(Token::KwMut) {
            self.advance()?;
            true
        } else {
            false
        };

        if self.check(Token::LParen) {
            // Destructuring: a parenthesized name list
            self.advance()?;
            let mut names = Vec::new();
            loop {
                let (name, _) = self.expect_identifier("binding name")?;
                names.push(name);
                if !self.check(Token::Comma) {
                    break;
                }
                self.advance()?;
            }
            self.expect(Token::RParen)?;
            self.expect(Token::Assign)?;
            let init = self.parse_expression()?;
            let span = start.span.to(&init.span());

            return Ok(Stmt::Destructuring(DestructuringAssign {
                names,
                mutable,
                init,
                span,
            }));
        }

        let (name, name_span) = self.expect_identifier("binding name")?;

        let ty = if self.check(Token::Colon) {
            self.advance()?;
            Some(self.parse_type()?)
        } else {
            None
        };

        let init = if self.check(Token::Assign) {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };

        let span = match &init {
            Some(expr) => start.span.to(&expr.span()),
            None => start.span.to(&name_span),
        };

        Ok(Stmt::VarDecl(VarDecl {
            name,
            ty,
            mutable,
            init,
            span,
        }))
    }

    /// Parse `name = expr`, updating an existing binding.
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        let (name, name_span) = self.expect_identifier("binding name")?;
        self.expect(Token::Assign)?;
        let value = self.parse_expression()?;
        let span = name_span.to(&value.span());

        Ok(Assignment { name, value, span })
    }
}
