//! Expression parsing: precedence climbing over the three binary levels,
//! with unary borrow above and the postfix chain below.

mod postfix;
mod primary;

use crate::ast::{BinaryOp, Expr};
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_binary_expr(0)
    }

    /// Precedence climbing. All binary operators are left-associative, so
    /// the recursive call uses `prec + 1` as its floor.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let Some(prec) = self
                .current
                .as_ref()
                .and_then(|t| t.token.binary_precedence())
            else {
                break;
            };
            let prec = prec as u8;
            if prec < min_prec {
                break;
            }

            let op = match self.current.as_ref().map(|t| t.token) {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::LtEq) => BinaryOp::LtEq,
                Some(Token::GtEq) => BinaryOp::GtEq,
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance()?;

            let rhs = self.parse_binary_expr(prec + 1)?;
            let span = lhs.span().to(&rhs.span());
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(lhs)
    }

    /// `&expr` / `&mut expr`, or fall through to the postfix chain.
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(Token::Amp) {
            let start = self.expect(Token::Amp)?;
            let mutable = if self.check(Token::KwMut) {
                self.advance()?;
                true
            } else {
                false
            };
            let inner = self.parse_unary()?;
            let span = start.span.to(&inner.span());
            return Ok(Expr::Borrow {
                mutable,
                inner: Box::new(inner),
                span,
            });
        }

        self.parse_postfix()
    }
}
