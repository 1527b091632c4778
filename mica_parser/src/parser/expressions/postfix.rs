//! Postfix chain: `.field`, `[index]`, and `(args)`.

use crate::ast::{Callee, Expr};
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::span::Span;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse a primary expression followed by any postfix operators.
    pub(crate) fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(Token::Dot) {
                self.advance()?;
                let (field, field_span) = self.expect_identifier("field or method name")?;
                let span = expr.span().to(&field_span);
                expr = Expr::Member {
                    object: Box::new(expr),
                    field,
                    span,
                };
            } else if self.check(Token::LBracket) {
                self.advance()?;
                let index = self.parse_expression()?;
                let close = self.expect(Token::RBracket)?;
                let span = expr.span().to(&close.span);
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                };
            } else if self.check(Token::LParen) {
                let start = expr.span();
                let (args, close_span) = self.parse_call_args()?;
                let span = start.to(&close_span);

                // A call applies to a function name or to a method on a
                // receiver; anything else is not callable.
                let callee = match expr {
                    Expr::Identifier { name, .. } => Callee::Function { name },
                    Expr::Member { object, field, .. } => Callee::Method {
                        receiver: object,
                        method: field,
                    },
                    other => {
                        return Err(ParseError::unexpected_token(
                            "'('",
                            "a call target (function name or method)",
                            other.span(),
                        ))
                    }
                };

                expr = Expr::Call { callee, args, span };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse `(arg, arg, ...)`, returning the arguments and the span of
    /// the closing parenthesis.
    pub(crate) fn parse_call_args(&mut self) -> ParseResult<(Vec<Expr>, Span)> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();

        while !self.check(Token::RParen) {
            args.push(self.parse_expression()?);
            if !self.check(Token::Comma) {
                break;
            }
            self.advance()?;
        }

        let close = self.expect(Token::RParen)?;
        Ok((args, close.span))
    }
}
