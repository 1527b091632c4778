//! Primary expressions: literals, grouping, array/tuple literals, lambdas,
//! and the identifier-led forms (struct init, enum variants, plain names).

use crate::ast::{
    Block, Expr, FieldInit, LiteralValue, ReturnStmt, Stmt, VariantKind, VariantPayload,
};
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::span::Span;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse a primary expression.
    pub(crate) fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.current.as_ref().map(|t| t.token) {
            Some(
                Token::IntLiteral | Token::StringLiteral | Token::True | Token::False,
            ) => {
                let (value, span) = self.parse_literal_value()?;
                Ok(Expr::Literal { value, span })
            }

            Some(Token::KwThis) => {
                let token = self.expect(Token::KwThis)?;
                Ok(Expr::Identifier {
                    name: "this".to_string(),
                    span: token.span,
                })
            }

            Some(Token::LParen) => self.parse_paren_or_tuple(),
            Some(Token::LBracket) => self.parse_array_literal(),
            Some(Token::Pipe) => self.parse_lambda(),

            // Some(x) / Ok(x) / Err(e) construct Option/Result variants
            Some(Token::KwSome) => self.parse_sugar_variant("Option", "Some"),
            Some(Token::KwOk) => self.parse_sugar_variant("Result", "Ok"),
            Some(Token::KwErr) => self.parse_sugar_variant("Result", "Err"),
            Some(Token::KwNone) => {
                let token = self.expect(Token::KwNone)?;
                Ok(Expr::EnumVariant {
                    enum_name: "Option".to_string(),
                    variant: "None".to_string(),
                    kind: VariantKind::Unit,
                    payload: VariantPayload::None,
                    span: token.span,
                })
            }

            Some(Token::Identifier) => self.parse_identifier_expr(),

            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Consume a literal token and return its payload.
    pub(crate) fn parse_literal_value(&mut self) -> ParseResult<(LiteralValue, Span)> {
        let token = self
            .current
            .as_ref()
            .ok_or_else(|| self.unexpected("a literal"))?;
        let span = token.span;
        let text = token.text;

        let value = match token.token {
            Token::IntLiteral => {
                let parsed = text.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                    literal: text.to_string(),
                    span,
                })?;
                LiteralValue::Int(parsed)
            }
            // Token text includes the quotes; the payload is the raw bytes
            // between them.
            Token::StringLiteral => LiteralValue::Str(text[1..text.len() - 1].to_string()),
            Token::True => LiteralValue::Bool(true),
            Token::False => LiteralValue::Bool(false),
            _ => return Err(self.unexpected("a literal")),
        };

        self.advance()?;
        Ok((value, span))
    }

    /// `(expr)` grouping or `(a, b, ...)` tuple literal.
    fn parse_paren_or_tuple(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::LParen)?;

        if self.check(Token::RParen) {
            let close = self.expect(Token::RParen)?;
            return Ok(Expr::Tuple {
                elements: Vec::new(),
                span: open.span.to(&close.span),
            });
        }

        let first = self.parse_expression()?;

        if self.check(Token::Comma) {
            let mut elements = vec![first];
            while self.check(Token::Comma) {
                self.advance()?;
                if self.check(Token::RParen) {
                    break;
                }
                elements.push(self.parse_expression()?);
            }
            let close = self.expect(Token::RParen)?;
            return Ok(Expr::Tuple {
                elements,
                span: open.span.to(&close.span),
            });
        }

        self.expect(Token::RParen)?;
        Ok(first)
    }

    /// `[a, b, ...]`
    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::LBracket)?;
        let mut elements = Vec::new();

        while !self.check(Token::RBracket) {
            elements.push(self.parse_expression()?);
            if !self.check(Token::Comma) {
                break;
            }
            self.advance()?;
        }

        let close = self.expect(Token::RBracket)?;
        Ok(Expr::Array {
            elements,
            span: open.span.to(&close.span),
        })
    }

    /// `|p, ...|: <block>` or `|p, ...| expr`.
    ///
    /// The single-expression form lowers to a block whose only statement
    /// is `return expr`, so both forms execute identically.
    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::Pipe)?;
        let mut params = Vec::new();

        while !self.check(Token::Pipe) {
            let (name, _) = self.expect_identifier("lambda parameter")?;
            params.push(name);
            if !self.check(Token::Comma) {
                break;
            }
            self.advance()?;
        }
        self.expect(Token::Pipe)?;

        let body = if self.check(Token::Colon) {
            self.parse_block()?
        } else {
            let expr = self.parse_expression()?;
            let span = expr.span();
            Block {
                stmts: vec![Stmt::Return(ReturnStmt {
                    value: Some(expr),
                    span,
                })],
                span,
            }
        };

        let span = open.span.to(&body.span);
        Ok(Expr::Lambda { params, body, span })
    }

    /// `Some(x)` / `Ok(x)` / `Err(e)` lower to tuple-like variants of the
    /// built-in `Option` / `Result` enums.
    fn parse_sugar_variant(&mut self, enum_name: &str, variant: &str) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance()?;
        self.expect(Token::LParen)?;
        let inner = self.parse_expression()?;
        let close = self.expect(Token::RParen)?;

        Ok(Expr::EnumVariant {
            enum_name: enum_name.to_string(),
            variant: variant.to_string(),
            kind: VariantKind::Tuple,
            payload: VariantPayload::Tuple(vec![inner]),
            span: start.to(&close.span),
        })
    }

    /// Identifier-led expressions: `Name { ... }` struct init,
    /// `Name::Variant ...`, or a plain identifier.
    fn parse_identifier_expr(&mut self) -> ParseResult<Expr> {
        let (name, name_span) = self.expect_identifier("an expression")?;

        if self.check(Token::LBrace) {
            let (fields, close_span) = self.parse_field_inits()?;
            return Ok(Expr::StructInit {
                name,
                fields,
                span: name_span.to(&close_span),
            });
        }

        if self.check(Token::PathSep) {
            self.advance()?;
            let (variant, variant_span) = self.expect_identifier("variant name")?;

            if self.check(Token::LBrace) {
                let (fields, close_span) = self.parse_field_inits()?;
                return Ok(Expr::EnumVariant {
                    enum_name: name,
                    variant,
                    kind: VariantKind::Struct,
                    payload: VariantPayload::Struct(fields),
                    span: name_span.to(&close_span),
                });
            }

            if self.check(Token::LParen) {
                let (args, close_span) = self.parse_call_args()?;
                return Ok(Expr::EnumVariant {
                    enum_name: name,
                    variant,
                    kind: VariantKind::Tuple,
                    payload: VariantPayload::Tuple(args),
                    span: name_span.to(&close_span),
                });
            }

            return Ok(Expr::EnumVariant {
                enum_name: name,
                variant,
                kind: VariantKind::Unit,
                payload: VariantPayload::None,
                span: name_span.to(&variant_span),
            });
        }

        Ok(Expr::Identifier {
            name,
            span: name_span,
        })
    }

    /// `{ field: expr, ... }`, returning the initializers and the closing
    /// brace's span.
    fn parse_field_inits(&mut self) -> ParseResult<(Vec<FieldInit>, Span)> {
        self.expect(Token::LBrace)?;
        let mut fields = Vec::new();

        while !self.check(Token::RBrace) {
            let (name, name_span) = self.expect_identifier("field name")?;
            self.expect(Token::Colon)?;
            let value = self.parse_expression()?;
            fields.push(FieldInit {
                name,
                value,
                span: name_span,
            });
            if !self.check(Token::Comma) {
                break;
            }
            self.advance()?;
        }

        let close = self.expect(Token::RBrace)?;
        Ok((fields, close.span))
    }
}
