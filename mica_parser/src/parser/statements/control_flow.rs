//! Control flow statements: if / while / for / return / match, and the
//! match-pattern grammar.

use crate::ast::{
    Block, ForStmt, IfStmt, MatchCase, MatchStmt, Pattern, PatternBinding, ReturnStmt, WhileStmt,
};
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse `if expr: <block> [else: <block>]`
    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<IfStmt> {
        let start = self.expect(Token::KwIf)?;
        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;

        let else_block = if self.check(Token::KwElse) {
            self.advance()?;
            Some(self.parse_block()?)
        } else {
            None
        };

        let end_span = else_block
            .as_ref()
            .map(|b| b.span)
            .unwrap_or(then_block.span);

        Ok(IfStmt {
            condition,
            then_block,
            else_block,
            span: start.span.to(&end_span),
        })
    }

    /// Parse `while expr: <block>`
    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<WhileStmt> {
        let start = self.expect(Token::KwWhile)?;
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = start.span.to(&body.span);

        Ok(WhileStmt {
            condition,
            body,
            span,
        })
    }

    /// Parse `for item in expr: <block>`
    pub(crate) fn parse_for_statement(&mut self) -> ParseResult<ForStmt> {
        let start = self.expect(Token::KwFor)?;
        let (item, _) = self.expect_identifier("loop variable")?;
        self.expect(Token::KwIn)?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = start.span.to(&body.span);

        Ok(ForStmt {
            item,
            iterable,
            body,
            span,
        })
    }

    /// Parse `return [expr]`
    pub(crate) fn parse_return_statement(&mut self) -> ParseResult<ReturnStmt> {
        let start = self.expect(Token::KwReturn)?;

        let has_value = !matches!(
            self.current.as_ref().map(|t| t.token),
            None | Some(Token::Newline) | Some(Token::Dedent) | Some(Token::RBrace)
        );

        let value = if has_value {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let span = match &value {
            Some(expr) => start.span.to(&expr.span()),
            None => start.span,
        };

        Ok(ReturnStmt { value, span })
    }

    /// Parse a match statement:
    ///
    /// ```text
    /// match expr:
    ///     pattern => statement
    ///     pattern => { statements }
    /// ```
    pub(crate) fn parse_match_statement(&mut self) -> ParseResult<MatchStmt> {
        let start = self.expect(Token::KwMatch)?;
        let subject = self.parse_expression()?;
        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;

        let mut cases = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            cases.push(self.parse_match_case()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(MatchStmt {
            subject,
            cases,
            span: start.span.to(&close.span),
        })
    }

    /// `pattern => body`. The body is a single statement or a braced block.
    fn parse_match_case(&mut self) -> ParseResult<MatchCase> {
        let pattern = self.parse_pattern()?;
        self.expect(Token::FatArrow)?;

        let body = if self.check(Token::LBrace) {
            self.parse_braced_block()?
        } else {
            let stmt = self.parse_statement()?;
            let span = stmt.span();
            Block {
                stmts: vec![stmt],
                span,
            }
        };

        let span = pattern.span().to(&body.span);
        Ok(MatchCase {
            pattern,
            body,
            span,
        })
    }

    // ==================== Patterns ====================

    /// Parse a match-arm pattern.
    pub(crate) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        match self.current.as_ref().map(|t| t.token) {
            Some(Token::Underscore) => {
                let token = self.expect(Token::Underscore)?;
                Ok(Pattern::Wildcard { span: token.span })
            }

            // Option/Result sugar binds a single inner name
            Some(Token::KwSome) => self.parse_sugar_pattern("Some", true),
            Some(Token::KwOk) => self.parse_sugar_pattern("Ok", true),
            Some(Token::KwErr) => self.parse_sugar_pattern("Err", true),
            Some(Token::KwNone) => self.parse_sugar_pattern("None", false),

            Some(Token::Identifier) => {
                if self.peek_next()? == Some(Token::PathSep) {
                    self.parse_enum_pattern()
                } else {
                    let (name, span) = self.expect_identifier("pattern")?;
                    Ok(Pattern::Binding { name, span })
                }
            }

            Some(
                Token::IntLiteral | Token::StringLiteral | Token::True | Token::False,
            ) => {
                let (value, span) = self.parse_literal_value()?;
                Ok(Pattern::Literal { value, span })
            }

            _ => Err(self.unexpected("a pattern")),
        }
    }

    /// `Some(x)`, `Ok(x)`, `Err(e)`, `None`. The family is resolved by the
    /// analyzer against the subject's type.
    fn parse_sugar_pattern(&mut self, variant: &str, takes_inner: bool) -> ParseResult<Pattern> {
        let start = self.current_span();
        self.advance()?;

        let binding = if takes_inner {
            self.expect(Token::LParen)?;
            let (inner, _) = self.expect_identifier("binding name")?;
            self.expect(Token::RParen)?;
            PatternBinding::Inner(inner)
        } else {
            PatternBinding::None
        };

        Ok(Pattern::Enum {
            enum_name: None,
            variant: variant.to_string(),
            binding,
            span: start,
        })
    }

    /// `Name::Variant` optionally followed by `{ f, g, ... }`.
    fn parse_enum_pattern(&mut self) -> ParseResult<Pattern> {
        let (enum_name, start) = self.expect_identifier("enum name")?;
        self.expect(Token::PathSep)?;
        let (variant, _) = self.expect_identifier("variant name")?;

        let binding = if self.check(Token::LBrace) {
            self.advance()?;
            let mut fields = Vec::new();
            while !self.check(Token::RBrace) {
                let (field, _) = self.expect_identifier("field name")?;
                fields.push(field);
                if !self.check(Token::Comma) {
                    break;
                }
                self.advance()?;
            }
            self.expect(Token::RBrace)?;
            PatternBinding::Fields(fields)
        } else {
            PatternBinding::None
        };

        Ok(Pattern::Enum {
            enum_name: Some(enum_name),
            variant,
            binding,
            span: start,
        })
    }
}
