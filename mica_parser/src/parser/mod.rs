//! Recursive descent parser for Mica.
//!
//! Single-token lookahead plus a `peek_next` helper for the few
//! disambiguations the grammar needs (`name =` starts an assignment,
//! `Name::` an enum variant). The parser aborts on the first error.

mod expressions;
mod statements;
mod types;

use crate::ast::{Block, ExprStmt, Program, Stmt};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// Mica parser
pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) lexer: Lexer<'a>,
    pub(crate) source_map: SourceMap,
    /// Current token; `None` once the lexer's `Eof` has been reached
    pub(crate) current: Option<SpannedToken<'a>>,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            source_map: SourceMap::new(source),
            current: None,
        }
    }

    /// Parse the source into a [`Program`].
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut items = Vec::new();

        // Prime the parser with the first token
        self.advance()?;

        loop {
            self.skip_newlines()?;
            if self.is_at_end() {
                break;
            }
            items.push(self.parse_statement()?);
        }

        Ok(Program { items })
    }

    // ==================== Token Management ====================

    /// Advance to the next token, returning the one just left behind.
    /// The lexer's `Eof` maps to `None` so `is_at_end` stays simple.
    pub(crate) fn advance(&mut self) -> ParseResult<Option<SpannedToken<'a>>> {
        let prev = self.current.take();
        match self.lexer.next_token() {
            Some(Ok(token)) if token.token == Token::Eof => self.current = None,
            Some(Ok(token)) => self.current = Some(token),
            Some(Err(e)) => return Err(e.into()),
            None => self.current = None,
        }
        Ok(prev)
    }

    /// Check if current token matches
    pub(crate) fn check(&self, expected: Token) -> bool {
        self.current
            .as_ref()
            .map(|t| t.token == expected)
            .unwrap_or(false)
    }

    /// Peek at the token after the current one without consuming anything
    pub(crate) fn peek_next(&mut self) -> ParseResult<Option<Token>> {
        match self.lexer.peek() {
            Some(Ok(token)) if token.token == Token::Eof => Ok(None),
            Some(Ok(token)) => Ok(Some(token.token)),
            Some(Err(e)) => Err(e.clone().into()),
            None => Ok(None),
        }
    }

    /// Consume the current token if it matches, error otherwise
    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        if self.check(expected) {
            let span = self.current_span();
            self.advance()?
                .ok_or_else(|| ParseError::unexpected_eof(expected.describe(), span))
        } else {
            Err(self.unexpected(expected.describe()))
        }
    }

    /// Consume an identifier and return its text.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> ParseResult<(String, Span)> {
        if self.check(Token::Identifier) {
            let span = self.current_span();
            let token = self
                .advance()?
                .ok_or_else(|| ParseError::unexpected_eof(what, span))?;
            Ok((token.text.to_string(), token.span))
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build an unexpected-token (or unexpected-eof) error at the current position.
    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        match &self.current {
            Some(token) => {
                // Synthesized layout tokens have no text of their own
                let found = if token.text.is_empty() {
                    token.token.describe().to_string()
                } else {
                    format!("'{}'", token.text)
                };
                ParseError::unexpected_token(found, expected, token.span)
            }
            None => ParseError::unexpected_eof(expected, self.eof_span()),
        }
    }

    /// Span of the current token, or an empty span at end of input.
    pub(crate) fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|t| t.span)
            .unwrap_or_else(|| self.eof_span())
    }

    fn eof_span(&self) -> Span {
        self.source_map.span(self.source.len(), self.source.len())
    }

    /// Check if we're at end of input
    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Skip over any run of newline tokens.
    pub(crate) fn skip_newlines(&mut self) -> ParseResult<()> {
        while self.check(Token::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    // ==================== Statement Dispatch ====================

    /// Parse one statement, dispatching on the leading token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let token = self
            .current
            .as_ref()
            .ok_or_else(|| ParseError::unexpected_eof("statement", self.eof_span()))?
            .token;

        match token {
            Token::KwFn => self.parse_function_definition().map(Stmt::Function),
            Token::KwStruct => self.parse_struct_definition().map(Stmt::Struct),
            Token::KwEnum => self.parse_enum_definition().map(Stmt::Enum),
            Token::KwTrait => self.parse_trait_definition().map(Stmt::Trait),
            Token::KwImpl => self.parse_impl_block().map(Stmt::Impl),
            Token::KwExtern => self.parse_extern_fn().map(Stmt::ExternFn),
            Token::KwLet => self.parse_let_statement(),
            Token::KwIf => self.parse_if_statement().map(Stmt::If),
            Token::KwWhile => self.parse_while_statement().map(Stmt::While),
            Token::KwFor => self.parse_for_statement().map(Stmt::For),
            Token::KwReturn => self.parse_return_statement().map(Stmt::Return),
            Token::KwMatch => self.parse_match_statement().map(Stmt::Match),

            // `name = expr` is an assignment; anything else starting with
            // an identifier is an expression statement.
            Token::Identifier => {
                if self.peek_next()? == Some(Token::Assign) {
                    self.parse_assignment().map(Stmt::Assignment)
                } else {
                    self.parse_expression_statement()
                }
            }

            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;
        let span = expr.span();
        Ok(Stmt::Expr(ExprStmt { expr, span }))
    }

    // ==================== Blocks ====================

    /// Parse an indented block: `: NEWLINE INDENT stmts DEDENT`.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        let open = self.expect(Token::Indent)?;
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            stmts.push(self.parse_statement()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(Block {
            stmts,
            span: open.span.to(&close.span),
        })
    }

    /// Parse a braced block: `{ stmts }`. Layout is suppressed inside the
    /// braces, so statements simply follow one another.
    pub(crate) fn parse_braced_block(&mut self) -> ParseResult<Block> {
        let open = self.expect(Token::LBrace)?;
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines()?;
            if self.check(Token::RBrace) || self.is_at_end() {
                break;
            }
            stmts.push(self.parse_statement()?);
        }

        let close = self.expect(Token::RBrace)?;
        Ok(Block {
            stmts,
            span: open.span.to(&close.span),
        })
    }
}

/// Parse Mica source code into a [`Program`].
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(source).parse()
}
