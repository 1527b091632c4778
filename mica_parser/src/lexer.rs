//! Lexer for Mica source code.
//!
//! Wraps the logos-generated lexer with the context-sensitive pieces the
//! token table cannot express: string literals, and the layout synthesis
//! that turns physical line structure into `Newline`/`Indent`/`Dedent`
//! tokens. Layout is suppressed inside brackets (implicit line joining).

use std::collections::VecDeque;

use logos::Logos;

use crate::error::{LexError, LexResult};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// Width a tab stop contributes when measuring indentation.
const TAB_WIDTH: usize = 4;

/// A token with its span
#[derive(Debug, Clone)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

impl<'a> SpannedToken<'a> {
    pub fn new(token: Token, span: Span, text: &'a str) -> Self {
        Self { token, span, text }
    }
}

/// Mica lexer
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, Token>,
    source_map: SourceMap,
    /// Peeked token (for lookahead)
    peeked: Option<Result<SpannedToken<'a>, LexError>>,
    /// Synthesized tokens waiting to be returned
    queued: VecDeque<SpannedToken<'a>>,
    /// Indentation widths of the enclosing blocks; the 0 sentinel stays
    indent_stack: Vec<usize>,
    /// Open `(`/`[`/`{` count; layout is ignored while positive
    bracket_depth: usize,
    /// Offset from original source (used after restarting the inner lexer)
    offset: usize,
    eof_emitted: bool,
    /// Set after the first error; the lexer aborts
    failed: bool,
}

impl<'a> std::fmt::Debug for Lexer<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("indent_stack", &self.indent_stack)
            .field("bracket_depth", &self.bracket_depth)
            .finish_non_exhaustive()
    }
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: Token::lexer(source),
            source_map: SourceMap::new(source),
            peeked: None,
            queued: VecDeque::new(),
            indent_stack: vec![0],
            bracket_depth: 0,
            offset: 0,
            eof_emitted: false,
            failed: false,
        }
    }

    /// Get the source code
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the source map
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> Option<&Result<SpannedToken<'a>, LexError>> {
        if self.peeked.is_none() {
            self.peeked = self.next_token_internal();
        }
        self.peeked.as_ref()
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<Result<SpannedToken<'a>, LexError>> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        self.next_token_internal()
    }

    fn next_token_internal(&mut self) -> Option<Result<SpannedToken<'a>, LexError>> {
        if let Some(token) = self.queued.pop_front() {
            return Some(Ok(token));
        }
        if self.failed {
            return None;
        }

        loop {
            let Some(result) = self.inner.next() else {
                return self.finish_at_eof();
            };

            let raw = self.inner.span();
            let start = self.offset + raw.start;
            let end = self.offset + raw.end;

            match result {
                Ok(Token::Newline) => {
                    if self.bracket_depth > 0 {
                        continue;
                    }
                    match self.handle_newline(start, end) {
                        Ok(Some(token)) => return Some(Ok(token)),
                        Ok(None) => continue,
                        Err(e) => {
                            self.failed = true;
                            return Some(Err(e));
                        }
                    }
                }

                Ok(Token::DoubleQuote) => {
                    // Scan string content to the closing quote. No escape
                    // processing: the payload is the raw bytes between quotes.
                    match self.scan_string_to_close(end) {
                        Ok(string_end) => {
                            self.restart_from(string_end);
                            let span = self.source_map.span(start, string_end);
                            let text = &self.source[start..string_end];
                            return Some(Ok(SpannedToken::new(Token::StringLiteral, span, text)));
                        }
                        Err(e) => {
                            self.failed = true;
                            return Some(Err(e));
                        }
                    }
                }

                Ok(token) => {
                    if token.opens_bracket() {
                        self.bracket_depth += 1;
                    } else if token.closes_bracket() {
                        self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    }
                    let span = self.source_map.span(start, end);
                    let text = &self.source[start..end];
                    return Some(Ok(SpannedToken::new(token, span, text)));
                }

                Err(()) => {
                    self.failed = true;
                    let span = self.source_map.span(start, end);
                    return Some(Err(LexError::UnexpectedCharacter { span }));
                }
            }
        }
    }

    /// Close any open indentation levels and emit the final `Eof` token.
    fn finish_at_eof(&mut self) -> Option<Result<SpannedToken<'a>, LexError>> {
        if self.eof_emitted {
            return None;
        }
        self.eof_emitted = true;

        let pos = self.source.len();
        while self.indent_stack.last().copied().unwrap_or(0) > 0 {
            self.indent_stack.pop();
            self.queued.push_back(self.synthesize(Token::Dedent, pos));
        }
        self.queued.push_back(self.synthesize(Token::Eof, pos));
        self.queued.pop_front().map(Ok)
    }

    /// Layout synthesis at a physical line break.
    ///
    /// Measures the next line's indentation (tab = 4 columns), skips blank
    /// and comment-only lines, and updates the indent stack, returning the
    /// `Newline` token and queueing `Indent`/`Dedent` tokens as needed.
    fn handle_newline(
        &mut self,
        start: usize,
        end: usize,
    ) -> LexResult<Option<SpannedToken<'a>>> {
        let bytes = self.source.as_bytes();
        let mut pos = end;
        let mut width = 0usize;

        loop {
            match bytes.get(pos) {
                Some(b' ') => width += 1,
                Some(b'\t') => width += TAB_WIDTH,
                Some(b'\r') => {}
                _ => break,
            }
            pos += 1;
        }

        // Blank or comment-only lines carry no layout
        match bytes.get(pos) {
            None | Some(b'#') | Some(b'\n') => return Ok(None),
            _ => {}
        }

        let top = self.indent_stack.last().copied().unwrap_or(0);
        if width > top {
            self.indent_stack.push(width);
            self.queued.push_back(self.synthesize(Token::Indent, pos));
        } else if width < top {
            while self.indent_stack.last().copied().unwrap_or(0) > width {
                self.indent_stack.pop();
                self.queued.push_back(self.synthesize(Token::Dedent, pos));
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                return Err(LexError::InconsistentIndentation {
                    span: self.source_map.span(end, pos),
                    width,
                });
            }
        }

        let span = self.source_map.span(start, end);
        Ok(Some(SpannedToken::new(
            Token::Newline,
            span,
            &self.source[start..end],
        )))
    }

    /// Scan string content to find the closing quote.
    /// Uses memchr for accelerated scanning; there are no escape sequences.
    fn scan_string_to_close(&self, start: usize) -> LexResult<usize> {
        let bytes = self.source.as_bytes();
        match memchr::memchr(b'"', &bytes[start..]) {
            Some(offset) => Ok(start + offset + 1),
            None => Err(LexError::UnterminatedString {
                span: self.source_map.span(start - 1, bytes.len()),
            }),
        }
    }

    /// Restart the inner lexer from a new position.
    /// Uses bump() to advance within the current logos lexer when possible.
    fn restart_from(&mut self, pos: usize) {
        let logos_abs_pos = self.offset + self.inner.span().end;
        if pos >= logos_abs_pos && pos <= self.source.len() {
            self.inner.bump(pos - logos_abs_pos);
        } else if pos < self.source.len() {
            self.inner = Token::lexer(&self.source[pos..]);
            self.offset = pos;
        } else {
            self.inner = Token::lexer("");
            self.offset = pos;
        }
    }

    /// A zero-width synthesized layout token.
    fn synthesize(&self, token: Token, pos: usize) -> SpannedToken<'a> {
        SpannedToken::new(token, self.source_map.span(pos, pos), "")
    }

    /// Collect all tokens, stopping after the first error.
    pub fn collect_all(mut self) -> Vec<Result<SpannedToken<'a>, LexError>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<SpannedToken<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize source code into a vector of spanned tokens
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken<'_>, LexError>> {
    Lexer::new(source).collect_all()
}
