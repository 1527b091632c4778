//! Lexical and syntactic error types.

use crate::span::Span;
use thiserror::Error;

/// Errors produced while tokenizing. All lexical errors are fatal: the
/// lexer stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character at {}:{}", .span.start_line, .span.start_column)]
    UnexpectedCharacter { span: Span },

    #[error("unterminated string literal starting at {}:{}", .span.start_line, .span.start_column)]
    UnterminatedString { span: Span },

    #[error(
        "inconsistent indentation at {}:{}: width {width} does not match any enclosing block",
        .span.start_line, .span.start_column
    )]
    InconsistentIndentation { span: Span, width: usize },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::UnexpectedCharacter { span } => span,
            LexError::UnterminatedString { span } => span,
            LexError::InconsistentIndentation { span, .. } => span,
        }
    }
}

/// Errors produced while parsing. The parser aborts at the first error;
/// there is no recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token {found} at {}:{}, expected {expected}", .span.start_line, .span.start_column)]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("unexpected end of input at {}:{}, expected {expected}", .span.start_line, .span.start_column)]
    UnexpectedEof { expected: String, span: Span },

    #[error("invalid integer literal '{literal}' at {}:{}", .span.start_line, .span.start_column)]
    InvalidNumber { literal: String, span: Span },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => span,
            ParseError::UnexpectedEof { span, .. } => span,
            ParseError::InvalidNumber { span, .. } => span,
            ParseError::Lex(e) => e.span(),
        }
    }

    pub fn unexpected_token(
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// Format the error with the offending source line and a caret marker.
    pub fn format_with_context(&self, source: &str) -> String {
        format_span_context(self.span(), source)
    }
}

impl LexError {
    /// Format the error with the offending source line and a caret marker.
    pub fn format_with_context(&self, source: &str) -> String {
        format_span_context(self.span(), source)
    }
}

fn format_span_context(span: &Span, source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let line_idx = span.start_line.saturating_sub(1);

    let Some(line) = lines.get(line_idx) else {
        return String::new();
    };

    let col = span.start_column.saturating_sub(1);
    let len = if span.start_line == span.end_line {
        span.end_column.saturating_sub(span.start_column).max(1)
    } else {
        1
    };

    let spaces = " ".repeat(col.min(line.len()));
    let marker = "^".repeat(len.min(line.len().saturating_sub(col)).max(1));

    format!(
        "  {} | {}\n  {} | {}{}",
        span.start_line,
        line,
        " ".repeat(span.start_line.to_string().len()),
        spaces,
        marker
    )
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for lexing operations
pub type LexResult<T> = Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let span = Span::new(4, 5, 1, 1, 5, 6);
        let err = ParseError::unexpected_token("'}'", "expression", span);

        assert!(err.to_string().contains("'}'"));
        assert!(err.to_string().contains("expression"));
        assert!(err.to_string().contains("1:5"));
    }

    #[test]
    fn test_lex_error_through_parse_error() {
        let span = Span::new(0, 1, 1, 1, 1, 2);
        let err: ParseError = LexError::UnterminatedString { span }.into();

        assert!(err.to_string().contains("unterminated string"));
        assert_eq!(err.span().start, 0);
    }

    #[test]
    fn test_format_with_context() {
        let source = "let x = $\nlet y = 2";
        let span = Span::new(8, 9, 1, 1, 9, 10);
        let err = ParseError::unexpected_token("'$'", "expression", span);

        let context = err.format_with_context(source);
        assert!(context.contains("let x = $"));
        assert!(context.contains("^"));
    }

    #[test]
    fn test_context_out_of_range_line() {
        let span = Span::new(50, 51, 9, 9, 1, 2);
        let err = ParseError::unexpected_eof("statement", span);
        assert_eq!(err.format_with_context("one line"), "");
    }
}
