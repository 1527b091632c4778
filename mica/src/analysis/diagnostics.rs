//! Analyzer diagnostics.
//!
//! Unlike lexer/parser errors, diagnostics are accumulated: the analyzer
//! visits the whole program and reports every finding.

use std::fmt;

use mica_parser::span::Span;
use serde::Serialize;

/// One analyzer finding. The message is self-describing and names the
/// offending binding, field, or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.message, self.span.start_line, self.span.start_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let d = Diagnostic::new(
            "Use of moved value 'a'",
            Span::new(10, 11, 3, 3, 5, 6),
        );
        let text = d.to_string();
        assert!(text.contains("Use of moved value 'a'"));
        assert!(text.contains("3:5"));
    }
}
