//! mica_parser
//!
//! Lexer and recursive descent parser for Mica, a small statically-typed,
//! indentation-delimited teaching language. The lexer synthesizes
//! `Newline`/`Indent`/`Dedent` layout tokens from physical line structure;
//! the parser turns the token stream into a typed AST.
//!
//! # Example
//!
//! ```
//! use mica_parser::parse;
//!
//! let program = parse("fn main():\n    print(\"hi\")\n").expect("parse failed");
//! assert_eq!(program.items.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;
pub mod types;

// Re-exports
pub use ast::Program;
pub use error::{LexError, LexResult, ParseError, ParseResult};
pub use lexer::{Lexer, SpannedToken};
pub use parser::Parser;
pub use span::{SourceMap, Span};
pub use token::{Precedence, Token};
pub use types::Type;

/// Parse Mica source code into a [`Program`].
pub fn parse(source: &str) -> ParseResult<Program> {
    parser::parse(source)
}

/// Tokenize Mica source code.
///
/// Returns spanned tokens, including synthesized layout tokens, stopping
/// after the first lexical error.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken<'_>, LexError>> {
    lexer::tokenize(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let program = parse("").unwrap();
        assert!(program.items.is_empty());
    }

    #[test]
    fn test_parse_blank_lines_only() {
        let program = parse("\n# comment\n\n").unwrap();
        assert!(program.items.is_empty());
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("1 + 2");
        // 1, +, 2, EOF
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| t.is_ok()));
    }

    #[test]
    fn test_ast_serializes_for_hosts() {
        let program = parse("fn main():\n    print(\"hi\")\n").unwrap();
        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(program, back);
    }
}
