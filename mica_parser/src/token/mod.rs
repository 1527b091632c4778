//! Token definitions for the Mica lexer.
//!
//! The raw token set is produced by a logos-generated lexer. Layout tokens
//! (`Indent`, `Dedent`, `Eof`) and `StringLiteral` never match source text
//! directly; they are synthesized by the wrapping [`Lexer`](crate::Lexer).

mod precedence;

#[cfg(test)]
mod tests;

use logos::Logos;

pub use precedence::Precedence;

/// Mica tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")] // Horizontal whitespace (newlines are tokens)
#[logos(skip r"#[^\n]*")] // Line comments
pub enum Token {
    // ==================== Keywords ====================
    #[token("fn")]
    KwFn,
    #[token("struct")]
    KwStruct,
    #[token("enum")]
    KwEnum,
    #[token("trait")]
    KwTrait,
    #[token("impl")]
    KwImpl,
    #[token("let")]
    KwLet,
    #[token("mut")]
    KwMut,
    #[token("if")]
    KwIf,
    #[token("else")]
    KwElse,
    #[token("while")]
    KwWhile,
    #[token("for")]
    KwFor,
    #[token("in")]
    KwIn,
    #[token("return")]
    KwReturn,
    #[token("match")]
    KwMatch,
    #[token("extern")]
    KwExtern,
    #[token("this")]
    KwThis,
    #[token("_")]
    Underscore,
    #[token("Some")]
    KwSome,
    #[token("None")]
    KwNone,
    #[token("Ok")]
    KwOk,
    #[token("Err")]
    KwErr,

    // ==================== Type Keywords ====================
    #[token("int")]
    KwInt,
    #[token("str")]
    KwStr,
    #[token("bool")]
    KwBool,

    // ==================== Literals ====================
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[regex("[0-9]+")]
    IntLiteral,
    #[regex("[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,
    /// Opening quote of a string literal. The lexer wrapper scans to the
    /// closing quote and replaces this with [`Token::StringLiteral`].
    #[token("\"")]
    DoubleQuote,
    /// Complete string literal, quotes included in the token text.
    StringLiteral,

    // ==================== Operators ====================
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("::")]
    PathSep,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token(".")]
    Dot,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // ==================== Layout ====================
    #[regex(r"\n")]
    Newline,
    /// Synthesized when a line is indented deeper than the previous one.
    Indent,
    /// Synthesized when a line returns to an enclosing indentation level.
    Dedent,
    /// Synthesized at end of input, after any closing dedents.
    Eof,
}

impl Token {
    /// True for tokens that open an implicit line-joining bracket.
    pub fn opens_bracket(&self) -> bool {
        matches!(self, Token::LParen | Token::LBracket | Token::LBrace)
    }

    /// True for tokens that close an implicit line-joining bracket.
    pub fn closes_bracket(&self) -> bool {
        matches!(self, Token::RParen | Token::RBracket | Token::RBrace)
    }

    /// True for the comparison operators.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::EqEq | Token::NotEq | Token::Lt | Token::Gt | Token::LtEq | Token::GtEq
        )
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::KwFn => "'fn'",
            Token::KwStruct => "'struct'",
            Token::KwEnum => "'enum'",
            Token::KwTrait => "'trait'",
            Token::KwImpl => "'impl'",
            Token::KwLet => "'let'",
            Token::KwMut => "'mut'",
            Token::KwIf => "'if'",
            Token::KwElse => "'else'",
            Token::KwWhile => "'while'",
            Token::KwFor => "'for'",
            Token::KwIn => "'in'",
            Token::KwReturn => "'return'",
            Token::KwMatch => "'match'",
            Token::KwExtern => "'extern'",
            Token::KwThis => "'this'",
            Token::Underscore => "'_'",
            Token::KwSome => "'Some'",
            Token::KwNone => "'None'",
            Token::KwOk => "'Ok'",
            Token::KwErr => "'Err'",
            Token::KwInt => "'int'",
            Token::KwStr => "'str'",
            Token::KwBool => "'bool'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::IntLiteral => "integer literal",
            Token::Identifier => "identifier",
            Token::DoubleQuote | Token::StringLiteral => "string literal",
            Token::EqEq => "'=='",
            Token::NotEq => "'!='",
            Token::LtEq => "'<='",
            Token::GtEq => "'>='",
            Token::Arrow => "'->'",
            Token::FatArrow => "'=>'",
            Token::PathSep => "'::'",
            Token::Assign => "'='",
            Token::Lt => "'<'",
            Token::Gt => "'>'",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Amp => "'&'",
            Token::Pipe => "'|'",
            Token::Dot => "'.'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::Newline => "newline",
            Token::Indent => "indent",
            Token::Dedent => "dedent",
            Token::Eof => "end of input",
        }
    }
}
