use logos::Logos;

use super::{Precedence, Token};

fn raw_tokens(source: &str) -> Vec<Token> {
    Token::lexer(source).filter_map(|r| r.ok()).collect()
}

#[test]
fn test_keywords() {
    assert_eq!(
        raw_tokens("fn struct enum trait impl let mut"),
        vec![
            Token::KwFn,
            Token::KwStruct,
            Token::KwEnum,
            Token::KwTrait,
            Token::KwImpl,
            Token::KwLet,
            Token::KwMut,
        ]
    );
    assert_eq!(
        raw_tokens("if else while for in return match extern this"),
        vec![
            Token::KwIf,
            Token::KwElse,
            Token::KwWhile,
            Token::KwFor,
            Token::KwIn,
            Token::KwReturn,
            Token::KwMatch,
            Token::KwExtern,
            Token::KwThis,
        ]
    );
}

#[test]
fn test_constructor_keywords() {
    assert_eq!(
        raw_tokens("Some None Ok Err"),
        vec![Token::KwSome, Token::KwNone, Token::KwOk, Token::KwErr]
    );
}

#[test]
fn test_type_keywords_and_literals() {
    assert_eq!(
        raw_tokens("int str bool true false 42"),
        vec![
            Token::KwInt,
            Token::KwStr,
            Token::KwBool,
            Token::True,
            Token::False,
            Token::IntLiteral,
        ]
    );
}

#[test]
fn test_identifier_vs_keyword() {
    // Keyword prefixes stay identifiers
    assert_eq!(
        raw_tokens("letter iffy matched fork"),
        vec![
            Token::Identifier,
            Token::Identifier,
            Token::Identifier,
            Token::Identifier,
        ]
    );
}

#[test]
fn test_underscore() {
    assert_eq!(raw_tokens("_"), vec![Token::Underscore]);
    assert_eq!(raw_tokens("_x"), vec![Token::Identifier]);
}

#[test]
fn test_two_char_operators_maximal() {
    assert_eq!(
        raw_tokens("== != <= >= -> => ::"),
        vec![
            Token::EqEq,
            Token::NotEq,
            Token::LtEq,
            Token::GtEq,
            Token::Arrow,
            Token::FatArrow,
            Token::PathSep,
        ]
    );
    // '=' alone is assignment, ':' alone is a block opener
    assert_eq!(raw_tokens("= :"), vec![Token::Assign, Token::Colon]);
}

#[test]
fn test_comments_skipped() {
    assert_eq!(
        raw_tokens("x # trailing comment"),
        vec![Token::Identifier]
    );
}

#[test]
fn test_newline_is_a_token() {
    assert_eq!(
        raw_tokens("x\ny"),
        vec![Token::Identifier, Token::Newline, Token::Identifier]
    );
}

#[test]
fn test_precedence_levels() {
    assert_eq!(
        Token::EqEq.binary_precedence(),
        Some(Precedence::Comparison)
    );
    assert_eq!(Token::Plus.binary_precedence(), Some(Precedence::Additive));
    assert_eq!(
        Token::Star.binary_precedence(),
        Some(Precedence::Multiplicative)
    );
    assert_eq!(Token::Assign.binary_precedence(), None);
    assert!(Precedence::Comparison < Precedence::Additive);
    assert!(Precedence::Additive < Precedence::Multiplicative);
}
