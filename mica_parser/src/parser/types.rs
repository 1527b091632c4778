//! Type annotation grammar.
//!
//! `int | str | bool | [T] | (T1, T2, ...) | Name | Name<T1, T2>`

use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::Token;
use crate::types::Type;

impl<'a> Parser<'a> {
    /// Parse a type reference.
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        match self.current.as_ref().map(|t| t.token) {
            Some(Token::KwInt) => {
                self.advance()?;
                Ok(Type::Int)
            }
            Some(Token::KwStr) => {
                self.advance()?;
                Ok(Type::Str)
            }
            Some(Token::KwBool) => {
                self.advance()?;
                Ok(Type::Bool)
            }

            // [T]
            Some(Token::LBracket) => {
                self.advance()?;
                let inner = self.parse_type()?;
                self.expect(Token::RBracket)?;
                Ok(Type::Array(Box::new(inner)))
            }

            // () is unit, (T1, T2, ...) a tuple
            Some(Token::LParen) => {
                self.advance()?;
                if self.check(Token::RParen) {
                    self.advance()?;
                    return Ok(Type::Unit);
                }
                let mut items = vec![self.parse_type()?];
                while self.check(Token::Comma) {
                    self.advance()?;
                    if self.check(Token::RParen) {
                        break;
                    }
                    items.push(self.parse_type()?);
                }
                self.expect(Token::RParen)?;
                Ok(Type::Tuple(items))
            }

            // Name or Name<T1, T2>
            Some(Token::Identifier) => {
                let (name, _) = self.expect_identifier("type name")?;
                let mut args = Vec::new();
                if self.check(Token::Lt) {
                    self.advance()?;
                    args.push(self.parse_type()?);
                    while self.check(Token::Comma) {
                        self.advance()?;
                        args.push(self.parse_type()?);
                    }
                    self.expect(Token::Gt)?;
                }
                // The `any` sentinel is written as a plain name
                if name == "any" && args.is_empty() {
                    return Ok(Type::Any);
                }
                Ok(Type::Named { name, args })
            }

            _ => Err(self.unexpected("a type")),
        }
    }
}
