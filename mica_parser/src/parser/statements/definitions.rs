//! Definition parsers: functions, structs, enums, traits, impls, externs.

use crate::ast::{
    EnumDef, ExternFnDef, FieldDef, FunctionDef, ImplBlock, Param, StructDef, TraitDef,
    TraitMethodSig, VariantDef, VariantKind,
};
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse a function definition: `fn name(p: T, ...) -> T: <block>`
    pub(crate) fn parse_function_definition(&mut self) -> ParseResult<FunctionDef> {
        let start = self.expect(Token::KwFn)?;
        let (name, _) = self.expect_identifier("function name")?;
        let params = self.parse_parameter_list()?;

        let return_type = if self.check(Token::Arrow) {
            self.advance()?;
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.span.to(&body.span);

        Ok(FunctionDef {
            name,
            params,
            return_type,
            body,
            span,
        })
    }

    /// Parse a parenthesized parameter list: `(name: T, ...)`
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<Vec<Param>> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();

        while !self.check(Token::RParen) {
            let (name, name_span) = self.expect_identifier("parameter name")?;
            self.expect(Token::Colon)?;
            let ty = self.parse_type()?;
            params.push(Param {
                name,
                ty,
                span: name_span,
            });

            if !self.check(Token::Comma) {
                break;
            }
            self.advance()?;
        }

        self.expect(Token::RParen)?;
        Ok(params)
    }

    /// Parse a struct definition:
    ///
    /// ```text
    /// struct Name<T>:
    ///     field: T
    ///     other: int
    /// ```
    pub(crate) fn parse_struct_definition(&mut self) -> ParseResult<StructDef> {
        let start = self.expect(Token::KwStruct)?;
        let (name, _) = self.expect_identifier("struct name")?;

        // At most one generic parameter
        let type_param = if self.check(Token::Lt) {
            self.advance()?;
            let (param, _) = self.expect_identifier("generic parameter name")?;
            self.expect(Token::Gt)?;
            Some(param)
        } else {
            None
        };

        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;

        let mut fields = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            fields.push(self.parse_field_def()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(StructDef {
            name,
            type_param,
            fields,
            span: start.span.to(&close.span),
        })
    }

    /// Parse a `name: Type` field line.
    fn parse_field_def(&mut self) -> ParseResult<FieldDef> {
        let (name, name_span) = self.expect_identifier("field name")?;
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        Ok(FieldDef {
            name,
            ty,
            span: name_span,
        })
    }

    /// Parse an enum definition. Variants may be unit, struct-like
    /// (`Name { f: T }`), or tuple-like (`Name(T, ...)`).
    pub(crate) fn parse_enum_definition(&mut self) -> ParseResult<EnumDef> {
        let start = self.expect(Token::KwEnum)?;
        let (name, _) = self.expect_identifier("enum name")?;
        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;

        let mut variants = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            variants.push(self.parse_variant_def()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(EnumDef {
            name,
            variants,
            span: start.span.to(&close.span),
        })
    }

    fn parse_variant_def(&mut self) -> ParseResult<VariantDef> {
        let (name, name_span) = self.expect_identifier("variant name")?;

        if self.check(Token::LBrace) {
            // Struct-like variant
            self.advance()?;
            let mut fields = Vec::new();
            while !self.check(Token::RBrace) {
                fields.push(self.parse_field_def()?);
                if !self.check(Token::Comma) {
                    break;
                }
                self.advance()?;
            }
            self.expect(Token::RBrace)?;
            Ok(VariantDef {
                name,
                kind: VariantKind::Struct,
                fields,
                span: name_span,
            })
        } else if self.check(Token::LParen) {
            // Tuple-like variant: positional fields named by index
            self.advance()?;
            let mut fields = Vec::new();
            while !self.check(Token::RParen) {
                let ty = self.parse_type()?;
                fields.push(FieldDef {
                    name: fields.len().to_string(),
                    ty,
                    span: name_span,
                });
                if !self.check(Token::Comma) {
                    break;
                }
                self.advance()?;
            }
            self.expect(Token::RParen)?;
            Ok(VariantDef {
                name,
                kind: VariantKind::Tuple,
                fields,
                span: name_span,
            })
        } else {
            Ok(VariantDef {
                name,
                kind: VariantKind::Unit,
                fields: Vec::new(),
                span: name_span,
            })
        }
    }

    /// Parse a trait definition: an indented list of method signatures.
    pub(crate) fn parse_trait_definition(&mut self) -> ParseResult<TraitDef> {
        let start = self.expect(Token::KwTrait)?;
        let (name, _) = self.expect_identifier("trait name")?;
        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;

        let mut methods = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            methods.push(self.parse_trait_method_sig()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(TraitDef {
            name,
            methods,
            span: start.span.to(&close.span),
        })
    }

    /// `fn name() -> T`: a signature line, no body.
    fn parse_trait_method_sig(&mut self) -> ParseResult<TraitMethodSig> {
        let start = self.expect(Token::KwFn)?;
        let (name, _) = self.expect_identifier("method name")?;
        // A signature may list parameters; only name and return type are
        // recorded (methods receive `this` implicitly).
        self.parse_parameter_list()?;

        let return_type = if self.check(Token::Arrow) {
            self.advance()?;
            Some(self.parse_type()?)
        } else {
            None
        };

        Ok(TraitMethodSig {
            name,
            return_type,
            span: start.span,
        })
    }

    /// Parse an impl block: `impl Trait for Type: <methods>`
    pub(crate) fn parse_impl_block(&mut self) -> ParseResult<ImplBlock> {
        let start = self.expect(Token::KwImpl)?;
        let (trait_name, _) = self.expect_identifier("trait name")?;
        self.expect(Token::KwFor)?;
        let target = self.parse_type()?;
        self.expect(Token::Colon)?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;

        let mut methods = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check(Token::Dedent) || self.is_at_end() {
                break;
            }
            methods.push(self.parse_function_definition()?);
        }

        let close = self.expect(Token::Dedent)?;
        Ok(ImplBlock {
            trait_name,
            target,
            methods,
            span: start.span.to(&close.span),
        })
    }

    /// Parse an extern declaration: `extern fn name(p: T, ...)`.
    /// Externs have no body and may not declare a return type.
    pub(crate) fn parse_extern_fn(&mut self) -> ParseResult<ExternFnDef> {
        let start = self.expect(Token::KwExtern)?;
        self.expect(Token::KwFn)?;
        let (name, _) = self.expect_identifier("extern function name")?;
        let params = self.parse_parameter_list()?;

        if self.check(Token::Arrow) {
            return Err(self.unexpected("end of extern declaration (externs have no return type)"));
        }

        Ok(ExternFnDef {
            name,
            params,
            span: start.span,
        })
    }
}
