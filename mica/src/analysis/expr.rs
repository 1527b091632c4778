//! Expression typing and move tracking (pass B).

use mica_parser::ast::{BinaryOp, Callee, Expr, FieldInit, LiteralValue, VariantKind, VariantPayload};
use mica_parser::span::Span;
use mica_parser::types::Type;

use super::prelude::is_non_consuming_builtin;
use super::scope::Binding;
use super::Analyzer;

impl Analyzer {
    pub(crate) fn literal_type(value: &LiteralValue) -> Type {
        match value {
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Str(_) => Type::Str,
            LiteralValue::Bool(_) => Type::Bool,
        }
    }

    /// Type an expression read in a consuming position: the five positions
    /// where a non-primitive identifier read moves its source (struct-init
    /// field value, function argument, match subject, assignment RHS,
    /// var-decl initializer RHS).
    pub(crate) fn check_expr_consuming(&mut self, expr: &Expr) -> Type {
        if let Expr::Identifier { name, span } = expr {
            self.read_identifier(name, *span, true)
        } else {
            self.check_expr(expr)
        }
    }

    /// Type an expression. Identifier reads at this level do not consume.
    pub(crate) fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal { value, .. } => Self::literal_type(value),

            Expr::Identifier { name, span } => self.read_identifier(name, *span, false),

            Expr::Binary { op, lhs, rhs, span } => {
                let lt = self.check_expr(lhs);
                let rt = self.check_expr(rhs);

                if op.is_comparison() {
                    return Type::Bool;
                }
                // `+` concatenates as soon as either side is a string
                if *op == BinaryOp::Add && (lt == Type::Str || rt == Type::Str) {
                    return Type::Str;
                }
                if !lt.matches(&rt) {
                    self.report(
                        format!("Type mismatch in '{}': {} vs {}", op.symbol(), lt, rt),
                        *span,
                    );
                    return Type::Any;
                }
                if lt == Type::Any {
                    rt
                } else {
                    lt
                }
            }

            Expr::Call { callee, args, span } => self.check_call(callee, args, *span),

            Expr::Member { object, field, span } => {
                // Field reads do not consume the object
                let obj_ty = self.check_expr(object);
                self.field_type(&obj_ty, field, *span)
            }

            Expr::Index { object, index, span } => {
                let obj_ty = self.check_expr(object);
                let idx_ty = self.check_expr(index);
                if !idx_ty.matches(&Type::Int) {
                    self.report(format!("Index must be int, got {}", idx_ty), index.span());
                }
                match obj_ty {
                    Type::Array(inner) => *inner,
                    Type::Str => Type::Str,
                    Type::Any => Type::Any,
                    other => {
                        self.report(format!("Cannot index value of type {}", other), *span);
                        Type::Any
                    }
                }
            }

            Expr::Array { elements, .. } => {
                if elements.is_empty() {
                    return Type::Array(Box::new(Type::Any));
                }
                let first = self.check_expr(&elements[0]);
                for element in &elements[1..] {
                    let ty = self.check_expr(element);
                    if !first.matches(&ty) {
                        self.report(
                            format!("Array elements must share one type: {} vs {}", first, ty),
                            element.span(),
                        );
                    }
                }
                Type::Array(Box::new(first))
            }

            Expr::Tuple { elements, .. } => {
                let items = elements.iter().map(|e| self.check_expr(e)).collect();
                Type::Tuple(items)
            }

            Expr::StructInit { name, fields, span } => self.check_struct_init(name, fields, *span),

            Expr::EnumVariant {
                enum_name,
                variant,
                kind,
                payload,
                span,
            } => self.check_enum_variant(enum_name, variant, *kind, payload, *span),

            // Borrows observe without consuming
            Expr::Borrow { inner, .. } => self.check_expr(inner),

            Expr::Lambda { params, body, .. } => {
                self.scopes.push();
                for param in params {
                    self.scopes.define(param, Binding::immutable(Type::Any));
                }
                for stmt in &body.stmts {
                    self.check_stmt(stmt);
                }
                self.scopes.pop();
                // Callables are opaque to the checker
                Type::Any
            }
        }
    }

    // ==================== Identifier reads ====================

    fn read_identifier(&mut self, name: &str, span: Span, consume: bool) -> Type {
        if self.scopes.lookup(name).is_none() {
            // A bare function name is a first-class reference
            if self.functions.contains_key(name) {
                return Type::Any;
            }
            self.report(format!("Undefined variable '{}'", name), span);
            return Type::Any;
        }

        let mut was_moved = false;
        let mut ty = Type::Any;
        if let Some(binding) = self.scopes.lookup_mut(name) {
            ty = binding.ty.clone();
            if binding.moved {
                was_moved = true;
            } else if consume && !binding.ty.is_primitive() {
                binding.moved = true;
            }
        }
        if was_moved {
            self.report(format!("Use of moved value '{}'", name), span);
        }
        ty
    }

    // ==================== Calls ====================

    fn check_call(&mut self, callee: &Callee, args: &[Expr], span: Span) -> Type {
        match callee {
            Callee::Function { name } => {
                // A local binding (a closure or function reference)
                // shadows the function table; its arity is unknown.
                if self.scopes.lookup(name).is_some() {
                    self.read_identifier(name, span, false);
                    for arg in args {
                        self.check_expr_consuming(arg);
                    }
                    return Type::Any;
                }

                let Some(sig) = self.functions.get(name).cloned() else {
                    for arg in args {
                        self.check_expr_consuming(arg);
                    }
                    self.report(format!("Undefined function '{}'", name), span);
                    return Type::Any;
                };

                let arg_tys: Vec<Type> = if is_non_consuming_builtin(name) {
                    args.iter().map(|a| self.check_expr(a)).collect()
                } else {
                    args.iter().map(|a| self.check_expr_consuming(a)).collect()
                };

                if sig.params.len() != arg_tys.len() {
                    self.report(
                        format!(
                            "Function '{}' expects {} arguments, got {}",
                            name,
                            sig.params.len(),
                            arg_tys.len()
                        ),
                        span,
                    );
                } else {
                    for (i, (expected, actual)) in sig.params.iter().zip(&arg_tys).enumerate() {
                        if !expected.matches(actual) {
                            self.report(
                                format!(
                                    "Argument {} of '{}' expects {}, got {}",
                                    i + 1,
                                    name,
                                    expected,
                                    actual
                                ),
                                args[i].span(),
                            );
                        }
                    }
                }
                sig.ret
            }

            Callee::Method { receiver, method } => {
                // The receiver is observed, not consumed
                let recv_ty = self.check_expr(receiver);
                let arg_tys: Vec<Type> =
                    args.iter().map(|a| self.check_expr_consuming(a)).collect();

                if recv_ty == Type::Any {
                    return Type::Any;
                }

                // Static dispatch requires an exact target-type match
                let found = self
                    .impls
                    .iter()
                    .find(|i| i.target == recv_ty)
                    .and_then(|i| i.methods.get(method))
                    .cloned();

                match found {
                    Some(sig) => {
                        if sig.params.len() != arg_tys.len() {
                            self.report(
                                format!(
                                    "Method '{}' expects {} arguments, got {}",
                                    method,
                                    sig.params.len(),
                                    arg_tys.len()
                                ),
                                span,
                            );
                        }
                        sig.ret
                    }
                    None => {
                        self.report(
                            format!("No method '{}' found for type {}", method, recv_ty),
                            span,
                        );
                        Type::Any
                    }
                }
            }
        }
    }

    // ==================== Fields ====================

    fn field_type(&mut self, obj_ty: &Type, field: &str, span: Span) -> Type {
        match obj_ty {
            Type::Any => Type::Any,
            Type::Named { name, args } => {
                let Some(def) = self.structs.get(name) else {
                    self.report(
                        format!("Cannot access field '{}' on type {}", field, obj_ty),
                        span,
                    );
                    return Type::Any;
                };

                let field_ty = def.fields.iter().find(|f| f.name == field).map(|f| f.ty.clone());
                let type_param = def.type_param.clone();

                match field_ty {
                    Some(ty) => match type_param {
                        // A generic field resolves through the instance's
                        // type argument: Box<str>.v is str.
                        Some(param) => {
                            let arg = args.first().cloned().unwrap_or(Type::Any);
                            Self::substitute(&ty, &param, &arg)
                        }
                        None => ty,
                    },
                    None => {
                        self.report(
                            format!("Unknown field '{}' on struct '{}'", field, name),
                            span,
                        );
                        Type::Any
                    }
                }
            }
            other => {
                self.report(
                    format!("Cannot access field '{}' on type {}", field, other),
                    span,
                );
                Type::Any
            }
        }
    }

    // ==================== Struct init ====================

    fn check_struct_init(&mut self, name: &str, fields: &[FieldInit], span: Span) -> Type {
        let Some(def) = self.structs.get(name).cloned() else {
            for init in fields {
                self.check_expr_consuming(&init.value);
            }
            self.report(format!("Unknown struct '{}'", name), span);
            return Type::Any;
        };

        // The generic argument is inferred from the first field whose
        // declared type is exactly the parameter.
        let mut inferred: Option<Type> = None;

        for init in fields {
            let value_ty = self.check_expr_consuming(&init.value);
            let Some(field_def) = def.fields.iter().find(|f| f.name == init.name) else {
                self.report(
                    format!("Unknown field '{}' in struct '{}'", init.name, name),
                    init.span,
                );
                continue;
            };

            match &def.type_param {
                Some(param) if field_def.ty == Type::named(param.as_str()) => {
                    if inferred.is_none() {
                        inferred = Some(value_ty);
                    }
                }
                Some(param) if mentions_param(&field_def.ty, param) => {
                    // Partially generic field: no equality check without a
                    // resolved argument
                }
                _ => {
                    if !field_def.ty.matches(&value_ty) {
                        self.report(
                            format!(
                                "Field '{}' of struct '{}' expects {}, got {}",
                                init.name, name, field_def.ty, value_ty
                            ),
                            init.span,
                        );
                    }
                }
            }
        }

        for field_def in &def.fields {
            if !fields.iter().any(|i| i.name == field_def.name) {
                self.report(
                    format!("Missing field '{}' in struct '{}'", field_def.name, name),
                    span,
                );
            }
        }

        let args = match def.type_param {
            Some(_) => vec![inferred.unwrap_or(Type::Any)],
            None => Vec::new(),
        };
        Type::Named {
            name: name.to_string(),
            args,
        }
    }

    // ==================== Enum variants ====================

    fn check_enum_variant(
        &mut self,
        enum_name: &str,
        variant: &str,
        kind: VariantKind,
        payload: &VariantPayload,
        span: Span,
    ) -> Type {
        // A user definition takes precedence over the built-in families
        if !self.enums.contains_key(enum_name)
            && (enum_name == "Option" || enum_name == "Result")
        {
            let inner = match payload {
                VariantPayload::Tuple(exprs) => exprs
                    .first()
                    .map(|e| self.check_expr_consuming(e))
                    .unwrap_or(Type::Any),
                _ => Type::Any,
            };
            let args = match variant {
                "Some" => vec![inner],
                "None" => vec![Type::Any],
                "Ok" => vec![inner, Type::Any],
                _ => vec![Type::Any, inner],
            };
            return Type::Named {
                name: enum_name.to_string(),
                args,
            };
        }

        let Some(def) = self.enums.get(enum_name).cloned() else {
            self.check_variant_payload_exprs(payload);
            self.report(format!("Undefined enum '{}'", enum_name), span);
            return Type::Any;
        };

        let Some(variant_def) = def.variants.iter().find(|v| v.name == variant) else {
            self.check_variant_payload_exprs(payload);
            self.report(
                format!("Unknown variant '{}::{}'", enum_name, variant),
                span,
            );
            return Type::named(enum_name);
        };

        match (variant_def.kind, kind) {
            (VariantKind::Struct, VariantKind::Struct) => {
                let VariantPayload::Struct(inits) = payload else {
                    return Type::named(enum_name);
                };
                for init in inits {
                    let value_ty = self.check_expr_consuming(&init.value);
                    match variant_def.fields.iter().find(|f| f.name == init.name) {
                        Some(field_def) => {
                            if !field_def.ty.matches(&value_ty) {
                                self.report(
                                    format!(
                                        "Field '{}' of variant '{}::{}' expects {}, got {}",
                                        init.name, enum_name, variant, field_def.ty, value_ty
                                    ),
                                    init.span,
                                );
                            }
                        }
                        None => {
                            self.report(
                                format!(
                                    "Unknown field '{}' in variant '{}::{}'",
                                    init.name, enum_name, variant
                                ),
                                init.span,
                            );
                        }
                    }
                }
                for field_def in &variant_def.fields {
                    if !inits.iter().any(|i| i.name == field_def.name) {
                        self.report(
                            format!(
                                "Missing field '{}' in variant '{}::{}'",
                                field_def.name, enum_name, variant
                            ),
                            span,
                        );
                    }
                }
            }
            (VariantKind::Struct, _) => {
                self.report(
                    format!("Variant '{}::{}' expects named fields", enum_name, variant),
                    span,
                );
            }
            // Tuple variants are accepted but their payload is not
            // checked against the declaration
            _ => self.check_variant_payload_exprs(payload),
        }

        Type::named(enum_name)
    }

    fn check_variant_payload_exprs(&mut self, payload: &VariantPayload) {
        match payload {
            VariantPayload::None => {}
            VariantPayload::Tuple(exprs) => {
                for expr in exprs {
                    self.check_expr_consuming(expr);
                }
            }
            VariantPayload::Struct(inits) => {
                for init in inits {
                    self.check_expr_consuming(&init.value);
                }
            }
        }
    }
}

/// Does a type expression mention a generic parameter name?
fn mentions_param(ty: &Type, param: &str) -> bool {
    match ty {
        Type::Named { name, args } => {
            (name == param && args.is_empty()) || args.iter().any(|t| mentions_param(t, param))
        }
        Type::Array(inner) => mentions_param(inner, param),
        Type::Tuple(items) => items.iter().any(|t| mentions_param(t, param)),
        _ => false,
    }
}
