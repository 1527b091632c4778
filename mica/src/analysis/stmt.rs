//! Statement checking (pass B).

use mica_parser::ast::{
    Block, FunctionDef, ImplBlock, MatchStmt, Pattern, PatternBinding, Stmt, VariantKind,
};
use mica_parser::types::Type;

use super::scope::Binding;
use super::Analyzer;

impl Analyzer {
    pub(crate) fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            // Definitions were registered in pass A; their bodies are
            // checked here, in source order.
            Stmt::Function(f) => self.check_function(f, None),
            Stmt::Impl(i) => self.check_impl(i),
            Stmt::Struct(_) | Stmt::Enum(_) | Stmt::Trait(_) | Stmt::ExternFn(_) => {}

            Stmt::VarDecl(v) => {
                let init_ty = v.init.as_ref().map(|e| self.check_expr_consuming(e));

                if let (Some(declared), Some(actual)) = (&v.ty, &init_ty) {
                    if !declared.matches(actual) {
                        self.report(
                            format!(
                                "Type mismatch for '{}': declared {}, initialized with {}",
                                v.name, declared, actual
                            ),
                            v.span,
                        );
                    }
                }

                // Omitted annotation adopts the initializer type
                let ty = v.ty.clone().or(init_ty).unwrap_or(Type::Any);
                self.scopes.define(&v.name, Binding::new(ty, v.mutable));
            }

            Stmt::Destructuring(d) => {
                let init_ty = self.check_expr_consuming(&d.init);
                match &init_ty {
                    Type::Tuple(items) => {
                        if items.len() != d.names.len() {
                            self.report(
                                format!(
                                    "Destructuring expects {} values, got {}",
                                    d.names.len(),
                                    items.len()
                                ),
                                d.span,
                            );
                        }
                        for (i, name) in d.names.iter().enumerate() {
                            let ty = items.get(i).cloned().unwrap_or(Type::Any);
                            self.scopes.define(name, Binding::new(ty, d.mutable));
                        }
                    }
                    Type::Any => {
                        for name in &d.names {
                            self.scopes.define(name, Binding::new(Type::Any, d.mutable));
                        }
                    }
                    other => {
                        self.report(
                            format!("Cannot destructure non-tuple type {}", other),
                            d.span,
                        );
                        for name in &d.names {
                            self.scopes.define(name, Binding::new(Type::Any, d.mutable));
                        }
                    }
                }
            }

            Stmt::Assignment(a) => {
                let value_ty = self.check_expr_consuming(&a.value);
                let target = self
                    .scopes
                    .lookup(&a.name)
                    .map(|b| (b.moved, b.mutable, b.ty.clone()));
                match target {
                    None => {
                        self.report(format!("Undefined variable '{}'", a.name), a.span);
                    }
                    Some((true, _, _)) => {
                        self.report(format!("Assignment to moved value '{}'", a.name), a.span);
                    }
                    Some((false, mutable, ty)) => {
                        if !mutable {
                            self.report(
                                format!("Cannot assign to immutable binding '{}'", a.name),
                                a.span,
                            );
                        }
                        if !ty.matches(&value_ty) {
                            self.report(
                                format!(
                                    "Type mismatch for '{}': declared {}, assigned {}",
                                    a.name, ty, value_ty
                                ),
                                a.span,
                            );
                        }
                    }
                }
            }

            Stmt::If(i) => {
                self.check_condition(&i.condition);
                self.check_block(&i.then_block);
                if let Some(else_block) = &i.else_block {
                    self.check_block(else_block);
                }
            }

            Stmt::While(w) => {
                self.check_condition(&w.condition);
                self.check_block(&w.body);
            }

            Stmt::For(f) => {
                let iter_ty = self.check_expr(&f.iterable);
                let item_ty = match &iter_ty {
                    Type::Array(inner) => (**inner).clone(),
                    Type::Str => Type::Str,
                    Type::Any => Type::Any,
                    other => {
                        self.report(
                            format!("Cannot iterate over value of type {}", other),
                            f.span,
                        );
                        Type::Any
                    }
                };

                self.scopes.push();
                self.scopes.define(&f.item, Binding::immutable(item_ty));
                for stmt in &f.body.stmts {
                    self.check_stmt(stmt);
                }
                self.scopes.pop();
            }

            Stmt::Return(r) => {
                if let Some(value) = &r.value {
                    self.check_expr(value);
                }
            }

            Stmt::Match(m) => self.check_match(m),

            Stmt::Expr(e) => {
                self.check_expr(&e.expr);
            }
        }
    }

    /// Check a block in a fresh child scope.
    pub(crate) fn check_block(&mut self, block: &Block) {
        self.scopes.push();
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn check_condition(&mut self, condition: &mica_parser::ast::Expr) {
        let ty = self.check_expr(condition);
        if !ty.matches(&Type::Bool) {
            self.report(
                format!("Condition must be bool, got {}", ty),
                condition.span(),
            );
        }
    }

    /// Check a function body. Parameters live in the body scope; `this`
    /// is bound when checking an impl method.
    pub(crate) fn check_function(&mut self, f: &FunctionDef, this_ty: Option<&Type>) {
        self.scopes.push();
        if let Some(ty) = this_ty {
            self.scopes.define("this", Binding::immutable(ty.clone()));
        }
        for param in &f.params {
            self.scopes
                .define(&param.name, Binding::immutable(param.ty.clone()));
        }
        for stmt in &f.body.stmts {
            self.check_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn check_impl(&mut self, i: &ImplBlock) {
        match self.traits.get(&i.trait_name) {
            None => {
                self.report(format!("Unknown trait '{}'", i.trait_name), i.span);
            }
            Some(t) => {
                let declared: Vec<String> = t.methods.iter().map(|m| m.name.clone()).collect();
                for method in &i.methods {
                    if !declared.contains(&method.name) {
                        self.report(
                            format!(
                                "Method '{}' is not a member of trait '{}'",
                                method.name, i.trait_name
                            ),
                            method.span,
                        );
                    }
                }
            }
        }

        for method in &i.methods {
            let target = i.target.clone();
            self.check_function(method, Some(&target));
        }
    }

    // ==================== Match ====================

    fn check_match(&mut self, m: &MatchStmt) {
        // The match subject is consumed
        let subject_ty = self.check_expr_consuming(&m.subject);

        for case in &m.cases {
            self.scopes.push();
            self.check_pattern(&case.pattern, &subject_ty);
            for stmt in &case.body.stmts {
                self.check_stmt(stmt);
            }
            self.scopes.pop();
        }
    }

    fn check_pattern(&mut self, pattern: &Pattern, subject_ty: &Type) {
        match pattern {
            Pattern::Wildcard { .. } => {}

            Pattern::Binding { name, span: _ } => {
                self.scopes
                    .define(name, Binding::immutable(subject_ty.clone()));
            }

            Pattern::Literal { value, span } => {
                let lit_ty = Self::literal_type(value);
                if !subject_ty.matches(&lit_ty) {
                    self.report(
                        format!(
                            "Pattern of type {} cannot match subject of type {}",
                            lit_ty, subject_ty
                        ),
                        *span,
                    );
                }
            }

            // Some/None/Ok/Err sugar: the family comes from the subject
            Pattern::Enum {
                enum_name: None,
                variant,
                binding,
                span,
            } => {
                let family = if variant == "Some" || variant == "None" {
                    "Option"
                } else {
                    "Result"
                };

                let args = match subject_ty {
                    Type::Named { name, args } if name == family => args.as_slice(),
                    Type::Any => &[],
                    other => {
                        self.report(
                            format!(
                                "Pattern '{}' expects a {} subject, got {}",
                                variant, family, other
                            ),
                            *span,
                        );
                        &[]
                    }
                };

                if let PatternBinding::Inner(name) = binding {
                    // Ok binds the first parameter, Err the second
                    let index = if variant == "Err" { 1 } else { 0 };
                    let inner_ty = args.get(index).cloned().unwrap_or(Type::Any);
                    self.scopes.define(name, Binding::immutable(inner_ty));
                }
            }

            // User-defined enum pattern
            Pattern::Enum {
                enum_name: Some(enum_name),
                variant,
                binding,
                span,
            } => {
                match subject_ty {
                    Type::Named { name, .. } if name == enum_name => {}
                    Type::Any => {}
                    other => {
                        self.report(
                            format!(
                                "Pattern enum '{}' does not match subject of type {}",
                                enum_name, other
                            ),
                            *span,
                        );
                    }
                }

                let variant_def = self
                    .enums
                    .get(enum_name)
                    .and_then(|e| e.variants.iter().find(|v| v.name == *variant))
                    .cloned();

                match &variant_def {
                    None => {
                        if self.enums.contains_key(enum_name) {
                            self.report(
                                format!("Unknown variant '{}::{}'", enum_name, variant),
                                *span,
                            );
                        } else {
                            self.report(format!("Undefined enum '{}'", enum_name), *span);
                        }
                    }
                    Some(def) => {
                        if let PatternBinding::Fields(fields) = binding {
                            if def.kind != VariantKind::Struct {
                                self.report(
                                    format!(
                                        "Variant '{}::{}' has no named fields",
                                        enum_name, variant
                                    ),
                                    *span,
                                );
                            }
                            for field in fields {
                                // Destructured fields adopt the declared
                                // variant field types.
                                let ty = def
                                    .fields
                                    .iter()
                                    .find(|f| f.name == *field)
                                    .map(|f| f.ty.clone());
                                match ty {
                                    Some(ty) => {
                                        self.scopes.define(field, Binding::immutable(ty));
                                    }
                                    None => {
                                        self.report(
                                            format!(
                                                "Unknown field '{}' in variant '{}::{}'",
                                                field, enum_name, variant
                                            ),
                                            *span,
                                        );
                                        self.scopes
                                            .define(field, Binding::immutable(Type::Any));
                                    }
                                }
                            }
                        }
                    }
                }

                // Bindings for unknown variants still need definitions so
                // later statements do not cascade
                if variant_def.is_none() {
                    if let PatternBinding::Fields(fields) = binding {
                        for field in fields {
                            self.scopes.define(field, Binding::immutable(Type::Any));
                        }
                    }
                }
            }
        }
    }
}
