//! Static analysis: nominal type checking and move/mutability discipline.
//!
//! Two passes over the program. Pass A registers every top-level
//! definition and injects the builtin signatures; pass B visits each
//! statement, accumulating diagnostics. The analyzer never aborts on
//! source-level problems.

mod diagnostics;
mod expr;
mod prelude;
mod scope;
mod stmt;

use std::collections::HashMap;

use mica_parser::ast::{EnumDef, Program, Stmt, StructDef, TraitDef};
use mica_parser::span::Span;
use mica_parser::types::Type;

pub use diagnostics::Diagnostic;
pub use prelude::{FnSig, PRELUDE};
pub use scope::{Binding, ScopeStack};

/// A registered `impl Trait for Type` with its method signatures.
#[derive(Debug, Clone)]
pub(crate) struct ImplInfo {
    pub trait_name: String,
    pub target: Type,
    pub methods: HashMap<String, FnSig>,
}

/// The analyzer. Create one per program; the builtin table is injected
/// into each instance.
#[derive(Debug)]
pub struct Analyzer {
    pub(crate) structs: HashMap<String, StructDef>,
    pub(crate) enums: HashMap<String, EnumDef>,
    pub(crate) traits: HashMap<String, TraitDef>,
    pub(crate) impls: Vec<ImplInfo>,
    pub(crate) functions: HashMap<String, FnSig>,
    pub(crate) scopes: ScopeStack,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        let mut functions = HashMap::new();
        for (name, sig) in PRELUDE.iter() {
            functions.insert((*name).to_string(), sig.clone());
        }
        Self {
            structs: HashMap::new(),
            enums: HashMap::new(),
            traits: HashMap::new(),
            impls: Vec::new(),
            functions,
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run both passes and return every diagnostic found.
    pub fn analyze(mut self, program: &Program) -> Vec<Diagnostic> {
        self.register_definitions(program);
        for item in &program.items {
            self.check_stmt(item);
        }
        self.diagnostics
    }

    pub(crate) fn report(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    // ==================== Pass A: definitions ====================

    fn register_definitions(&mut self, program: &Program) {
        for item in &program.items {
            match item {
                Stmt::Struct(s) => {
                    if self.structs.contains_key(&s.name) {
                        self.report(format!("Duplicate struct '{}'", s.name), s.span);
                    } else {
                        self.structs.insert(s.name.clone(), s.clone());
                    }
                }
                Stmt::Enum(e) => {
                    if self.enums.contains_key(&e.name) {
                        self.report(format!("Duplicate enum '{}'", e.name), e.span);
                    } else {
                        self.enums.insert(e.name.clone(), e.clone());
                    }
                }
                Stmt::Trait(t) => {
                    self.traits.insert(t.name.clone(), t.clone());
                }
                Stmt::Impl(i) => {
                    let methods = i
                        .methods
                        .iter()
                        .map(|m| {
                            let sig = FnSig::new(
                                m.params.iter().map(|p| p.ty.clone()).collect(),
                                m.return_type.clone().unwrap_or(Type::Unit),
                            );
                            (m.name.clone(), sig)
                        })
                        .collect();
                    self.impls.push(ImplInfo {
                        trait_name: i.trait_name.clone(),
                        target: i.target.clone(),
                        methods,
                    });
                }
                Stmt::Function(f) => {
                    let sig = FnSig::new(
                        f.params.iter().map(|p| p.ty.clone()).collect(),
                        f.return_type.clone().unwrap_or(Type::Unit),
                    );
                    self.functions.insert(f.name.clone(), sig);
                }
                Stmt::ExternFn(x) => {
                    // Externs have no return annotation; their result is
                    // opaque to the checker.
                    let sig = FnSig::new(
                        x.params.iter().map(|p| p.ty.clone()).collect(),
                        Type::Any,
                    );
                    self.functions.insert(x.name.clone(), sig);
                }
                _ => {}
            }
        }
    }

    // ==================== Shared helpers ====================

    /// Replace a struct's generic parameter with a concrete argument
    /// throughout a field type.
    pub(crate) fn substitute(ty: &Type, param: &str, arg: &Type) -> Type {
        match ty {
            Type::Named { name, args } if name == param && args.is_empty() => arg.clone(),
            Type::Array(inner) => Type::Array(Box::new(Self::substitute(inner, param, arg))),
            Type::Tuple(items) => Type::Tuple(
                items
                    .iter()
                    .map(|t| Self::substitute(t, param, arg))
                    .collect(),
            ),
            Type::Named { name, args } => Type::Named {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|t| Self::substitute(t, param, arg))
                    .collect(),
            },
            other => other.clone(),
        }
    }
}

/// Analyze a program, returning every diagnostic found.
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    Analyzer::new().analyze(program)
}
