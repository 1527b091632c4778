//! Abstract syntax tree.
//!
//! The parser produces a [`Program`]; the analyzer and interpreter walk it
//! by matching on [`Stmt`] / [`Expr`] tags. Every node carries its span.

use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::types::Type;

/// A parsed program: an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Stmt>,
}

/// A sequence of statements sharing one lexical scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// Statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Function(FunctionDef),
    Struct(StructDef),
    Enum(EnumDef),
    Trait(TraitDef),
    Impl(ImplBlock),
    ExternFn(ExternFnDef),
    VarDecl(VarDecl),
    Destructuring(DestructuringAssign),
    Assignment(Assignment),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Match(MatchStmt),
    Expr(ExprStmt),
}

impl Stmt {
    /// True for statements registered in the definition pass rather than
    /// executed in program order.
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            Stmt::Function(_)
                | Stmt::Struct(_)
                | Stmt::Enum(_)
                | Stmt::Trait(_)
                | Stmt::Impl(_)
                | Stmt::ExternFn(_)
        )
    }

    pub fn span(&self) -> Span {
        match self {
            Stmt::Function(s) => s.span,
            Stmt::Struct(s) => s.span,
            Stmt::Enum(s) => s.span,
            Stmt::Trait(s) => s.span,
            Stmt::Impl(s) => s.span,
            Stmt::ExternFn(s) => s.span,
            Stmt::VarDecl(s) => s.span,
            Stmt::Destructuring(s) => s.span,
            Stmt::Assignment(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Match(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }
}

/// `fn name(p: T, ...) -> T: <block>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    /// Omitted annotation means the function returns no value.
    pub return_type: Option<Type>,
    pub body: Block,
    pub span: Span,
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// `struct Name<T>: <fields>`. At most one generic parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub type_param: Option<String>,
    pub fields: Vec<FieldDef>,
    pub span: Span,
}

/// A named, typed field of a struct or struct-like enum variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// `enum Name: <variants>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub variants: Vec<VariantDef>,
    pub span: Span,
}

/// Shape of an enum variant (or of a variant construction expression).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantKind {
    Unit,
    Tuple,
    Struct,
}

/// One alternative of an enum. Tuple variants store positional fields
/// named by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    pub kind: VariantKind,
    pub fields: Vec<FieldDef>,
    pub span: Span,
}

/// `trait Name: <method-sigs>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDef {
    pub name: String,
    pub methods: Vec<TraitMethodSig>,
    pub span: Span,
}

/// A method signature inside a trait definition: `fn name() -> T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitMethodSig {
    pub name: String,
    pub return_type: Option<Type>,
    pub span: Span,
}

/// `impl Trait for Type: <methods>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplBlock {
    pub trait_name: String,
    pub target: Type,
    pub methods: Vec<FunctionDef>,
    pub span: Span,
}

/// `extern fn name(p: T, ...)`. No body, no return annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternFnDef {
    pub name: String,
    pub params: Vec<Param>,
    pub span: Span,
}

/// `let [mut] name[: T] [= expr]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: Option<Type>,
    pub mutable: bool,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `let [mut] (a, b, ...) = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructuringAssign {
    pub names: Vec<String>,
    pub mutable: bool,
    pub init: Expr,
    pub span: Span,
}

/// `name = expr`, updating an existing binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `if expr: <block> [else: <block>]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub span: Span,
}

/// `while expr: <block>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// `for item in expr: <block>`. The item rebinds fresh each iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub item: String,
    pub iterable: Expr,
    pub body: Block,
    pub span: Span,
}

/// `return [expr]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

/// `match expr: <arms>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStmt {
    pub subject: Expr,
    pub cases: Vec<MatchCase>,
    pub span: Span,
}

/// `pattern => body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub body: Block,
    pub span: Span,
}

/// An expression in statement position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// Literal payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

/// Binary operators, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// What a call applies to: a free function by name, or a method on a
/// receiver expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Callee {
    Function { name: String },
    Method { receiver: Box<Expr>, method: String },
}

/// A named field initializer inside `Name { field: value, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// Payload of an enum-variant construction expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariantPayload {
    /// Unit variant, no payload.
    None,
    /// Tuple-like: positional expressions.
    Tuple(Vec<Expr>),
    /// Struct-like: named field initializers.
    Struct(Vec<FieldInit>),
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal {
        value: LiteralValue,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Call {
        callee: Callee,
        args: Vec<Expr>,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        field: String,
        span: Span,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    Array {
        elements: Vec<Expr>,
        span: Span,
    },
    Tuple {
        elements: Vec<Expr>,
        span: Span,
    },
    StructInit {
        name: String,
        fields: Vec<FieldInit>,
        span: Span,
    },
    /// `Name::Variant ...`, or the `Some/None/Ok/Err` sugar (which lowers
    /// here with `enum_name` of `Option` or `Result`).
    EnumVariant {
        enum_name: String,
        variant: String,
        kind: VariantKind,
        payload: VariantPayload,
        span: Span,
    },
    /// `&expr` / `&mut expr`: a non-consuming read.
    Borrow {
        mutable: bool,
        inner: Box<Expr>,
        span: Span,
    },
    /// `|p, ...|: <block>` or `|p, ...| expr`. The single-expression form
    /// is lowered to a block whose only statement is `return expr`.
    Lambda {
        params: Vec<String>,
        body: Block,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Identifier { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. }
            | Expr::Array { span, .. }
            | Expr::Tuple { span, .. }
            | Expr::StructInit { span, .. }
            | Expr::EnumVariant { span, .. }
            | Expr::Borrow { span, .. }
            | Expr::Lambda { span, .. } => *span,
        }
    }
}

/// What an enum pattern binds in its arm scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternBinding {
    /// Nothing bound (unit variant pattern).
    None,
    /// `Some(x)` / `Ok(x)` / `Err(e)`: a single inner binding.
    Inner(String),
    /// `Name::Variant { f, g }`: destructured field names.
    Fields(Vec<String>),
}

/// A match-arm pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// `_`
    Wildcard { span: Span },
    /// `Name::Variant { ... }` or an `Option`/`Result` sugar form.
    Enum {
        /// `None` for the built-in `Some`/`None`/`Ok`/`Err` sugar, whose
        /// family is resolved against the subject type.
        enum_name: Option<String>,
        variant: String,
        binding: PatternBinding,
        span: Span,
    },
    /// A bare identifier: matches anything, binds the subject.
    Binding { name: String, span: Span },
    /// A literal: matches by equality.
    Literal { value: LiteralValue, span: Span },
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Wildcard { span }
            | Pattern::Enum { span, .. }
            | Pattern::Binding { span, .. }
            | Pattern::Literal { span, .. } => *span,
        }
    }
}
