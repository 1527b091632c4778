//! Type references.
//!
//! Annotations and generic arguments parse into a structured [`Type`] term.
//! `Display` renders the canonical string form (`int`, `[T]`, `(T1, T2)`,
//! `Name<T>`); structural equality on the term is equivalent to comparing
//! canonical strings bytewise. The `any` sentinel matches every type and is
//! how the standard library stays polymorphic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Int,
    Str,
    Bool,
    /// The empty tuple, used as the type of value-less functions.
    Unit,
    /// Sentinel that matches any type.
    Any,
    /// `[T]`
    Array(Box<Type>),
    /// `(T1, T2, ...)`
    Tuple(Vec<Type>),
    /// `Name` or `Name<T1, T2>`
    Named { name: String, args: Vec<Type> },
}

impl Type {
    /// A named type without generic arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// True for `int`, `str`, and `bool`. Primitive values are copied
    /// rather than moved.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Int | Type::Str | Type::Bool)
    }

    /// Type equality with the `any` sentinel matching everything.
    pub fn matches(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Any, _) | (_, Type::Any) => true,
            (Type::Array(a), Type::Array(b)) => a.matches(b),
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.matches(y))
            }
            (
                Type::Named { name: a, args: x },
                Type::Named { name: b, args: y },
            ) => a == b && x.len() == y.len() && x.iter().zip(y).all(|(s, t)| s.matches(t)),
            _ => self == other,
        }
    }

    /// Base name of a named type, e.g. `"Box"` for `Box<str>`.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Type::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Generic arguments of a named type.
    pub fn type_args(&self) -> &[Type] {
        match self {
            Type::Named { args, .. } => args,
            _ => &[],
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Str => write!(f, "str"),
            Type::Bool => write!(f, "bool"),
            Type::Unit => write!(f, "()"),
            Type::Any => write!(f, "any"),
            Type::Array(inner) => write!(f, "[{}]", inner),
            Type::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Type::Named { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}
