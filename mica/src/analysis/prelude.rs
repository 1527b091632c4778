//! Standard-library signatures injected during the definition pass.
//!
//! Builtins are ordinary function signatures as far as the type checker is
//! concerned; the interpreter handles them by name.

use mica_parser::types::Type;
use once_cell::sync::Lazy;

/// Signature of a callable: parameter types and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct FnSig {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl FnSig {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        Self { params, ret }
    }
}

/// The builtin function table shared by every analyzer instance.
pub static PRELUDE: Lazy<Vec<(&'static str, FnSig)>> = Lazy::new(|| {
    vec![
        ("print", FnSig::new(vec![Type::Any], Type::Unit)),
        ("len", FnSig::new(vec![Type::Any], Type::Int)),
        (
            "range",
            FnSig::new(vec![Type::Int], Type::Array(Box::new(Type::Int))),
        ),
        ("to_string", FnSig::new(vec![Type::Any], Type::Str)),
        ("to_int", FnSig::new(vec![Type::Any], Type::Int)),
        ("alert", FnSig::new(vec![Type::Any], Type::Unit)),
    ]
});

/// Builtin calls whose arguments are observed, not consumed. Everything
/// else treats non-primitive identifier arguments as moves.
pub fn is_non_consuming_builtin(name: &str) -> bool {
    matches!(name, "print" | "alert")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_names() {
        let names: Vec<&str> = PRELUDE.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["print", "len", "range", "to_string", "to_int", "alert"]
        );
    }

    #[test]
    fn test_range_signature() {
        let (_, sig) = &PRELUDE[2];
        assert_eq!(sig.ret, Type::Array(Box::new(Type::Int)));
    }
}
