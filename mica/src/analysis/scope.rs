//! Lexical scopes for the analyzer.
//!
//! A binding records its declared type, whether it may be reassigned, and
//! whether it has been moved. Scopes nest; a name shadows outer bindings
//! only within its own scope. Moves are marked in place on the binding, so
//! a consumed name stays poisoned for the rest of its lexical lifetime.

use std::collections::HashMap;

use mica_parser::types::Type;

/// What the analyzer knows about one name.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub ty: Type,
    pub mutable: bool,
    pub moved: bool,
}

impl Binding {
    pub fn new(ty: Type, mutable: bool) -> Self {
        Self {
            ty,
            mutable,
            moved: false,
        }
    }

    /// Immutable binding shorthand (parameters, pattern bindings).
    pub fn immutable(ty: Type) -> Self {
        Self::new(ty, false)
    }
}

/// A stack of nested scopes. The bottom scope is the global one.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Number of scopes currently on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Define a name in the innermost scope, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
    }

    /// Resolve a name to its nearest enclosing binding.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|s| s.get(name))
    }

    /// Resolve a name for update (assignment, move marking).
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.scopes.iter_mut().rev().find_map(|s| s.get_mut(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowing_and_nesting() {
        let mut scopes = ScopeStack::new();
        scopes.define("x", Binding::new(Type::Int, false));

        scopes.push();
        assert_eq!(scopes.lookup("x").map(|b| &b.ty), Some(&Type::Int));

        scopes.define("x", Binding::new(Type::Str, true));
        assert_eq!(scopes.lookup("x").map(|b| &b.ty), Some(&Type::Str));

        scopes.pop();
        assert_eq!(scopes.lookup("x").map(|b| &b.ty), Some(&Type::Int));
    }

    #[test]
    fn test_move_marking_persists() {
        let mut scopes = ScopeStack::new();
        scopes.define("a", Binding::new(Type::named("U"), false));

        scopes.push();
        if let Some(b) = scopes.lookup_mut("a") {
            b.moved = true;
        }
        scopes.pop();

        assert!(scopes.lookup("a").is_some_and(|b| b.moved));
    }
}
