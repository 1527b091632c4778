//! Runtime environments.
//!
//! Environments form a parent-linked chain created in strict stack order;
//! closures capture their defining environment, so nodes are reference
//! counted. No cycles are introducible: a closure can only capture
//! ancestors of the environment it was created in. Each environment has a
//! stable id used by the event trace.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

#[derive(Debug)]
struct EnvInner {
    vars: HashMap<String, Value>,
    parent: Option<Env>,
    id: usize,
}

/// A shared handle to one environment.
#[derive(Debug, Clone)]
pub struct Env(Rc<RefCell<EnvInner>>);

impl Env {
    pub fn new(id: usize, parent: Option<Env>) -> Self {
        Env(Rc::new(RefCell::new(EnvInner {
            vars: HashMap::new(),
            parent,
            id,
        })))
    }

    pub fn id(&self) -> usize {
        self.0.borrow().id
    }

    pub fn parent_id(&self) -> Option<usize> {
        self.0.borrow().parent.as_ref().map(|p| p.id())
    }

    /// Define a name in this environment, shadowing outer bindings.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().vars.insert(name.into(), value);
    }

    /// Read the nearest binding of `name`, returning the value together
    /// with the id of the environment holding it.
    pub fn get(&self, name: &str) -> Option<(Value, usize)> {
        let inner = self.0.borrow();
        if let Some(value) = inner.vars.get(name) {
            return Some((value.clone(), inner.id));
        }
        inner.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Update the nearest binding of `name`, returning the id of the
    /// environment that held it. Fails if the name is unbound everywhere.
    pub fn assign(&self, name: &str, value: Value) -> Option<usize> {
        let mut inner = self.0.borrow_mut();
        if let Some(slot) = inner.vars.get_mut(name) {
            *slot = value;
            return Some(inner.id);
        }
        let parent = inner.parent.clone();
        drop(inner);
        parent.and_then(|p| p.assign(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_shadow() {
        let global = Env::new(0, None);
        global.define("x", Value::Int(1));

        let child = Env::new(1, Some(global.clone()));
        assert!(matches!(child.get("x"), Some((Value::Int(1), 0))));

        child.define("x", Value::Int(2));
        assert!(matches!(child.get("x"), Some((Value::Int(2), 1))));
        assert!(matches!(global.get("x"), Some((Value::Int(1), 0))));
    }

    #[test]
    fn test_assign_updates_nearest_binding() {
        let global = Env::new(0, None);
        global.define("n", Value::Int(0));

        let child = Env::new(1, Some(global.clone()));
        assert_eq!(child.assign("n", Value::Int(5)), Some(0));
        assert!(matches!(global.get("n"), Some((Value::Int(5), 0))));

        assert_eq!(child.assign("missing", Value::Null), None);
    }

    #[test]
    fn test_parent_ids() {
        let global = Env::new(0, None);
        let child = Env::new(7, Some(global.clone()));
        assert_eq!(global.parent_id(), None);
        assert_eq!(child.parent_id(), Some(0));
        assert_eq!(child.id(), 7);
    }
}
