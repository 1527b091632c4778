//! Runtime values.
//!
//! Values are copied by reference at the host level: aggregates sit behind
//! `Rc`, so cloning a `Value` is cheap and aliasing is unobservable in the
//! language (there is no field assignment). The analyzer's move discipline
//! provides the only linearity guarantee.

use std::fmt;
use std::rc::Rc;

use mica_parser::ast::Block;

use super::env::Env;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Array(Rc<Vec<Value>>),
    Tuple(Rc<Vec<Value>>),
    Struct(Rc<StructValue>),
    Enum(Rc<EnumValue>),
    Closure(Rc<ClosureValue>),
    /// A reference to a named top-level function.
    Function(String),
    Null,
}

/// A struct instance. Carries only the base type name; generic arguments
/// are erased at runtime.
#[derive(Debug, Clone)]
pub struct StructValue {
    pub type_name: String,
    /// Field values in initializer order.
    pub fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(f, _)| f == name)
            .map(|(_, v)| v)
    }
}

/// An enum instance.
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub enum_type: String,
    pub variant: String,
    pub payload: EnumPayload,
}

/// Variant payload: nothing, a single value (tuple-like), or named fields.
#[derive(Debug, Clone)]
pub enum EnumPayload {
    Unit,
    Value(Value),
    Fields(Vec<(String, Value)>),
}

/// A lambda with its captured environment.
#[derive(Debug, Clone)]
pub struct ClosureValue {
    pub params: Vec<String>,
    pub body: Block,
    pub env: Env,
}

impl Value {
    /// Primitive values (int, bool, str, null) are copied, never moved.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Bool(_) | Value::Str(_) | Value::Null
        )
    }

    /// Short type name for error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
            Value::Struct(s) => s.type_name.clone(),
            Value::Enum(e) => e.enum_type.clone(),
            Value::Closure(_) => "closure".to_string(),
            Value::Function(_) => "function".to_string(),
            Value::Null => "null".to_string(),
        }
    }

    /// Structural equality, as used by `==` and literal patterns.
    pub fn eq_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_value(y))
            }
            (Value::Struct(a), Value::Struct(b)) => {
                a.type_name == b.type_name
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .all(|(name, value)| b.field(name).is_some_and(|v| value.eq_value(v)))
            }
            (Value::Enum(a), Value::Enum(b)) => {
                a.enum_type == b.enum_type
                    && a.variant == b.variant
                    && match (&a.payload, &b.payload) {
                        (EnumPayload::Unit, EnumPayload::Unit) => true,
                        (EnumPayload::Value(x), EnumPayload::Value(y)) => x.eq_value(y),
                        (EnumPayload::Fields(x), EnumPayload::Fields(y)) => {
                            x.len() == y.len()
                                && x.iter().zip(y.iter()).all(|((fa, va), (fb, vb))| {
                                    fa == fb && va.eq_value(vb)
                                })
                        }
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

/// Render a value nested inside a container: strings are quoted there.
fn render_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{}\"", s),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),

            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    render_nested(item, f)?;
                }
                write!(f, "]")
            }

            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    render_nested(item, f)?;
                }
                write!(f, ")")
            }

            Value::Struct(s) => {
                write!(f, "{} {{ ", s.type_name)?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", name)?;
                    render_nested(value, f)?;
                }
                write!(f, " }}")
            }

            Value::Enum(e) => {
                // The built-in families render without their enum name
                let builtin = e.enum_type == "Option" || e.enum_type == "Result";
                if builtin {
                    write!(f, "{}", e.variant)?;
                } else {
                    write!(f, "{}::{}", e.enum_type, e.variant)?;
                }
                match &e.payload {
                    EnumPayload::Unit => Ok(()),
                    EnumPayload::Value(v) => {
                        write!(f, "(")?;
                        render_nested(v, f)?;
                        write!(f, ")")
                    }
                    EnumPayload::Fields(fields) => {
                        write!(f, " {{ ")?;
                        for (i, (name, value)) in fields.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}: ", name)?;
                            render_nested(value, f)?;
                        }
                        write!(f, " }}")
                    }
                }
            }

            Value::Closure(_) => write!(f, "<lambda>"),
            Value::Function(name) => write!(f, "<fn {}>", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_primitives() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_render_containers() {
        let array = Value::Array(Rc::new(vec![
            Value::Int(1),
            Value::Str("a".into()),
        ]));
        assert_eq!(array.to_string(), "[1, \"a\"]");

        let s = Value::Struct(Rc::new(StructValue {
            type_name: "U".into(),
            fields: vec![("name".into(), Value::Str("x".into()))],
        }));
        assert_eq!(s.to_string(), "U { name: \"x\" }");
    }

    #[test]
    fn test_render_enums() {
        let some = Value::Enum(Rc::new(EnumValue {
            enum_type: "Option".into(),
            variant: "Some".into(),
            payload: EnumPayload::Value(Value::Int(5)),
        }));
        assert_eq!(some.to_string(), "Some(5)");

        let stopped = Value::Enum(Rc::new(EnumValue {
            enum_type: "State".into(),
            variant: "Stopped".into(),
            payload: EnumPayload::Fields(vec![("reason".into(), Value::Str("done".into()))]),
        }));
        assert_eq!(stopped.to_string(), "State::Stopped { reason: \"done\" }");
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::Array(Rc::new(vec![Value::Int(1), Value::Int(2)]));
        let b = Value::Array(Rc::new(vec![Value::Int(1), Value::Int(2)]));
        assert!(a.eq_value(&b));
        assert!(!a.eq_value(&Value::Int(1)));
    }

    #[test]
    fn test_primitive_classification() {
        assert!(Value::Int(1).is_primitive());
        assert!(Value::Str("s".into()).is_primitive());
        assert!(Value::Null.is_primitive());
        assert!(!Value::Array(Rc::new(vec![])).is_primitive());
        assert!(!Value::Tuple(Rc::new(vec![])).is_primitive());
    }
}
