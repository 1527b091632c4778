//! Runtime errors.
//!
//! All runtime errors are fatal: the interpreter aborts the run and the
//! host surfaces the error alongside any output already produced.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("value of type {type_name} is not indexable")]
    NotIndexable { type_name: String },

    #[error("index {index} out of bounds (length {length})")]
    IndexOutOfBounds { index: i64, length: usize },

    #[error("value of type {type_name} is not iterable")]
    NotIterable { type_name: String },

    #[error("no method '{method}' for value of type {type_name}")]
    MethodNotFound { method: String, type_name: String },

    #[error("'{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown field '{field}' on {type_name}")]
    UnknownField { field: String, type_name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("type error: {message}")]
    TypeError { message: String },
}

impl RuntimeError {
    pub fn type_error(message: impl Into<String>) -> Self {
        RuntimeError::TypeError {
            message: message.into(),
        }
    }
}
