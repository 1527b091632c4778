//! Builtin functions, dispatched by name.
//!
//! There is no first-class notion of builtins at the type level: the
//! analyzer sees ordinary signatures, and the interpreter recognizes the
//! names here. `print` and `alert` observe their argument; the rest
//! consume theirs like any user function would.

use std::rc::Rc;

use mica_parser::ast::Expr;

use super::env::Env;
use super::error::RuntimeError;
use super::value::Value;
use super::{EvalResult, Interpreter};

/// Names handled by the interpreter itself.
pub(crate) fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "print" | "len" | "range" | "to_string" | "to_int" | "alert"
    )
}

fn expect_arity(name: &str, expected: usize, got: usize) -> Result<(), RuntimeError> {
    if expected == got {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch {
            name: name.to_string(),
            expected,
            got,
        })
    }
}

impl<'h> Interpreter<'h> {
    /// Call a builtin with unevaluated arguments. `print`/`alert` evaluate
    /// non-consuming; the rest go through the normal argument path.
    pub(crate) fn call_builtin(
        &mut self,
        name: &str,
        args: &[Expr],
        env: &Env,
    ) -> EvalResult {
        match name {
            "print" | "alert" => {
                expect_arity(name, 1, args.len())?;
                let value = self.eval(&args[0], env)?;
                self.print_or_alert(name, value)
            }
            _ => {
                let argv = self.eval_args(args, env)?;
                self.call_builtin_values(name, argv)
            }
        }
    }

    /// Call a builtin with already-evaluated arguments (used when a
    /// builtin is invoked through a function reference).
    pub(crate) fn call_builtin_values(&mut self, name: &str, mut argv: Vec<Value>) -> EvalResult {
        expect_arity(name, 1, argv.len())?;
        let value = argv.remove(0);

        match name {
            "print" | "alert" => self.print_or_alert(name, value),

            "len" => match &value {
                Value::Array(items) => Ok(Value::Int(items.len() as i64)),
                Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
                other => Err(RuntimeError::type_error(format!(
                    "len() expects an array or string, got {}",
                    other.type_name()
                ))),
            },

            "range" => match &value {
                Value::Int(n) => {
                    let items: Vec<Value> = (0..*n).map(Value::Int).collect();
                    Ok(Value::Array(Rc::new(items)))
                }
                other => Err(RuntimeError::type_error(format!(
                    "range() expects an int, got {}",
                    other.type_name()
                ))),
            },

            "to_string" => Ok(Value::Str(value.to_string())),

            "to_int" => match &value {
                Value::Int(n) => Ok(Value::Int(*n)),
                Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                    RuntimeError::type_error(format!("to_int() cannot parse '{}'", s))
                }),
                other => Err(RuntimeError::type_error(format!(
                    "to_int() expects an int or string, got {}",
                    other.type_name()
                ))),
            },

            _ => Err(RuntimeError::UnknownFunction {
                name: name.to_string(),
            }),
        }
    }

    /// `print` writes to the output sink. `alert` forwards to a host
    /// extern when one is registered, otherwise falls back to the sink
    /// with an `[ALERT]` prefix.
    fn print_or_alert(&mut self, name: &str, value: Value) -> EvalResult {
        if name == "alert" {
            if self.has_extern_host("alert") {
                return Ok(self.call_extern("alert", vec![value]));
            }
            self.write_output(format!("[ALERT] {}", value));
            return Ok(Value::Null);
        }
        self.write_output(value.to_string());
        Ok(Value::Null)
    }
}
