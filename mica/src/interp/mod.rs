//! Tree-walking interpreter.
//!
//! Executes a parsed program, sending output lines to a sink and memory
//! events to a trace callback, both in strict program order. Hosts run the
//! analyzer first and only execute clean programs; runtime errors are
//! still possible (out-of-bounds indexing, division by zero) and abort the
//! run.

mod builtins;
mod env;
mod error;
mod value;

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use mica_parser::ast::{
    Block, Callee, Expr, FunctionDef, ImplBlock, LiteralValue, Pattern, PatternBinding, Program,
    Stmt, VariantPayload,
};

use crate::events::MemoryEvent;

pub use env::Env;
pub use error::RuntimeError;
pub use value::{ClosureValue, EnumPayload, EnumValue, StructValue, Value};

/// A host-provided implementation of an `extern fn`.
pub type ExternHandler<'h> = Box<dyn FnMut(Vec<Value>) -> Value + 'h>;

/// Result of executing a statement: fall through, or unwind to the
/// enclosing function-call frame.
pub(crate) enum Flow {
    Normal,
    Return(Value),
}

type ExecResult = Result<Flow, RuntimeError>;
type EvalResult = Result<Value, RuntimeError>;

/// The interpreter. Owns the output and event sinks for one run.
pub struct Interpreter<'h> {
    functions: HashMap<String, Rc<FunctionDef>>,
    impls: Vec<Rc<ImplBlock>>,
    extern_decls: HashSet<String>,
    extern_hosts: HashMap<String, ExternHandler<'h>>,
    globals: Env,
    next_scope_id: usize,
    output: Box<dyn FnMut(String) + 'h>,
    events: Box<dyn FnMut(MemoryEvent) + 'h>,
}

impl<'h> std::fmt::Debug for Interpreter<'h> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("functions", &self.functions.keys())
            .field("next_scope_id", &self.next_scope_id)
            .finish_non_exhaustive()
    }
}

impl<'h> Interpreter<'h> {
    pub fn new(
        output: impl FnMut(String) + 'h,
        events: impl FnMut(MemoryEvent) + 'h,
    ) -> Self {
        Self {
            functions: HashMap::new(),
            impls: Vec::new(),
            extern_decls: HashSet::new(),
            extern_hosts: HashMap::new(),
            globals: Env::new(0, None),
            next_scope_id: 1,
            output: Box::new(output),
            events: Box::new(events),
        }
    }

    /// Provide a host implementation for an `extern fn` (or for `alert`).
    pub fn register_extern(&mut self, name: impl Into<String>, handler: ExternHandler<'h>) {
        self.extern_hosts.insert(name.into(), handler);
    }

    /// Execute a program: register definitions, run top-level statements
    /// in source order, then invoke `main` if it exists.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for item in &program.items {
            match item {
                Stmt::Function(f) => {
                    self.functions.insert(f.name.clone(), Rc::new(f.clone()));
                }
                Stmt::Impl(i) => {
                    self.impls.push(Rc::new(i.clone()));
                }
                Stmt::ExternFn(x) => {
                    self.extern_decls.insert(x.name.clone());
                }
                _ => {}
            }
        }

        let globals = self.globals.clone();
        self.emit(MemoryEvent::EnterScope {
            scope_id: globals.id(),
            parent_scope_id: None,
        });

        for item in &program.items {
            if item.is_definition() {
                continue;
            }
            if let Flow::Return(_) = self.exec_stmt(item, &globals)? {
                break;
            }
        }

        if self.functions.contains_key("main") {
            self.call_named("main", Vec::new(), &globals)?;
        }

        self.emit(MemoryEvent::ExitScope {
            scope_id: globals.id(),
        });
        Ok(())
    }

    // ==================== Plumbing ====================

    fn emit(&mut self, event: MemoryEvent) {
        (self.events)(event);
    }

    fn write_output(&mut self, line: String) {
        (self.output)(line);
    }

    /// Create a child environment and emit its ENTER_SCOPE event.
    fn enter_scope(&mut self, parent: &Env) -> Env {
        let id = self.next_scope_id;
        self.next_scope_id += 1;
        let env = Env::new(id, Some(parent.clone()));
        self.emit(MemoryEvent::EnterScope {
            scope_id: id,
            parent_scope_id: Some(parent.id()),
        });
        env
    }

    fn exit_scope(&mut self, env: &Env) {
        self.emit(MemoryEvent::ExitScope { scope_id: env.id() });
    }

    fn declare(&mut self, env: &Env, name: &str, value: Value) {
        env.define(name, value.clone());
        self.emit(MemoryEvent::Declare {
            scope_id: env.id(),
            name: name.to_string(),
            value: value.to_string(),
            moved: false,
        });
    }

    // ==================== Statements ====================

    fn exec_stmts(&mut self, stmts: &[Stmt], env: &Env) -> ExecResult {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute a block in a fresh child scope, always emitting the
    /// matching EXIT_SCOPE even when a `return` unwinds through it.
    fn exec_block_in(&mut self, block: &Block, parent: &Env) -> ExecResult {
        let env = self.enter_scope(parent);
        let result = self.exec_stmts(&block.stmts, &env);
        self.exit_scope(&env);
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Env) -> ExecResult {
        match stmt {
            // Definitions were registered before execution
            Stmt::Function(_)
            | Stmt::Struct(_)
            | Stmt::Enum(_)
            | Stmt::Trait(_)
            | Stmt::Impl(_)
            | Stmt::ExternFn(_) => Ok(Flow::Normal),

            Stmt::VarDecl(v) => {
                let value = match &v.init {
                    Some(init) => self.eval_consuming(init, env)?,
                    None => Value::Null,
                };
                self.declare(env, &v.name, value);
                Ok(Flow::Normal)
            }

            Stmt::Destructuring(d) => {
                let value = self.eval_consuming(&d.init, env)?;
                let Value::Tuple(items) = &value else {
                    return Err(RuntimeError::type_error(format!(
                        "cannot destructure value of type {}",
                        value.type_name()
                    )));
                };
                if items.len() != d.names.len() {
                    return Err(RuntimeError::type_error(format!(
                        "destructuring expects {} values, got {}",
                        d.names.len(),
                        items.len()
                    )));
                }
                let items = items.clone();
                for (name, item) in d.names.iter().zip(items.iter()) {
                    self.declare(env, name, item.clone());
                }
                Ok(Flow::Normal)
            }

            Stmt::Assignment(a) => {
                let value = self.eval_consuming(&a.value, env)?;
                match env.assign(&a.name, value.clone()) {
                    Some(scope_id) => {
                        self.emit(MemoryEvent::Update {
                            scope_id,
                            name: a.name.clone(),
                            value: value.to_string(),
                            moved: false,
                        });
                        Ok(Flow::Normal)
                    }
                    None => Err(RuntimeError::UndefinedVariable {
                        name: a.name.clone(),
                    }),
                }
            }

            Stmt::If(i) => {
                if self.eval_condition(&i.condition, env)? {
                    self.exec_block_in(&i.then_block, env)
                } else if let Some(else_block) = &i.else_block {
                    self.exec_block_in(else_block, env)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While(w) => {
                while self.eval_condition(&w.condition, env)? {
                    if let Flow::Return(value) = self.exec_block_in(&w.body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::For(f) => {
                let iterable = self.eval(&f.iterable, env)?;
                let items: Vec<Value> = match &iterable {
                    Value::Array(items) => items.as_ref().clone(),
                    Value::Str(s) => s
                        .chars()
                        .map(|c| Value::Str(c.to_string()))
                        .collect(),
                    other => {
                        return Err(RuntimeError::NotIterable {
                            type_name: other.type_name(),
                        })
                    }
                };

                // The loop item rebinds in a fresh scope each iteration
                for item in items {
                    let iter_env = self.enter_scope(env);
                    self.declare(&iter_env, &f.item, item);
                    let result = self.exec_stmts(&f.body.stmts, &iter_env);
                    self.exit_scope(&iter_env);
                    if let Flow::Return(value) = result? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Return(r) => {
                let value = match &r.value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }

            Stmt::Match(m) => {
                // The subject is consumed
                let subject = self.eval_consuming(&m.subject, env)?;
                for case in &m.cases {
                    let Some(bindings) = match_pattern(&case.pattern, &subject) else {
                        continue;
                    };
                    let arm_env = self.enter_scope(env);
                    for (name, value) in bindings {
                        self.declare(&arm_env, &name, value);
                    }
                    let result = self.exec_stmts(&case.body.stmts, &arm_env);
                    self.exit_scope(&arm_env);
                    return result;
                }
                Ok(Flow::Normal)
            }

            Stmt::Expr(e) => {
                self.eval(&e.expr, env)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn eval_condition(&mut self, condition: &Expr, env: &Env) -> Result<bool, RuntimeError> {
        match self.eval(condition, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::type_error(format!(
                "condition must be bool, got {}",
                other.type_name()
            ))),
        }
    }

    // ==================== Expressions ====================

    /// Evaluate an expression in a consuming position. A non-primitive
    /// identifier read here emits a MOVE event; the analyzer guarantees
    /// such a read happens at most once per binding.
    fn eval_consuming(&mut self, expr: &Expr, env: &Env) -> EvalResult {
        if let Expr::Identifier { name, .. } = expr {
            if let Some((value, scope_id)) = env.get(name) {
                if !value.is_primitive() {
                    self.emit(MemoryEvent::Move {
                        scope_id,
                        name: name.clone(),
                        value: value.to_string(),
                        moved: true,
                    });
                }
                return Ok(value);
            }
        }
        self.eval(expr, env)
    }

    fn eval(&mut self, expr: &Expr, env: &Env) -> EvalResult {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                LiteralValue::Int(n) => Value::Int(*n),
                LiteralValue::Str(s) => Value::Str(s.clone()),
                LiteralValue::Bool(b) => Value::Bool(*b),
            }),

            Expr::Identifier { name, .. } => match env.get(name) {
                Some((value, _)) => Ok(value),
                None => {
                    // A bare function name evaluates to a reference
                    if self.functions.contains_key(name)
                        || self.extern_decls.contains(name)
                        || builtins::is_builtin(name)
                    {
                        Ok(Value::Function(name.clone()))
                    } else {
                        Err(RuntimeError::UndefinedVariable { name: name.clone() })
                    }
                }
            },

            Expr::Binary { op, lhs, rhs, .. } => {
                let left = self.eval(lhs, env)?;
                let right = self.eval(rhs, env)?;
                apply_binary(*op, left, right)
            }

            Expr::Call { callee, args, .. } => self.eval_call(callee, args, env),

            Expr::Member { object, field, .. } => {
                let object = self.eval(object, env)?;
                match &object {
                    Value::Struct(s) => s.field(field).cloned().ok_or_else(|| {
                        RuntimeError::UnknownField {
                            field: field.clone(),
                            type_name: s.type_name.clone(),
                        }
                    }),
                    other => Err(RuntimeError::type_error(format!(
                        "cannot access field '{}' on value of type {}",
                        field,
                        other.type_name()
                    ))),
                }
            }

            Expr::Index { object, index, .. } => {
                let object = self.eval(object, env)?;
                let index = match self.eval(index, env)? {
                    Value::Int(i) => i,
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "index must be int, got {}",
                            other.type_name()
                        )))
                    }
                };

                match &object {
                    Value::Array(items) => {
                        let slot = usize::try_from(index)
                            .ok()
                            .and_then(|i| items.get(i))
                            .cloned();
                        slot.ok_or(RuntimeError::IndexOutOfBounds {
                            index,
                            length: items.len(),
                        })
                    }
                    Value::Str(s) => {
                        let ch = usize::try_from(index)
                            .ok()
                            .and_then(|i| s.chars().nth(i));
                        match ch {
                            Some(c) => Ok(Value::Str(c.to_string())),
                            None => Err(RuntimeError::IndexOutOfBounds {
                                index,
                                length: s.chars().count(),
                            }),
                        }
                    }
                    other => Err(RuntimeError::NotIndexable {
                        type_name: other.type_name(),
                    }),
                }
            }

            Expr::Array { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval(element, env)?);
                }
                Ok(Value::Array(Rc::new(items)))
            }

            Expr::Tuple { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval(element, env)?);
                }
                Ok(Value::Tuple(Rc::new(items)))
            }

            Expr::StructInit { name, fields, .. } => {
                let mut values = Vec::with_capacity(fields.len());
                for init in fields {
                    let value = self.eval_consuming(&init.value, env)?;
                    values.push((init.name.clone(), value));
                }
                // Generic arguments are erased: the instance carries only
                // the base type name.
                Ok(Value::Struct(Rc::new(StructValue {
                    type_name: name.clone(),
                    fields: values,
                })))
            }

            Expr::EnumVariant {
                enum_name,
                variant,
                payload,
                ..
            } => {
                let payload = match payload {
                    VariantPayload::None => EnumPayload::Unit,
                    VariantPayload::Tuple(exprs) => {
                        let mut values = Vec::with_capacity(exprs.len());
                        for expr in exprs {
                            values.push(self.eval_consuming(expr, env)?);
                        }
                        match values.len() {
                            0 => EnumPayload::Unit,
                            1 => EnumPayload::Value(values.remove(0)),
                            _ => EnumPayload::Value(Value::Tuple(Rc::new(values))),
                        }
                    }
                    VariantPayload::Struct(inits) => {
                        let mut values = Vec::with_capacity(inits.len());
                        for init in inits {
                            let value = self.eval_consuming(&init.value, env)?;
                            values.push((init.name.clone(), value));
                        }
                        EnumPayload::Fields(values)
                    }
                };
                Ok(Value::Enum(Rc::new(EnumValue {
                    enum_type: enum_name.clone(),
                    variant: variant.clone(),
                    payload,
                })))
            }

            // A borrow observes the value without consuming it
            Expr::Borrow { inner, .. } => self.eval(inner, env),

            Expr::Lambda { params, body, .. } => Ok(Value::Closure(Rc::new(ClosureValue {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            }))),
        }
    }

    // ==================== Calls ====================

    fn eval_call(&mut self, callee: &Callee, args: &[Expr], env: &Env) -> EvalResult {
        match callee {
            Callee::Function { name } => {
                // A local binding holding a callable shadows functions
                if let Some((value, _)) = env.get(name) {
                    return match value {
                        Value::Closure(closure) => {
                            let argv = self.eval_args(args, env)?;
                            self.call_closure(&closure, argv)
                        }
                        Value::Function(target) => {
                            let argv = self.eval_args(args, env)?;
                            self.call_named(&target, argv, env)
                        }
                        other => Err(RuntimeError::type_error(format!(
                            "value of type {} is not callable",
                            other.type_name()
                        ))),
                    };
                }

                // print/alert observe their arguments; everything else
                // consumes them
                if builtins::is_builtin(name) && !self.functions.contains_key(name) {
                    return self.call_builtin(name, args, env);
                }

                let argv = self.eval_args(args, env)?;
                self.call_named(name, argv, env)
            }

            Callee::Method { receiver, method } => {
                let receiver = self.eval(receiver, env)?;
                let Value::Struct(instance) = &receiver else {
                    return Err(RuntimeError::MethodNotFound {
                        method: method.clone(),
                        type_name: receiver.type_name(),
                    });
                };

                // Instances carry only the base type name, so dispatch
                // matches the base name of each impl target. First match
                // wins.
                let tag = instance.type_name.clone();
                let def = self
                    .impls
                    .iter()
                    .filter(|i| i.target.base_name() == Some(tag.as_str()))
                    .find_map(|i| i.methods.iter().find(|m| m.name == *method))
                    .cloned();

                let Some(def) = def else {
                    return Err(RuntimeError::MethodNotFound {
                        method: method.clone(),
                        type_name: tag,
                    });
                };

                let argv = self.eval_args(args, env)?;
                self.call_function(&Rc::new(def), argv, Some(receiver.clone()), env)
            }
        }
    }

    /// Evaluate call arguments; each is a consuming position.
    fn eval_args(&mut self, args: &[Expr], env: &Env) -> Result<Vec<Value>, RuntimeError> {
        let mut argv = Vec::with_capacity(args.len());
        for arg in args {
            argv.push(self.eval_consuming(arg, env)?);
        }
        Ok(argv)
    }

    /// Call a function, extern, or builtin by name with evaluated
    /// arguments. `caller` is the environment current at the call site.
    fn call_named(&mut self, name: &str, argv: Vec<Value>, caller: &Env) -> EvalResult {
        if let Some(def) = self.functions.get(name).cloned() {
            return self.call_function(&def, argv, None, caller);
        }
        if self.extern_decls.contains(name) {
            return Ok(self.call_extern(name, argv));
        }
        if builtins::is_builtin(name) {
            return self.call_builtin_values(name, argv);
        }
        Err(RuntimeError::UnknownFunction {
            name: name.to_string(),
        })
    }

    /// Invoke a host extern. Externs without a host binding return null.
    fn call_extern(&mut self, name: &str, argv: Vec<Value>) -> Value {
        match self.extern_hosts.get_mut(name) {
            Some(handler) => handler(argv),
            None => Value::Null,
        }
    }

    fn has_extern_host(&self, name: &str) -> bool {
        self.extern_hosts.contains_key(name)
    }

    /// Call a user function. The body environment's parent is the
    /// caller's current environment (only lambdas use a captured parent);
    /// `this` is bound for methods.
    fn call_function(
        &mut self,
        def: &Rc<FunctionDef>,
        argv: Vec<Value>,
        this: Option<Value>,
        caller: &Env,
    ) -> EvalResult {
        if def.params.len() != argv.len() {
            return Err(RuntimeError::ArityMismatch {
                name: def.name.clone(),
                expected: def.params.len(),
                got: argv.len(),
            });
        }

        let env = self.enter_scope(caller);
        if let Some(receiver) = this {
            self.declare(&env, "this", receiver);
        }
        for (param, value) in def.params.iter().zip(argv) {
            self.declare(&env, &param.name, value);
        }

        let result = self.exec_stmts(&def.body.stmts, &env);
        self.exit_scope(&env);

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    /// Call a closure. The body environment's parent is the environment
    /// captured when the lambda was evaluated.
    fn call_closure(&mut self, closure: &Rc<ClosureValue>, argv: Vec<Value>) -> EvalResult {
        if closure.params.len() != argv.len() {
            return Err(RuntimeError::ArityMismatch {
                name: "<lambda>".to_string(),
                expected: closure.params.len(),
                got: argv.len(),
            });
        }

        let captured = closure.env.clone();
        let env = self.enter_scope(&captured);
        for (param, value) in closure.params.iter().zip(argv) {
            self.declare(&env, param, value);
        }

        let result = self.exec_stmts(&closure.body.stmts, &env);
        self.exit_scope(&env);

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }
}

// ==================== Operators & patterns ====================

fn apply_binary(
    op: mica_parser::ast::BinaryOp,
    left: Value,
    right: Value,
) -> EvalResult {
    use mica_parser::ast::BinaryOp;

    match op {
        BinaryOp::Eq => Ok(Value::Bool(left.eq_value(&right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.eq_value(&right))),

        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            let ordering = match (&left, &right) {
                (Value::Int(a), Value::Int(b)) => a.cmp(b),
                (Value::Str(a), Value::Str(b)) => a.cmp(b),
                _ => {
                    return Err(RuntimeError::type_error(format!(
                        "cannot compare {} with {}",
                        left.type_name(),
                        right.type_name()
                    )))
                }
            };
            let result = match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::LtEq => ordering.is_le(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }

        BinaryOp::Add => match (&left, &right) {
            // Integer arithmetic wraps (two's complement)
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            // `+` concatenates as soon as either side is a string
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Ok(Value::Str(format!("{}{}", left, right)))
            }
            _ => Err(RuntimeError::type_error(format!(
                "cannot add {} and {}",
                left.type_name(),
                right.type_name()
            ))),
        },

        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => match op {
                BinaryOp::Sub => Ok(Value::Int(a.wrapping_sub(*b))),
                BinaryOp::Mul => Ok(Value::Int(a.wrapping_mul(*b))),
                _ => {
                    if *b == 0 {
                        Err(RuntimeError::DivisionByZero)
                    } else {
                        Ok(Value::Int(a.wrapping_div(*b)))
                    }
                }
            },
            _ => Err(RuntimeError::type_error(format!(
                "cannot apply '{}' to {} and {}",
                op.symbol(),
                left.type_name(),
                right.type_name()
            ))),
        },
    }
}

/// Try a pattern against a value, returning the bindings it introduces.
fn match_pattern(pattern: &Pattern, value: &Value) -> Option<Vec<(String, Value)>> {
    match pattern {
        Pattern::Wildcard { .. } => Some(Vec::new()),

        Pattern::Binding { name, .. } => Some(vec![(name.clone(), value.clone())]),

        Pattern::Literal { value: literal, .. } => {
            let matches = match (literal, value) {
                (LiteralValue::Int(a), Value::Int(b)) => a == b,
                (LiteralValue::Str(a), Value::Str(b)) => a == b,
                (LiteralValue::Bool(a), Value::Bool(b)) => a == b,
                _ => false,
            };
            matches.then(Vec::new)
        }

        Pattern::Enum {
            enum_name,
            variant,
            binding,
            ..
        } => {
            let Value::Enum(instance) = value else {
                return None;
            };
            if let Some(expected) = enum_name {
                if instance.enum_type != *expected {
                    return None;
                }
            }
            if instance.variant != *variant {
                return None;
            }

            match binding {
                PatternBinding::None => Some(Vec::new()),
                PatternBinding::Inner(name) => {
                    let inner = match &instance.payload {
                        EnumPayload::Value(v) => v.clone(),
                        _ => Value::Null,
                    };
                    Some(vec![(name.clone(), inner)])
                }
                PatternBinding::Fields(names) => {
                    let EnumPayload::Fields(fields) = &instance.payload else {
                        return None;
                    };
                    let bindings = names
                        .iter()
                        .map(|name| {
                            let value = fields
                                .iter()
                                .find(|(f, _)| f == name)
                                .map(|(_, v)| v.clone())
                                .unwrap_or(Value::Null);
                            (name.clone(), value)
                        })
                        .collect();
                    Some(bindings)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_parser::ast::BinaryOp;

    #[test]
    fn test_wrapping_arithmetic() {
        let result = apply_binary(BinaryOp::Add, Value::Int(i64::MAX), Value::Int(1));
        assert!(matches!(result, Ok(Value::Int(i64::MIN))));

        let result = apply_binary(BinaryOp::Mul, Value::Int(i64::MAX), Value::Int(2));
        assert!(matches!(result, Ok(Value::Int(-2))));
    }

    #[test]
    fn test_division_by_zero() {
        let result = apply_binary(BinaryOp::Div, Value::Int(1), Value::Int(0));
        assert!(matches!(result, Err(RuntimeError::DivisionByZero)));
    }

    #[test]
    fn test_string_concatenation() {
        let result = apply_binary(
            BinaryOp::Add,
            Value::Str("Total: ".into()),
            Value::Int(10),
        );
        match result {
            Ok(Value::Str(s)) => assert_eq!(s, "Total: 10"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_literal_and_wildcard() {
        assert!(match_pattern(
            &Pattern::Literal {
                value: LiteralValue::Int(1),
                span: Default::default(),
            },
            &Value::Int(1)
        )
        .is_some());
        assert!(match_pattern(
            &Pattern::Literal {
                value: LiteralValue::Int(1),
                span: Default::default(),
            },
            &Value::Int(2)
        )
        .is_none());
        assert!(match_pattern(
            &Pattern::Wildcard {
                span: Default::default()
            },
            &Value::Null
        )
        .is_some());
    }
}
