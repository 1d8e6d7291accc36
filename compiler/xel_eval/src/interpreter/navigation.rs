//! Navigation steps, references and calls.
//!
//! Steps evaluate against the active context. Arguments and index
//! expressions evaluate against the scope root instead, so `#this` inside
//! `list.?[name.startsWith(#this.prefix)]` still means the element.

use xel_ir::{ExprId, ExprKind, ExprRange, HostError, TypeRef, TypedValue, Value};

use super::Interpreter;
use crate::builtins;
use crate::context::EvaluationContext;
use crate::errors::{
    method_call_on_null, method_not_found, not_assignable, property_not_found,
    property_read_on_null, type_mismatch, EvalError, EvalErrorKind, EvalResult,
};

/// Lift a host hook's answer into the evaluator's error type.
fn host<T>(answer: Option<Result<T, HostError>>) -> Option<EvalResult<T>> {
    answer.map(|result| result.map_err(EvalError::from))
}

/// Resolve `target.name` on a non-null target: type statics, built-in
/// properties, host object properties, then the context's `read_property`
/// hook.
pub fn read_property(target: &Value, name: &str, ctx: &dyn EvaluationContext) -> EvalResult {
    if let Value::Type(ty) = target {
        if let Some(value) =
            builtins::read_static(ty, name).or_else(|| ctx.read_static(&ty.name, name))
        {
            return Ok(value);
        }
    }
    if let Some(value) = builtins::read_property(target, name) {
        return Ok(value);
    }
    if let Value::Object(obj) = target {
        if let Some(value) = obj.property(name) {
            return Ok(value);
        }
    }
    host(ctx.read_property(target, name)).unwrap_or_else(|| Err(property_not_found(name, target)))
}

impl Interpreter<'_> {
    /// Evaluate a start node and its steps, each step receiving the
    /// previous result as its active context. A null result followed by a
    /// null-safe step ends the chain with null.
    pub(super) fn eval_steps(&mut self, steps: &[ExprId]) -> EvalResult<TypedValue> {
        let Some((&first, rest)) = steps.split_first() else {
            return Ok(self.state.active_context().clone());
        };
        let mut current = self.eval(first)?;
        for &step in rest {
            if current.value.is_null() && self.is_null_safe(step) {
                return Ok(TypedValue::NULL);
            }
            let mut scoped = self.with_active_context(current);
            current = scoped.eval(step)?;
        }
        Ok(current)
    }

    fn is_null_safe(&self, step: ExprId) -> bool {
        match &self.ast.arena().get_expr(step).kind {
            ExprKind::PropertyOrField { null_safe, .. }
            | ExprKind::MethodCall { null_safe, .. }
            | ExprKind::Indexer { null_safe, .. }
            | ExprKind::Projection { null_safe, .. }
            | ExprKind::Selection { null_safe, .. } => *null_safe,
            _ => false,
        }
    }

    /// Evaluate call arguments with the scope root as active context.
    pub(super) fn eval_args(&mut self, args: ExprRange) -> EvalResult<Vec<Value>> {
        let ids = self.ast.arena().get_expr_list(args);
        let scope_root = self.state.scope_root().clone();
        let mut scoped = self.with_active_context(scope_root);
        ids.iter().map(|&id| scoped.eval_value(id)).collect()
    }

    pub(super) fn property_step(&mut self, name: &str, null_safe: bool) -> EvalResult<TypedValue> {
        let target = self.state.active_context().value.clone();
        if target.is_null() {
            return if null_safe {
                Ok(TypedValue::NULL)
            } else {
                Err(property_read_on_null(name))
            };
        }
        read_property(&target, name, self.state.context()).map(TypedValue::new)
    }

    pub(super) fn write_property(
        &mut self,
        target: &Value,
        name: &str,
        value: Value,
    ) -> EvalResult<()> {
        if let Value::Object(obj) = target {
            if obj.set_property(name, value.clone())? {
                return Ok(());
            }
        }
        host(self.state.context_mut().write_property(target, name, value))
            .unwrap_or_else(|| Err(not_assignable(name)))
    }

    pub(super) fn call_method(
        &mut self,
        name: &str,
        args: ExprRange,
        null_safe: bool,
    ) -> EvalResult<TypedValue> {
        let target = self.state.active_context().value.clone();
        if target.is_null() {
            return if null_safe {
                Ok(TypedValue::NULL)
            } else {
                Err(method_call_on_null(name))
            };
        }
        let args = self.eval_args(args)?;
        let ctx = self.state.context();
        let answer = match &target {
            Value::Type(ty) => builtins::invoke_static(ty, name, &args)
                .or_else(|| host(ctx.invoke_static(&ty.name, name, &args))),
            Value::Object(obj) => host(obj.invoke(name, &args)),
            _ => None,
        }
        .or_else(|| builtins::invoke_method(&target, name, &args, ctx))
        .or_else(|| host(ctx.invoke_method(&target, name, &args)));
        match answer {
            Some(result) => result.map(TypedValue::new),
            None => Err(method_not_found(name, args.len(), &target)),
        }
    }

    pub(super) fn index(&mut self, index: ExprId, null_safe: bool) -> EvalResult<TypedValue> {
        let target = self.state.active_context().clone();
        if target.value.is_null() {
            return if null_safe {
                Ok(TypedValue::NULL)
            } else {
                Err(EvalError::new(EvalErrorKind::IndexOnNull))
            };
        }
        let key = {
            let scope_root = self.state.scope_root().clone();
            let mut scoped = self.with_active_context(scope_root);
            scoped.eval_value(index)?
        };
        match &target.value {
            Value::List(items) => builtins::element_at(items, &key).map(TypedValue::new),
            Value::Array(array) => builtins::element_at(&array.items, &key).map(TypedValue::new),
            Value::Str(s) => builtins::char_at(s, &key).map(TypedValue::new),
            Value::Map(map) => builtins::map_get(map, &key).map(TypedValue::new),
            Value::Object(_) | Value::Type(_) => match key.as_str() {
                Some(name) => {
                    read_property(&target.value, name, self.state.context()).map(TypedValue::new)
                }
                None => Err(type_mismatch("a property name", &key)),
            },
            other => Err(EvalError::new(EvalErrorKind::NotIndexable {
                type_name: other.type_name(),
            })),
        }
    }

    /// `#name(args)`: a registered function, or a function stored in a variable.
    pub(super) fn call_function(&mut self, name: &str, args: ExprRange) -> EvalResult<TypedValue> {
        let args = self.eval_args(args)?;
        let ctx = self.state.context();
        let function = ctx.lookup_function(name).or_else(|| match ctx.lookup_variable(name) {
            Some(Value::Function(function)) => Some(function),
            _ => None,
        });
        let Some(function) = function else {
            return Err(EvalError::new(EvalErrorKind::FunctionNotFound {
                name: name.to_owned(),
            }));
        };
        Ok(TypedValue::new(function.call(&args)?))
    }

    pub(super) fn type_ref(&self, name: &str) -> EvalResult<TypeRef> {
        builtins::find_type(name)
            .or_else(|| self.state.context().find_type(name))
            .ok_or_else(|| {
                EvalError::new(EvalErrorKind::TypeNotFound {
                    name: name.to_owned(),
                })
            })
    }

    pub(super) fn construct(&mut self, type_name: &str, args: ExprRange) -> EvalResult<TypedValue> {
        let ty = self.type_ref(type_name)?;
        let args = self.eval_args(args)?;
        let answer = builtins::construct(&ty, &args)
            .or_else(|| host(self.state.context().construct(&ty.name, &args)));
        match answer {
            Some(result) => result.map(TypedValue::new),
            None => Err(EvalError::new(EvalErrorKind::ConstructorNotFound {
                type_name: ty.name.to_string(),
                arity: args.len(),
            })),
        }
    }

    pub(super) fn bean(&self, name: &str, factory: bool) -> EvalResult<TypedValue> {
        self.state
            .context()
            .lookup_bean(name, factory)
            .map(TypedValue::new)
            .ok_or_else(|| {
                let name = if factory {
                    format!("&{name}")
                } else {
                    name.to_owned()
                };
                EvalError::new(EvalErrorKind::BeanNotFound { name })
            })
    }
}
