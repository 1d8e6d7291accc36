//! The host-facing evaluation context.
//!
//! An [`EvaluationContext`] supplies everything an expression can reach
//! outside itself: the root object, variables, functions, types, beans and
//! the comparison and overloading hooks. [`StandardEvaluationContext`] is a
//! registry-backed implementation good enough for most embedders.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use xel_ir::{Function, HostError, TypeDesc, TypeRef, TypedValue, Value};

use crate::comparator::{
    OperatorOverloader, StandardOperatorOverloader, StandardTypeComparator, TypeComparator,
};

/// Host collaborator consulted during evaluation.
///
/// Only the lookups every embedder needs are required; the rest default to
/// "not handled" (`None`), which the evaluator reports as the matching
/// not-found error.
pub trait EvaluationContext {
    /// Default receiver for navigation and the value of `#root`.
    fn root_object(&self) -> TypedValue;

    fn lookup_variable(&self, name: &str) -> Option<Value>;

    fn set_variable(&mut self, name: &str, value: Value);

    fn lookup_function(&self, name: &str) -> Option<Function>;

    fn type_comparator(&self) -> &dyn TypeComparator;

    fn operator_overloader(&self) -> &dyn OperatorOverloader;

    /// Resolve a host type for `T(name)` after the built-in types.
    fn find_type(&self, _name: &str) -> Option<TypeRef> {
        None
    }

    /// `new name(args)` for host types.
    fn construct(&self, _type_name: &str, _args: &[Value]) -> Option<Result<Value, HostError>> {
        None
    }

    /// `T(type).method(args)` for host types.
    fn invoke_static(
        &self,
        _type_name: &str,
        _method: &str,
        _args: &[Value],
    ) -> Option<Result<Value, HostError>> {
        None
    }

    /// `T(type).name` for host types.
    fn read_static(&self, _type_name: &str, _name: &str) -> Option<Value> {
        None
    }

    /// `@name`, or `&name` when `factory`.
    fn lookup_bean(&self, _name: &str, _factory: bool) -> Option<Value> {
        None
    }

    /// Property read fallback when neither the value nor the built-ins know `name`.
    fn read_property(&self, _target: &Value, _name: &str) -> Option<Result<Value, HostError>> {
        None
    }

    /// Property write fallback for `target.name = value`.
    fn write_property(
        &mut self,
        _target: &Value,
        _name: &str,
        _value: Value,
    ) -> Option<Result<(), HostError>> {
        None
    }

    /// Method call fallback when neither the value nor the built-ins know `name`.
    fn invoke_method(
        &self,
        _target: &Value,
        _name: &str,
        _args: &[Value],
    ) -> Option<Result<Value, HostError>> {
        None
    }
}

/// A host type registered with [`StandardEvaluationContext::register_type`].
#[derive(Clone, Debug)]
pub struct HostType {
    name: Arc<str>,
    constructor: Option<Function>,
    static_methods: FxHashMap<Arc<str>, Function>,
    static_properties: FxHashMap<Arc<str>, Value>,
}

impl HostType {
    /// `name` is what `T(...)` and `new` resolve, and what instances report
    /// as [`xel_ir::HostObject::type_name`].
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        HostType {
            name: name.into(),
            constructor: None,
            static_methods: FxHashMap::default(),
            static_properties: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: Function) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[must_use]
    pub fn with_static_method(mut self, method: Function) -> Self {
        self.static_methods.insert(Arc::from(method.name()), method);
        self
    }

    #[must_use]
    pub fn with_static_property(mut self, name: impl Into<Arc<str>>, value: Value) -> Self {
        self.static_properties.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(Arc::clone(&self.name), TypeDesc::Named(Arc::clone(&self.name)))
    }
}

/// Registry-backed [`EvaluationContext`].
///
/// ```text
/// let mut ctx = StandardEvaluationContext::new().with_root(person);
/// ctx.set_variable("limit", 10);
/// ctx.register_function(Function::new("max", max_impl));
/// ```
pub struct StandardEvaluationContext {
    root: TypedValue,
    variables: FxHashMap<Arc<str>, Value>,
    functions: FxHashMap<Arc<str>, Function>,
    types: FxHashMap<Arc<str>, HostType>,
    beans: FxHashMap<Arc<str>, Value>,
    factory_beans: FxHashMap<Arc<str>, Value>,
    comparator: Box<dyn TypeComparator>,
    overloader: Box<dyn OperatorOverloader>,
}

impl Default for StandardEvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardEvaluationContext {
    pub fn new() -> Self {
        StandardEvaluationContext {
            root: TypedValue::NULL,
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            types: FxHashMap::default(),
            beans: FxHashMap::default(),
            factory_beans: FxHashMap::default(),
            comparator: Box::new(StandardTypeComparator),
            overloader: Box::new(StandardOperatorOverloader),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<Value>) -> Self {
        self.root = TypedValue::new(root.into());
        self
    }

    pub fn set_variable(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> &mut Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Register `function` under its own name, callable as `#name(...)`.
    pub fn register_function(&mut self, function: Function) -> &mut Self {
        self.functions.insert(Arc::from(function.name()), function);
        self
    }

    pub fn register_type(&mut self, host_type: HostType) -> &mut Self {
        self.types.insert(Arc::clone(&host_type.name), host_type);
        self
    }

    pub fn register_bean(&mut self, name: impl Into<Arc<str>>, bean: Value) -> &mut Self {
        self.beans.insert(name.into(), bean);
        self
    }

    /// Register the factory behind a bean, reachable as `&name`.
    pub fn register_factory_bean(&mut self, name: impl Into<Arc<str>>, factory: Value) -> &mut Self {
        self.factory_beans.insert(name.into(), factory);
        self
    }

    pub fn set_type_comparator(&mut self, comparator: impl TypeComparator + 'static) -> &mut Self {
        self.comparator = Box::new(comparator);
        self
    }

    pub fn set_operator_overloader(
        &mut self,
        overloader: impl OperatorOverloader + 'static,
    ) -> &mut Self {
        self.overloader = Box::new(overloader);
        self
    }

    /// Host type by registered name; `java.lang.`-style qualifiers are not
    /// stripped for host types.
    fn host_type(&self, name: &str) -> Option<&HostType> {
        self.types.get(name)
    }
}

impl EvaluationContext for StandardEvaluationContext {
    fn root_object(&self) -> TypedValue {
        self.root.clone()
    }

    fn lookup_variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(Arc::from(name), value);
    }

    fn lookup_function(&self, name: &str) -> Option<Function> {
        self.functions.get(name).cloned()
    }

    fn type_comparator(&self) -> &dyn TypeComparator {
        &*self.comparator
    }

    fn operator_overloader(&self) -> &dyn OperatorOverloader {
        &*self.overloader
    }

    fn find_type(&self, name: &str) -> Option<TypeRef> {
        self.host_type(name).map(HostType::type_ref)
    }

    fn construct(&self, type_name: &str, args: &[Value]) -> Option<Result<Value, HostError>> {
        let constructor = self.host_type(type_name)?.constructor.as_ref()?;
        Some(constructor.call(args))
    }

    fn invoke_static(
        &self,
        type_name: &str,
        method: &str,
        args: &[Value],
    ) -> Option<Result<Value, HostError>> {
        let function = self.host_type(type_name)?.static_methods.get(method)?;
        Some(function.call(args))
    }

    fn read_static(&self, type_name: &str, name: &str) -> Option<Value> {
        self.host_type(type_name)?.static_properties.get(name).cloned()
    }

    fn lookup_bean(&self, name: &str, factory: bool) -> Option<Value> {
        let beans = if factory {
            &self.factory_beans
        } else {
            &self.beans
        };
        beans.get(name).cloned()
    }
}

#[cfg(test)]
mod tests;
