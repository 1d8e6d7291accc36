//! Host-supplied values: objects, functions and type references.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{TypeDesc, Value};

/// Failure reported by host code (functions, objects, constructors).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        HostError {
            message: message.into(),
        }
    }
}

/// An object owned by the embedding application.
///
/// Property and method resolution for host objects is the host's business:
/// the evaluator asks the object first and falls back to the evaluation
/// context's hooks when the object declines (`None`).
pub trait HostObject: Send + Sync + fmt::Debug {
    /// Name used for `instanceof` and diagnostics.
    fn type_name(&self) -> &str;

    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Write a property. `Ok(false)` means the object has no such writable property.
    fn set_property(&self, _name: &str, _value: Value) -> Result<bool, HostError> {
        Ok(false)
    }

    fn invoke(&self, _method: &str, _args: &[Value]) -> Option<Result<Value, HostError>> {
        None
    }

    fn display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }

    fn as_any(&self) -> &dyn Any;
}

type HostFn = dyn Fn(&[Value]) -> Result<Value, HostError> + Send + Sync;

/// A host lambda callable as `#name(args)`.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    f: Arc<HostFn>,
}

impl Function {
    pub fn new(
        name: impl Into<Arc<str>>,
        f: impl Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    ) -> Self {
        Function {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, HostError> {
        (self.f)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// Result of `T(qualified.Name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Canonical simple name (`String`, `Math`, or the host's registered name).
    pub name: Arc<str>,
    /// Descriptor that instances of this type carry.
    pub desc: TypeDesc,
}

impl TypeRef {
    pub fn new(name: impl Into<Arc<str>>, desc: TypeDesc) -> Self {
        TypeRef {
            name: name.into(),
            desc,
        }
    }

    /// `true` if `value` is an instance of this type.
    pub fn is_instance(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Object(obj) => match &self.desc {
                TypeDesc::Object => true,
                TypeDesc::Named(name) => &**name == obj.type_name(),
                _ => false,
            },
            other => self.desc.is_assignable_from(&other.type_desc()),
        }
    }
}
