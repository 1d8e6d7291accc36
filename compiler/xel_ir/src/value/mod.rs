//! Runtime values.
//!
//! `Value` is a closed enum over everything an expression can produce.
//! Collections are reference counted and never mutated in place, so a
//! constant inline list folded at parse time can be handed out by every
//! evaluation as the same instance.

mod display;
mod host;
mod map_key;
mod type_desc;

use std::sync::Arc;

use indexmap::IndexMap;
use num_bigint::BigInt;
use rust_decimal::Decimal;

pub use host::{Function, HostError, HostObject, TypeRef};
pub use map_key::MapKey;
pub use type_desc::TypeDesc;

/// Insertion-ordered map storage.
pub type ValueMap = IndexMap<MapKey, Value>;

/// Typed native array: element descriptor plus items.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    pub element: TypeDesc,
    pub items: Vec<Value>,
}

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInt(Arc<BigInt>),
    Decimal(Decimal),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Array(Arc<ArrayValue>),
    Map(Arc<ValueMap>),
    /// A map entry exposed to projection/selection bodies as `key`/`value`.
    Entry(Arc<(Value, Value)>),
    Type(TypeRef),
    Function(Function),
    Object(Arc<dyn HostObject>),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Arc::new(entries))
    }

    pub fn array(element: TypeDesc, items: Vec<Value>) -> Self {
        Value::Array(Arc::new(ArrayValue { element, items }))
    }

    pub fn entry(key: Value, value: Value) -> Self {
        Value::Entry(Arc::new((key, value)))
    }

    pub fn big_int(n: BigInt) -> Self {
        Value::BigInt(Arc::new(n))
    }

    pub fn object(obj: impl HostObject + 'static) -> Self {
        Value::Object(Arc::new(obj))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::BigInt(_)
                | Value::Decimal(_)
        )
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integral value as `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        use num_traits::ToPrimitive;
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            Value::BigInt(n) => n.to_i64(),
            _ => None,
        }
    }

    /// Descriptor of the value's current representation.
    pub fn type_desc(&self) -> TypeDesc {
        match self {
            Value::Null => TypeDesc::Null,
            Value::Bool(_) => TypeDesc::Boolean,
            Value::Int(_) => TypeDesc::Int,
            Value::Long(_) => TypeDesc::Long,
            Value::Float(_) => TypeDesc::Float,
            Value::Double(_) => TypeDesc::Double,
            Value::BigInt(_) => TypeDesc::BigInteger,
            Value::Decimal(_) => TypeDesc::Decimal,
            Value::Str(_) => TypeDesc::String,
            Value::List(_) => TypeDesc::List,
            Value::Array(arr) => TypeDesc::Array(Box::new(arr.element.clone())),
            Value::Map(_) => TypeDesc::Map,
            Value::Entry(_) => TypeDesc::Entry,
            Value::Type(_) => TypeDesc::Type,
            Value::Function(_) => TypeDesc::Function,
            Value::Object(obj) => TypeDesc::Named(Arc::from(obj.type_name())),
        }
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> String {
        self.type_desc().to_string()
    }

    /// Numeric negation, widening `int -> long -> BigInteger` on overflow.
    ///
    /// `None` for non-numeric values.
    #[must_use]
    pub fn negate(&self) -> Option<Value> {
        Some(match self {
            Value::Int(n) => n
                .checked_neg()
                .map_or_else(|| Value::Long(-i64::from(*n)), Value::Int),
            Value::Long(n) => n
                .checked_neg()
                .map_or_else(|| Value::big_int(-BigInt::from(*n)), Value::Long),
            Value::BigInt(n) => Value::big_int(-&**n),
            Value::Float(n) => Value::Float(-n),
            Value::Double(n) => Value::Double(-n),
            Value::Decimal(d) => Value::Decimal(-*d),
            _ => return None,
        })
    }

    /// Identity of shared storage, for collections and host values.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Entry(a), Value::Entry(b)) => Arc::ptr_eq(a, b),
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Structural equality within a representation.
///
/// `Int(1)` and `Long(1)` are different values here; numeric equality
/// across representations is the evaluator's job.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "structural equality of stored values")]
            (Value::Float(a), Value::Float(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "structural equality of stored values")]
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Entry(a), Value::Entry(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

/// A value together with its declared type descriptor.
///
/// The descriptor is usually the value's own (`Value::type_desc`) but can be
/// wider, e.g. a projection over an `Integer[]` that produced mixed numbers
/// declares `Number[]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    pub value: Value,
    pub type_desc: TypeDesc,
}

impl TypedValue {
    pub const NULL: TypedValue = TypedValue {
        value: Value::Null,
        type_desc: TypeDesc::Null,
    };

    pub fn new(value: Value) -> Self {
        let type_desc = value.type_desc();
        TypedValue { value, type_desc }
    }

    pub fn with_type(value: Value, type_desc: TypeDesc) -> Self {
        TypedValue { value, type_desc }
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        TypedValue::new(value)
    }
}

#[cfg(test)]
mod tests;
