use std::sync::Arc;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::Value;

/// Hashable form of a value used as an inline-map or map-index key.
///
/// Floating keys are stored by bit pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    BigInt(Arc<BigInt>),
    Float(u32),
    Double(u64),
    Decimal(Decimal),
    Str(Arc<str>),
}

impl MapKey {
    /// `None` for values that cannot be map keys (collections, objects, ...).
    pub fn from_value(value: &Value) -> Option<MapKey> {
        Some(match value {
            Value::Null => MapKey::Null,
            Value::Bool(b) => MapKey::Bool(*b),
            Value::Int(n) => MapKey::Int(*n),
            Value::Long(n) => MapKey::Long(*n),
            Value::BigInt(n) => MapKey::BigInt(Arc::clone(n)),
            Value::Float(n) => MapKey::Float(n.to_bits()),
            Value::Double(n) => MapKey::Double(n.to_bits()),
            Value::Decimal(d) => MapKey::Decimal(*d),
            Value::Str(s) => MapKey::Str(Arc::clone(s)),
            _ => return None,
        })
    }

    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Null => Value::Null,
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Int(n) => Value::Int(*n),
            MapKey::Long(n) => Value::Long(*n),
            MapKey::BigInt(n) => Value::BigInt(Arc::clone(n)),
            MapKey::Float(bits) => Value::Float(f32::from_bits(*bits)),
            MapKey::Double(bits) => Value::Double(f64::from_bits(*bits)),
            MapKey::Decimal(d) => Value::Decimal(*d),
            MapKey::Str(s) => Value::Str(Arc::clone(s)),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Str(Arc::from(s))
    }
}
