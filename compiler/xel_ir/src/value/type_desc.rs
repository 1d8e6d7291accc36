//! Runtime type descriptors.
//!
//! A descriptor names the representation a value currently has. The
//! interpreter reports one with every result, projections use them to pick
//! an array element type, and the compiler backend specialises emitted
//! instructions on the descriptors it has observed.

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    BigInteger,
    Decimal,
    /// Supertype of every numeric descriptor.
    Number,
    String,
    List,
    Map,
    Entry,
    Array(Box<TypeDesc>),
    /// A type reference produced by `T(...)`.
    Type,
    Function,
    /// Supertype of every non-null descriptor.
    Object,
    /// A host-defined type, by name.
    Named(Arc<str>),
}

impl TypeDesc {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeDesc::Int
                | TypeDesc::Long
                | TypeDesc::Float
                | TypeDesc::Double
                | TypeDesc::BigInteger
                | TypeDesc::Decimal
                | TypeDesc::Number
        )
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, TypeDesc::Int | TypeDesc::Long | TypeDesc::BigInteger)
    }

    /// `true` when a value described by `other` is an instance of `self`.
    pub fn is_assignable_from(&self, other: &TypeDesc) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (_, TypeDesc::Null) => false,
            (TypeDesc::Object, _) => true,
            (TypeDesc::Number, o) => o.is_numeric(),
            (TypeDesc::Array(a), TypeDesc::Array(b)) => a.is_assignable_from(b),
            _ => false,
        }
    }

    /// Narrowest descriptor both `self` and `other` are assignable to.
    ///
    /// `Null` is absorbed by the other side.
    #[must_use]
    pub fn common_supertype(&self, other: &TypeDesc) -> TypeDesc {
        match (self, other) {
            (a, b) if a == b => a.clone(),
            (TypeDesc::Null, b) => b.clone(),
            (a, TypeDesc::Null) => a.clone(),
            (a, b) if a.is_numeric() && b.is_numeric() => TypeDesc::Number,
            _ => TypeDesc::Object,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Null => f.write_str("null"),
            TypeDesc::Boolean => f.write_str("Boolean"),
            TypeDesc::Int => f.write_str("Integer"),
            TypeDesc::Long => f.write_str("Long"),
            TypeDesc::Float => f.write_str("Float"),
            TypeDesc::Double => f.write_str("Double"),
            TypeDesc::BigInteger => f.write_str("BigInteger"),
            TypeDesc::Decimal => f.write_str("BigDecimal"),
            TypeDesc::Number => f.write_str("Number"),
            TypeDesc::String => f.write_str("String"),
            TypeDesc::List => f.write_str("List"),
            TypeDesc::Map => f.write_str("Map"),
            TypeDesc::Entry => f.write_str("Map.Entry"),
            TypeDesc::Array(elem) => write!(f, "{elem}[]"),
            TypeDesc::Type => f.write_str("Class"),
            TypeDesc::Function => f.write_str("Function"),
            TypeDesc::Object => f.write_str("Object"),
            TypeDesc::Named(name) => f.write_str(name),
        }
    }
}
