#![allow(clippy::unwrap_used, reason = "tests")]

use std::sync::Arc;

use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use super::*;

#[derive(Debug)]
struct Point;

impl HostObject for Point {
    fn type_name(&self) -> &str {
        "Point"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[test]
fn reals_print_with_fraction() {
    assert_eq!(Value::Double(1.0).to_string(), "1.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Double(-0.25).to_string(), "-0.25");
    assert_eq!(Value::Double(1e10).to_string(), "1.0E10");
    assert_eq!(Value::Double(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::Double(f64::NAN).to_string(), "NaN");
}

#[test]
fn collections_print_like_host_collections() {
    let list = Value::list(vec![Value::Int(1), Value::from("a"), Value::Null]);
    assert_eq!(list.to_string(), "[1, a, null]");

    let mut map = ValueMap::new();
    map.insert(MapKey::from("k"), Value::Int(1));
    map.insert(MapKey::Int(2), Value::Bool(true));
    assert_eq!(Value::map(map).to_string(), "{k=1, 2=true}");
}

#[test]
fn negate_widens_on_overflow() {
    assert_eq!(Value::Int(5).negate(), Some(Value::Int(-5)));
    assert_eq!(
        Value::Int(i32::MIN).negate(),
        Some(Value::Long(-i64::from(i32::MIN)))
    );
    assert_eq!(
        Value::Long(i64::MIN).negate(),
        Some(Value::big_int(-BigInt::from(i64::MIN)))
    );
    assert_eq!(Value::from("x").negate(), None);
}

#[test]
fn equality_is_per_representation() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Long(1));
    assert_eq!(
        Value::Decimal(Decimal::new(100, 2)),
        Value::Decimal(Decimal::ONE)
    );
}

#[test]
fn descriptors() {
    assert_eq!(Value::Int(1).type_desc(), TypeDesc::Int);
    assert_eq!(
        Value::array(TypeDesc::String, vec![]).type_desc(),
        TypeDesc::Array(Box::new(TypeDesc::String))
    );
    assert_eq!(
        Value::object(Point).type_desc(),
        TypeDesc::Named(Arc::from("Point"))
    );
}

#[test]
fn common_supertype_prefers_number() {
    assert_eq!(
        TypeDesc::Int.common_supertype(&TypeDesc::Double),
        TypeDesc::Number
    );
    assert_eq!(
        TypeDesc::Null.common_supertype(&TypeDesc::String),
        TypeDesc::String
    );
    assert_eq!(
        TypeDesc::String.common_supertype(&TypeDesc::Int),
        TypeDesc::Object
    );
}

#[test]
fn type_ref_instances() {
    let number = TypeRef::new("Number", TypeDesc::Number);
    assert!(number.is_instance(&Value::Long(3)));
    assert!(!number.is_instance(&Value::from("3")));
    assert!(!number.is_instance(&Value::Null));

    let point = TypeRef::new("Point", TypeDesc::Named(Arc::from("Point")));
    assert!(point.is_instance(&Value::object(Point)));

    let object = TypeRef::new("Object", TypeDesc::Object);
    assert!(object.is_instance(&Value::object(Point)));
}

#[test]
fn map_keys_round_trip_scalars() {
    for value in [Value::Int(3), Value::from("a"), Value::Double(1.5), Value::Null] {
        let key = MapKey::from_value(&value).unwrap();
        assert_eq!(key.to_value(), value);
    }
    assert!(MapKey::from_value(&Value::list(vec![])).is_none());
}
