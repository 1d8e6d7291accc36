#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel_ir::{TypeDesc, Value, ValueMap};

use super::*;
use crate::context::StandardEvaluationContext;
use crate::errors::EvalErrorKind;

fn call(target: &Value, name: &str, args: &[Value]) -> EvalResult {
    invoke_method(target, name, args, &StandardEvaluationContext::new()).unwrap()
}

#[test]
fn string_methods_count_characters() {
    let s = Value::from("日本語 text");
    assert_eq!(call(&s, "length", &[]).unwrap(), Value::Int(8));
    assert_eq!(
        call(&s, "substring", &[Value::Int(1), Value::Int(3)]).unwrap(),
        Value::from("本語")
    );
    assert_eq!(call(&s, "charAt", &[Value::Int(2)]).unwrap(), Value::from("語"));
    assert_eq!(call(&s, "indexOf", &[Value::from("text")]).unwrap(), Value::Int(4));
    assert_eq!(call(&s, "indexOf", &[Value::from("x y")]).unwrap(), Value::Int(-1));
}

#[test]
fn substring_bounds_are_checked() {
    let err = call(&Value::from("abc"), "substring", &[Value::Int(4)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 4, len: 3 });
    assert!(call(&Value::from("abc"), "substring", &[Value::Int(2), Value::Int(1)]).is_err());
    assert_eq!(
        call(&Value::from("abc"), "substring", &[Value::Int(3)]).unwrap(),
        Value::from("")
    );
}

#[test]
fn unknown_method_or_arity_is_not_handled() {
    let ctx = StandardEvaluationContext::new();
    assert!(invoke_method(&Value::from("a"), "nope", &[], &ctx).is_none());
    assert!(invoke_method(&Value::from("a"), "length", &[Value::Int(1)], &ctx).is_none());
}

#[test]
fn any_value_has_to_string() {
    assert_eq!(
        call(&Value::Double(1.0), "toString", &[]).unwrap(),
        Value::from("1.0")
    );
}

#[test]
fn list_methods_use_numeric_equality() {
    let list = Value::list(vec![Value::Int(1), Value::Long(2)]);
    assert_eq!(call(&list, "size", &[]).unwrap(), Value::Int(2));
    assert_eq!(call(&list, "indexOf", &[Value::Int(2)]).unwrap(), Value::Int(1));
    assert_eq!(call(&list, "contains", &[Value::Double(1.0)]).unwrap(), Value::Bool(true));
    assert!(call(&list, "get", &[Value::Int(2)]).is_err());
}

#[test]
fn map_lookups() {
    let mut entries = ValueMap::new();
    entries.insert("a".into(), Value::Int(1));
    let map = Value::map(entries);
    assert_eq!(call(&map, "get", &[Value::from("a")]).unwrap(), Value::Int(1));
    assert_eq!(call(&map, "get", &[Value::from("b")]).unwrap(), Value::Null);
    assert_eq!(
        call(&map, "keySet", &[]).unwrap(),
        Value::list(vec![Value::from("a")])
    );
    assert_eq!(read_property(&map, "a"), Some(Value::Int(1)));
    assert_eq!(read_property(&map, "b"), Some(Value::Null));
}

#[test]
fn types_resolve_with_package_prefixes() {
    assert_eq!(find_type("java.lang.String").unwrap().desc, TypeDesc::String);
    assert_eq!(find_type("int").unwrap().name.as_ref(), "Integer");
    assert_eq!(find_type("java.math.BigDecimal").unwrap().desc, TypeDesc::Decimal);
    assert!(find_type("java.lang.Thread").is_none());
}

#[test]
fn static_members() {
    let int = find_type("Integer").unwrap();
    assert_eq!(read_static(&int, "MAX_VALUE"), Some(Value::Int(i32::MAX)));
    assert_eq!(
        invoke_static(&int, "parseInt", &[Value::from(" 42 ")]).unwrap().unwrap(),
        Value::Int(42)
    );
    assert!(invoke_static(&int, "parseInt", &[Value::from("4x")]).unwrap().is_err());

    let math = find_type("Math").unwrap();
    assert_eq!(
        invoke_static(&math, "max", &[Value::Int(3), Value::Long(7)]).unwrap().unwrap(),
        Value::Long(7)
    );
    assert_eq!(
        invoke_static(&math, "abs", &[Value::Int(-3)]).unwrap().unwrap(),
        Value::Int(3)
    );
    assert_eq!(
        invoke_static(&math, "round", &[Value::Double(2.5)]).unwrap().unwrap(),
        Value::Long(3)
    );
    assert!(invoke_static(&math, "cbrt", &[Value::Int(8)]).is_none());
}

#[test]
fn constructors_convert_strings_and_numbers() {
    let decimal = find_type("BigDecimal").unwrap();
    assert_eq!(
        construct(&decimal, &[Value::from("1.50")]).unwrap().unwrap(),
        Value::Decimal("1.50".parse().unwrap())
    );
    let long = find_type("Long").unwrap();
    assert_eq!(construct(&long, &[Value::Int(3)]).unwrap().unwrap(), Value::Long(3));
    let string = find_type("String").unwrap();
    assert_eq!(construct(&string, &[]).unwrap().unwrap(), Value::from(""));
    assert!(construct(&string, &[Value::Int(1)]).is_none());
}
