#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel_ir::{Function, HostError, TypeDesc, Value};

use super::*;

#[test]
fn variables_round_trip_through_the_trait() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("limit", 10);
    assert_eq!(ctx.lookup_variable("limit"), Some(Value::Int(10)));
    EvaluationContext::set_variable(&mut ctx, "limit", Value::Int(11));
    assert_eq!(ctx.variable("limit"), Some(&Value::Int(11)));
    assert_eq!(ctx.lookup_variable("missing"), None);
}

#[test]
fn root_defaults_to_null() {
    assert_eq!(StandardEvaluationContext::new().root_object(), TypedValue::NULL);
    let ctx = StandardEvaluationContext::new().with_root("r");
    assert_eq!(ctx.root_object().type_desc, TypeDesc::String);
}

#[test]
fn functions_are_registered_by_name() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.register_function(Function::new("twice", |args: &[Value]| match args {
        [Value::Int(n)] => Ok(Value::Int(n * 2)),
        _ => Err(HostError::new("twice takes one int")),
    }));
    let twice = ctx.lookup_function("twice").unwrap();
    assert_eq!(twice.call(&[Value::Int(4)]).unwrap(), Value::Int(8));
    assert!(ctx.lookup_function("thrice").is_none());
}

#[test]
fn host_types_expose_constructor_and_statics() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.register_type(
        HostType::new("Color")
            .with_constructor(Function::new("Color", |_: &[Value]| Ok(Value::from("red"))))
            .with_static_method(Function::new("count", |_: &[Value]| Ok(Value::Int(3))))
            .with_static_property("DEFAULT", Value::from("black")),
    );
    assert_eq!(ctx.find_type("Color").unwrap().desc, TypeDesc::Named("Color".into()));
    assert_eq!(ctx.construct("Color", &[]).unwrap().unwrap(), Value::from("red"));
    assert_eq!(
        ctx.invoke_static("Color", "count", &[]).unwrap().unwrap(),
        Value::Int(3)
    );
    assert_eq!(ctx.read_static("Color", "DEFAULT"), Some(Value::from("black")));
    assert!(ctx.invoke_static("Color", "missing", &[]).is_none());
}

#[test]
fn beans_and_factory_beans_are_separate() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.register_bean("service", Value::from("bean"));
    ctx.register_factory_bean("service", Value::from("factory"));
    assert_eq!(ctx.lookup_bean("service", false), Some(Value::from("bean")));
    assert_eq!(ctx.lookup_bean("service", true), Some(Value::from("factory")));
    assert_eq!(ctx.lookup_bean("other", false), None);
}

#[test]
fn default_hooks_decline() {
    let mut ctx = StandardEvaluationContext::new();
    assert!(ctx.read_property(&Value::Int(1), "x").is_none());
    assert!(ctx.invoke_method(&Value::Int(1), "x", &[]).is_none());
    assert!(ctx.write_property(&Value::Int(1), "x", Value::Null).is_none());
}
