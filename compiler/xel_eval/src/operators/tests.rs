#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel_ir::{BinaryOp, TypeDesc, TypeRef, UnaryOp, Value};

use super::*;
use crate::context::StandardEvaluationContext;
use crate::errors::EvalErrorKind;

fn ctx() -> StandardEvaluationContext {
    StandardEvaluationContext::new()
}

#[test]
fn add_concatenates_when_either_side_is_a_string() {
    let ctx = ctx();
    assert_eq!(
        add(&Value::from("a"), &Value::Int(1), &ctx).unwrap(),
        Value::from("a1")
    );
    assert_eq!(
        add(&Value::Null, &Value::from("a"), &ctx).unwrap(),
        Value::from("nulla")
    );
    assert_eq!(
        add(&Value::Int(1), &Value::Int(2), &ctx).unwrap(),
        Value::Int(3)
    );
}

#[test]
fn add_of_unrelated_values_is_not_supported() {
    let err = add(&Value::Bool(true), &Value::Int(1), &ctx()).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::OperatorNotSupported { op: "+", .. }
    ));
}

#[test]
fn string_times_count_repeats() {
    let ctx = ctx();
    assert_eq!(
        arithmetic(BinaryOp::Mul, &Value::from("ab"), &Value::Int(3), &ctx).unwrap(),
        Value::from("ababab")
    );
    assert!(arithmetic(BinaryOp::Mul, &Value::from("ab"), &Value::Int(-1), &ctx).is_err());
}

#[test]
fn string_repeat_is_bounded() {
    let ctx = ctx();
    let err = arithmetic(BinaryOp::Mul, &Value::from("ab"), &Value::Long(i64::MAX), &ctx)
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ResultTooLarge { .. }));
    assert_eq!(err.code(), xel_diagnostic::ErrorCode::E3021);

    let half = i32::try_from(MAX_REPEAT_LENGTH / 2).unwrap();
    let at_limit = arithmetic(BinaryOp::Mul, &Value::from("ab"), &Value::Int(half), &ctx).unwrap();
    assert_eq!(at_limit.as_str().map(str::len), Some(MAX_REPEAT_LENGTH));
    assert!(arithmetic(BinaryOp::Mul, &Value::from("ab"), &Value::Int(half + 1), &ctx).is_err());
}

#[test]
fn logical_operators_need_booleans() {
    let (t, f) = (Value::Bool(true), Value::Bool(false));
    assert!(!logical(BinaryOp::And, &t, &f).unwrap());
    assert!(logical(BinaryOp::Or, &f, &t).unwrap());
    let err = logical(BinaryOp::And, &t, &Value::Int(1)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert!(logical(BinaryOp::Add, &t, &t).is_err());
}

#[test]
fn unary_operators_check_operand_types() {
    assert_eq!(unary(UnaryOp::Neg, &Value::Int(4)).unwrap(), Value::Int(-4));
    assert_eq!(
        unary(UnaryOp::Not, &Value::Bool(true)).unwrap(),
        Value::Bool(false)
    );
    assert!(unary(UnaryOp::Not, &Value::Int(1)).is_err());
    assert!(unary(UnaryOp::Plus, &Value::from("x")).is_err());
}

#[test]
fn equality_across_representations_and_collections() {
    let ctx = ctx();
    assert!(equals(&Value::Int(1), &Value::Double(1.0), &ctx).unwrap());
    assert!(equals(&Value::Null, &Value::Null, &ctx).unwrap());
    assert!(!equals(&Value::Null, &Value::Int(0), &ctx).unwrap());
    let a = Value::list(vec![Value::Int(1), Value::from("x")]);
    let b = Value::list(vec![Value::Long(1), Value::from("x")]);
    assert!(equals(&a, &b, &ctx).unwrap());
    assert!(!equals(&Value::from("1"), &Value::Int(1), &ctx).unwrap());
}

#[test]
fn relational_on_nan_is_false() {
    let ctx = ctx();
    let nan = Value::Double(f64::NAN);
    for op in [BinaryOp::Lt, BinaryOp::Le, BinaryOp::Gt, BinaryOp::Ge] {
        assert!(!relational(op, &nan, &Value::Int(1), &ctx).unwrap());
    }
}

#[test]
fn strings_compare_lexicographically() {
    assert!(relational(BinaryOp::Lt, &Value::from("abc"), &Value::from("abd"), &ctx()).unwrap());
}

#[test]
fn null_sorts_first_through_the_comparator() {
    assert!(relational(BinaryOp::Lt, &Value::Null, &Value::Int(0), &ctx()).unwrap());
}

#[test]
fn comparing_unrelated_values_fails() {
    let err = relational(BinaryOp::Lt, &Value::from("a"), &Value::Int(1), &ctx()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotComparable { .. }));
}

#[test]
fn instanceof_respects_supertypes() {
    let number = Value::Type(TypeRef::new("Number", TypeDesc::Number));
    assert!(instance_of(&Value::Int(1), &number).unwrap());
    assert!(!instance_of(&Value::Null, &number).unwrap());
    assert!(instance_of(&Value::Int(1), &Value::from("Number")).is_err());
}

#[test]
fn matches_requires_a_full_match() {
    let patterns = PatternCache::new();
    assert!(matches(&Value::from("5.00"), &Value::from(r"^-?\d+(\.\d{2})?$"), &patterns).unwrap());
    assert!(!matches(&Value::from("x5"), &Value::from(r"\d"), &patterns).unwrap());
    let err = matches(&Value::from("x"), &Value::from("("), &patterns).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidPattern { .. }));
}

#[test]
fn unbalanced_alternation_is_an_invalid_pattern() {
    let patterns = PatternCache::new();
    for pattern in ["x)|(a", "a)|(b)|(c", "a)(b"] {
        let err = matches(&Value::from("ba"), &Value::from(pattern), &patterns).unwrap_err();
        assert!(
            matches!(err.kind, EvalErrorKind::InvalidPattern { .. }),
            "{pattern}: {err}"
        );
    }
    assert!(patterns.is_empty());
}

#[test]
fn alternation_must_cover_the_whole_input() {
    let patterns = PatternCache::new();
    let check = |text: &str, pattern: &str| {
        matches(&Value::from(text), &Value::from(pattern), &patterns).unwrap()
    };
    assert!(!check("ba", "x|a"));
    assert!(check("a", "x|a"));
    assert!(!check("abc", "b"));
    assert!(check("abc", ".b."));
    assert!(!check("line\nnext", "line"));
}

#[test]
fn between_is_inclusive() {
    let ctx = ctx();
    let bounds = Value::list(vec![Value::Int(1), Value::Int(5)]);
    assert!(between(&Value::Int(1), &bounds, &ctx).unwrap());
    assert!(between(&Value::Int(5), &bounds, &ctx).unwrap());
    assert!(!between(&Value::Int(6), &bounds, &ctx).unwrap());
    assert!(between(&Value::Int(1), &Value::list(vec![Value::Int(1)]), &ctx).is_err());
}

#[test]
fn elvis_treats_empty_strings_as_absent() {
    assert!(is_absent(&Value::Null));
    assert!(is_absent(&Value::from("")));
    assert!(!is_absent(&Value::Int(0)));
}
