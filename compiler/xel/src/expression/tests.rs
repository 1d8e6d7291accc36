#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel_eval::{EvalErrorKind, StandardEvaluationContext};
use xel_ir::{TypeDesc, Value};

use super::Expression;
use crate::config::{CompilerMode, ParserConfig};
use crate::parser::ExpressionParser;

fn parse(source: &str, config: ParserConfig) -> Expression {
    ExpressionParser::new(config).parse(source).unwrap()
}

fn immediate() -> ParserConfig {
    ParserConfig::default().with_compiler_mode(CompilerMode::Immediate)
}

fn ctx_with(name: &str, value: impl Into<Value>) -> StandardEvaluationContext {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable(name, value);
    ctx
}

#[test]
fn expressions_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expression>();
}

#[test]
fn off_mode_only_compiles_on_request() {
    let expr = parse("#i + 1", ParserConfig::default());
    let mut ctx = ctx_with("i", 1);
    for _ in 0..3 {
        assert_eq!(expr.value(&mut ctx).unwrap(), Value::Int(2));
    }
    assert!(!expr.is_compiled());

    assert!(expr.compile());
    assert!(expr.is_compiled());
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Int(2));
}

#[test]
fn immediate_mode_compiles_after_the_first_evaluation() {
    let expr = parse("#i * 2 > 5", immediate());
    let mut ctx = ctx_with("i", 3);
    assert!(!expr.is_compiled());
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Bool(true));
    assert!(expr.is_compiled());
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Bool(true));
}

#[test]
fn mixed_mode_waits_for_the_threshold() {
    let config = ParserConfig::default()
        .with_compiler_mode(CompilerMode::Mixed)
        .with_compile_threshold(3);
    let expr = parse("#i - 1", config);
    let mut ctx = ctx_with("i", 10);
    expr.value(&mut ctx).unwrap();
    expr.value(&mut ctx).unwrap();
    assert!(!expr.is_compiled());
    expr.value(&mut ctx).unwrap();
    assert!(expr.is_compiled());
}

#[test]
fn type_change_falls_back_to_the_interpreter() {
    let expr = parse("#i + 1", immediate());
    let mut ctx = ctx_with("i", 1);
    expr.value(&mut ctx).unwrap();
    assert!(expr.is_compiled());

    ctx.set_variable("i", 1.5);
    let result = expr.evaluate(&mut ctx).unwrap();
    assert_eq!(result.value, Value::Double(2.5));
    assert_eq!(result.type_desc, TypeDesc::Double);
    assert_eq!(expr.failed_compilations(), 1);
    // The interpreted re-run profiled the new types and compiled again.
    assert!(expr.is_compiled());
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Double(2.5));
}

#[test]
fn interpreter_errors_are_authoritative_after_a_deopt() {
    let expr = parse("#a / #b", immediate());
    let mut ctx = ctx_with("a", 6);
    ctx.set_variable("b", 3);
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Int(2));
    assert!(expr.is_compiled());

    ctx.set_variable("b", 0);
    let err = expr.value(&mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert!(!expr.is_compiled());
}

#[test]
fn repeated_failures_stop_compilation_attempts() {
    let config = immediate().with_max_failed_compilations(2);
    let expr = parse("#s.length()", config);
    let mut ctx = ctx_with("s", "abc");
    for _ in 0..5 {
        assert_eq!(expr.value(&mut ctx).unwrap(), Value::Int(3));
    }
    assert!(!expr.is_compiled());
    assert_eq!(expr.failed_compilations(), 2);
}

#[test]
fn revert_drops_compiled_code_and_history() {
    let config = immediate().with_max_failed_compilations(1);
    let expr = parse("#i + 1", config);
    let mut ctx = ctx_with("i", 1);
    expr.value(&mut ctx).unwrap();
    assert!(expr.is_compiled());

    expr.revert_to_interpreted();
    assert!(!expr.is_compiled());
    assert_eq!(expr.failed_compilations(), 0);
    // Nothing has been profiled since the revert.
    assert!(!expr.compile());
    assert_eq!(expr.failed_compilations(), 1);
}

#[test]
fn source_strings() {
    let expr = parse("1 lt 2 and true", ParserConfig::default());
    assert_eq!(expr.expression_string(), "1 lt 2 and true");
    assert_eq!(expr.to_source_string(), "1 < 2 && true");
}
