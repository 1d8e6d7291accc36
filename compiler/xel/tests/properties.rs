//! End-to-end behaviour every embedding relies on: canonical printing,
//! precedence, numeric promotion, short-circuiting, constant folding,
//! projection and error positions.

#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel::{
    normalize_operators, CompilerMode, ErrorCode, EvalErrorKind, ExpressionParser, Function,
    HostError, ParseErrorKind, ParserConfig, StandardEvaluationContext, Value,
};

fn value(source: &str) -> Value {
    ExpressionParser::default()
        .parse(source)
        .unwrap()
        .value(&mut StandardEvaluationContext::new())
        .unwrap()
}

fn strings(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::from(*s)).collect())
}

fn exploding_context() -> StandardEvaluationContext {
    let mut ctx = StandardEvaluationContext::new();
    ctx.register_function(Function::new("boom", |_| Err(HostError::new("evaluated"))));
    ctx
}

#[test]
fn textual_operators_print_symbolically() {
    assert_eq!(
        normalize_operators("execution(* *(..)) and args(String)").unwrap(),
        "execution(* *(..)) && args(String)"
    );
    let expr = ExpressionParser::default()
        .parse("#a and #b or not #c")
        .unwrap();
    assert_eq!(expr.to_source_string(), "#a && #b || !#c");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(value("1 + 2 * 3"), Value::Int(7));
    assert_eq!(value("(1 + 2) * 3"), Value::Int(9));
}

#[test]
fn comparisons_promote_both_operands() {
    assert_eq!(value("1.0 < 1"), Value::Bool(false));
    assert_eq!(value("1 == 1.0"), Value::Bool(true));
    assert_eq!(
        value("new java.math.BigDecimal('1.00') < 1.0f"),
        Value::Bool(false)
    );
    assert_eq!(
        value("new java.math.BigDecimal('1.00') == 1.0f"),
        Value::Bool(true)
    );
}

#[test]
fn logical_operators_skip_the_right_operand() {
    let parser = ExpressionParser::default();
    let mut ctx = exploding_context();
    for (source, expected) in [
        ("false and #boom()", false),
        ("true or #boom()", true),
        ("false && 1 / 0 == 0", false),
    ] {
        let result = parser.parse(source).unwrap().value(&mut ctx);
        assert_eq!(result, Ok(Value::Bool(expected)), "{source}");
    }
    let err = parser
        .parse("true and #boom()")
        .unwrap()
        .value(&mut ctx)
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Host { message: "evaluated".to_owned() });
}

#[test]
fn concatenation_matches_between_modes() {
    let source = "#a + #b + #c";
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", "a").set_variable("b", "b").set_variable("c", "c");

    let interpreted = ExpressionParser::default().parse(source).unwrap();
    let compiled = ExpressionParser::new(
        ParserConfig::default().with_compiler_mode(CompilerMode::Immediate),
    )
    .parse(source)
    .unwrap();
    compiled.value(&mut ctx).unwrap();
    assert!(compiled.is_compiled());

    assert_eq!(interpreted.value(&mut ctx).unwrap(), Value::from("abc"));
    assert_eq!(compiled.value(&mut ctx).unwrap(), Value::from("abc"));
    assert_eq!(value("'a' + 'b' + 'c'"), Value::from("abc"));
}

#[test]
fn literal_lists_are_folded_once() {
    let expr = ExpressionParser::default().parse("{1, 2, 3}").unwrap();
    let mut ctx = StandardEvaluationContext::new();
    let first = expr.value(&mut ctx).unwrap();
    let second = expr.value(&mut ctx).unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(
        first,
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn projection_maps_every_element() {
    assert_eq!(
        value("{1, 2, 3, 4}.![#this % 2 == 0 ? 'y' : 'n']"),
        strings(&["n", "y", "n", "y"])
    );
    assert_eq!(
        value("{'b': 2, 'a': 1}.![key + '=' + value]"),
        strings(&["b=2", "a=1"])
    );
}

#[test]
fn projecting_null_needs_null_safe_navigation() {
    let parser = ExpressionParser::default();
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("none", Value::Null);
    assert_eq!(
        parser.parse("#none?.![#this]").unwrap().value(&mut ctx),
        Ok(Value::Null)
    );
    let err = parser
        .parse("#none.![#this]")
        .unwrap()
        .value(&mut ctx)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3013);
}

#[test]
fn missing_right_operand_points_at_the_operator() {
    let err = ExpressionParser::default().parse("1 >").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::RightOperandMissing { .. }));
    assert_eq!(err.position(), 2);
}

#[test]
fn length_is_checked_before_lexing() {
    let parser = ExpressionParser::new(ParserConfig::default().with_max_expression_length(5));
    // Unterminated, but too long to ever reach the lexer.
    let err = parser.parse("'abcdefgh").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::ExpressionTooLong { .. }));
    assert!(!err.is_lex_error());
    assert!(parser.parse("1 + 2").is_ok());
}

#[test]
fn one_shot_evaluation_reports_either_stage() {
    let mut ctx = StandardEvaluationContext::new();
    assert_eq!(
        xel::evaluate("6 * 7", &mut ctx).unwrap().value,
        Value::Int(42)
    );
    let parse = xel::evaluate("1 +", &mut ctx).unwrap_err();
    assert_eq!(parse.position(), 2);
    let eval = xel::evaluate("1 / 0", &mut ctx).unwrap_err();
    assert_eq!(eval.code(), ErrorCode::E3002);
    assert!(eval.to_diagnostic().render("1 / 0").contains("XEL3002"));
}

fn eval_error(source: &str) -> xel::EvalError {
    ExpressionParser::default()
        .parse(source)
        .unwrap()
        .value(&mut StandardEvaluationContext::new())
        .unwrap_err()
}

#[test]
fn matches_is_a_whole_string_test() {
    assert_eq!(value("'ba' matches 'x|a'"), Value::Bool(false));
    assert_eq!(value("'a' matches 'x|a'"), Value::Bool(true));
    assert_eq!(value("'5.00' matches '\\d+\\.\\d{2}'"), Value::Bool(true));
    assert_eq!(value("'x5.00' matches '\\d+\\.\\d{2}'"), Value::Bool(false));

    let err = eval_error("'ba' matches 'x)|(a'");
    assert!(matches!(err.kind, EvalErrorKind::InvalidPattern { .. }));
    assert_eq!(err.code(), ErrorCode::E3016);
}

#[test]
fn oversized_results_are_errors() {
    for source in [
        "'ab' * 9223372036854775807L",
        "'ab' * 2147483647",
        "3 ^ 30000000",
        "2 ^ 2000000000",
    ] {
        let err = eval_error(source);
        assert!(
            matches!(err.kind, EvalErrorKind::ResultTooLarge { .. }),
            "{source}: {err}"
        );
        assert_eq!(err.code(), ErrorCode::E3021);
    }
    assert_eq!(value("'ab' * 3"), Value::from("ababab"));
    assert_eq!(value("1 ^ 2000000000"), Value::Int(1));
}
