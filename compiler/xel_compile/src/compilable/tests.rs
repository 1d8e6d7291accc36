#![allow(clippy::unwrap_used, reason = "tests")]

use xel_eval::{StandardEvaluationContext, TypeProfile};
use xel_ir::Value;

use super::{classify, is_compilable, Shape};
use crate::test_helpers::{ast, interpret, profiled, record};

fn compilable_after(source: &str, ctx: &mut StandardEvaluationContext, runs: usize) -> bool {
    let (ast, profile) = profiled(source, ctx, runs);
    is_compilable(&ast, &profile, ast.root())
}

#[test]
fn unseen_nodes_are_not_compilable() {
    let ast = ast("#a + 1");
    let profile = TypeProfile::new(ast.node_count());
    assert!(!is_compilable(&ast, &profile, ast.root()));
}

#[test]
fn folded_constants_need_no_profile() {
    let ast = ast("1 + 2 * 3");
    let profile = TypeProfile::new(ast.node_count());
    assert!(is_compilable(&ast, &profile, ast.root()));
}

#[test]
fn mixed_numeric_arithmetic_is_compilable_once_seen() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", 1).set_variable("b", 2.5);
    assert!(compilable_after("#a + #b * 2", &mut ctx, 1));
}

#[test]
fn an_operand_seen_with_two_types_is_not_compilable() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", 1);
    let (ast, mut profile) = profiled("#a + 1", &mut ctx, 1);
    assert!(is_compilable(&ast, &profile, ast.root()));

    ctx.set_variable("a", 1.5);
    interpret(&ast, &mut ctx, &mut profile);
    assert!(!is_compilable(&ast, &profile, ast.root()));
}

#[test]
fn skipped_operands_keep_an_expression_interpreted() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("f", false).set_variable("x", true);
    let (ast, mut profile) = profiled("#f && #x", &mut ctx, 3);
    assert!(!is_compilable(&ast, &profile, ast.root()));

    ctx.set_variable("f", true);
    interpret(&ast, &mut ctx, &mut profile);
    assert!(is_compilable(&ast, &profile, ast.root()));
}

#[test]
fn constant_branches_count_as_seen() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("n", 1);
    assert!(compilable_after("#n > 0 ? 'pos' : 'neg'", &mut ctx, 1));
    assert!(!compilable_after("#n > 0 ? #n : -#n", &mut ctx, 1));
}

#[test]
fn unsupported_operations_are_not_compilable() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", 3).set_variable("s", "abc");
    for source in [
        "#a ^ 2",
        "#s.length()",
        "#s matches 'a.*'",
        "#a between {1, 5}",
        "#s ?: 'none'",
        "{#a, 2}",
        "#s[0]",
    ] {
        assert!(!compilable_after(source, &mut ctx, 1), "{source}");
    }
}

#[test]
fn widened_big_results_stay_interpreted() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", i64::MAX);
    // `Long * Int` overflowed into a BigInteger.
    assert!(!compilable_after("#a * 2", &mut ctx, 1));
}

#[test]
fn concatenation_flattens_only_the_string_part_of_the_spine() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", 1).set_variable("b", 2).set_variable("s", "x");
    let (ast, profile) = profiled("#a + #b + #s + #a", &mut ctx, 1);
    let Some(Shape::Concat(operands)) = classify(&ast, &profile, ast.root()) else {
        panic!("expected a concatenation");
    };
    // `#a + #b` is numeric and stays one operand.
    assert_eq!(operands.len(), 3);
    assert!(matches!(
        classify(&ast, &profile, operands[0]),
        Some(Shape::Arith { .. })
    ));
    assert!(is_compilable(&ast, &profile, ast.root()));
}

#[test]
fn property_chains_compile_without_null_safe_steps() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable(
        "p",
        record(&[("name", Value::from("Ada")), ("age", Value::Int(36))]),
    );
    assert!(compilable_after("#p.age + 1", &mut ctx, 1));
    assert!(!compilable_after("#p?.age", &mut ctx, 1));
}
