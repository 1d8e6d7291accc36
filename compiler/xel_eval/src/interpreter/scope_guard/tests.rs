#![allow(clippy::unwrap_used, reason = "tests")]

use xel_ir::{TypedValue, Value};

use crate::context::StandardEvaluationContext;
use crate::interpreter::Interpreter;
use crate::pattern_cache::PatternCache;

#[test]
fn guards_pop_on_normal_exit() {
    let ast = xel_parse::parse("1", 10).unwrap();
    let patterns = PatternCache::new();
    let mut ctx = StandardEvaluationContext::new();
    let mut interpreter = Interpreter::new(&ast, &mut ctx, &patterns);
    {
        let mut scoped = interpreter.with_element_scope(TypedValue::new(Value::Int(1)));
        assert_eq!(scoped.state.scope_depth(), 1);
        let scoped = scoped.with_active_context(TypedValue::NULL);
        assert_eq!(scoped.state.active_context_depth(), 3);
    }
    assert_eq!(interpreter.state.scope_depth(), 0);
    assert_eq!(interpreter.state.active_context_depth(), 1);
}

#[test]
fn stacks_are_restored_after_an_error_inside_a_projection() {
    let ast = xel_parse::parse("{1, 0}.![{10}.![#this / #root]]", 100).unwrap();
    let patterns = PatternCache::new();
    let mut ctx = StandardEvaluationContext::new().with_root(0);
    let mut interpreter = Interpreter::new(&ast, &mut ctx, &patterns);
    assert!(interpreter.evaluate().is_err());
    assert_eq!(interpreter.state.scope_depth(), 0);
    assert_eq!(interpreter.state.active_context_depth(), 1);
}
