//! Shared test utilities: parse an expression and profile it through the
//! interpreter. Only compiled in test builds.

#![allow(clippy::unwrap_used, reason = "tests")]

use xel_eval::{evaluate_profiled, PatternCache, StandardEvaluationContext, TypeProfile};
use xel_ir::{Ast, MapKey, TypedValue, Value, ValueMap};
use xel_parse::{parse, DEFAULT_MAX_EXPRESSION_LENGTH};

pub(crate) fn ast(source: &str) -> Ast {
    parse(source, DEFAULT_MAX_EXPRESSION_LENGTH).unwrap()
}

/// Parse `source` and interpret it `runs` times, recording a profile.
pub(crate) fn profiled(
    source: &str,
    ctx: &mut StandardEvaluationContext,
    runs: usize,
) -> (Ast, TypeProfile) {
    let ast = ast(source);
    let mut profile = TypeProfile::new(ast.node_count());
    for _ in 0..runs {
        interpret(&ast, ctx, &mut profile);
    }
    (ast, profile)
}

pub(crate) fn interpret(
    ast: &Ast,
    ctx: &mut StandardEvaluationContext,
    profile: &mut TypeProfile,
) -> TypedValue {
    evaluate_profiled(ast, ctx, &PatternCache::new(), profile).unwrap()
}

/// `{name: value, ...}` map value.
pub(crate) fn record(fields: &[(&str, Value)]) -> Value {
    let mut map = ValueMap::new();
    for (name, value) in fields {
        map.insert(MapKey::from(*name), value.clone());
    }
    Value::map(map)
}
