use super::ensure_sufficient_stack;

/// Mirrors the shape of a nested unary chain: each level adds one frame.
fn nested_negations(depth: u64) -> i64 {
    ensure_sufficient_stack(|| {
        if depth == 0 {
            1
        } else {
            -nested_negations(depth - 1)
        }
    })
}

#[test]
fn shallow_nesting() {
    assert_eq!(nested_negations(3), -1);
    assert_eq!(nested_negations(4), 1);
}

#[test]
fn deep_nesting_does_not_overflow() {
    assert_eq!(nested_negations(100_000), 1);
}

#[test]
fn propagates_results() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Err("boom"));
    assert_eq!(result, Err("boom"));
}
