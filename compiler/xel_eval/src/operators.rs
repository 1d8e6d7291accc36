//! Operator semantics on evaluated operands.
//!
//! Short-circuiting operators (`&&`, `||`, ternary, Elvis) need the
//! unevaluated right operand and live in the interpreter; everything here
//! works on values.

use std::cmp::Ordering;

use xel_ir::{BinaryOp, UnaryOp, Value};

use crate::comparator::TypeComparator;
use crate::context::EvaluationContext;
use crate::errors::{
    not_comparable, numeric_conversion, operator_not_supported, result_too_large, type_mismatch,
    EvalError, EvalErrorKind, EvalResult,
};
use crate::numeric;
use crate::pattern_cache::PatternCache;

/// Longest string `string * n` may build, in bytes.
const MAX_REPEAT_LENGTH: usize = 1 << 24;

/// `+`: numeric addition, or concatenation when either side is a string.
pub fn add(left: &Value, right: &Value, ctx: &dyn EvaluationContext) -> EvalResult {
    if let Some(result) = numeric::arithmetic(BinaryOp::Add, left, right) {
        return result;
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::string(format!("{left}{right}")));
    }
    overload(BinaryOp::Add, left, right, ctx)
}

/// `- * / % ^`. `string * n` repeats the string.
pub fn arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    ctx: &dyn EvaluationContext,
) -> EvalResult {
    if let Some(result) = numeric::arithmetic(op, left, right) {
        return result;
    }
    if let (BinaryOp::Mul, Value::Str(s), Some(count)) = (op, left, right.as_i64()) {
        let count = usize::try_from(count).map_err(|_| numeric_conversion(right, "repeat count"))?;
        return repeat(s, count).map(Value::string);
    }
    overload(op, left, right, ctx)
}

fn repeat(s: &str, count: usize) -> EvalResult<String> {
    match s.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LENGTH => Ok(s.repeat(count)),
        _ => Err(result_too_large(
            "repeated string",
            MAX_REPEAT_LENGTH as u64,
            "bytes",
        )),
    }
}

fn overload(op: BinaryOp, left: &Value, right: &Value, ctx: &dyn EvaluationContext) -> EvalResult {
    let overloader = ctx.operator_overloader();
    if overloader.overrides_operation(op, left, right) {
        overloader.operate(op, left, right)
    } else {
        Err(operator_not_supported(op.as_symbol(), left, right))
    }
}

/// `&&` and `||` on two already evaluated operands. The interpreter
/// short-circuits before it gets here.
pub fn logical(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<bool> {
    let Some(a) = left.as_bool() else {
        return Err(type_mismatch("a boolean", left));
    };
    let Some(b) = right.as_bool() else {
        return Err(type_mismatch("a boolean", right));
    };
    match op {
        BinaryOp::And => Ok(a && b),
        BinaryOp::Or => Ok(a || b),
        _ => Err(operator_not_supported(op.as_symbol(), left, right)),
    }
}

pub fn unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => operand
            .negate()
            .ok_or_else(|| type_mismatch("a number", operand)),
        UnaryOp::Plus if operand.is_numeric() => Ok(operand.clone()),
        UnaryOp::Plus => Err(type_mismatch("a number", operand)),
        UnaryOp::Not => operand
            .as_bool()
            .map(|b| Value::Bool(!b))
            .ok_or_else(|| type_mismatch("a boolean", operand)),
    }
}

/// `==`: numbers after promotion, strings/booleans/null structurally,
/// collections element-wise, anything else through the comparator and
/// finally identity.
pub fn equals(left: &Value, right: &Value, ctx: &dyn EvaluationContext) -> EvalResult<bool> {
    Ok(match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (a, b) if a.is_numeric() && b.is_numeric() => numeric::equals(a, b)?,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::List(a), Value::List(b)) => seq_equals(a, b, ctx)?,
        (Value::Array(a), Value::Array(b)) => seq_equals(&a.items, &b.items, ctx)?,
        (Value::Map(a), Value::Map(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (key, value) in a.iter() {
                let Some(other) = b.get(key) else {
                    return Ok(false);
                };
                if !equals(value, other, ctx)? {
                    return Ok(false);
                }
            }
            true
        }
        (Value::Entry(a), Value::Entry(b)) => {
            equals(&a.0, &b.0, ctx)? && equals(&a.1, &b.1, ctx)?
        }
        (Value::Type(a), Value::Type(b)) => a == b,
        (a, b) => {
            let comparator = ctx.type_comparator();
            if comparator.can_compare(a, b) {
                comparator.compare(a, b)? == Ordering::Equal
            } else {
                a.ptr_eq(b)
            }
        }
    })
}

fn seq_equals(a: &[Value], b: &[Value], ctx: &dyn EvaluationContext) -> EvalResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !equals(x, y, ctx)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Order two values: numbers after promotion, strings lexicographically,
/// then the context's comparator. `Ok(None)` when a NaN is involved.
pub fn compare(
    left: &Value,
    right: &Value,
    ctx: &dyn EvaluationContext,
) -> EvalResult<Option<Ordering>> {
    if left.is_numeric() && right.is_numeric() {
        return numeric::compare(left, right);
    }
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Ok(Some(a.cmp(b)));
    }
    let comparator: &dyn TypeComparator = ctx.type_comparator();
    if comparator.can_compare(left, right) {
        return comparator.compare(left, right).map(Some);
    }
    Err(not_comparable(left, right))
}

/// `< <= > >=`. Unordered operands make every comparison false.
pub fn relational(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    ctx: &dyn EvaluationContext,
) -> EvalResult<bool> {
    let Some(ordering) = compare(left, right, ctx)? else {
        return Ok(false);
    };
    Ok(match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::Ge => ordering.is_ge(),
        _ => return Err(operator_not_supported(op.as_symbol(), left, right)),
    })
}

/// `value instanceof T(Type)`; `null` is an instance of nothing.
pub fn instance_of(left: &Value, right: &Value) -> EvalResult<bool> {
    match right {
        Value::Type(ty) => Ok(ty.is_instance(left)),
        other => Err(type_mismatch("a type", other)),
    }
}

/// `text matches 'regex'`: the whole of `text` must match.
pub fn matches(left: &Value, right: &Value, patterns: &PatternCache) -> EvalResult<bool> {
    let Value::Str(text) = left else {
        return Err(type_mismatch("a string", left));
    };
    let Value::Str(pattern) = right else {
        return Err(type_mismatch("a string pattern", right));
    };
    let regex = patterns.get_or_compile(pattern).map_err(|err| {
        EvalError::new(EvalErrorKind::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
    })?;
    Ok(regex.is_match(text))
}

/// `value between {low, high}`, inclusive at both ends.
pub fn between(left: &Value, right: &Value, ctx: &dyn EvaluationContext) -> EvalResult<bool> {
    let bounds = match right {
        Value::List(items) => items.as_slice(),
        Value::Array(array) => array.items.as_slice(),
        _ => &[],
    };
    let [low, high] = bounds else {
        return Err(type_mismatch("a two-element list", right));
    };
    let above_low = compare(low, left, ctx)?.is_some_and(Ordering::is_le);
    Ok(above_low && compare(left, high, ctx)?.is_some_and(Ordering::is_le))
}

/// Elvis treats `null` and the empty string as absent.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Str(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests;
