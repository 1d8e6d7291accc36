//! Pluggable ordering and operator-overloading hooks.

use std::cmp::Ordering;

use xel_ir::{BinaryOp, Value};

use crate::errors::{not_comparable, operator_not_supported, EvalResult};
use crate::numeric;

/// Orders values the evaluator cannot order itself.
///
/// Relational operators try numeric promotion and string ordering first;
/// everything else is delegated here.
pub trait TypeComparator: Send + Sync {
    fn can_compare(&self, left: &Value, right: &Value) -> bool;

    fn compare(&self, left: &Value, right: &Value) -> EvalResult<Ordering>;
}

/// Default ordering: `null` sorts first, then numbers, strings and booleans
/// each among their own kind.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardTypeComparator;

impl TypeComparator for StandardTypeComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Null, _) | (_, Value::Null) => true,
            (Value::Str(_), Value::Str(_)) | (Value::Bool(_), Value::Bool(_)) => true,
            (a, b) => a.is_numeric() && b.is_numeric(),
        }
    }

    fn compare(&self, left: &Value, right: &Value) -> EvalResult<Ordering> {
        match (left, right) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) => Ok(Ordering::Less),
            (_, Value::Null) => Ok(Ordering::Greater),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                // NaN sorts after every number.
                Ok(numeric::compare(a, b)?.unwrap_or_else(|| {
                    let a_nan = numeric::to_f64(a).is_ok_and(f64::is_nan);
                    let b_nan = numeric::to_f64(b).is_ok_and(f64::is_nan);
                    a_nan.cmp(&b_nan)
                }))
            }
            (a, b) => Err(not_comparable(a, b)),
        }
    }
}

/// Gives meaning to operators the evaluator does not support for the
/// operand types, such as `+` on two host objects.
pub trait OperatorOverloader: Send + Sync {
    fn overrides_operation(&self, op: BinaryOp, left: &Value, right: &Value) -> bool;

    fn operate(&self, op: BinaryOp, left: &Value, right: &Value) -> EvalResult;
}

/// Overloads nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardOperatorOverloader;

impl OperatorOverloader for StandardOperatorOverloader {
    fn overrides_operation(&self, _op: BinaryOp, _left: &Value, _right: &Value) -> bool {
        false
    }

    fn operate(&self, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
        Err(operator_not_supported(op.as_symbol(), left, right))
    }
}
