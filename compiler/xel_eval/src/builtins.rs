//! Built-in types, static members, constructors and methods.
//!
//! Each lookup returns `None` when the built-ins have nothing by that name
//! or arity, so the interpreter can fall through to host objects and the
//! evaluation context before reporting a not-found error.

mod methods;
mod types;

pub(crate) use methods::{char_at, element_at, invoke_method, map_get, read_property};
pub(crate) use types::{construct, find_type, invoke_static, read_static};

use xel_ir::Value;

use crate::errors::{index_out_of_bounds, numeric_conversion, type_mismatch, EvalResult};

fn len_to_value(len: usize) -> EvalResult {
    i32::try_from(len)
        .map(Value::Int)
        .map_err(|_| numeric_conversion(&len, "Integer"))
}

fn index_arg(value: &Value) -> EvalResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| type_mismatch("an integer index", value))
}

/// `index` as a position in a sequence of `len` elements.
fn checked_index(index: i64, len: usize) -> EvalResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn str_arg(value: &Value) -> EvalResult<&str> {
    value.as_str().ok_or_else(|| type_mismatch("a string", value))
}

#[cfg(test)]
mod tests;
