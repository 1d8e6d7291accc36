//! Built-in types for `T(...)` and `new`.

use std::str::FromStr;
use std::sync::Arc;

use num_bigint::BigInt;
use rust_decimal::Decimal;
use xel_ir::{TypeDesc, TypeRef, Value};

use crate::errors::{numeric_conversion, type_mismatch, EvalResult};
use crate::numeric::{self, NumKind};

const MATH: &str = "Math";

/// Package prefixes accepted in front of a built-in type name.
const PACKAGES: [&str; 3] = ["java.lang.", "java.util.", "java.math."];

/// Resolve a built-in type name, bare or package-qualified.
pub(crate) fn find_type(name: &str) -> Option<TypeRef> {
    let simple = PACKAGES
        .iter()
        .find_map(|package| name.strip_prefix(package))
        .unwrap_or(name);
    let desc = match simple {
        "String" => TypeDesc::String,
        "Integer" | "int" => TypeDesc::Int,
        "Long" | "long" => TypeDesc::Long,
        "Float" | "float" => TypeDesc::Float,
        "Double" | "double" => TypeDesc::Double,
        "Boolean" | "boolean" => TypeDesc::Boolean,
        "BigInteger" => TypeDesc::BigInteger,
        "BigDecimal" => TypeDesc::Decimal,
        "Number" => TypeDesc::Number,
        "Object" => TypeDesc::Object,
        "List" => TypeDesc::List,
        "Map" => TypeDesc::Map,
        MATH => TypeDesc::Named(Arc::from(MATH)),
        _ => return None,
    };
    Some(TypeRef::new(desc.to_string(), desc))
}

/// `T(type).NAME` constants.
pub(crate) fn read_static(ty: &TypeRef, name: &str) -> Option<Value> {
    Some(match (&ty.desc, name) {
        (TypeDesc::Int, "MAX_VALUE") => Value::Int(i32::MAX),
        (TypeDesc::Int, "MIN_VALUE") => Value::Int(i32::MIN),
        (TypeDesc::Long, "MAX_VALUE") => Value::Long(i64::MAX),
        (TypeDesc::Long, "MIN_VALUE") => Value::Long(i64::MIN),
        (TypeDesc::Double, "MAX_VALUE") => Value::Double(f64::MAX),
        // Smallest positive value, as on the JVM.
        (TypeDesc::Double, "MIN_VALUE") => Value::Double(f64::from_bits(1)),
        (TypeDesc::Double, "POSITIVE_INFINITY") => Value::Double(f64::INFINITY),
        (TypeDesc::Double, "NEGATIVE_INFINITY") => Value::Double(f64::NEG_INFINITY),
        (TypeDesc::Double, "NaN") => Value::Double(f64::NAN),
        (TypeDesc::Float, "MAX_VALUE") => Value::Float(f32::MAX),
        (TypeDesc::Float, "MIN_VALUE") => Value::Float(f32::from_bits(1)),
        (TypeDesc::Float, "POSITIVE_INFINITY") => Value::Float(f32::INFINITY),
        (TypeDesc::Float, "NEGATIVE_INFINITY") => Value::Float(f32::NEG_INFINITY),
        (TypeDesc::Float, "NaN") => Value::Float(f32::NAN),
        (TypeDesc::Boolean, "TRUE") => Value::Bool(true),
        (TypeDesc::Boolean, "FALSE") => Value::Bool(false),
        (TypeDesc::Named(type_name), "PI") if &**type_name == MATH => {
            Value::Double(std::f64::consts::PI)
        }
        (TypeDesc::Named(type_name), "E") if &**type_name == MATH => {
            Value::Double(std::f64::consts::E)
        }
        _ => return None,
    })
}

/// `T(type).method(args)`.
pub(crate) fn invoke_static(ty: &TypeRef, method: &str, args: &[Value]) -> Option<EvalResult> {
    if let TypeDesc::Named(type_name) = &ty.desc {
        return if &**type_name == MATH {
            math(method, args)
        } else {
            None
        };
    }
    match (&ty.desc, method, args) {
        (TypeDesc::String, "valueOf", [arg]) => Some(Ok(Value::string(arg.to_string()))),
        (TypeDesc::Int, "valueOf" | "parseInt", [arg])
        | (TypeDesc::Long, "valueOf" | "parseLong", [arg])
        | (TypeDesc::Float, "valueOf" | "parseFloat", [arg])
        | (TypeDesc::Double, "valueOf" | "parseDouble", [arg])
        | (TypeDesc::Boolean, "valueOf" | "parseBoolean", [arg])
        | (TypeDesc::BigInteger | TypeDesc::Decimal, "valueOf", [arg]) => convert(&ty.desc, arg),
        _ => None,
    }
}

/// `new Type(args)` for the boxed scalar types.
pub(crate) fn construct(ty: &TypeRef, args: &[Value]) -> Option<EvalResult> {
    match (&ty.desc, args) {
        (TypeDesc::String, []) => Some(Ok(Value::string(""))),
        (TypeDesc::String, [Value::Str(s)]) => Some(Ok(Value::Str(Arc::clone(s)))),
        (TypeDesc::String, [_]) => None,
        (desc, [arg]) => convert(desc, arg),
        _ => None,
    }
}

/// Convert a string or number to the scalar type `target`.
fn convert(target: &TypeDesc, arg: &Value) -> Option<EvalResult> {
    let kind = match target {
        TypeDesc::String => return Some(Ok(Value::string(arg.to_string()))),
        TypeDesc::Boolean => {
            return match arg {
                Value::Str(s) => Some(Ok(Value::Bool(s.eq_ignore_ascii_case("true")))),
                Value::Bool(b) => Some(Ok(Value::Bool(*b))),
                _ => None,
            }
        }
        TypeDesc::Int => NumKind::Int,
        TypeDesc::Long => NumKind::Long,
        TypeDesc::Float => NumKind::Float,
        TypeDesc::Double => NumKind::Double,
        TypeDesc::BigInteger => NumKind::BigInt,
        TypeDesc::Decimal => NumKind::Decimal,
        _ => return None,
    };
    match arg {
        Value::Str(s) => Some(parse_number(s.trim(), kind)),
        other if other.is_numeric() => Some(numeric::coerce(other, kind)),
        _ => None,
    }
}

fn parse_number(text: &str, kind: NumKind) -> EvalResult {
    let parsed = match kind {
        NumKind::Int => text.parse().ok().map(Value::Int),
        NumKind::Long => text.parse().ok().map(Value::Long),
        NumKind::BigInt => BigInt::from_str(text).ok().map(Value::big_int),
        NumKind::Float => text.parse().ok().map(Value::Float),
        NumKind::Double => text.parse().ok().map(Value::Double),
        NumKind::Decimal => Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .map(Value::Decimal),
    };
    parsed.ok_or_else(|| numeric_conversion(&text, kind_name(kind)))
}

fn kind_name(kind: NumKind) -> &'static str {
    match kind {
        NumKind::Int => "Integer",
        NumKind::Long => "Long",
        NumKind::BigInt => "BigInteger",
        NumKind::Float => "Float",
        NumKind::Double => "Double",
        NumKind::Decimal => "BigDecimal",
    }
}

fn math(method: &str, args: &[Value]) -> Option<EvalResult> {
    Some(match (method, args) {
        ("abs", [n]) => abs(n),
        ("max", [a, b]) => pick(a, b, std::cmp::Ordering::is_ge),
        ("min", [a, b]) => pick(a, b, std::cmp::Ordering::is_le),
        ("pow", [a, b]) => double_op(a, |a| Ok(a.powf(numeric::to_f64(b)?))),
        ("sqrt", [n]) => double_op(n, |n| Ok(n.sqrt())),
        ("floor", [n]) => double_op(n, |n| Ok(n.floor())),
        ("ceil", [n]) => double_op(n, |n| Ok(n.ceil())),
        ("round", [n]) => round(n),
        _ => return None,
    })
}

fn require_number(value: &Value) -> EvalResult<&Value> {
    if value.is_numeric() {
        Ok(value)
    } else {
        Err(type_mismatch("a number", value))
    }
}

fn abs(n: &Value) -> EvalResult {
    let n = require_number(n)?;
    if numeric::compare(n, &Value::Int(0))?.is_some_and(std::cmp::Ordering::is_lt) {
        n.negate().ok_or_else(|| type_mismatch("a number", n))
    } else {
        Ok(n.clone())
    }
}

/// `max`/`min`: both operands promoted, `keep_left` decides on the ordering
/// of left against right. NaN wins, as on the JVM.
fn pick(a: &Value, b: &Value, keep_left: fn(std::cmp::Ordering) -> bool) -> EvalResult {
    let (a, b) = (require_number(a)?, require_number(b)?);
    let Some(kind) = NumKind::promote(a, b) else {
        return Err(type_mismatch("a number", b));
    };
    let (a, b) = (numeric::coerce(a, kind)?, numeric::coerce(b, kind)?);
    Ok(match numeric::compare(&a, &b)? {
        Some(ordering) if keep_left(ordering) => a,
        Some(_) => b,
        None => Value::Double(f64::NAN),
    })
}

fn double_op(n: &Value, op: impl FnOnce(f64) -> EvalResult<f64>) -> EvalResult {
    let n = numeric::to_f64(require_number(n)?)?;
    op(n).map(Value::Double)
}

/// Round half up; `float` rounds to `int`, everything else to `long`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "float-to-integer casts saturate, matching the JVM's Math.round"
)]
fn round(n: &Value) -> EvalResult {
    Ok(match require_number(n)? {
        Value::Int(_) | Value::Long(_) => n.clone(),
        Value::Float(f) => Value::Int((f + 0.5).floor() as i32),
        other => Value::Long((numeric::to_f64(other)? + 0.5).floor() as i64),
    })
}
