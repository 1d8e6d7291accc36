//! Numeric promotion and arithmetic.
//!
//! Two numeric operands are promoted to the wider of their representations,
//! ordered `int < long < BigInteger < float < double < BigDecimal`. Integral
//! arithmetic is checked: an `int` result that overflows widens to `long`,
//! a `long` result to `BigInteger`. Nothing wraps silently.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use xel_ir::{BinaryOp, Value};

use crate::errors::{
    division_by_zero, numeric_conversion, operator_not_supported, result_too_large, EvalResult,
};

/// Widest integral `^` result, in bits, before evaluation gives up.
const MAX_POWER_BITS: u64 = 1 << 20;

/// Numeric representation, in promotion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumKind {
    Int,
    Long,
    BigInt,
    Float,
    Double,
    Decimal,
}

impl NumKind {
    /// `None` for non-numeric values.
    pub fn of(value: &Value) -> Option<NumKind> {
        Some(match value {
            Value::Int(_) => NumKind::Int,
            Value::Long(_) => NumKind::Long,
            Value::BigInt(_) => NumKind::BigInt,
            Value::Float(_) => NumKind::Float,
            Value::Double(_) => NumKind::Double,
            Value::Decimal(_) => NumKind::Decimal,
            _ => return None,
        })
    }

    pub fn is_integral(self) -> bool {
        self <= NumKind::BigInt
    }

    /// Representation both operands are promoted to.
    pub fn promote(left: &Value, right: &Value) -> Option<NumKind> {
        Some(NumKind::of(left)?.max(NumKind::of(right)?))
    }
}

#[derive(Copy, Clone)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Arith {
    fn from_op(op: BinaryOp) -> Option<Arith> {
        Some(match op {
            BinaryOp::Add => Arith::Add,
            BinaryOp::Sub => Arith::Sub,
            BinaryOp::Mul => Arith::Mul,
            BinaryOp::Div => Arith::Div,
            BinaryOp::Mod => Arith::Mod,
            _ => return None,
        })
    }
}

/// Apply `+ - * / % ^` to two numeric operands.
///
/// `None` when either operand is not numeric or `op` is not arithmetic; the
/// caller decides what other meaning the operator has.
pub fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Option<EvalResult> {
    let kind = NumKind::promote(left, right)?;
    if op == BinaryOp::Pow {
        return Some(power(left, right));
    }
    let arith = Arith::from_op(op)?;
    Some(promoted_arith(arith, kind, left, right))
}

fn promoted_arith(arith: Arith, kind: NumKind, left: &Value, right: &Value) -> EvalResult {
    match kind {
        NumKind::Int => int_arith(arith, to_i64(left)?, to_i64(right)?),
        NumKind::Long => long_arith(arith, to_i64(left)?, to_i64(right)?),
        NumKind::BigInt => big_arith(arith, &to_big(left)?, &to_big(right)?),
        NumKind::Float => Ok(Value::Float(float_arith(arith, to_f32(left)?, to_f32(right)?))),
        NumKind::Double => Ok(Value::Double(double_arith(arith, to_f64(left)?, to_f64(right)?))),
        NumKind::Decimal => decimal_arith(arith, to_decimal(left)?, to_decimal(right)?),
    }
}

/// Order two numeric operands after promotion. `Ok(None)` when a NaN makes
/// them unordered.
pub fn compare(left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
    let Some(kind) = NumKind::promote(left, right) else {
        return Err(crate::errors::not_comparable(left, right));
    };
    Ok(match kind {
        NumKind::Int | NumKind::Long => Some(to_i64(left)?.cmp(&to_i64(right)?)),
        NumKind::BigInt => Some(to_big(left)?.cmp(&to_big(right)?)),
        NumKind::Float => to_f32(left)?.partial_cmp(&to_f32(right)?),
        NumKind::Double => to_f64(left)?.partial_cmp(&to_f64(right)?),
        // NaN, infinities and doubles beyond Decimal's range compare as doubles.
        NumKind::Decimal => match (to_decimal(left), to_decimal(right)) {
            (Ok(a), Ok(b)) => Some(a.cmp(&b)),
            _ => to_f64(left)?.partial_cmp(&to_f64(right)?),
        },
    })
}

/// Numeric equality across representations: `1 == 1L == 1.0`.
pub fn equals(left: &Value, right: &Value) -> EvalResult<bool> {
    Ok(compare(left, right)? == Some(Ordering::Equal))
}

// Representation-specific arithmetic

fn int_arith(op: Arith, a: i64, b: i64) -> EvalResult {
    // Both operands fit i32, so every i64 result below is exact.
    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => checked_integral(b == 0, || a / b)?,
        Arith::Mod => checked_integral(b == 0, || a % b)?,
    };
    Ok(narrow_to_int(result))
}

fn long_arith(op: Arith, a: i64, b: i64) -> EvalResult {
    let result = match op {
        Arith::Add => a.checked_add(b),
        Arith::Sub => a.checked_sub(b),
        Arith::Mul => a.checked_mul(b),
        Arith::Div => checked_integral(b == 0, || a.checked_div(b))?,
        Arith::Mod => checked_integral(b == 0, || a.checked_rem(b))?,
    };
    match result {
        Some(n) => Ok(Value::Long(n)),
        None => big_arith(op, &BigInt::from(a), &BigInt::from(b)),
    }
}

fn big_arith(op: Arith, a: &BigInt, b: &BigInt) -> EvalResult {
    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => checked_integral(b.is_zero(), || a / b)?,
        Arith::Mod => checked_integral(b.is_zero(), || a % b)?,
    };
    Ok(Value::big_int(result))
}

fn float_arith(op: Arith, a: f32, b: f32) -> f32 {
    match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
        Arith::Mod => a % b,
    }
}

fn double_arith(op: Arith, a: f64, b: f64) -> f64 {
    match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
        Arith::Mod => a % b,
    }
}

fn decimal_arith(op: Arith, a: Decimal, b: Decimal) -> EvalResult {
    let result = match op {
        Arith::Add => a.checked_add(b),
        Arith::Sub => a.checked_sub(b),
        Arith::Mul => a.checked_mul(b),
        Arith::Div => checked_integral(b.is_zero(), || a.checked_div(b))?,
        Arith::Mod => checked_integral(b.is_zero(), || a.checked_rem(b))?,
    };
    result
        .map(Value::Decimal)
        .ok_or_else(|| numeric_conversion(&a, "BigDecimal"))
}

/// Zero guard for integral and decimal division.
#[inline]
fn checked_integral<T>(divisor_is_zero: bool, op: impl FnOnce() -> T) -> EvalResult<T> {
    if divisor_is_zero {
        Err(division_by_zero())
    } else {
        Ok(op())
    }
}

fn narrow_to_int(n: i64) -> Value {
    i32::try_from(n).map_or(Value::Long(n), Value::Int)
}

// Exponentiation

/// `left ^ right`.
///
/// Integral operands with a non-negative exponent compute exactly; the
/// result keeps at least the wider operand's representation and widens as
/// far as the magnitude needs. Negative exponents and floating operands go
/// through `powf`. A `BigDecimal` base needs an integral exponent. Integral
/// results wider than `MAX_POWER_BITS` are refused.
pub fn power(left: &Value, right: &Value) -> EvalResult {
    let (Some(base_kind), Some(exp_kind)) = (NumKind::of(left), NumKind::of(right)) else {
        return Err(operator_not_supported("^", left, right));
    };
    if base_kind.is_integral() && exp_kind.is_integral() {
        let exponent = to_big(right)?;
        if !exponent.is_negative() {
            let exponent = exponent
                .to_u32()
                .ok_or_else(|| numeric_conversion(right, "int exponent"))?;
            let base = to_big(left)?;
            // Lower bound on the result's width; 0, 1 and -1 stay small.
            let bits = base.bits().saturating_sub(1).saturating_mul(u64::from(exponent));
            if bits > MAX_POWER_BITS {
                return Err(result_too_large("integer power", MAX_POWER_BITS, "bits"));
            }
            return Ok(narrow_integral(base.pow(exponent), base_kind.max(exp_kind)));
        }
    }
    if base_kind == NumKind::Decimal {
        if !exp_kind.is_integral() {
            return Err(operator_not_supported("^", left, right));
        }
        let exponent = to_i64(right)?;
        return decimal_pow(to_decimal(left)?, exponent).map(Value::Decimal);
    }
    if base_kind.max(exp_kind) == NumKind::Float {
        return Ok(Value::Float(to_f32(left)?.powf(to_f32(right)?)));
    }
    Ok(Value::Double(to_f64(left)?.powf(to_f64(right)?)))
}

/// Smallest representation at least as wide as `min` that holds `n`.
fn narrow_integral(n: BigInt, min: NumKind) -> Value {
    if min == NumKind::Int {
        if let Some(small) = n.to_i32() {
            return Value::Int(small);
        }
    }
    if min <= NumKind::Long {
        if let Some(wide) = n.to_i64() {
            return Value::Long(wide);
        }
    }
    Value::big_int(n)
}

/// Square-and-multiply; a negative exponent takes the reciprocal.
fn decimal_pow(base: Decimal, exponent: i64) -> EvalResult<Decimal> {
    let overflow = || numeric_conversion(&base, "BigDecimal");
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(square).ok_or_else(overflow)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.checked_mul(square).ok_or_else(overflow)?;
        }
    }
    if exponent < 0 {
        if result.is_zero() {
            return Err(division_by_zero());
        }
        result = Decimal::ONE.checked_div(result).ok_or_else(overflow)?;
    }
    Ok(result)
}

// Conversions between representations

/// Convert a numeric value to representation `kind`.
pub fn coerce(value: &Value, kind: NumKind) -> EvalResult {
    Ok(match kind {
        NumKind::Int => {
            let n = to_i64(value)?;
            Value::Int(i32::try_from(n).map_err(|_| numeric_conversion(value, "Integer"))?)
        }
        NumKind::Long => Value::Long(to_i64(value)?),
        NumKind::BigInt => Value::big_int(to_big(value)?),
        NumKind::Float => Value::Float(to_f32(value)?),
        NumKind::Double => Value::Double(to_f64(value)?),
        NumKind::Decimal => Value::Decimal(to_decimal(value)?),
    })
}

pub fn to_i64(value: &Value) -> EvalResult<i64> {
    value.as_i64().ok_or_else(|| numeric_conversion(value, "Long"))
}

pub fn to_big(value: &Value) -> EvalResult<BigInt> {
    match value {
        Value::Int(n) => Ok(BigInt::from(*n)),
        Value::Long(n) => Ok(BigInt::from(*n)),
        Value::BigInt(n) => Ok((**n).clone()),
        _ => Err(numeric_conversion(value, "BigInteger")),
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "promotion to float rounds like a widening primitive conversion"
)]
pub fn to_f32(value: &Value) -> EvalResult<f32> {
    match value {
        Value::Int(n) => Ok(*n as f32),
        Value::Long(n) => Ok(*n as f32),
        Value::BigInt(n) => n.to_f32().ok_or_else(|| numeric_conversion(value, "Float")),
        Value::Float(n) => Ok(*n),
        Value::Double(n) => Ok(*n as f32),
        Value::Decimal(d) => d.to_f32().ok_or_else(|| numeric_conversion(value, "Float")),
        _ => Err(numeric_conversion(value, "Float")),
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "promotion to double rounds like a widening primitive conversion"
)]
pub fn to_f64(value: &Value) -> EvalResult<f64> {
    match value {
        Value::Int(n) => Ok(f64::from(*n)),
        Value::Long(n) => Ok(*n as f64),
        Value::BigInt(n) => n.to_f64().ok_or_else(|| numeric_conversion(value, "Double")),
        Value::Float(n) => Ok(f64::from(*n)),
        Value::Double(n) => Ok(*n),
        Value::Decimal(d) => d.to_f64().ok_or_else(|| numeric_conversion(value, "Double")),
        _ => Err(numeric_conversion(value, "Double")),
    }
}

pub fn to_decimal(value: &Value) -> EvalResult<Decimal> {
    let converted = match value {
        Value::Int(n) => Some(Decimal::from(*n)),
        Value::Long(n) => Some(Decimal::from(*n)),
        Value::BigInt(n) => n.to_i128().and_then(Decimal::from_i128),
        Value::Float(n) => Decimal::from_f32(*n),
        Value::Double(n) => Decimal::from_f64(*n),
        Value::Decimal(d) => Some(*d),
        _ => None,
    };
    converted.ok_or_else(|| numeric_conversion(value, "BigDecimal"))
}
