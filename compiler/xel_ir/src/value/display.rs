//! String conversion used by concatenation and `toString()`.

use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Float(n) => write_real(f, f64::from(*n), format!("{n}"), format!("{n:E}")),
            Value::Double(n) => write_real(f, *n, format!("{n}"), format!("{n:E}")),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => write_seq(f, items),
            Value::Array(arr) => write_seq(f, &arr.items),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={v}", k.to_value())?;
                }
                f.write_str("}")
            }
            Value::Entry(entry) => write!(f, "{}={}", entry.0, entry.1),
            Value::Type(ty) => write!(f, "class {}", ty.name),
            Value::Function(func) => write!(f, "function {}", func.name()),
            Value::Object(obj) => obj.display(f),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Reals always show a fractional part (`1.0`); large and tiny magnitudes
/// switch to exponent form (`1.0E10`).
fn write_real(f: &mut fmt::Formatter<'_>, n: f64, plain: String, exp: String) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = n.abs();
    if n == 0.0 || (1e-3..1e7).contains(&magnitude) {
        if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{plain}.0")
        }
    } else {
        match exp.split_once('E') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                write!(f, "{mantissa}.0E{exponent}")
            }
            _ => f.write_str(&exp),
        }
    }
}
