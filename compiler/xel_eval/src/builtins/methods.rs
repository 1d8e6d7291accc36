//! Methods and properties of built-in values.

use xel_ir::{MapKey, Value, ValueMap};

use super::{checked_index, index_arg, len_to_value, str_arg};
use crate::context::EvaluationContext;
use crate::errors::{index_out_of_bounds, invalid_map_key, EvalResult};
use crate::operators;

/// `target.name(args)` for strings, sequences, maps and entries.
///
/// `None` when no built-in method has that name and arity.
pub(crate) fn invoke_method(
    target: &Value,
    name: &str,
    args: &[Value],
    ctx: &dyn EvaluationContext,
) -> Option<EvalResult> {
    let result = match target {
        Value::Str(s) => string_method(s, name, args),
        Value::List(items) => sequence_method(items, name, args, ctx),
        Value::Array(array) => sequence_method(&array.items, name, args, ctx),
        Value::Map(map) => map_method(map, name, args),
        Value::Entry(entry) => entry_method(entry, name, args),
        _ => None,
    };
    result.or_else(|| match (name, args) {
        ("toString", []) => Some(Ok(Value::string(target.to_string()))),
        _ => None,
    })
}

/// `target.name` for maps (key lookup, missing key is null) and entries.
pub(crate) fn read_property(target: &Value, name: &str) -> Option<Value> {
    match target {
        Value::Map(map) => Some(map.get(&MapKey::from(name)).cloned().unwrap_or(Value::Null)),
        Value::Entry(entry) => match name {
            "key" => Some(entry.0.clone()),
            "value" => Some(entry.1.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Bounds-checked element of a list or array.
pub(crate) fn element_at(items: &[Value], index: &Value) -> EvalResult {
    let raw = index_arg(index)?;
    let position = checked_index(raw, items.len())?;
    items
        .get(position)
        .cloned()
        .ok_or_else(|| index_out_of_bounds(raw, items.len()))
}

/// `map[key]`; a missing key is null.
pub(crate) fn map_get(map: &ValueMap, key: &Value) -> EvalResult {
    let key = MapKey::from_value(key).ok_or_else(|| invalid_map_key(key))?;
    Ok(map.get(&key).cloned().unwrap_or(Value::Null))
}

fn string_method(s: &str, name: &str, args: &[Value]) -> Option<EvalResult> {
    Some(match (name, args) {
        ("length", []) => len_to_value(s.chars().count()),
        ("isEmpty", []) => Ok(Value::Bool(s.is_empty())),
        ("toUpperCase", []) => Ok(Value::string(s.to_uppercase())),
        ("toLowerCase", []) => Ok(Value::string(s.to_lowercase())),
        ("trim", []) => Ok(Value::string(s.trim())),
        ("toString", []) => Ok(Value::string(s)),
        ("substring", [begin]) => substring(s, begin, None),
        ("substring", [begin, end]) => substring(s, begin, Some(end)),
        ("contains", [needle]) => str_arg(needle).map(|n| Value::Bool(s.contains(n))),
        ("startsWith", [prefix]) => str_arg(prefix).map(|p| Value::Bool(s.starts_with(p))),
        ("endsWith", [suffix]) => str_arg(suffix).map(|p| Value::Bool(s.ends_with(p))),
        ("concat", [other]) => str_arg(other).map(|o| Value::string(format!("{s}{o}"))),
        ("indexOf", [needle]) => str_arg(needle).and_then(|n| {
            s.find(n)
                .map_or(Ok(Value::Int(-1)), |byte| len_to_value(s[..byte].chars().count()))
        }),
        ("charAt", [index]) => char_at(s, index),
        _ => return None,
    })
}

/// Character-indexed `substring(begin[, end])`.
fn substring(s: &str, begin: &Value, end: Option<&Value>) -> EvalResult {
    let len = s.chars().count();
    let begin = index_arg(begin)?;
    let end = match end {
        Some(end) => index_arg(end)?,
        None => i64::try_from(len).unwrap_or(i64::MAX),
    };
    let in_range = |i: i64| usize::try_from(i).ok().filter(|&i| i <= len);
    let (Some(from), Some(to)) = (in_range(begin), in_range(end)) else {
        let bad = if in_range(begin).is_none() { begin } else { end };
        return Err(index_out_of_bounds(bad, len));
    };
    if from > to {
        return Err(index_out_of_bounds(begin, len));
    }
    Ok(Value::string(s.chars().skip(from).take(to - from).collect::<String>()))
}

pub(crate) fn char_at(s: &str, index: &Value) -> EvalResult {
    let raw = index_arg(index)?;
    let len = s.chars().count();
    let position = checked_index(raw, len)?;
    s.chars()
        .nth(position)
        .map(|c| Value::string(c.to_string()))
        .ok_or_else(|| index_out_of_bounds(raw, len))
}

fn sequence_method(
    items: &[Value],
    name: &str,
    args: &[Value],
    ctx: &dyn EvaluationContext,
) -> Option<EvalResult> {
    Some(match (name, args) {
        ("size", []) => len_to_value(items.len()),
        ("isEmpty", []) => Ok(Value::Bool(items.is_empty())),
        ("get", [index]) => element_at(items, index),
        ("contains", [needle]) => position(items, needle, ctx).map(|p| Value::Bool(p.is_some())),
        ("indexOf", [needle]) => {
            position(items, needle, ctx).and_then(|p| p.map_or(Ok(Value::Int(-1)), len_to_value))
        }
        _ => return None,
    })
}

fn position(items: &[Value], needle: &Value, ctx: &dyn EvaluationContext) -> EvalResult<Option<usize>> {
    for (i, item) in items.iter().enumerate() {
        if operators::equals(item, needle, ctx)? {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

fn map_method(map: &ValueMap, name: &str, args: &[Value]) -> Option<EvalResult> {
    Some(match (name, args) {
        ("size", []) => len_to_value(map.len()),
        ("isEmpty", []) => Ok(Value::Bool(map.is_empty())),
        ("get", [key]) => map_get(map, key),
        ("containsKey", [key]) => MapKey::from_value(key)
            .map(|key| Value::Bool(map.contains_key(&key)))
            .ok_or_else(|| invalid_map_key(key)),
        ("keySet", []) => Ok(Value::list(map.keys().map(MapKey::to_value).collect())),
        ("values", []) => Ok(Value::list(map.values().cloned().collect())),
        _ => return None,
    })
}

fn entry_method(entry: &(Value, Value), name: &str, args: &[Value]) -> Option<EvalResult> {
    match (name, args) {
        ("getKey", []) => Some(Ok(entry.0.clone())),
        ("getValue", []) => Some(Ok(entry.1.clone())),
        _ => None,
    }
}
