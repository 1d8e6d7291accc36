//! Inline collections, projection and selection.

use xel_ir::{
    ExprId, ExprRange, MapKey, SelectionKind, TypeDesc, TypedValue, Value, ValueMap,
};

use super::Interpreter;
use crate::errors::{invalid_map_key, EvalError, EvalErrorKind, EvalResult};

impl Interpreter<'_> {
    /// `{a, b, c}` with at least one non-constant element.
    pub(super) fn inline_list(&mut self, items: ExprRange) -> EvalResult<TypedValue> {
        let ids = self.ast.arena().get_expr_list(items);
        let values = ids
            .iter()
            .map(|&id| self.eval_value(id))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(TypedValue::new(Value::list(values)))
    }

    /// `{k: v, ...}` with at least one non-constant key or value.
    pub(super) fn inline_map(&mut self, entries: ExprRange) -> EvalResult<TypedValue> {
        let ids = self.ast.arena().get_expr_list(entries);
        let mut map = ValueMap::with_capacity(ids.len() / 2);
        for pair in ids.chunks_exact(2) {
            let key = self.eval_value(pair[0])?;
            let key = MapKey::from_value(&key).ok_or_else(|| invalid_map_key(&key))?;
            let value = self.eval_value(pair[1])?;
            map.insert(key, value);
        }
        Ok(TypedValue::new(Value::map(map)))
    }

    /// Evaluate `body` with `element` as `#this`.
    fn eval_in_scope(&mut self, element: TypedValue, body: ExprId) -> EvalResult {
        let mut scoped = self.with_element_scope(element);
        scoped.eval_value(body)
    }

    /// `.![body]`: lists and maps project to lists, arrays to arrays whose
    /// element type is the common supertype of the results.
    pub(super) fn project(&mut self, body: ExprId, null_safe: bool) -> EvalResult<TypedValue> {
        let target = self.state.active_context().value.clone();
        match &target {
            Value::Null if null_safe => Ok(TypedValue::NULL),
            Value::List(items) => {
                let projected = self.project_items(items.iter().cloned(), body)?;
                Ok(TypedValue::new(Value::list(projected)))
            }
            Value::Map(map) => {
                let entries = map.iter().map(|(k, v)| Value::entry(k.to_value(), v.clone()));
                let projected = self.project_items(entries, body)?;
                Ok(TypedValue::new(Value::list(projected)))
            }
            Value::Array(array) => {
                let projected = self.project_items(array.items.iter().cloned(), body)?;
                let element = projected
                    .iter()
                    .fold(TypeDesc::Null, |acc, value| acc.common_supertype(&value.type_desc()));
                let element = if element == TypeDesc::Null {
                    TypeDesc::Object
                } else {
                    element
                };
                Ok(TypedValue::new(Value::array(element, projected)))
            }
            other => Err(EvalError::new(EvalErrorKind::ProjectionNotSupported {
                type_name: other.type_name(),
            })),
        }
    }

    fn project_items(
        &mut self,
        items: impl Iterator<Item = Value>,
        body: ExprId,
    ) -> EvalResult<Vec<Value>> {
        items
            .map(|item| self.eval_in_scope(TypedValue::new(item), body))
            .collect()
    }

    /// `.?[pred]`, `.^[pred]`, `.$[pred]`.
    pub(super) fn select(
        &mut self,
        kind: SelectionKind,
        body: ExprId,
        null_safe: bool,
    ) -> EvalResult<TypedValue> {
        let target = self.state.active_context().value.clone();
        let selected = match &target {
            Value::Null if null_safe => return Ok(TypedValue::NULL),
            Value::List(items) => {
                let picked = self.select_items(items, kind, body)?;
                single_or(kind, picked, Value::list)
            }
            Value::Array(array) => {
                let picked = self.select_items(&array.items, kind, body)?;
                let element = array.element.clone();
                single_or(kind, picked, |items| Value::array(element, items))
            }
            Value::Map(map) => {
                let mut picked = ValueMap::new();
                for (key, value) in map.iter() {
                    let entry = Value::entry(key.to_value(), value.clone());
                    if self.criteria(entry, body)? {
                        if kind == SelectionKind::Last {
                            picked.clear();
                        }
                        picked.insert(key.clone(), value.clone());
                        if kind == SelectionKind::First {
                            break;
                        }
                    }
                }
                if kind != SelectionKind::All && picked.is_empty() {
                    Value::Null
                } else {
                    Value::map(picked)
                }
            }
            other => {
                return Err(EvalError::new(EvalErrorKind::SelectionNotSupported {
                    type_name: other.type_name(),
                }))
            }
        };
        Ok(TypedValue::new(selected))
    }

    fn select_items(
        &mut self,
        items: &[Value],
        kind: SelectionKind,
        body: ExprId,
    ) -> EvalResult<Vec<Value>> {
        let mut picked = Vec::new();
        for item in items {
            if self.criteria(item.clone(), body)? {
                if kind == SelectionKind::Last {
                    picked.clear();
                }
                picked.push(item.clone());
                if kind == SelectionKind::First {
                    break;
                }
            }
        }
        Ok(picked)
    }

    /// Selection predicate for one element; must be a boolean.
    fn criteria(&mut self, element: Value, body: ExprId) -> EvalResult<bool> {
        let result = self.eval_in_scope(TypedValue::new(element), body)?;
        result.as_bool().ok_or_else(|| {
            EvalError::new(EvalErrorKind::SelectionCriteriaNotBoolean {
                found: result.type_name(),
            })
            .with_span(self.ast.arena().get_expr(body).span)
        })
    }
}

/// First/last selections yield the element itself (null when nothing
/// matched); `?[...]` wraps the matches with `collect`.
fn single_or(kind: SelectionKind, picked: Vec<Value>, collect: impl FnOnce(Vec<Value>) -> Value) -> Value {
    match kind {
        SelectionKind::All => collect(picked),
        SelectionKind::First | SelectionKind::Last => {
            picked.into_iter().next().unwrap_or(Value::Null)
        }
    }
}
