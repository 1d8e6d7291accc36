//! Tree-walking interpreter.
//!
//! One [`Interpreter`] evaluates one [`Ast`] once: it owns the per-call
//! [`EvaluationState`] and optionally records the descriptor every node
//! produced into a [`TypeProfile`] for the compiler backend.

mod collections;
mod navigation;
mod scope_guard;

pub use navigation::read_property;

use tracing::trace;
use xel_ir::{Ast, BinaryOp, Expr, ExprId, ExprKind, TypeDesc, TypedValue, Value};
use xel_stack::ensure_sufficient_stack;

use crate::context::EvaluationContext;
use crate::errors::{not_assignable, type_mismatch, EvalResult};
use crate::operators;
use crate::pattern_cache::PatternCache;
use crate::profile::TypeProfile;
use crate::state::EvaluationState;

pub struct Interpreter<'a> {
    ast: &'a Ast,
    state: EvaluationState<'a>,
    patterns: &'a PatternCache,
    profile: Option<&'a mut TypeProfile>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        ast: &'a Ast,
        context: &'a mut dyn EvaluationContext,
        patterns: &'a PatternCache,
    ) -> Self {
        Interpreter {
            ast,
            state: EvaluationState::new(context),
            patterns,
            profile: None,
        }
    }

    /// Record every node's result descriptor into `profile`.
    #[must_use]
    pub fn with_profile(mut self, profile: &'a mut TypeProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Evaluate the whole expression.
    ///
    /// Only evaluations that complete normally count towards the profile's
    /// evaluation total.
    pub fn evaluate(&mut self) -> EvalResult<TypedValue> {
        let result = self.eval(self.ast.root())?;
        if let Some(profile) = self.profile.as_deref_mut() {
            profile.finish_evaluation();
        }
        Ok(result)
    }

    /// Evaluate one node. Errors leaving here carry the span of the
    /// innermost node that failed.
    pub(crate) fn eval(&mut self, id: ExprId) -> EvalResult<TypedValue> {
        let ast = self.ast;
        ensure_sufficient_stack(|| {
            let expr = ast.arena().get_expr(id);
            let result = self
                .eval_inner(id, expr)
                .map_err(|err| err.with_span(expr.span))?;
            trace!(node = ?id, desc = %result.type_desc, "evaluated");
            self.record(id, &result.type_desc);
            Ok(result)
        })
    }

    pub(crate) fn eval_value(&mut self, id: ExprId) -> EvalResult<Value> {
        self.eval(id).map(TypedValue::into_value)
    }

    fn eval_bool(&mut self, id: ExprId) -> EvalResult<bool> {
        let value = self.eval_value(id)?;
        value.as_bool().ok_or_else(|| {
            type_mismatch("a boolean", &value).with_span(self.ast.arena().get_expr(id).span)
        })
    }

    fn record(&mut self, id: ExprId, desc: &TypeDesc) {
        if let Some(profile) = self.profile.as_deref_mut() {
            profile.record(id, desc);
        }
    }

    fn eval_inner(&mut self, id: ExprId, expr: &'a Expr) -> EvalResult<TypedValue> {
        if let Some(value) = &expr.constant {
            return Ok(TypedValue::new(value.clone()));
        }
        match &expr.kind {
            // Literals always carry their value as the node constant.
            ExprKind::Literal => Ok(TypedValue::NULL),
            ExprKind::This => Ok(self.state.active_context().clone()),
            ExprKind::Root => Ok(self.state.root().clone()),
            ExprKind::Variable(name) => Ok(self
                .state
                .context()
                .lookup_variable(name)
                .map_or(TypedValue::NULL, TypedValue::new)),
            ExprKind::FunctionCall { name, args } => self.call_function(name, *args),
            ExprKind::PropertyOrField { name, null_safe } => self.property_step(name, *null_safe),
            ExprKind::MethodCall {
                name,
                args,
                null_safe,
            } => self.call_method(name, *args, *null_safe),
            ExprKind::Indexer { index, null_safe } => self.index(*index, *null_safe),
            ExprKind::Projection { body, null_safe } => self.project(*body, *null_safe),
            ExprKind::Selection {
                kind,
                body,
                null_safe,
            } => self.select(*kind, *body, *null_safe),
            ExprKind::Compound(steps) => self.eval_steps(self.ast.arena().get_expr_list(*steps)),
            ExprKind::TypeRef(name) => self.type_ref(name).map(|ty| TypedValue::new(Value::Type(ty))),
            ExprKind::Constructor { type_name, args } => self.construct(type_name, *args),
            ExprKind::BeanRef { name, factory } => self.bean(name, *factory),
            ExprKind::InlineList(items) => self.inline_list(*items),
            ExprKind::InlineMap(entries) => self.inline_map(*entries),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_value(*operand)?;
                operators::unary(*op, &operand).map(TypedValue::new)
            }
            ExprKind::Binary { op, left, right } => self.binary(id, *op, *left, *right),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval_bool(*cond)? {
                    self.eval(*then_expr)
                } else {
                    self.eval(*else_expr)
                }
            }
            ExprKind::Elvis { left, right } => {
                let left = self.eval(*left)?;
                if operators::is_absent(&left.value) {
                    self.eval(*right)
                } else {
                    Ok(left)
                }
            }
            ExprKind::Assign { target, value } => self.assign(*target, *value),
        }
    }

    fn binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> EvalResult<TypedValue> {
        match op {
            BinaryOp::And | BinaryOp::Or => {
                let left = self.eval_bool(left)?;
                // `false && _` and `true || _` skip the right operand.
                if left == (op == BinaryOp::Or) {
                    return Ok(TypedValue::new(Value::Bool(left)));
                }
                let right = self.eval_bool(right)?;
                return Ok(TypedValue::new(Value::Bool(right)));
            }
            BinaryOp::Add => return self.add_chain(id, left, right).map(TypedValue::new),
            _ => {}
        }
        let left = self.eval_value(left)?;
        let right = self.eval_value(right)?;
        let ctx = self.state.context();
        let value = match op {
            BinaryOp::Eq => Value::Bool(operators::equals(&left, &right, ctx)?),
            BinaryOp::Ne => Value::Bool(!operators::equals(&left, &right, ctx)?),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                Value::Bool(operators::relational(op, &left, &right, ctx)?)
            }
            BinaryOp::InstanceOf => Value::Bool(operators::instance_of(&left, &right)?),
            BinaryOp::Matches => Value::Bool(operators::matches(&left, &right, self.patterns)?),
            BinaryOp::Between => Value::Bool(operators::between(&left, &right, ctx)?),
            BinaryOp::Add => operators::add(&left, &right, ctx)?,
            BinaryOp::And | BinaryOp::Or => Value::Bool(operators::logical(op, &left, &right)?),
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
                operators::arithmetic(op, &left, &right, ctx)?
            }
        };
        Ok(TypedValue::new(value))
    }

    /// `a + b + c + ...`, evaluated left to right along the chain of
    /// non-constant `+` nodes. Once the running value is a string every
    /// further operand is appended to one buffer.
    fn add_chain(&mut self, id: ExprId, left: ExprId, right: ExprId) -> EvalResult {
        let arena = self.ast.arena();
        let mut chain = vec![(id, right)];
        let mut leftmost = left;
        while let Expr {
            kind:
                ExprKind::Binary {
                    op: BinaryOp::Add,
                    left,
                    right,
                },
            constant: None,
            ..
        } = arena.get_expr(leftmost)
        {
            chain.push((leftmost, *right));
            leftmost = *left;
        }

        let mut acc = self.eval_value(leftmost)?;
        let mut buffer: Option<String> = None;
        for (node, operand) in chain.into_iter().rev() {
            let operand = self.eval_value(operand)?;
            if let Some(buffer) = buffer.as_mut() {
                buffer.push_str(&operand.to_string());
            } else if matches!(acc, Value::Str(_)) || matches!(operand, Value::Str(_)) {
                buffer = Some(format!("{acc}{operand}"));
            } else {
                acc = operators::add(&acc, &operand, self.state.context())
                    .map_err(|err| err.with_span(arena.get_expr(node).span))?;
            }
            if node != id {
                let desc = buffer.as_ref().map_or_else(|| acc.type_desc(), |_| TypeDesc::String);
                self.record(node, &desc);
            }
        }
        Ok(buffer.map_or(acc, Value::string))
    }

    /// `target = value`. Variables are written to the context; properties
    /// through the receiver or the context's `write_property`.
    fn assign(&mut self, target: ExprId, value: ExprId) -> EvalResult<TypedValue> {
        let arena = self.ast.arena();
        match &arena.get_expr(target).kind {
            ExprKind::Variable(name) => {
                let value = self.eval(value)?;
                self.state
                    .context_mut()
                    .set_variable(name, value.value.clone());
                Ok(value)
            }
            ExprKind::PropertyOrField { name, .. } => {
                let receiver = self.state.active_context().value.clone();
                let value = self.eval(value)?;
                self.write_property(&receiver, name, value.value.clone())?;
                Ok(value)
            }
            ExprKind::Compound(steps) => {
                let steps = arena.get_expr_list(*steps);
                let Some((&last, init)) = steps.split_last() else {
                    return Err(not_assignable(self.ast.text(target)));
                };
                let ExprKind::PropertyOrField { name, null_safe } = &arena.get_expr(last).kind
                else {
                    return Err(not_assignable(self.ast.text(target)));
                };
                let receiver = self.eval_steps(init)?;
                if receiver.value.is_null() {
                    if *null_safe {
                        return Ok(TypedValue::NULL);
                    }
                    return Err(not_assignable(self.ast.text(target)));
                }
                let value = self.eval(value)?;
                self.write_property(&receiver.value, name, value.value.clone())?;
                Ok(value)
            }
            _ => Err(not_assignable(self.ast.text(target))),
        }
    }
}
