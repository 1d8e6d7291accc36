//! Which nodes compiled mode can handle.
//!
//! A node is compilable when its evaluation can be written as a fixed
//! sequence of typed instructions given the descriptors profiled for it and
//! its children. Nodes the interpreter never reached, or saw with more than
//! one descriptor, are never compilable.

use std::sync::Arc;

use xel_eval::TypeProfile;
use xel_ir::{Ast, BinaryOp, Expr, ExprId, ExprKind, TypeDesc, UnaryOp, Value};
use xel_stack::ensure_sufficient_stack;

use crate::instr::{ArithOp, CmpKind, CmpOp, Prim};

/// How one compilable node is emitted.
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    Const(&'a Value),
    /// `#this` or `#root`; compiled code always runs with the root as
    /// active context.
    Root,
    Var(&'a Arc<str>),
    /// Property read on the active context.
    Property(&'a Arc<str>),
    /// Start node followed by plain property steps.
    Chain {
        start: ExprId,
        steps: Vec<(ExprId, &'a Arc<str>)>,
    },
    Neg {
        operand: ExprId,
        prim: Prim,
    },
    Plus(ExprId),
    Not(ExprId),
    Arith {
        op: ArithOp,
        left: ExprId,
        right: ExprId,
        prim: Prim,
    },
    Compare {
        op: CmpOp,
        left: ExprId,
        right: ExprId,
        kind: CmpKind,
    },
    Logic {
        and: bool,
        left: ExprId,
        right: ExprId,
    },
    Ternary {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    /// Operands of a flattened string concatenation, leftmost first.
    Concat(Vec<ExprId>),
}

impl Shape<'_> {
    /// Nodes emitted as part of this one.
    pub(crate) fn children(&self) -> Vec<ExprId> {
        match self {
            Shape::Const(_) | Shape::Root | Shape::Var(_) | Shape::Property(_) => Vec::new(),
            Shape::Chain { start, .. } => vec![*start],
            Shape::Neg { operand, .. } | Shape::Plus(operand) | Shape::Not(operand) => {
                vec![*operand]
            }
            Shape::Arith { left, right, .. }
            | Shape::Compare { left, right, .. }
            | Shape::Logic { left, right, .. } => vec![*left, *right],
            Shape::Ternary {
                cond,
                then_expr,
                else_expr,
            } => vec![*cond, *then_expr, *else_expr],
            Shape::Concat(operands) => operands.clone(),
        }
    }
}

/// `true` when `id` and everything below it can be compiled from the
/// descriptors observed so far.
pub fn is_compilable(ast: &Ast, profile: &TypeProfile, id: ExprId) -> bool {
    ensure_sufficient_stack(|| {
        classify(ast, profile, id).is_some_and(|shape| {
            shape
                .children()
                .into_iter()
                .all(|child| is_compilable(ast, profile, child))
        })
    })
}

/// Descriptor a node is known to produce: its constant's, or the stable
/// profiled one.
pub(crate) fn desc_of(ast: &Ast, profile: &TypeProfile, id: ExprId) -> Option<TypeDesc> {
    match &ast.arena().get_expr(id).constant {
        Some(value) => Some(value.type_desc()),
        None => profile.stable(id).cloned(),
    }
}

/// Local shape of one node, checking only its own and its direct
/// operands' descriptors.
pub(crate) fn classify<'a>(ast: &'a Ast, profile: &TypeProfile, id: ExprId) -> Option<Shape<'a>> {
    let expr = ast.arena().get_expr(id);
    if let Some(value) = &expr.constant {
        return Some(Shape::Const(value));
    }
    let desc = profile.stable(id)?;
    let operand = |id| desc_of(ast, profile, id);
    match &expr.kind {
        ExprKind::This | ExprKind::Root => Some(Shape::Root),
        ExprKind::Variable(name) => Some(Shape::Var(name)),
        ExprKind::PropertyOrField {
            name,
            null_safe: false,
        } => Some(Shape::Property(name)),
        ExprKind::Compound(steps) => chain(ast, profile, ast.arena().get_expr_list(*steps)),
        ExprKind::Unary { op, operand: inner } => {
            let inner_desc = operand(*inner)?;
            match op {
                UnaryOp::Neg => {
                    let prim = Prim::of(&inner_desc)?;
                    (*desc == inner_desc).then_some(Shape::Neg {
                        operand: *inner,
                        prim,
                    })
                }
                UnaryOp::Plus => {
                    (Prim::of(&inner_desc).is_some() && *desc == inner_desc)
                        .then_some(Shape::Plus(*inner))
                }
                UnaryOp::Not => (inner_desc == TypeDesc::Boolean && *desc == TypeDesc::Boolean)
                    .then_some(Shape::Not(*inner)),
            }
        }
        ExprKind::Binary { op, left, right } => {
            binary(ast, profile, id, desc, *op, *left, *right)
        }
        ExprKind::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            let compilable = operand(*cond)? == TypeDesc::Boolean
                && operand(*then_expr).as_ref() == Some(desc)
                && operand(*else_expr).as_ref() == Some(desc);
            compilable.then_some(Shape::Ternary {
                cond: *cond,
                then_expr: *then_expr,
                else_expr: *else_expr,
            })
        }
        _ => None,
    }
}

fn chain<'a>(ast: &'a Ast, profile: &TypeProfile, steps: &'a [ExprId]) -> Option<Shape<'a>> {
    let (&start, rest) = steps.split_first()?;
    let steps = rest
        .iter()
        .map(|&step| match &ast.arena().get_expr(step).kind {
            ExprKind::PropertyOrField {
                name,
                null_safe: false,
            } => profile.stable(step).map(|_| (step, name)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Shape::Chain { start, steps })
}

fn binary<'a>(
    ast: &'a Ast,
    profile: &TypeProfile,
    id: ExprId,
    desc: &TypeDesc,
    op: BinaryOp,
    left: ExprId,
    right: ExprId,
) -> Option<Shape<'a>> {
    let left_desc = desc_of(ast, profile, left)?;
    let right_desc = desc_of(ast, profile, right)?;
    match op {
        BinaryOp::And | BinaryOp::Or => {
            let boolean = [&left_desc, &right_desc, desc]
                .iter()
                .all(|d| **d == TypeDesc::Boolean);
            boolean.then_some(Shape::Logic {
                and: op == BinaryOp::And,
                left,
                right,
            })
        }
        BinaryOp::Add if *desc == TypeDesc::String => {
            concat_operands(ast, profile, id).map(Shape::Concat)
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let prim = Prim::of(&left_desc)?.max(Prim::of(&right_desc)?);
            (*desc == prim.desc()).then_some(Shape::Arith {
                op: arith_op(op)?,
                left,
                right,
                prim,
            })
        }
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            if *desc != TypeDesc::Boolean {
                return None;
            }
            let op = cmp_op(op)?;
            let kind = match (&left_desc, &right_desc) {
                (TypeDesc::String, TypeDesc::String) => CmpKind::Str,
                (TypeDesc::Boolean, TypeDesc::Boolean) if matches!(op, CmpOp::Eq | CmpOp::Ne) => {
                    CmpKind::Bool
                }
                (l, r) => CmpKind::Num(Prim::of(l)?.max(Prim::of(r)?)),
            };
            Some(Shape::Compare {
                op,
                left,
                right,
                kind,
            })
        }
        BinaryOp::Pow
        | BinaryOp::InstanceOf
        | BinaryOp::Matches
        | BinaryOp::Between => None,
    }
}

/// Operands of the string concatenation rooted at `id`, following the
/// same left spine of non-constant `+` nodes the interpreter flattens.
///
/// The spine stops at the first node below `id` that did not produce a
/// string; that node becomes the leftmost operand and is compiled on its
/// own. The deepest string node must have a string operand, otherwise its
/// string came from an operator overload.
fn concat_operands(ast: &Ast, profile: &TypeProfile, id: ExprId) -> Option<Vec<ExprId>> {
    let arena = ast.arena();
    let mut rights = Vec::new();
    let mut node = id;
    while let Expr {
        kind:
            ExprKind::Binary {
                op: BinaryOp::Add,
                left,
                right,
            },
        constant: None,
        ..
    } = arena.get_expr(node)
    {
        if profile.stable(node) != Some(&TypeDesc::String) {
            break;
        }
        rights.push(*right);
        node = *left;
    }
    let first_right = *rights.last()?;
    let is_string = |id| desc_of(ast, profile, id) == Some(TypeDesc::String);
    if !is_string(node) && !is_string(first_right) {
        return None;
    }
    let mut operands = Vec::with_capacity(rights.len() + 1);
    operands.push(node);
    operands.extend(rights.into_iter().rev());
    Some(operands)
}

fn arith_op(op: BinaryOp) -> Option<ArithOp> {
    Some(match op {
        BinaryOp::Add => ArithOp::Add,
        BinaryOp::Sub => ArithOp::Sub,
        BinaryOp::Mul => ArithOp::Mul,
        BinaryOp::Div => ArithOp::Div,
        BinaryOp::Mod => ArithOp::Rem,
        _ => return None,
    })
}

fn cmp_op(op: BinaryOp) -> Option<CmpOp> {
    Some(match op {
        BinaryOp::Eq => CmpOp::Eq,
        BinaryOp::Ne => CmpOp::Ne,
        BinaryOp::Lt => CmpOp::Lt,
        BinaryOp::Le => CmpOp::Le,
        BinaryOp::Gt => CmpOp::Gt,
        BinaryOp::Ge => CmpOp::Ge,
        _ => return None,
    })
}

#[cfg(test)]
mod tests;
