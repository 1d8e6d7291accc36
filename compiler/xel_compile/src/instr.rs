//! Instruction set of the compiled form.
//!
//! A compiled expression is a flat list of [`Instr`] run by a small stack
//! machine. Typed instructions assume their operands already have the
//! named [`Prim`] representation; the emitter inserts [`Instr::Widen`]
//! wherever an operand has to be promoted first.

use std::sync::Arc;

use xel_eval::numeric::NumKind;
use xel_ir::{TypeDesc, Value};

/// Primitive numeric representations compiled code computes in, in
/// promotion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prim {
    Int,
    Long,
    Float,
    Double,
}

impl Prim {
    /// `None` for descriptors compiled arithmetic does not handle,
    /// including the arbitrary-precision kinds.
    pub fn of(desc: &TypeDesc) -> Option<Prim> {
        match desc {
            TypeDesc::Int => Some(Prim::Int),
            TypeDesc::Long => Some(Prim::Long),
            TypeDesc::Float => Some(Prim::Float),
            TypeDesc::Double => Some(Prim::Double),
            _ => None,
        }
    }

    pub fn desc(self) -> TypeDesc {
        match self {
            Prim::Int => TypeDesc::Int,
            Prim::Long => TypeDesc::Long,
            Prim::Float => TypeDesc::Float,
            Prim::Double => TypeDesc::Double,
        }
    }

    pub(crate) fn num_kind(self) -> NumKind {
        match self {
            Prim::Int => NumKind::Int,
            Prim::Long => NumKind::Long,
            Prim::Float => NumKind::Float,
            Prim::Double => NumKind::Double,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Operand family of a comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpKind {
    Num(Prim),
    Str,
    Bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    Const(Value),
    /// Push the root object, which is also `#this` at the top level.
    LoadRoot,
    /// Push a context variable, null when undefined.
    LoadVar(Arc<str>),
    /// Pop a receiver, push its property.
    GetProperty(Arc<str>),
    /// Deoptimise unless the top of the stack has this descriptor.
    Guard(TypeDesc),
    /// Promote the top of the stack.
    Widen(Prim),
    Arith { op: ArithOp, prim: Prim },
    Neg(Prim),
    Not,
    Compare { op: CmpOp, kind: CmpKind },
    /// Pop `n` values and push their string forms joined in order.
    Concat(usize),
    Jump(usize),
    /// Pop a boolean; jump when it is false.
    JumpIfFalse(usize),
    /// `&&`: when the top is false jump and keep it, otherwise pop it.
    JumpIfFalseOrPop(usize),
    /// `||`: when the top is true jump and keep it, otherwise pop it.
    JumpIfTrueOrPop(usize),
}
