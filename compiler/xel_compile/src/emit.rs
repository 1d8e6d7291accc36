//! Emission of compilable nodes into a [`CodeFlow`].

use xel_eval::TypeProfile;
use xel_ir::{Ast, ExprId, TypeDesc};
use xel_stack::ensure_sufficient_stack;

use crate::code_flow::CodeFlow;
use crate::compilable::{classify, desc_of, Shape};
use crate::instr::{CmpKind, Instr, Prim};
use crate::EmitError;

pub(crate) struct Emitter<'a> {
    ast: &'a Ast,
    profile: &'a TypeProfile,
    flow: CodeFlow,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(ast: &'a Ast, profile: &'a TypeProfile) -> Self {
        Emitter {
            ast,
            profile,
            flow: CodeFlow::new(),
        }
    }

    pub(crate) fn finish(self) -> Result<(Vec<Instr>, TypeDesc), EmitError> {
        self.flow.finish()
    }

    pub(crate) fn emit(&mut self, id: ExprId) -> Result<(), EmitError> {
        ensure_sufficient_stack(|| self.emit_inner(id))
    }

    fn desc(&self, id: ExprId) -> Result<TypeDesc, EmitError> {
        desc_of(self.ast, self.profile, id).ok_or(EmitError::NotCompilable { node: id })
    }

    /// Emit a load followed by a guard on its profiled descriptor.
    fn guarded(&mut self, load: Instr, arity: usize, desc: TypeDesc) -> Result<(), EmitError> {
        self.flow.reduce(load, arity, desc.clone())?;
        self.flow.emit(Instr::Guard(desc));
        Ok(())
    }

    fn emit_inner(&mut self, id: ExprId) -> Result<(), EmitError> {
        let shape =
            classify(self.ast, self.profile, id).ok_or(EmitError::NotCompilable { node: id })?;
        match shape {
            Shape::Const(value) => {
                self.flow.push(Instr::Const(value.clone()), value.type_desc());
            }
            Shape::Root => self.guarded(Instr::LoadRoot, 0, self.desc(id)?)?,
            Shape::Var(name) => self.guarded(Instr::LoadVar(name.clone()), 0, self.desc(id)?)?,
            Shape::Property(name) => {
                self.flow.push(Instr::LoadRoot, TypeDesc::Object);
                self.guarded(Instr::GetProperty(name.clone()), 1, self.desc(id)?)?;
            }
            Shape::Chain { start, steps } => {
                self.emit(start)?;
                for (step, name) in steps {
                    self.guarded(Instr::GetProperty(name.clone()), 1, self.desc(step)?)?;
                }
            }
            Shape::Neg { operand, prim } => {
                self.emit(operand)?;
                self.flow.reduce(Instr::Neg(prim), 1, prim.desc())?;
            }
            Shape::Plus(operand) => self.emit(operand)?,
            Shape::Not(operand) => {
                self.emit(operand)?;
                self.flow.reduce(Instr::Not, 1, TypeDesc::Boolean)?;
            }
            Shape::Arith {
                op,
                left,
                right,
                prim,
            } => {
                self.emit_operand(left, Some(prim))?;
                self.emit_operand(right, Some(prim))?;
                self.flow.reduce(Instr::Arith { op, prim }, 2, prim.desc())?;
            }
            Shape::Compare {
                op,
                left,
                right,
                kind,
            } => {
                let widen = match kind {
                    CmpKind::Num(prim) => Some(prim),
                    CmpKind::Str | CmpKind::Bool => None,
                };
                self.emit_operand(left, widen)?;
                self.emit_operand(right, widen)?;
                self.flow
                    .reduce(Instr::Compare { op, kind }, 2, TypeDesc::Boolean)?;
            }
            Shape::Logic { and, left, right } => {
                self.emit(left)?;
                let jump = self.flow.emit_jump(if and {
                    Instr::JumpIfFalseOrPop
                } else {
                    Instr::JumpIfTrueOrPop
                });
                // The fall-through path pops the left operand.
                self.flow.pop_desc()?;
                self.emit(right)?;
                self.flow.patch(jump)?;
            }
            Shape::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                self.emit(cond)?;
                let to_else = self.flow.emit_jump(Instr::JumpIfFalse);
                self.flow.pop_desc()?;
                self.emit(then_expr)?;
                let to_end = self.flow.emit_jump(Instr::Jump);
                // Only one branch's value is ever on the stack.
                self.flow.pop_desc()?;
                self.flow.patch(to_else)?;
                self.emit(else_expr)?;
                self.flow.patch(to_end)?;
            }
            Shape::Concat(operands) => {
                let count = operands.len();
                for operand in operands {
                    self.emit(operand)?;
                }
                self.flow
                    .reduce(Instr::Concat(count), count, TypeDesc::String)?;
            }
        }
        Ok(())
    }

    /// Emit an operand, promoting it to `widen_to` when given.
    fn emit_operand(&mut self, id: ExprId, widen_to: Option<Prim>) -> Result<(), EmitError> {
        self.emit(id)?;
        match widen_to {
            Some(prim) => self.flow.widen_top(prim),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
