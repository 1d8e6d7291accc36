//! Emission buffer with an abstract descriptor stack.
//!
//! [`CodeFlow`] mirrors, at every emission point, the descriptor of each
//! value the stack machine will hold there. Emitters consult the top
//! descriptor to decide which widening a parent node needs, and the final
//! stack gives the compiled expression's result descriptor.

use xel_ir::TypeDesc;

use crate::instr::{Instr, Prim};
use crate::EmitError;

#[derive(Debug, Default)]
pub struct CodeFlow {
    code: Vec<Instr>,
    descs: Vec<TypeDesc>,
}

impl CodeFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an instruction that pushes one value described by `desc`.
    pub fn push(&mut self, instr: Instr, desc: TypeDesc) {
        self.code.push(instr);
        self.descs.push(desc);
    }

    /// Emit an instruction that consumes `arity` values and pushes one.
    pub fn reduce(&mut self, instr: Instr, arity: usize, desc: TypeDesc) -> Result<(), EmitError> {
        for _ in 0..arity {
            self.pop_desc()?;
        }
        self.push(instr, desc);
        Ok(())
    }

    /// Emit an instruction that leaves the stack shape unchanged.
    pub fn emit(&mut self, instr: Instr) {
        self.code.push(instr);
    }

    pub fn top(&self) -> Result<&TypeDesc, EmitError> {
        self.descs.last().ok_or(EmitError::StackUnderflow)
    }

    /// Forget the top descriptor without emitting anything, for values a
    /// jump consumes on one path.
    pub fn pop_desc(&mut self) -> Result<TypeDesc, EmitError> {
        self.descs.pop().ok_or(EmitError::StackUnderflow)
    }

    /// Promote the top value to `to` when it is narrower.
    pub fn widen_top(&mut self, to: Prim) -> Result<(), EmitError> {
        let from = Prim::of(self.top()?).ok_or(EmitError::NotNumeric)?;
        if from < to {
            self.code.push(Instr::Widen(to));
            self.pop_desc()?;
            self.descs.push(to.desc());
        }
        Ok(())
    }

    /// Emit a jump with a placeholder target; [`CodeFlow::patch`] fixes it.
    pub fn emit_jump(&mut self, jump: fn(usize) -> Instr) -> usize {
        let at = self.code.len();
        self.code.push(jump(usize::MAX));
        at
    }

    /// Point the jump at `at` to the next instruction emitted.
    pub fn patch(&mut self, at: usize) -> Result<(), EmitError> {
        let target = self.code.len();
        match self.code.get_mut(at) {
            Some(
                Instr::Jump(dest)
                | Instr::JumpIfFalse(dest)
                | Instr::JumpIfFalseOrPop(dest)
                | Instr::JumpIfTrueOrPop(dest),
            ) => {
                *dest = target;
                Ok(())
            }
            _ => Err(EmitError::NotAJump { at }),
        }
    }

    /// Finish emission; exactly one value must be left on the stack.
    pub fn finish(mut self) -> Result<(Vec<Instr>, TypeDesc), EmitError> {
        let result = self.pop_desc()?;
        if !self.descs.is_empty() {
            return Err(EmitError::UnbalancedStack {
                depth: self.descs.len() + 1,
            });
        }
        Ok((self.code, result))
    }
}

#[cfg(test)]
mod tests;
