//! Compiled mode for hot xel expressions.
//!
//! After an expression has been interpreted often enough for its
//! [`TypeProfile`] to settle, [`compile`] turns the whole AST into a flat
//! sequence of type-specialised [`Instr`]:
//!
//! ```text
//! #price * 2 > 10    (Int, Int)
//!
//! LoadVar price; Guard Integer; Const 2; Arith Mul Int;
//! Const 10; Compare Gt Num(Int)
//! ```
//!
//! Compilation is advisory. Any node the backend cannot express leaves the
//! expression interpreted, and compiled code that meets a value outside
//! its assumptions returns a [`Deopt`] instead of a result.

mod code_flow;
mod compilable;
mod emit;
mod instr;
mod vm;

pub use code_flow::CodeFlow;
pub use compilable::is_compilable;
pub use instr::{ArithOp, CmpKind, CmpOp, Instr, Prim};
pub use vm::{CompiledExpression, Deopt};

use thiserror::Error;
use tracing::debug;
use xel_eval::TypeProfile;
use xel_ir::{Ast, ExprId};

use crate::emit::Emitter;

/// Why emission stopped. Never shown to users; [`compile`] logs it and
/// returns `None`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("{node:?} is not compilable with the observed descriptors")]
    NotCompilable { node: ExprId },
    #[error("descriptor stack underflow")]
    StackUnderflow,
    #[error("operand is not a primitive number")]
    NotNumeric,
    #[error("instruction {at} is not a jump")]
    NotAJump { at: usize },
    #[error("{depth} values left on the stack")]
    UnbalancedStack { depth: usize },
}

/// Compile `ast` from the descriptors recorded in `profile`.
///
/// `None` when any node is not compilable yet.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(ast: &Ast, profile: &TypeProfile) -> Option<CompiledExpression> {
    if !is_compilable(ast, profile, ast.root()) {
        debug!(expression = ast.source(), "not compilable");
        return None;
    }
    match emit(ast, profile) {
        Ok(compiled) => {
            debug!(
                expression = ast.source(),
                instructions = compiled.instructions().len(),
                result = %compiled.result_desc(),
                "compiled"
            );
            Some(compiled)
        }
        Err(err) => {
            debug!(expression = ast.source(), %err, "emission failed");
            None
        }
    }
}

fn emit(ast: &Ast, profile: &TypeProfile) -> Result<CompiledExpression, EmitError> {
    let mut emitter = Emitter::new(ast, profile);
    emitter.emit(ast.root())?;
    let (code, result) = emitter.finish()?;
    Ok(CompiledExpression::new(code, result))
}

#[cfg(test)]
mod test_helpers;
