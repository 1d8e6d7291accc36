#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use xel_ir::{TypeDesc, Value};

use super::CodeFlow;
use crate::instr::{ArithOp, Instr, Prim};
use crate::EmitError;

#[test]
fn widening_is_emitted_only_for_narrower_operands() {
    let mut flow = CodeFlow::new();
    flow.push(Instr::Const(Value::Int(1)), TypeDesc::Int);
    flow.widen_top(Prim::Double).unwrap();
    flow.push(Instr::Const(Value::Double(2.0)), TypeDesc::Double);
    flow.widen_top(Prim::Double).unwrap();
    flow.reduce(
        Instr::Arith {
            op: ArithOp::Add,
            prim: Prim::Double,
        },
        2,
        TypeDesc::Double,
    )
    .unwrap();

    let (code, result) = flow.finish().unwrap();
    assert_eq!(result, TypeDesc::Double);
    assert_eq!(
        code,
        vec![
            Instr::Const(Value::Int(1)),
            Instr::Widen(Prim::Double),
            Instr::Const(Value::Double(2.0)),
            Instr::Arith {
                op: ArithOp::Add,
                prim: Prim::Double,
            },
        ]
    );
}

#[test]
fn widening_a_non_number_is_rejected() {
    let mut flow = CodeFlow::new();
    flow.push(Instr::Const(Value::from("a")), TypeDesc::String);
    assert_eq!(flow.widen_top(Prim::Long), Err(EmitError::NotNumeric));
}

#[test]
fn patch_points_a_jump_at_the_next_instruction() {
    let mut flow = CodeFlow::new();
    flow.push(Instr::Const(Value::Bool(true)), TypeDesc::Boolean);
    let jump = flow.emit_jump(Instr::JumpIfTrueOrPop);
    flow.pop_desc().unwrap();
    flow.push(Instr::Const(Value::Bool(false)), TypeDesc::Boolean);
    flow.patch(jump).unwrap();

    let (code, _) = flow.finish().unwrap();
    assert_eq!(code[1], Instr::JumpIfTrueOrPop(3));
}

#[test]
fn patching_a_non_jump_fails() {
    let mut flow = CodeFlow::new();
    flow.push(Instr::LoadRoot, TypeDesc::Object);
    assert_eq!(flow.patch(0), Err(EmitError::NotAJump { at: 0 }));
}

#[test]
fn finish_needs_exactly_one_value() {
    assert_eq!(CodeFlow::new().finish(), Err(EmitError::StackUnderflow));

    let mut flow = CodeFlow::new();
    flow.push(Instr::LoadRoot, TypeDesc::Object);
    flow.push(Instr::LoadRoot, TypeDesc::Object);
    assert_eq!(
        flow.finish(),
        Err(EmitError::UnbalancedStack { depth: 2 })
    );
}

#[test]
fn reduce_underflows_on_missing_operands() {
    let mut flow = CodeFlow::new();
    flow.push(Instr::Const(Value::Bool(true)), TypeDesc::Boolean);
    assert_eq!(
        flow.reduce(Instr::Not, 2, TypeDesc::Boolean),
        Err(EmitError::StackUnderflow)
    );
}
