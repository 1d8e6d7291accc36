#![allow(clippy::unwrap_used, reason = "tests")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use xel_eval::{StandardEvaluationContext, TypeProfile};
use xel_ir::{TypeDesc, Value};

use super::Emitter;
use crate::instr::{ArithOp, CmpKind, CmpOp, Instr, Prim};
use crate::test_helpers::{ast, profiled, record};
use crate::EmitError;

fn emitted(source: &str, ctx: &mut StandardEvaluationContext) -> (Vec<Instr>, TypeDesc) {
    let (ast, profile) = profiled(source, ctx, 1);
    let mut emitter = Emitter::new(&ast, &profile);
    emitter.emit(ast.root()).unwrap();
    emitter.finish().unwrap()
}

fn var(name: &str) -> Instr {
    Instr::LoadVar(Arc::from(name))
}

#[test]
fn narrower_operand_is_widened_before_the_typed_add() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("a", 1);
    let (code, result) = emitted("#a + 2L", &mut ctx);
    assert_eq!(result, TypeDesc::Long);
    assert_eq!(
        code,
        vec![
            var("a"),
            Instr::Guard(TypeDesc::Int),
            Instr::Widen(Prim::Long),
            Instr::Const(Value::Long(2)),
            Instr::Arith {
                op: ArithOp::Add,
                prim: Prim::Long,
            },
        ]
    );
}

#[test]
fn ternary_jumps_around_the_untaken_branch() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("n", 1);
    let (code, result) = emitted("#n > 0 ? 'pos' : 'neg'", &mut ctx);
    assert_eq!(result, TypeDesc::String);
    assert_eq!(
        code,
        vec![
            var("n"),
            Instr::Guard(TypeDesc::Int),
            Instr::Const(Value::Int(0)),
            Instr::Compare {
                op: CmpOp::Gt,
                kind: CmpKind::Num(Prim::Int),
            },
            Instr::JumpIfFalse(7),
            Instr::Const(Value::from("pos")),
            Instr::Jump(8),
            Instr::Const(Value::from("neg")),
        ]
    );
}

#[test]
fn logical_and_keeps_a_false_left_operand() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("x", true).set_variable("y", false);
    let (code, _) = emitted("#x and #y", &mut ctx);
    assert_eq!(
        code,
        vec![
            var("x"),
            Instr::Guard(TypeDesc::Boolean),
            Instr::JumpIfFalseOrPop(5),
            var("y"),
            Instr::Guard(TypeDesc::Boolean),
        ]
    );
}

#[test]
fn root_properties_load_through_the_root() {
    let mut ctx = StandardEvaluationContext::new().with_root(record(&[("age", Value::Int(36))]));
    let (code, _) = emitted("age * 2", &mut ctx);
    assert_eq!(
        code,
        vec![
            Instr::LoadRoot,
            Instr::GetProperty(Arc::from("age")),
            Instr::Guard(TypeDesc::Int),
            Instr::Const(Value::Int(2)),
            Instr::Arith {
                op: ArithOp::Mul,
                prim: Prim::Int,
            },
        ]
    );
}

#[test]
fn concatenation_is_one_instruction() {
    let mut ctx = StandardEvaluationContext::new();
    ctx.set_variable("name", "Ada");
    let (code, result) = emitted("'Hello, ' + #name + '!'", &mut ctx);
    assert_eq!(result, TypeDesc::String);
    assert_eq!(
        code,
        vec![
            Instr::Const(Value::from("Hello, ")),
            var("name"),
            Instr::Guard(TypeDesc::String),
            Instr::Const(Value::from("!")),
            Instr::Concat(3),
        ]
    );
}

#[test]
fn emitting_an_unseen_node_fails() {
    let ast = ast("#a + 1");
    let profile = TypeProfile::new(ast.node_count());
    let mut emitter = Emitter::new(&ast, &profile);
    assert!(matches!(
        emitter.emit(ast.root()),
        Err(EmitError::NotCompilable { .. })
    ));
}
