//! Stack machine running compiled expressions.
//!
//! Compiled code is only valid for the descriptors it was specialised on.
//! Anything outside that assumption (a failed guard, an overflow the
//! interpreter would have widened, a runtime error) stops execution with a
//! [`Deopt`]; the caller discards the compiled unit and re-runs the
//! interpreter, whose answer is authoritative.

use std::cmp::Ordering;
use std::sync::Arc;

use thiserror::Error;
use xel_eval::numeric;
use xel_eval::{read_property, EvalError, EvaluationContext};
use xel_ir::{TypeDesc, TypedValue, Value};

use crate::instr::{ArithOp, CmpKind, CmpOp, Instr, Prim};

/// Why compiled code gave up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Deopt {
    #[error("guard failed: expected {expected}, found {found}")]
    GuardFailed { expected: TypeDesc, found: TypeDesc },
    #[error("integer overflow")]
    Overflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("property `{name}` read on null")]
    NullReceiver { name: Arc<str> },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("malformed code at instruction {pc}")]
    Malformed { pc: usize },
}

/// A type-specialised instruction sequence for one expression.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    code: Box<[Instr]>,
    result: TypeDesc,
}

impl CompiledExpression {
    pub(crate) fn new(code: Vec<Instr>, result: TypeDesc) -> Self {
        CompiledExpression {
            code: code.into_boxed_slice(),
            result,
        }
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.code
    }

    /// Descriptor of the value the code produces.
    pub fn result_desc(&self) -> &TypeDesc {
        &self.result
    }

    /// Run against `ctx`. Compiled code never writes to the context.
    pub fn execute(&self, ctx: &dyn EvaluationContext) -> Result<TypedValue, Deopt> {
        let mut machine = Machine {
            stack: Vec::with_capacity(8),
            pc: 0,
        };
        while let Some(instr) = self.code.get(machine.pc) {
            machine.pc += 1;
            machine.step(instr, ctx)?;
        }
        let result = machine.pop()?;
        if machine.stack.is_empty() {
            Ok(result)
        } else {
            Err(machine.malformed())
        }
    }
}

struct Machine {
    stack: Vec<TypedValue>,
    /// Index of the next instruction.
    pc: usize,
}

impl Machine {
    fn malformed(&self) -> Deopt {
        Deopt::Malformed {
            pc: self.pc.saturating_sub(1),
        }
    }

    fn pop(&mut self) -> Result<TypedValue, Deopt> {
        self.stack.pop().ok_or_else(|| self.malformed())
    }

    fn pop_value(&mut self) -> Result<Value, Deopt> {
        self.pop().map(TypedValue::into_value)
    }

    fn push(&mut self, value: Value) {
        self.stack.push(TypedValue::new(value));
    }

    fn top_bool(&self) -> Result<bool, Deopt> {
        self.stack
            .last()
            .and_then(|top| top.value.as_bool())
            .ok_or_else(|| self.malformed())
    }

    fn step(&mut self, instr: &Instr, ctx: &dyn EvaluationContext) -> Result<(), Deopt> {
        match instr {
            Instr::Const(value) => self.push(value.clone()),
            Instr::LoadRoot => self.stack.push(ctx.root_object()),
            Instr::LoadVar(name) => self.push(ctx.lookup_variable(name).unwrap_or(Value::Null)),
            Instr::GetProperty(name) => {
                let receiver = self.pop_value()?;
                if receiver.is_null() {
                    return Err(Deopt::NullReceiver { name: name.clone() });
                }
                let value = read_property(&receiver, name, ctx)?;
                self.push(value);
            }
            Instr::Guard(expected) => {
                let found = &self.stack.last().ok_or_else(|| self.malformed())?.type_desc;
                if found != expected {
                    return Err(Deopt::GuardFailed {
                        expected: expected.clone(),
                        found: found.clone(),
                    });
                }
            }
            Instr::Widen(to) => {
                let value = self.pop_value()?;
                self.push(numeric::coerce(&value, to.num_kind())?);
            }
            Instr::Arith { op, prim } => {
                let right = self.pop_value()?;
                let left = self.pop_value()?;
                let value = arith(*op, *prim, &left, &right).ok_or_else(|| self.malformed())??;
                self.push(value);
            }
            Instr::Neg(prim) => {
                let value = match (prim, self.pop_value()?) {
                    (Prim::Int, Value::Int(n)) => Value::Int(n.checked_neg().ok_or(Deopt::Overflow)?),
                    (Prim::Long, Value::Long(n)) => {
                        Value::Long(n.checked_neg().ok_or(Deopt::Overflow)?)
                    }
                    (Prim::Float, Value::Float(n)) => Value::Float(-n),
                    (Prim::Double, Value::Double(n)) => Value::Double(-n),
                    _ => return Err(self.malformed()),
                };
                self.push(value);
            }
            Instr::Not => {
                let value = self.pop_value()?;
                let b = value.as_bool().ok_or_else(|| self.malformed())?;
                self.push(Value::Bool(!b));
            }
            Instr::Compare { op, kind } => {
                let right = self.pop_value()?;
                let left = self.pop_value()?;
                let ordering = compare(*kind, &left, &right).ok_or_else(|| self.malformed())?;
                self.push(Value::Bool(test(*op, ordering)));
            }
            Instr::Concat(count) => {
                let start = self
                    .stack
                    .len()
                    .checked_sub(*count)
                    .ok_or_else(|| self.malformed())?;
                let mut buffer = String::new();
                for part in self.stack.drain(start..) {
                    buffer.push_str(&part.value.to_string());
                }
                self.push(Value::string(buffer));
            }
            Instr::Jump(target) => self.pc = *target,
            Instr::JumpIfFalse(target) => {
                let value = self.pop_value()?;
                if !value.as_bool().ok_or_else(|| self.malformed())? {
                    self.pc = *target;
                }
            }
            Instr::JumpIfFalseOrPop(target) => {
                if self.top_bool()? {
                    self.stack.pop();
                } else {
                    self.pc = *target;
                }
            }
            Instr::JumpIfTrueOrPop(target) => {
                if self.top_bool()? {
                    self.pc = *target;
                } else {
                    self.stack.pop();
                }
            }
        }
        Ok(())
    }
}

/// Typed arithmetic on operands already widened to `prim`. `None` when the
/// operands do not have that representation.
fn arith(op: ArithOp, prim: Prim, left: &Value, right: &Value) -> Option<Result<Value, Deopt>> {
    Some(match (prim, left, right) {
        (Prim::Int, Value::Int(a), Value::Int(b)) => long_arith(op, i64::from(*a), i64::from(*b))
            .and_then(|n| i32::try_from(n).map_err(|_| Deopt::Overflow))
            .map(Value::Int),
        (Prim::Long, Value::Long(a), Value::Long(b)) => long_arith(op, *a, *b).map(Value::Long),
        (Prim::Float, Value::Float(a), Value::Float(b)) => Ok(Value::Float(match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Rem => a % b,
        })),
        (Prim::Double, Value::Double(a), Value::Double(b)) => Ok(Value::Double(match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Rem => a % b,
        })),
        _ => return None,
    })
}

/// Checked integral arithmetic. Overflow deoptimises, since the
/// interpreter widens the result instead.
fn long_arith(op: ArithOp, a: i64, b: i64) -> Result<i64, Deopt> {
    let result = match op {
        ArithOp::Add => a.checked_add(b),
        ArithOp::Sub => a.checked_sub(b),
        ArithOp::Mul => a.checked_mul(b),
        ArithOp::Div | ArithOp::Rem if b == 0 => return Err(Deopt::DivisionByZero),
        ArithOp::Div => a.checked_div(b),
        ArithOp::Rem => a.checked_rem(b),
    };
    result.ok_or(Deopt::Overflow)
}

/// `None` when the operands do not match `kind`; `Some(None)` when a NaN
/// leaves them unordered.
fn compare(kind: CmpKind, left: &Value, right: &Value) -> Option<Option<Ordering>> {
    Some(match (kind, left, right) {
        (CmpKind::Num(Prim::Int), Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (CmpKind::Num(Prim::Long), Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
        (CmpKind::Num(Prim::Float), Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (CmpKind::Num(Prim::Double), Value::Double(a), Value::Double(b)) => a.partial_cmp(b),
        (CmpKind::Str, Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (CmpKind::Bool, Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => return None,
    })
}

/// Unordered operands are unequal and fail every relational test.
fn test(op: CmpOp, ordering: Option<Ordering>) -> bool {
    match op {
        CmpOp::Eq => ordering == Some(Ordering::Equal),
        CmpOp::Ne => ordering != Some(Ordering::Equal),
        CmpOp::Lt => ordering.is_some_and(Ordering::is_lt),
        CmpOp::Le => ordering.is_some_and(Ordering::is_le),
        CmpOp::Gt => ordering.is_some_and(Ordering::is_gt),
        CmpOp::Ge => ordering.is_some_and(Ordering::is_ge),
    }
}
