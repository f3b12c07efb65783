//! # Opcode Execution
//!
//! One-step semantics for every non-flow-control opcode. Flow control
//! (IF/NOTIF/ELSE/ENDIF) lives in the interpreter loop, which owns the
//! branch state.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use sha2::{Digest, Sha256};
use stackscript_ops::{is_truthy, pad_num, Opcode};

use crate::error::{ExecError, Result};
use crate::stack::Stack;

/// Execute one non-flow-control opcode against the stacks.
///
/// Flow-control opcodes are refused with [`ExecError::UnsupportedOpcode`];
/// only the interpreter loop, which owns the branch state, runs them.
pub fn execute_op(op: Opcode, stack: &mut Stack, altstack: &mut Stack) -> Result<()> {
    use Opcode::*;

    // Constant pushes first; everything else manipulates existing values.
    if let Some(n) = op.small_int() {
        stack.push_num(&BigInt::from(n));
        return Ok(());
    }

    match op {
        // ========== Stack manipulation ==========
        OpToAltStack => {
            let v = stack.pop(op)?;
            altstack.push(v);
        }
        OpFromAltStack => {
            let v = altstack.pop(op).map_err(|_| ExecError::AltStackUnderflow)?;
            stack.push(v);
        }
        OpDrop => {
            stack.pop(op)?;
        }
        Op2Drop => {
            stack.pop(op)?;
            stack.pop(op)?;
        }
        OpDup => {
            let v = stack.peek(0, op)?.clone();
            stack.push(v);
        }
        Op2Dup => {
            for _ in 0..2 {
                let v = stack.peek(1, op)?.clone();
                stack.push(v);
            }
        }
        Op3Dup => {
            for _ in 0..3 {
                let v = stack.peek(2, op)?.clone();
                stack.push(v);
            }
        }
        OpOver => {
            let v = stack.peek(1, op)?.clone();
            stack.push(v);
        }
        Op2Over => {
            for _ in 0..2 {
                let v = stack.peek(3, op)?.clone();
                stack.push(v);
            }
        }
        OpSwap => {
            let v = stack.remove(1, op)?;
            stack.push(v);
        }
        Op2Swap => {
            for _ in 0..2 {
                let v = stack.remove(3, op)?;
                stack.push(v);
            }
        }
        OpRot => {
            let v = stack.remove(2, op)?;
            stack.push(v);
        }
        Op2Rot => {
            for _ in 0..2 {
                let v = stack.remove(5, op)?;
                stack.push(v);
            }
        }
        OpNip => {
            stack.remove(1, op)?;
        }
        OpTuck => {
            let v = stack.peek(0, op)?.clone();
            stack.insert(2, v, op)?;
        }
        OpPick => {
            let depth = stack.pop_index(op)?;
            if depth >= stack.depth() {
                return Err(ExecError::DepthOutOfRange {
                    depth,
                    size: stack.depth(),
                });
            }
            let v = stack.peek(depth, op)?.clone();
            stack.push(v);
        }
        OpRoll => {
            let depth = stack.pop_index(op)?;
            if depth >= stack.depth() {
                return Err(ExecError::DepthOutOfRange {
                    depth,
                    size: stack.depth(),
                });
            }
            let v = stack.remove(depth, op)?;
            stack.push(v);
        }
        OpDepth => {
            stack.push_num(&BigInt::from(stack.depth()));
        }

        // ========== Byte strings ==========
        OpCat => {
            let x2 = stack.pop(op)?;
            let mut x1 = stack.pop(op)?;
            x1.extend_from_slice(&x2);
            stack.push(x1);
        }
        OpSplit => {
            let index = stack.pop_index(op)?;
            let x = stack.pop(op)?;
            if index > x.len() {
                return Err(ExecError::SplitOutOfRange {
                    index,
                    length: x.len(),
                });
            }
            let (left, right) = x.split_at(index);
            stack.push(left.to_vec());
            stack.push(right.to_vec());
        }
        OpSize => {
            let len = stack.peek(0, op)?.len();
            stack.push_num(&BigInt::from(len));
        }
        OpNum2Bin => {
            let size = stack.pop_index(op)?;
            let x = stack.pop(op)?;
            stack.push(pad_num(&x, size)?);
        }
        OpBin2Num => {
            let n = stack.pop_num(op)?;
            stack.push_num(&n);
        }

        // ========== Equality ==========
        OpEqual => {
            let x2 = stack.pop(op)?;
            let x1 = stack.pop(op)?;
            stack.push_bool(x1 == x2);
        }
        OpEqualVerify => {
            let x2 = stack.pop(op)?;
            let x1 = stack.pop(op)?;
            if x1 != x2 {
                return Err(ExecError::EqualVerifyFailed { left: x1, right: x2 });
            }
        }
        OpVerify => {
            let v = stack.pop(op)?;
            if !is_truthy(&v) {
                return Err(ExecError::VerifyFailed);
            }
        }

        // ========== Arithmetic ==========
        Op1Add => unary_num(stack, op, |a| a + 1)?,
        Op1Sub => unary_num(stack, op, |a| a - 1)?,
        OpNegate => unary_num(stack, op, |a| -a)?,
        OpAbs => unary_num(stack, op, |a| a.abs())?,
        OpNot => {
            let a = stack.pop_num(op)?;
            stack.push_bool(a.is_zero());
        }
        OpAdd => binary_num(stack, op, |a, b| Ok(a + b))?,
        OpSub => binary_num(stack, op, |a, b| Ok(a - b))?,
        OpMul => binary_num(stack, op, |a, b| Ok(a * b))?,
        OpDiv => binary_num(stack, op, |a, b| {
            if b.is_zero() {
                Err(ExecError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        })?,
        OpMod => binary_num(stack, op, |a, b| {
            // Truncated semantics: the result keeps the dividend's sign,
            // landing in (-|b|, |b|).
            if b.is_zero() {
                Err(ExecError::DivisionByZero)
            } else {
                Ok(a % b)
            }
        })?,

        // ========== Comparison ==========
        OpNumEqual => binary_bool(stack, op, |a, b| a == b)?,
        OpNumEqualVerify => {
            let b = stack.pop_num(op)?;
            let a = stack.pop_num(op)?;
            if a != b {
                return Err(ExecError::NumEqualVerifyFailed);
            }
        }
        OpLessThan => binary_bool(stack, op, |a, b| a < b)?,
        OpGreaterThan => binary_bool(stack, op, |a, b| a > b)?,
        OpLessThanOrEqual => binary_bool(stack, op, |a, b| a <= b)?,
        OpGreaterThanOrEqual => binary_bool(stack, op, |a, b| a >= b)?,
        OpMin => binary_num(stack, op, |a, b| Ok(a.min(b)))?,
        OpMax => binary_num(stack, op, |a, b| Ok(a.max(b)))?,

        // ========== Hashing ==========
        OpSha256 => {
            let v = stack.pop(op)?;
            stack.push(Sha256::digest(&v).to_vec());
        }
        OpHash256 => {
            let v = stack.pop(op)?;
            stack.push(Sha256::digest(Sha256::digest(&v)).to_vec());
        }
        OpRipemd160 | OpSha1 | OpHash160 => {
            return Err(ExecError::UnsupportedOpcode(op));
        }

        // Flow control needs the interpreter's branch state; rejected
        // here so a direct caller cannot corrupt a stack with it.
        OpIf | OpNotIf | OpElse | OpEndIf => {
            return Err(ExecError::UnsupportedOpcode(op));
        }
        _ => unreachable!("constants handled above"),
    }

    Ok(())
}

fn unary_num<F>(stack: &mut Stack, op: Opcode, f: F) -> Result<()>
where
    F: FnOnce(BigInt) -> BigInt,
{
    let a = stack.pop_num(op)?;
    stack.push_num(&f(a));
    Ok(())
}

fn binary_num<F>(stack: &mut Stack, op: Opcode, f: F) -> Result<()>
where
    F: FnOnce(BigInt, BigInt) -> Result<BigInt>,
{
    let b = stack.pop_num(op)?;
    let a = stack.pop_num(op)?;
    stack.push_num(&f(a, b)?);
    Ok(())
}

fn binary_bool<F>(stack: &mut Stack, op: Opcode, f: F) -> Result<()>
where
    F: FnOnce(&BigInt, &BigInt) -> bool,
{
    let b = stack.pop_num(op)?;
    let a = stack.pop_num(op)?;
    stack.push_bool(f(&a, &b));
    Ok(())
}
