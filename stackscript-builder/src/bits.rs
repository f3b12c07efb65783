//! # Bit Packing
//!
//! Horner-style accumulation of individually stacked bits into one
//! unsigned integer.

use stackscript_ops::{Opcode, Script};

use crate::element::{check_order, MoveMode, StackBaseElement, StackElement};
use crate::error::BuilderError;
use crate::relocate::move_element;

use Opcode::*;

/// Pack `m` ordered bit elements into an `m`-bit unsigned integer,
/// `sum(elements[i] * 2^i)`.
///
/// `elements[0]` is the least significant bit and must be listed deepest.
/// The accumulator starts from `elements[m-1]` and doubles-and-adds its way
/// down to `elements[0]`, so each bit picks up its weight from the doublings
/// after it. `rolling[i]` selects consume vs copy for `elements[i]`; each
/// copy deepens the not-yet-moved bits by one, which the per-step shift
/// accounts for.
pub fn unsigned_from_bits(
    elements: &[StackBaseElement],
    rolling: &[bool],
) -> Result<Script, BuilderError> {
    if rolling.len() != elements.len() {
        return Err(BuilderError::RollingCountMismatch {
            expected: elements.len(),
            found: rolling.len(),
        });
    }
    let refs: Vec<&dyn StackElement> = elements.iter().map(|e| e as _).collect();
    check_order(&refs)?;

    let m = elements.len();
    let mut out = move_element(&elements[m - 1], MoveMode::rolling(rolling[m - 1]))?;
    let mut shift: i64 = if rolling[m - 1] { 0 } else { 1 };
    for i in (0..m - 1).rev() {
        out += Script::from_opcodes(&[Op2, OpMul]);
        out += move_element(&elements[i].shift(shift), MoveMode::rolling(rolling[i]))?;
        out.push_opcode(OpAdd);
        shift -= rolling[i] as i64;
    }

    Ok(out)
}
