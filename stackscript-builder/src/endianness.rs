//! # Endianness Macros
//!
//! Byte-order reversal by repeated single-byte splits and
//! swap-concatenates, plus the unsigned reinterpretation built on it.

use stackscript_ops::{Opcode, Script};

use crate::element::{MoveMode, StackBaseElement};
use crate::error::BuilderError;
use crate::push::nums_to_script;
use crate::relocate::move_element;

use Opcode::*;

/// Reverse the byte order of an element of exactly `length` bytes.
///
/// The element is split into single bytes left to right, then re-glued in
/// the opposite order; applying the script twice restores the input.
pub fn reverse_endianness_fixed_length(
    length: usize,
    element: &StackBaseElement,
    is_rolled: bool,
) -> Result<Script, BuilderError> {
    let mut out = move_element(element, MoveMode::rolling(is_rolled))?;
    for _ in 1..length {
        out += Script::from_opcodes(&[Op1, OpSplit]);
    }
    for _ in 1..length {
        out += Script::from_opcodes(&[OpSwap, OpCat]);
    }
    Ok(out)
}

/// Reverse the byte order of an element of at most `max_length` bytes.
///
/// The element is right-padded to `max_length + 1` bytes (one byte beyond
/// the bound, so the padding can never be read as a sign), reversed at that
/// fixed width, then cut back to its original length, recovered from the
/// size recorded before padding.
pub fn reverse_endianness_bounded_length(
    max_length: usize,
    element: &StackBaseElement,
    is_rolled: bool,
) -> Result<Script, BuilderError> {
    let mut out = move_element(element, MoveMode::rolling(is_rolled))?;

    // stack in:  [.., element]
    // stack out: [.., len(element), right_padded(element, max_length + 1)]
    out += Script::from_opcodes(&[OpSize, OpSwap]);
    out.push_slice(&[0x00]);
    out.push_opcode(OpCat);
    out += nums_to_script(&[max_length as i64 + 1]);
    out.push_opcode(OpNum2Bin);

    // stack out: [.., reverse_endianness(element)]
    out += reverse_endianness_fixed_length(
        max_length + 1,
        &StackBaseElement::new(0),
        true,
    )?;
    out += nums_to_script(&[max_length as i64 + 1]);
    out += Script::from_opcodes(&[OpRot, OpSub, OpSplit, OpNip]);

    Ok(out)
}

/// Convert a byte string of exactly `length` bytes to an unsigned integer.
///
/// The element is endianness-reversed, then a zero byte is appended before
/// the numeric conversion so a set top bit can never be read as a sign.
pub fn bytes_to_unsigned(
    length: usize,
    element: &StackBaseElement,
    is_rolled: bool,
) -> Result<Script, BuilderError> {
    let mut out = reverse_endianness_fixed_length(length, element, is_rolled)?;
    out.push_slice(&[0x00]);
    out += Script::from_opcodes(&[OpCat, OpBin2Num]);
    Ok(out)
}
