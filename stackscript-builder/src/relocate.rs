//! # Depth Addressing and Relocation
//!
//! [`pick`] and [`roll`] emit the instruction sequence that copies or moves
//! a contiguous run of elements to the top of the stack, addressed by the
//! depth of the run's deepest element as seen before the sequence runs.
//!
//! Dispatch is by priority: a hand-tuned pattern table for the most common
//! (position, n_elements) pairs, dedicated small-integer pushes for depths
//! up to 16, runtime OP_DEPTH resolution for bottom-anchored positions, and
//! a generic number push otherwise. The pattern tables are empirical; the
//! entries are kept verbatim because replacing one changes instruction
//! counts even when the result stays correct.

use stackscript_ops::{encode_num_i64, Opcode, Script};

use crate::element::{MoveMode, StackElement};
use crate::error::BuilderError;
use crate::push::nums_to_script;

use Opcode::*;

/// Hand-optimized pick idioms, keyed by (position, n_elements).
fn pick_pattern(position: i64, n_elements: usize) -> Option<&'static [Opcode]> {
    match (position, n_elements) {
        (0, 1) => Some(&[OpDup]),
        (1, 1) => Some(&[OpOver]),
        (1, 2) => Some(&[Op2Dup]),
        (2, 3) => Some(&[Op3Dup]),
        (3, 2) => Some(&[Op2Over]),
        (3, 4) => Some(&[Op2Over, Op2Over]),
        _ => None,
    }
}

/// Hand-optimized roll idioms, keyed by (position, n_elements).
fn roll_pattern(position: i64, n_elements: usize) -> Option<&'static [Opcode]> {
    match (position, n_elements) {
        (1, 1) => Some(&[OpSwap]),
        (2, 1) => Some(&[OpRot]),
        (2, 2) => Some(&[OpRot, OpRot]),
        (3, 2) => Some(&[Op2Swap]),
        (3, 3) => Some(&[Op3, OpRoll, Op2Swap]),
        (5, 2) => Some(&[Op2Rot]),
        (5, 3) => Some(&[Op2Rot, Op5, OpRoll]),
        (5, 4) => Some(&[Op2Rot, Op2Rot]),
        _ => None,
    }
}

fn check_position(position: i64, n_elements: usize) -> Result<(), BuilderError> {
    if position >= 0 && position < n_elements as i64 - 1 {
        return Err(BuilderError::PositionTooSmall {
            position,
            n_elements,
        });
    }
    Ok(())
}

/// Resolve one bottom-anchored index to a depth at execution time.
///
/// OP_DEPTH pushes the current element count d; the element anchored at -k
/// sits at depth d - k once the count is on the stack.
fn depth_from_bottom(index: i64) -> Script {
    let mut out = Script::from(OpDepth);
    if index == -1 {
        out.push_opcode(Op1Sub);
    } else {
        out += nums_to_script(&[-index]);
        out.push_opcode(OpSub);
    }
    out
}

/// Copy the `n_elements` elements whose deepest member sits at `position`
/// to the top of the stack, preserving their relative order and leaving the
/// originals in place.
///
/// ```
/// use stackscript_builder::pick;
///
/// assert_eq!(pick(2, 2).unwrap().to_string(), "OP_2 OP_PICK OP_2 OP_PICK");
/// assert_eq!(pick(1, 2).unwrap().to_string(), "OP_2DUP");
/// assert_eq!(pick(-1, 1).unwrap().to_string(), "OP_DEPTH OP_1SUB OP_PICK");
/// ```
pub fn pick(position: i64, n_elements: usize) -> Result<Script, BuilderError> {
    check_position(position, n_elements)?;

    let mut out = Script::new();
    if let Some(pattern) = pick_pattern(position, n_elements) {
        out = Script::from_opcodes(pattern);
    } else if (0..=16).contains(&position) {
        for _ in 0..n_elements {
            // Unwrap is fine: position is inside the dedicated push range.
            out.push_opcode(Opcode::from_small_int(position).unwrap());
            out.push_opcode(OpPick);
        }
    } else if position < 0 {
        // Each copy grows the stack by one, so the anchor index walks one
        // step further from the bottom per iteration.
        let mut index = position;
        for _ in 0..n_elements {
            out += depth_from_bottom(index);
            out.push_opcode(OpPick);
            index -= 1;
        }
    } else {
        let encoded = encode_num_i64(position);
        for _ in 0..n_elements {
            out.push_slice(&encoded);
            out.push_opcode(OpPick);
        }
    }

    Ok(out)
}

/// Move the `n_elements` elements whose deepest member sits at `position`
/// to the top of the stack, preserving their relative order and removing
/// the originals.
///
/// When the run is already on top (`position == n_elements - 1`) the
/// emitted script is empty.
///
/// ```
/// use stackscript_builder::roll;
///
/// assert_eq!(roll(2, 2).unwrap().to_string(), "OP_ROT OP_ROT");
/// assert_eq!(roll(1, 1).unwrap().to_string(), "OP_SWAP");
/// assert!(roll(1, 2).unwrap().is_empty());
/// ```
pub fn roll(position: i64, n_elements: usize) -> Result<Script, BuilderError> {
    check_position(position, n_elements)?;

    if position == n_elements as i64 - 1 {
        return Ok(Script::new());
    }

    let mut out = Script::new();
    if let Some(pattern) = roll_pattern(position, n_elements) {
        out = Script::from_opcodes(pattern);
    } else if (1..=16).contains(&position) {
        for _ in 0..n_elements {
            // Unwrap is fine: position is inside the dedicated push range.
            out.push_opcode(Opcode::from_small_int(position).unwrap());
            out.push_opcode(OpRoll);
        }
    } else if position < 0 {
        // Moving does not change the stack size, so every iteration
        // re-resolves the same anchor.
        for _ in 0..n_elements {
            out += depth_from_bottom(position);
            out.push_opcode(OpRoll);
        }
    } else {
        let encoded = encode_num_i64(position);
        for _ in 0..n_elements {
            out.push_slice(&encoded);
            out.push_opcode(OpRoll);
        }
    }

    Ok(out)
}

/// Relocate a whole logical element with the chosen strategy.
pub fn move_element(
    element: &dyn StackElement,
    mode: MoveMode,
) -> Result<Script, BuilderError> {
    move_element_slice(element, mode, 0, element.length())
}

/// Relocate the limbs `[start, end)` of a logical element.
///
/// The depth argument is derived from the element's anchor; a sub-range
/// outside the element's limbs is rejected before emission.
pub fn move_element_slice(
    element: &dyn StackElement,
    mode: MoveMode,
    start: usize,
    end: usize,
) -> Result<Script, BuilderError> {
    let length = element.length();
    if end > length || start > end {
        return Err(BuilderError::MoveRange { start, end, length });
    }

    let position = element.position() - start as i64;
    let n_elements = end - start;
    match mode {
        MoveMode::Copy => pick(position, n_elements),
        MoveMode::Move => roll(position, n_elements),
    }
}
