//! # Signature Canonical Form
//!
//! Turns an integer signature scalar into the canonical low-s component of
//! an ECDSA signature over a 256-bit group: the smaller of `s` and
//! `order - s`, big-endian, optionally DER-prefixed with `0x02 || len`.
//! The low-s choice avoids signature malleability.

use stackscript_ops::{Opcode, Script};

use crate::element::{check_order, MoveMode, StackBaseElement, StackNumber};
use crate::error::BuilderError;
use crate::relocate::move_element;

use Opcode::*;

/// Per-operand consume/copy flags for [`int_sig_to_s_component`].
///
/// Legacy bitmask decoding: bit 0 -> group_order, bit 1 -> int_sig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigOperandFlags {
    pub group_order: bool,
    pub int_sig: bool,
}

impl SigOperandFlags {
    pub fn all() -> Self {
        Self {
            group_order: true,
            int_sig: true,
        }
    }

    /// Decode bit 0 -> group_order, bit 1 -> int_sig.
    pub fn from_bitmask(mask: u8) -> Self {
        Self {
            group_order: mask & 1 != 0,
            int_sig: mask >> 1 & 1 != 0,
        }
    }
}

/// Transform `int_sig` into the canonical s-component.
///
/// Relocation order is int_sig first, then group_order at a depth corrected
/// for whichever relocation already happened; when the two already sit at
/// depths 0 and 1 in the right order the preamble is zero or one
/// instruction.
pub fn int_sig_to_s_component(
    group_order: &StackNumber,
    int_sig: &StackNumber,
    rolling: SigOperandFlags,
    add_prefix: bool,
) -> Result<Script, BuilderError> {
    // stack out: [.., int_sig, group_order]
    let mut out = match (int_sig.position, group_order.position) {
        (1, 0) => Script::new(),
        (0, 1) => {
            if rolling.group_order && rolling.int_sig {
                Script::from(OpSwap)
            } else {
                Script::from_opcodes(&[Op2Dup, OpSwap])
            }
        }
        _ => {
            if group_order.position >= 0 {
                check_order(&[group_order, int_sig])?;
            }
            let mut out = move_element(int_sig, MoveMode::rolling(rolling.int_sig))?;
            let shift = if group_order.position >= 0 {
                1 - rolling.int_sig as i64
            } else {
                0
            };
            out += move_element(
                &group_order.shift(shift),
                MoveMode::rolling(rolling.group_order),
            )?;
            out
        }
    };

    // stack out: [.., int_sig, group_order, int_sig, group_order]
    out.push_opcode(Op2Dup);

    // Pick min{int_sig, group_order - int_sig}.
    out += Script::from_opcodes(&[
        Op2, OpDiv, OpGreaterThan, OpIf, OpSwap, OpSub, OpElse, OpDrop, OpEndIf,
    ]);

    // To big-endian byte order, bounded at the scalar's 32-byte width.
    out += crate::endianness::reverse_endianness_bounded_length(
        32,
        &StackBaseElement::new(0),
        true,
    )?;

    if add_prefix {
        // len(s) || s, then 0x02 || len(s) || s
        out += Script::from_opcodes(&[OpSize, OpSwap, OpCat]);
        out += Script::from_opcodes(&[Op2, OpSwap, OpCat]);
    }

    Ok(out)
}
