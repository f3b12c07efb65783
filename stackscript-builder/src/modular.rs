//! # Modular Arithmetic Macros
//!
//! The target VM's native modulo returns a representative in
//! (-modulus, modulus); [`mod_reduce`] optionally forces the result into
//! [0, modulus) by adding the modulus and reducing again.

use num_bigint::BigInt;
use stackscript_ops::{Opcode, Script};

use crate::element::{
    check_order, MoveMode, StackElement, StackFiniteFieldElement, StackNumber,
};
use crate::error::BuilderError;
use crate::push::bignums_to_script;
use crate::relocate::{move_element, roll};

use Opcode::*;

/// Options for [`mod_reduce`].
#[derive(Clone, Debug)]
pub struct ModReduceOptions {
    /// Instructions run before the reduction; the default restores a value
    /// from the altstack under the top element.
    pub stack_preparation: Script,
    /// Whether the modulus is the top element (else the second).
    pub is_mod_on_top: bool,
    /// Whether to force the representative into [0, modulus).
    pub is_positive: bool,
    /// Whether the modulus stays on the stack below the result.
    pub is_constant_reused: bool,
}

impl Default for ModReduceOptions {
    fn default() -> Self {
        Self {
            stack_preparation: Script::from_opcodes(&[OpFromAltStack, OpRot]),
            is_mod_on_top: true,
            is_positive: true,
            is_constant_reused: true,
        }
    }
}

impl ModReduceOptions {
    /// Options with no stack preparation.
    pub fn bare() -> Self {
        Self {
            stack_preparation: Script::new(),
            ..Self::default()
        }
    }
}

/// Normalize a modulo result.
///
/// With `is_positive` the emitted sequence computes
/// `r <- ((r % modulus) + modulus) % modulus`, which lands in
/// [0, modulus) for any sign of the numerator.
pub fn mod_reduce(options: &ModReduceOptions) -> Script {
    let mut out = options.stack_preparation.clone();

    let pick_modulo = if options.is_mod_on_top { OpTuck } else { OpOver };

    if options.is_positive {
        let reuse_modulo = if options.is_constant_reused {
            OpOver
        } else {
            OpSwap
        };
        out += Script::from_opcodes(&[
            pick_modulo,
            OpMod,
            OpOver,
            OpAdd,
            reuse_modulo,
            OpMod,
        ]);
    } else if options.is_constant_reused {
        out += Script::from_opcodes(&[pick_modulo, OpMod]);
    } else if options.is_mod_on_top {
        out.push_opcode(OpMod);
    } else {
        out += Script::from_opcodes(&[OpSwap, OpMod]);
    }

    out
}

/// The permutation of (a, b, c) at which `±(x - y*z) % modulus` is
/// evaluated: the named operand is the one isolated outside the product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulSubPermutation {
    /// f(a, b, c) = (a - b*c) % modulus
    IsolateA,
    /// f(c, a, b) = (a*b - c) % modulus
    IsolateC,
    /// f(b, a, c) = (b - a*c) % modulus
    IsolateB,
}

impl MulSubPermutation {
    /// Decode the legacy one-hot mask: 1 -> IsolateA, 2 -> IsolateC,
    /// 4 -> IsolateB.
    pub fn from_bitmask(mask: u8) -> Option<Self> {
        match mask {
            1 => Some(Self::IsolateA),
            2 => Some(Self::IsolateC),
            4 => Some(Self::IsolateB),
            _ => None,
        }
    }

    /// The product a*b is formed before c arrives.
    fn multiplies_early(self) -> bool {
        matches!(self, Self::IsolateC)
    }

    /// The first operand is rolled back up to be the product's second
    /// factor.
    fn rolls_first_operand(self) -> bool {
        matches!(self, Self::IsolateB)
    }
}

/// Per-operand consume/copy flags for the (a, b, c) operand triple.
///
/// Legacy bitmask decoding: bit 0 -> a, bit 1 -> b, bit 2 -> c.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandFlags {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

impl OperandFlags {
    pub fn all() -> Self {
        Self {
            a: true,
            b: true,
            c: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Decode bit 0 -> a, bit 1 -> b, bit 2 -> c.
    pub fn from_bitmask(mask: u8) -> Self {
        Self {
            a: mask & 1 != 0,
            b: mask >> 1 & 1 != 0,
            c: mask >> 2 & 1 != 0,
        }
    }
}

/// Parameters for [`compute_mul_sub`] and [`enforce_mul_equal`].
#[derive(Clone, Debug)]
pub struct MulSubParams {
    /// Whether the modulus is consumed.
    pub clean_constant: bool,
    /// Whether the modulus stays below the result after reduction.
    pub is_constant_reused: bool,
    pub modulus: StackNumber,
    pub a: StackFiniteFieldElement,
    pub b: StackFiniteFieldElement,
    pub c: StackFiniteFieldElement,
    /// Which operands are consumed (rolled) rather than copied.
    pub rolling: OperandFlags,
    /// Which operands are duplicated and left on top beside the result.
    pub leave_on_top: OperandFlags,
    pub permutation: MulSubPermutation,
}

impl Default for MulSubParams {
    fn default() -> Self {
        Self {
            clean_constant: false,
            is_constant_reused: false,
            modulus: StackNumber::new(-1, false),
            a: StackFiniteFieldElement::new(2, false, 1),
            b: StackFiniteFieldElement::new(1, false, 1),
            c: StackFiniteFieldElement::new(0, false, 1),
            rolling: OperandFlags::all(),
            leave_on_top: OperandFlags::none(),
            permutation: MulSubPermutation::IsolateA,
        }
    }
}

/// Evaluate `±(x - y*z) % modulus` at the chosen permutation of (a, b, c).
///
/// Stack in: `[.., modulus, .., a, .., b, .., c, ..]`; stack out has the
/// reduced result on top, with each operand consumed, kept in place, or
/// additionally retained on top per the flags. Every relocation accounts
/// for the depth shifts caused by the ones before it: a copied operand
/// deepens everything by one, a consumed one nets to zero, and a retained
/// duplicate adds one more.
pub fn compute_mul_sub(params: &MulSubParams) -> Result<Script, BuilderError> {
    if params.modulus.position > 0 {
        check_order(&[&params.modulus, &params.a, &params.b, &params.c])?;
    }
    for operand in [&params.a, &params.b, &params.c] {
        if operand.extension_degree != 1 {
            return Err(BuilderError::ExtensionDegree {
                found: operand.extension_degree,
            });
        }
    }

    let rolling = params.rolling;
    let leave = params.leave_on_top;
    let permutation = params.permutation;
    let (l_a, l_b, l_c) = (leave.a as i64, leave.b as i64, leave.c as i64);

    let mut out = move_element(&params.a, MoveMode::rolling(rolling.a))?;
    if leave.a {
        out.push_opcode(OpDup);
    }
    if params.a.negate {
        out.push_opcode(OpNegate);
    }

    out += move_element(&params.b.shift(1 + l_a), MoveMode::rolling(rolling.b))?;
    if leave.b {
        out.push_opcode(OpTuck);
    }
    if params.b.negate {
        out.push_opcode(OpNegate);
    }
    if permutation.multiplies_early() {
        out.push_opcode(OpMul);
    }

    out += move_element(
        &params
            .c
            .shift(2 + l_a + l_b - permutation.multiplies_early() as i64),
        MoveMode::rolling(rolling.c),
    )?;
    if leave.c {
        out.push_opcode(OpTuck);
    }
    if params.c.negate {
        out.push_opcode(OpNegate);
    }

    if permutation.rolls_first_operand() {
        out += roll(2 + l_c, 1)?;
    }
    if !permutation.multiplies_early() {
        out.push_opcode(OpMul);
    }
    if leave.c {
        out.push_opcode(OpRot);
    }
    out.push_opcode(OpSub);

    let modulus_shift = if params.modulus.position > 0 {
        3 + l_a + l_b + l_c
            - rolling.a as i64
            - rolling.b as i64
            - rolling.c as i64
    } else {
        0
    };
    out += move_element(
        &params.modulus.shift(modulus_shift),
        MoveMode::rolling(params.clean_constant),
    )?;

    out += mod_reduce(&ModReduceOptions {
        is_constant_reused: params.is_constant_reused,
        ..ModReduceOptions::bare()
    });

    Ok(out)
}

/// Enforce `(x*y - z) % modulus == 0` at the chosen permutation: a modular
/// multiplication gate. The script faults at run time when the constraint
/// does not hold.
pub fn enforce_mul_equal(params: &MulSubParams) -> Result<Script, BuilderError> {
    let mut out = compute_mul_sub(params)?;
    out += is_equal_to(
        &crate::element::StackBaseElement::new(0),
        &BigInt::from(0),
        true,
        true,
    )?;
    Ok(out)
}

/// Check whether an element equals a literal target: assert with
/// OP_EQUALVERIFY when `is_verify`, else leave a boolean.
pub fn is_equal_to(
    element: &dyn StackElement,
    target: &BigInt,
    is_verify: bool,
    is_rolled: bool,
) -> Result<Script, BuilderError> {
    let mut out = move_element(element, MoveMode::rolling(is_rolled))?;
    out += bignums_to_script([target.clone()]);
    out.push_opcode(if is_verify { OpEqualVerify } else { OpEqual });
    Ok(out)
}

/// Check whether `element % modulus` equals a literal target.
///
/// The native modulo keeps the dividend's sign, so the target must name
/// the representative in (-modulus, modulus) that the VM will produce.
pub fn is_mod_equal_to(
    clean_constant: bool,
    modulus: &StackNumber,
    element: &dyn StackElement,
    target: &BigInt,
    is_verify: bool,
    is_rolled: bool,
) -> Result<Script, BuilderError> {
    if modulus.position > 0 {
        check_order(&[modulus, element])?;
    }

    let mut out = move_element(element, MoveMode::rolling(is_rolled))?;
    let modulus_shift = if modulus.position > 0 { 1 } else { 0 };
    out += move_element(
        &modulus.shift(modulus_shift),
        MoveMode::rolling(clean_constant),
    )?;
    out.push_opcode(OpMod);
    out += bignums_to_script([target.clone()]);
    out.push_opcode(if is_verify { OpEqualVerify } else { OpEqual });
    Ok(out)
}
