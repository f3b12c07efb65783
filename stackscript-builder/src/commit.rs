//! # Constant Verification
//!
//! Scripts that assert the bottom of the stack equals known constants:
//! directly for a single number, via a hash-chained commitment for a list,
//! which keeps the script a single 32-byte push instead of one literal per
//! constant.

use num_bigint::BigInt;
use sha2::{Digest, Sha256};
use stackscript_ops::{Opcode, Script};

use crate::error::BuilderError;
use crate::push::bignums_to_script;
use crate::relocate::pick;

use Opcode::*;

/// Double SHA-256, the commitment hash used by OP_HASH256.
pub fn hash256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Assert that the bottom stack element equals `n`.
pub fn verify_bottom_constant(n: &BigInt) -> Result<Script, BuilderError> {
    let mut out = pick(-1, 1)?;
    out += bignums_to_script([n.clone()]);
    out.push_opcode(OpEqualVerify);
    Ok(out)
}

/// Assert that the bottom `constants.len()` stack elements equal the given
/// byte strings, `constants[0]` deepest.
///
/// The elements are folded top-down through hash-then-concatenate and the
/// final digest is compared against the same fold computed here, so the
/// script commits to the whole list with one push.
pub fn verify_bottom_constants(constants: &[Vec<u8>]) -> Result<Script, BuilderError> {
    let n = constants.len();
    if n == 0 {
        return Err(BuilderError::EmptyConstantList);
    }

    // Seed with the last (topmost) constant and prepend inward, hashing at
    // each step: h(c_0 || h(c_1 || h(... h(c_{n-1}))))
    let mut expected: Vec<u8> = Vec::new();
    for constant in constants.iter().rev() {
        let mut preimage = constant.clone();
        preimage.extend_from_slice(&expected);
        expected = hash256d(&preimage).to_vec();
    }

    let mut out = pick(-1, n)?;
    for _ in 1..n {
        out += Script::from_opcodes(&[OpHash256, OpCat]);
    }
    out.push_opcode(OpHash256);
    out.push_slice(&expected);
    out.push_opcode(OpEqualVerify);

    Ok(out)
}
