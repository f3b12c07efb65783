//! # Constant Encoder
//!
//! Maps integers to canonical push sequences: the dedicated single opcode
//! for values in [-1, 16], the minimal sign-magnitude push-data encoding
//! otherwise. Encodings are per element; no batching across elements.

use num_bigint::BigInt;
use stackscript_ops::{encode_num, Opcode, Script};

/// Push a list of machine-sized numbers onto the stack, in order.
pub fn nums_to_script(nums: &[i64]) -> Script {
    bignums_to_script(nums.iter().map(|&n| BigInt::from(n)))
}

/// Push a list of arbitrary-precision numbers onto the stack, in order.
pub fn bignums_to_script<I>(nums: I) -> Script
where
    I: IntoIterator<Item = BigInt>,
{
    let mut out = Script::new();
    for n in nums {
        match i64::try_from(&n).ok().and_then(Opcode::from_small_int) {
            Some(op) => out.push_opcode(op),
            None => out.push_slice(&encode_num(&n)),
        }
    }
    out
}
