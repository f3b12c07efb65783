//! # stackscript-builder
//!
//! The stack-position compiler: tracks where logical values live in a
//! depth-indexed stack and emits the canonical instruction sequence to
//! fetch, reorder, and combine them while the stack grows and shrinks
//! under the emitted instructions.
//!
//! ## Key Features
//! - Typed element descriptors (numbers, field elements, curve points)
//! - Depth addressing with hand-tuned idioms, small-integer pushes, and
//!   runtime bottom-anchored resolution ([`pick`] / [`roll`])
//! - A relocation engine composing copy/consume strategies
//! - Modular arithmetic, endianness, signature and bit-packing macros
//! - Hash-chained constant commitments and Merkle path verification
//!
//! Every function is a pure transformation from parameters to a
//! [`Script`](stackscript_ops::Script); usage errors are rejected before
//! any instruction is emitted.

pub mod bits;
pub mod commit;
pub mod element;
pub mod endianness;
pub mod error;
pub mod merkle;
pub mod modular;
pub mod push;
pub mod relocate;
pub mod signature;

pub use bits::unsigned_from_bits;
pub use commit::{hash256d, verify_bottom_constant, verify_bottom_constants};
pub use element::{
    bitmask_to_flags, check_order, MoveMode, StackBaseElement, StackElement,
    StackEllipticCurvePoint, StackEllipticCurvePointProjective,
    StackFiniteFieldElement, StackNumber,
};
pub use endianness::{
    bytes_to_unsigned, reverse_endianness_bounded_length,
    reverse_endianness_fixed_length,
};
pub use error::BuilderError;
pub use merkle::MerkleTree;
pub use modular::{
    compute_mul_sub, enforce_mul_equal, is_equal_to, is_mod_equal_to, mod_reduce,
    ModReduceOptions, MulSubParams, MulSubPermutation, OperandFlags,
};
pub use push::{bignums_to_script, nums_to_script};
pub use relocate::{move_element, move_element_slice, pick, roll};
pub use signature::{int_sig_to_s_component, SigOperandFlags};
