//! # Merkle Path Verification
//!
//! Locking scripts that walk a purported Merkle path up to a committed
//! root, in two input shapes: sibling-plus-bit-flag per level, or two
//! auxiliary inputs per level with the node pre-positioned.

use stackscript_ops::{Instruction, Opcode, Script};

use crate::error::BuilderError;

use Opcode::*;

/// Generator of Merkle path verification scripts for a fixed root, hash
/// function, and tree depth.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    root: Vec<u8>,
    hash_fn: Script,
    depth: usize,
}

impl MerkleTree {
    /// Build a generator.
    ///
    /// `root` is the expected root digest as a hex string; `hash_fn` must
    /// consist only of hash opcodes (it is applied once per level);
    /// `depth` is the number of levels and must be positive.
    pub fn new(root: &str, hash_fn: Script, depth: usize) -> Result<Self, BuilderError> {
        let root_bytes = hex_decode(root)
            .ok_or_else(|| BuilderError::InvalidMerkleRoot(root.to_string()))?;

        for inst in hash_fn.instructions() {
            let ok = matches!(inst, Instruction::Op(op) if op.is_hash());
            if !ok {
                return Err(BuilderError::InvalidMerkleHash(hash_fn.to_string()));
            }
        }
        if hash_fn.is_empty() {
            return Err(BuilderError::InvalidMerkleHash(hash_fn.to_string()));
        }

        if depth == 0 {
            return Err(BuilderError::InvalidMerkleDepth);
        }

        Ok(Self {
            root: root_bytes,
            hash_fn,
            depth,
        })
    }

    /// Path verification with a bit flag per level selecting whether the
    /// sibling goes left or right.
    ///
    /// Stack in: `[aux_{d-1}, bit_{d-1}, .., aux_1, bit_1, leaf]`; stack
    /// out is a boolean, or an assert fault when `is_equal_verify`.
    pub fn locking_merkle_proof_with_bit_flags(&self, is_equal_verify: bool) -> Script {
        let mut out = self.hash_fn.clone();
        for _ in 1..self.depth {
            out += Script::from_opcodes(&[OpSwap, OpIf, OpSwap, OpEndIf, OpCat]);
            out += self.hash_fn.clone();
        }

        out.push_slice(&self.root);
        out.push_opcode(if is_equal_verify { OpEqualVerify } else { OpEqual });
        out
    }

    /// Path verification with two auxiliary inputs per level, already
    /// placed on the correct sides of the running node.
    ///
    /// Stack in: `[aux_{0,d-1}, aux_{1,d-1}, .., aux_{0,1}, aux_{1,1},
    /// leaf]`.
    pub fn locking_merkle_proof_with_two_aux(&self, is_equal_verify: bool) -> Script {
        let mut out = self.hash_fn.clone();
        for _ in 1..self.depth {
            out += Script::from_opcodes(&[OpSwap, OpCat, OpCat]);
            out += self.hash_fn.clone();
        }

        out.push_slice(&self.root);
        out.push_opcode(if is_equal_verify { OpEqualVerify } else { OpEqual });
        out
    }
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || hex.is_empty() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}
