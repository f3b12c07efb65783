//! # Error Types for Script Emission
//!
//! Every error here is a caller error surfaced at emission time; no partial
//! script is ever returned. Assert failures of a generated script at VM
//! run time are a different failure class and live with the interpreter.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    // Precondition violations
    #[error(
        "When non-negative, position must be at least n_elements - 1: \
         position {position}, n_elements {n_elements}"
    )]
    PositionTooSmall { position: i64, n_elements: usize },

    #[error(
        "Sub-range [{start}, {end}) does not fit an element of {length} limbs"
    )]
    MoveRange {
        start: usize,
        end: usize,
        length: usize,
    },

    // Ordering violations
    #[error(
        "Elements must be listed in decreasing depth order: position {deeper} \
         does not come before position {shallower}"
    )]
    OrderViolation { deeper: i64, shallower: i64 },

    // Shape mismatches
    #[error("Operand must have extension degree 1, found {found}")]
    ExtensionDegree { found: usize },

    #[error(
        "Point coordinates must be adjacent with equal extension degree: \
         expected position {expected}, found {found}"
    )]
    PointShape { expected: i64, found: i64 },

    #[error("Expected {expected} per-operand options, found {found}")]
    RollingCountMismatch { expected: usize, found: usize },

    #[error("Constant commitment requires at least one constant")]
    EmptyConstantList,

    // Merkle tree construction
    #[error("Merkle root is not a valid hexadecimal string: {0:?}")]
    InvalidMerkleRoot(String),

    #[error("Merkle hash function must contain only hash opcodes: {0}")]
    InvalidMerkleHash(String),

    #[error("Merkle tree depth must be positive")]
    InvalidMerkleDepth,
}
