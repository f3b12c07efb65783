//! # Error Types for the Instruction Set Crate

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpsError {
    // Text-form parse errors
    #[error("Unknown token in script text: {0:?}")]
    UnknownToken(String),

    #[error("Unknown opcode name: {0:?}")]
    UnknownOpcode(String),

    #[error("Invalid hex literal: {0:?}")]
    InvalidHex(String),

    // Binary decode errors
    #[error("Invalid opcode byte: {0:#04x}")]
    InvalidOpcodeByte(u8),

    #[error("Truncated push-data: expected {expected} bytes, {available} remain")]
    TruncatedPushData { expected: usize, available: usize },

    #[error("Truncated push-data length prefix")]
    TruncatedLengthPrefix,

    // Number encoding errors
    #[error("Number does not fit in an i64: {0}")]
    NumberOutOfRange(String),

    #[error("Number needs {width} bytes, target size is {size}")]
    NumberTooWide { width: usize, size: usize },
}
