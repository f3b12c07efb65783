//! # Runtime Error Types
//!
//! Failures of a *generated* script at execution time. These are data
//! validity failures of the program under test, not of the emitting
//! compiler, which reports its own usage errors synchronously.

use stackscript_ops::{Opcode, OpsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExecError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecError {
    #[error("Stack underflow executing {0}")]
    StackUnderflow(Opcode),

    #[error("Altstack underflow")]
    AltStackUnderflow,

    #[error("OP_EQUALVERIFY failed: {left:?} != {right:?}")]
    EqualVerifyFailed { left: Vec<u8>, right: Vec<u8> },

    #[error("OP_NUMEQUALVERIFY failed")]
    NumEqualVerifyFailed,

    #[error("OP_VERIFY failed")]
    VerifyFailed,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Split index {index} out of range for {length}-byte string")]
    SplitOutOfRange { index: usize, length: usize },

    #[error("Pick/roll depth {depth} exceeds stack size {size}")]
    DepthOutOfRange { depth: usize, size: usize },

    #[error("Negative operand for {0}")]
    NegativeOperand(Opcode),

    #[error("Unbalanced conditional")]
    UnbalancedConditional,

    #[error("Opcode not implemented by this interpreter: {0}")]
    UnsupportedOpcode(Opcode),

    #[error("Operation budget of {0} exceeded")]
    OpBudgetExceeded(u64),

    #[error("Script finished with an empty stack")]
    EmptyFinalStack,

    #[error(transparent)]
    Ops(#[from] OpsError),
}
