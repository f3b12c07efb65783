//! # stackscript-vm
//!
//! Reference interpreter for stackscript programs. This crate exists to
//! exercise generated scripts in tests: it implements the stack-machine
//! semantics the builder targets (minimally-encoded numbers, truncated
//! division, byte-string splicing, branch frames) without any of the
//! surrounding transaction machinery.

pub mod error;
pub mod execute;
pub mod stack;
pub mod vm;

pub use error::{ExecError, Result};
pub use stack::{Stack, Value};
pub use vm::{run_for_num, run_with_nums, run_with_values, ExecResult, Vm, VmConfig};
