//! # stackscript-ops
//!
//! Instruction-set collaborator for the stackscript toolkit.
//!
//! ## Key Features
//! - One-byte opcode vocabulary for a depth-addressed stack machine
//! - [`Script`]: append-only instruction sequences with push-data
//! - Canonical binary serialization (direct pushes, PUSHDATA1/2/4)
//! - Text form with a lexer (`Script::parse` / `Display`)
//! - Minimal sign-magnitude number codec ([`encode_num`] / [`decode_num`])

pub mod error;
pub mod num;
pub mod opcode;
pub mod parse;
pub mod script;

pub use error::OpsError;
pub use num::{decode_num, decode_num_i64, encode_num, encode_num_i64, is_truthy, pad_num};
pub use opcode::{Opcode, ALL_OPCODES};
pub use script::{Instruction, Script};
