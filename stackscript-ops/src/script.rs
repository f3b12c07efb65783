//! # Instruction Sequences
//!
//! A [`Script`] is an ordered, append-only sequence of instructions: bare
//! opcodes and push-data payloads. Concatenation is the sole composition
//! operator; a script is never mutated after emission except by appending.
//!
//! The binary form uses canonical push prefixes: payloads up to 75 bytes
//! are prefixed with their length as a single byte, longer payloads with a
//! PUSHDATA1/2/4 marker. The empty payload serializes as the OP_0 byte.

use serde::{Deserialize, Serialize};

use crate::error::OpsError;
use crate::opcode::Opcode;

/// PUSHDATA1 marker: next byte is the payload length
pub const PUSHDATA1: u8 = 0x4C;
/// PUSHDATA2 marker: next two bytes (LE) are the payload length
pub const PUSHDATA2: u8 = 0x4D;
/// PUSHDATA4 marker: next four bytes (LE) are the payload length
pub const PUSHDATA4: u8 = 0x4E;

/// Largest payload length encoded as a bare length byte
pub const MAX_DIRECT_PUSH: usize = 75;

/// A single instruction: an opcode or a push-data payload
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// A bare opcode
    Op(Opcode),
    /// Push the payload onto the stack
    Push(Vec<u8>),
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Op(op) => write!(f, "{op}"),
            Instruction::Push(data) => {
                write!(f, "0x")?;
                for b in data {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// An appendable instruction sequence
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script(Vec<Instruction>);

impl Script {
    /// Create an empty script
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a script from a list of opcodes
    pub fn from_opcodes(ops: &[Opcode]) -> Self {
        Self(ops.iter().copied().map(Instruction::Op).collect())
    }

    /// Number of instructions (push-data counts as one)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script contains no instructions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The instructions in emission order
    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    /// Append a bare opcode
    pub fn push_opcode(&mut self, op: Opcode) {
        self.0.push(Instruction::Op(op));
    }

    /// Append a push-data instruction
    pub fn push_slice(&mut self, data: &[u8]) {
        self.0.push(Instruction::Push(data.to_vec()));
    }

    /// Append every instruction of `other`
    pub fn extend(&mut self, other: Script) {
        self.0.extend(other.0);
    }

    /// Serialize to the canonical binary form
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for inst in &self.0 {
            match inst {
                Instruction::Op(op) => out.push(op.to_u8()),
                Instruction::Push(data) => {
                    let len = data.len();
                    if len == 0 {
                        out.push(Opcode::Op0.to_u8());
                    } else if len <= MAX_DIRECT_PUSH {
                        out.push(len as u8);
                    } else if len <= u8::MAX as usize {
                        out.push(PUSHDATA1);
                        out.push(len as u8);
                    } else if len <= u16::MAX as usize {
                        out.push(PUSHDATA2);
                        out.extend_from_slice(&(len as u16).to_le_bytes());
                    } else {
                        out.push(PUSHDATA4);
                        out.extend_from_slice(&(len as u32).to_le_bytes());
                    }
                    if len > 0 {
                        out.extend_from_slice(data);
                    }
                }
            }
        }
        out
    }

    /// Decode a script from its binary form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OpsError> {
        let mut out = Script::new();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            i += 1;
            let push_len = match b {
                1..=75 => Some(b as usize),
                PUSHDATA1 => {
                    let n = *bytes.get(i).ok_or(OpsError::TruncatedLengthPrefix)?;
                    i += 1;
                    Some(n as usize)
                }
                PUSHDATA2 => {
                    let sl = bytes
                        .get(i..i + 2)
                        .ok_or(OpsError::TruncatedLengthPrefix)?;
                    i += 2;
                    Some(u16::from_le_bytes([sl[0], sl[1]]) as usize)
                }
                PUSHDATA4 => {
                    let sl = bytes
                        .get(i..i + 4)
                        .ok_or(OpsError::TruncatedLengthPrefix)?;
                    i += 4;
                    Some(u32::from_le_bytes([sl[0], sl[1], sl[2], sl[3]]) as usize)
                }
                _ => None,
            };
            match push_len {
                Some(n) => {
                    let data = bytes.get(i..i + n).ok_or(OpsError::TruncatedPushData {
                        expected: n,
                        available: bytes.len() - i,
                    })?;
                    i += n;
                    out.push_slice(data);
                }
                None => {
                    let op = Opcode::from_u8(b).ok_or(OpsError::InvalidOpcodeByte(b))?;
                    out.push_opcode(op);
                }
            }
        }
        Ok(out)
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, inst) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{inst}")?;
        }
        Ok(())
    }
}

impl From<Opcode> for Script {
    fn from(op: Opcode) -> Self {
        Script(vec![Instruction::Op(op)])
    }
}

impl FromIterator<Instruction> for Script {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Script(iter.into_iter().collect())
    }
}

impl IntoIterator for Script {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Add for Script {
    type Output = Script;

    fn add(mut self, rhs: Script) -> Script {
        self.extend(rhs);
        self
    }
}

impl std::ops::AddAssign for Script {
    fn add_assign(&mut self, rhs: Script) {
        self.extend(rhs);
    }
}
