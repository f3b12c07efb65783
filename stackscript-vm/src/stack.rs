//! # Execution Stacks
//!
//! The main and alternate stacks hold opaque byte strings; numeric
//! instructions decode and re-encode on the way through.

use num_bigint::BigInt;
use stackscript_ops::{decode_num, encode_num, encode_num_i64, Opcode};

use crate::error::{ExecError, Result};

/// A stack value: an opaque byte string.
pub type Value = Vec<u8>;

/// The main stack, bottom at index 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stack, bottom first.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { items: values }
    }

    /// Seed a stack with encoded numbers, bottom first.
    pub fn from_nums(nums: &[i64]) -> Self {
        Self {
            items: nums.iter().map(|&n| encode_num_i64(n)).collect(),
        }
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The values, bottom first.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn push_num(&mut self, n: &BigInt) {
        self.items.push(encode_num(n));
    }

    pub fn push_bool(&mut self, b: bool) {
        self.items.push(if b { vec![1] } else { Vec::new() });
    }

    pub fn pop(&mut self, op: Opcode) -> Result<Value> {
        self.items.pop().ok_or(ExecError::StackUnderflow(op))
    }

    pub fn pop_num(&mut self, op: Opcode) -> Result<BigInt> {
        Ok(decode_num(&self.pop(op)?))
    }

    /// Pop a number that must be a non-negative machine-sized index.
    pub fn pop_index(&mut self, op: Opcode) -> Result<usize> {
        let n = self.pop_num(op)?;
        usize::try_from(&n).map_err(|_| ExecError::NegativeOperand(op))
    }

    /// Borrow the value at `depth` (0 = top).
    pub fn peek(&self, depth: usize, op: Opcode) -> Result<&Value> {
        let len = self.items.len();
        if depth >= len {
            return Err(ExecError::StackUnderflow(op));
        }
        Ok(&self.items[len - 1 - depth])
    }

    /// Remove and return the value at `depth` (0 = top).
    pub fn remove(&mut self, depth: usize, op: Opcode) -> Result<Value> {
        let len = self.items.len();
        if depth >= len {
            return Err(ExecError::StackUnderflow(op));
        }
        Ok(self.items.remove(len - 1 - depth))
    }

    /// Insert a value so it ends up at `depth` (0 = top).
    pub fn insert(&mut self, depth: usize, value: Value, op: Opcode) -> Result<()> {
        let len = self.items.len();
        if depth > len {
            return Err(ExecError::StackUnderflow(op));
        }
        self.items.insert(len - depth, value);
        Ok(())
    }

    /// Decode the top value as a number without popping.
    pub fn top_num(&self) -> Option<BigInt> {
        self.items.last().map(|v| decode_num(v))
    }
}
