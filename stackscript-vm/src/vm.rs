//! # Script Interpreter
//!
//! ## Overview
//!
//! Reference interpreter for [`Script`] sequences, used as the execution
//! oracle in tests. Runs pushes and opcode steps against a main stack and
//! an altstack, tracking conditional branches and an instruction budget.
//!
//! ## Execution Model
//!
//! Instructions are evaluated left to right. `OP_IF`/`OP_NOTIF` pop a
//! condition and open a branch frame; instructions inside an untaken
//! branch are skipped (except for the flow-control opcodes themselves,
//! which still maintain the frame stack). A script that ends with open
//! frames fails with [`ExecError::UnbalancedConditional`].

use num_bigint::BigInt;
use stackscript_ops::{is_truthy, Instruction, Opcode, Script};
use tracing::{debug, trace};

use crate::error::{ExecError, Result};
use crate::execute::execute_op;
use crate::stack::{Stack, Value};

/// Interpreter limits.
#[derive(Debug, Clone, Copy)]
pub struct VmConfig {
    /// Maximum number of instructions executed before aborting.
    pub max_ops: u64,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self { max_ops: 1_000_000 }
    }
}

/// Final state of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub stack: Stack,
    pub altstack: Stack,
    pub ops_executed: u64,
}

impl ExecResult {
    /// True when the run left exactly one truthy element on the main stack,
    /// the conventional success shape for a locking script.
    pub fn is_clean_success(&self) -> bool {
        self.altstack.is_empty()
            && self.stack.depth() == 1
            && self.stack.items().last().map(|v| is_truthy(v)).unwrap_or(false)
    }
}

/// Script interpreter with configurable limits.
#[derive(Debug, Default)]
pub struct Vm {
    config: VmConfig,
}

impl Vm {
    pub fn new(config: VmConfig) -> Self {
        Self { config }
    }

    /// Run `script` on an empty stack.
    pub fn run(&self, script: &Script) -> Result<ExecResult> {
        self.run_with_stack(script, Stack::new())
    }

    /// Run `script` with `stack` as the initial main stack. The altstack
    /// starts empty.
    pub fn run_with_stack(&self, script: &Script, stack: Stack) -> Result<ExecResult> {
        let mut stack = stack;
        let mut altstack = Stack::new();
        // One frame per open OP_IF/OP_NOTIF; true means the branch executes.
        let mut branches: Vec<bool> = Vec::new();
        let mut ops_executed: u64 = 0;

        debug!(instructions = script.len(), initial_depth = stack.depth(), "run");

        for instruction in script {
            if ops_executed >= self.config.max_ops {
                return Err(ExecError::OpBudgetExceeded(self.config.max_ops));
            }
            ops_executed += 1;

            let executing = branches.iter().all(|&b| b);

            match instruction {
                Instruction::Op(op) if op.is_flow_control() => match op {
                    Opcode::OpIf | Opcode::OpNotIf => {
                        if executing {
                            let v = stack.pop(*op)?;
                            let taken = is_truthy(&v) == (*op == Opcode::OpIf);
                            branches.push(taken);
                        } else {
                            branches.push(false);
                        }
                    }
                    Opcode::OpElse => match branches.last_mut() {
                        Some(taken) => *taken = !*taken,
                        None => return Err(ExecError::UnbalancedConditional),
                    },
                    Opcode::OpEndIf => {
                        if branches.pop().is_none() {
                            return Err(ExecError::UnbalancedConditional);
                        }
                    }
                    _ => unreachable!("is_flow_control covers IF/NOTIF/ELSE/ENDIF"),
                },
                Instruction::Op(op) => {
                    if executing {
                        trace!(%op, depth = stack.depth(), "step");
                        execute_op(*op, &mut stack, &mut altstack)?;
                    }
                }
                Instruction::Push(bytes) => {
                    if executing {
                        trace!(len = bytes.len(), "push");
                        stack.push(bytes.clone());
                    }
                }
            }
        }

        if !branches.is_empty() {
            return Err(ExecError::UnbalancedConditional);
        }

        debug!(ops_executed, final_depth = stack.depth(), "done");
        Ok(ExecResult {
            stack,
            altstack,
            ops_executed,
        })
    }
}

/// Run `script` with the given numbers as the initial stack, default limits.
pub fn run_with_nums(script: &Script, nums: &[i64]) -> Result<ExecResult> {
    Vm::default().run_with_stack(script, Stack::from_nums(nums))
}

/// Run `script` with the given byte strings as the initial stack, default
/// limits.
pub fn run_with_values(script: &Script, values: Vec<Value>) -> Result<ExecResult> {
    Vm::default().run_with_stack(script, Stack::from_values(values))
}

/// Convenience for tests: run and return the top of the final stack as a
/// number.
pub fn run_for_num(script: &Script, nums: &[i64]) -> Result<BigInt> {
    let result = run_with_nums(script, nums)?;
    result.stack.top_num().ok_or(ExecError::EmptyFinalStack)
}
