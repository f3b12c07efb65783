//! End-to-end integration tests for the stackscript toolkit
//!
//! These tests verify the complete workflow:
//! 1. Generate a script with the builder
//! 2. Execute it in the reference VM
//! 3. Verify the resulting stack against host-side arithmetic
//!
//! Stack notation: `Stack::from_nums(&[a, b, c])` puts `a` at the bottom
//! and `c` on top; builder positions count from the top, so `c` is at
//! position 0.

use num_bigint::BigInt;
use sha2::{Digest, Sha256};
use stackscript_builder::{
    bytes_to_unsigned, compute_mul_sub, enforce_mul_equal, int_sig_to_s_component,
    is_mod_equal_to, mod_reduce, nums_to_script, pick, reverse_endianness_bounded_length,
    reverse_endianness_fixed_length, roll, unsigned_from_bits, verify_bottom_constant,
    verify_bottom_constants, MerkleTree, ModReduceOptions, MulSubParams, SigOperandFlags,
    StackBaseElement, StackNumber,
};
use stackscript_ops::{decode_num, Script};
use stackscript_vm::{run_with_nums, run_with_values, ExecError, ExecResult, Stack, Vm};

fn stack_nums(result: &ExecResult) -> Vec<BigInt> {
    result.stack.items().iter().map(|v| decode_num(v)).collect()
}

fn nums(values: &[i64]) -> Vec<BigInt> {
    values.iter().map(|&v| BigInt::from(v)).collect()
}

// ============================================================================
// Relocation
// ============================================================================

#[test]
fn test_pick_copies_block_in_order() {
    // Copy the two elements whose deepest member is at depth 3.
    let script = pick(3, 2).expect("pick failed");
    let result = run_with_nums(&script, &[1, 2, 3, 4, 5]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1, 2, 3, 4, 5, 2, 3]));
}

#[test]
fn test_roll_moves_block_in_order() {
    let script = roll(3, 2).expect("roll failed");
    let result = run_with_nums(&script, &[1, 2, 3, 4, 5]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1, 4, 5, 2, 3]));
}

#[test]
fn test_roll_of_top_block_leaves_stack_alone() {
    let script = roll(1, 2).expect("roll failed");
    assert!(script.is_empty());
    let result = run_with_nums(&script, &[1, 2, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1, 2, 3]));
}

#[test]
fn test_bottom_anchored_pick_and_roll() {
    let script = pick(-1, 1).expect("pick failed");
    let result = run_with_nums(&script, &[9, 8, 7]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[9, 8, 7, 9]));

    // Two copies from the bottom: the anchor self-corrects for the growth
    // caused by the first copy.
    let script = pick(-1, 2).expect("pick failed");
    let result = run_with_nums(&script, &[9, 8, 7]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[9, 8, 7, 9, 8]));

    let script = roll(-1, 1).expect("roll failed");
    let result = run_with_nums(&script, &[9, 8, 7]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[8, 7, 9]));
}

#[test]
fn test_pick_beyond_small_int_range() {
    // Depth 17 falls through to the generic number push.
    let initial: Vec<i64> = (0..18).collect();
    let script = pick(17, 1).expect("pick failed");
    let result = run_with_nums(&script, &initial).expect("execution failed");
    assert_eq!(*stack_nums(&result).last().unwrap(), BigInt::from(0));
    assert_eq!(result.stack.depth(), 19);
}

// ============================================================================
// Number pushes
// ============================================================================

#[test]
fn test_nums_to_script_round_trip() {
    let values = [-2, -1, 0, 1, 2, 16, 17, 64, 127, 128, 255, 256, -129];
    let script = nums_to_script(&values);
    let result = Vm::default().run(&script).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&values));
}

// ============================================================================
// Modular arithmetic
// ============================================================================

#[test]
fn test_mod_reduce_forces_positive_representative() {
    // Stack in: [x, modulus]; the VM's native OP_MOD keeps x's sign, the
    // reduction script adds the modulus back in.
    let opts = ModReduceOptions {
        is_constant_reused: false,
        ..ModReduceOptions::bare()
    };
    let script = mod_reduce(&opts);

    let result = run_with_nums(&script, &[-5, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1]));

    let result = run_with_nums(&script, &[7, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1]));

    let result = run_with_nums(&script, &[-9, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[0]));
}

#[test]
fn test_mod_reduce_can_keep_modulus() {
    let script = mod_reduce(&ModReduceOptions::bare());
    let result = run_with_nums(&script, &[-5, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[3, 1]));
}

#[test]
fn test_compute_mul_sub_default() {
    // Default layout: [modulus, a, b, c] computes (a - b*c) mod modulus
    // with a positive representative, modulus untouched at the bottom.
    let script = compute_mul_sub(&MulSubParams::default()).expect("build failed");
    let result = run_with_nums(&script, &[7, 10, 3, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[7, 1]));

    // Negative intermediate: 2 - 3*3 = -7 -> 0 (mod 7).
    let result = run_with_nums(&script, &[7, 2, 3, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[7, 0]));
}

#[test]
fn test_enforce_mul_equal_passes_and_faults() {
    // a - b*c must be 0 mod modulus; default operand layout.
    let script = enforce_mul_equal(&MulSubParams::default()).expect("build failed");

    // 6 - 2*3 = 0: holds.
    let result = run_with_nums(&script, &[5, 6, 2, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[5]));

    // 7 - 2*3 = 1: the gate faults.
    let err = run_with_nums(&script, &[5, 7, 2, 3]).unwrap_err();
    assert!(matches!(err, ExecError::EqualVerifyFailed { .. }));
}

#[test]
fn test_is_mod_equal_to_uses_native_sign() {
    // -5 % 3 is -2 under dividend-sign semantics; the target names that
    // representative.
    let modulus = StackNumber::new(-1, false);
    let element = StackBaseElement::new(0);
    let script = is_mod_equal_to(false, &modulus, &element, &BigInt::from(-2), true, true)
        .expect("build failed");
    let result = run_with_nums(&script, &[3, -5]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[3]));
}

// ============================================================================
// Endianness
// ============================================================================

#[test]
fn test_fixed_length_reversal_and_involution() {
    let element = StackBaseElement::new(0);
    let script = reverse_endianness_fixed_length(3, &element, true).expect("build failed");

    let result =
        run_with_values(&script, vec![vec![0x01, 0x02, 0x03]]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x03, 0x02, 0x01]]);

    // Applying the reversal twice restores the input.
    let twice = script.clone() + script;
    let result =
        run_with_values(&twice, vec![vec![0x01, 0x02, 0x03]]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x01, 0x02, 0x03]]);
}

#[test]
fn test_bounded_length_reversal_keeps_width() {
    let element = StackBaseElement::new(0);
    let script = reverse_endianness_bounded_length(4, &element, true).expect("build failed");

    // A 2-byte input under a 4-byte bound comes back as 2 bytes.
    let result = run_with_values(&script, vec![vec![0xAB, 0xCD]]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0xCD, 0xAB]]);

    let result =
        run_with_values(&script, vec![vec![0x01, 0x02, 0x03, 0x04]]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x04, 0x03, 0x02, 0x01]]);
}

#[test]
fn test_bytes_to_unsigned_is_big_endian() {
    let element = StackBaseElement::new(0);
    let script = bytes_to_unsigned(2, &element, true).expect("build failed");

    let result = run_with_values(&script, vec![vec![0x01, 0x02]]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[0x0102]));

    // A set top bit must not be read as a sign.
    let result = run_with_values(&script, vec![vec![0xFF, 0xFF]]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[0xFFFF]));
}

// ============================================================================
// Signature canonical form
// ============================================================================

#[test]
fn test_int_sig_already_canonical() {
    // Stack in: [int_sig, group_order]; s = 2 is below order/2 and stays.
    let script = int_sig_to_s_component(
        &StackNumber::new(0, false),
        &StackNumber::new(1, false),
        SigOperandFlags::all(),
        false,
    )
    .expect("build failed");
    let result = run_with_nums(&script, &[2, 7]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x02]]);
}

#[test]
fn test_int_sig_above_half_order_is_flipped() {
    // s = order - 1 <-> canonical s' = 1, big-endian byte string.
    let script = int_sig_to_s_component(
        &StackNumber::new(0, false),
        &StackNumber::new(1, false),
        SigOperandFlags::all(),
        false,
    )
    .expect("build failed");
    let result = run_with_nums(&script, &[6, 7]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x01]]);
}

#[test]
fn test_int_sig_der_prefix() {
    let script = int_sig_to_s_component(
        &StackNumber::new(0, false),
        &StackNumber::new(1, false),
        SigOperandFlags::all(),
        true,
    )
    .expect("build failed");
    let result = run_with_nums(&script, &[6, 7]).expect("execution failed");
    // 0x02 || len(s) || s
    assert_eq!(result.stack.items(), &[vec![0x02, 0x01, 0x01]]);
}

#[test]
fn test_int_sig_multi_byte_scalar() {
    // order = 1000, s = 999 -> canonical 1; s = 300 stays and reads
    // 0x012C big-endian.
    let script = int_sig_to_s_component(
        &StackNumber::new(0, false),
        &StackNumber::new(1, false),
        SigOperandFlags::all(),
        false,
    )
    .expect("build failed");

    let result = run_with_nums(&script, &[999, 1000]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x01]]);

    let result = run_with_nums(&script, &[300, 1000]).expect("execution failed");
    assert_eq!(result.stack.items(), &[vec![0x01, 0x2C]]);
}

// ============================================================================
// Bit packing
// ============================================================================

#[test]
fn test_unsigned_from_bits_weighting() {
    // Bits at depths 2, 1, 0 carry weights 1, 2, 4.
    let elements = [
        StackBaseElement::new(2),
        StackBaseElement::new(1),
        StackBaseElement::new(0),
    ];
    let script = unsigned_from_bits(&elements, &[true, true, true]).expect("build failed");

    let result = run_with_nums(&script, &[1, 0, 1]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[5]));

    let result = run_with_nums(&script, &[1, 1, 1]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[7]));
}

#[test]
fn test_unsigned_from_bits_copying_preserves_inputs() {
    let elements = [StackBaseElement::new(1), StackBaseElement::new(0)];
    let script = unsigned_from_bits(&elements, &[false, false]).expect("build failed");
    let result = run_with_nums(&script, &[1, 1]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[1, 1, 3]));
}

// ============================================================================
// Constant verification
// ============================================================================

#[test]
fn test_verify_bottom_constant() {
    let script = verify_bottom_constant(&BigInt::from(17)).expect("build failed");

    let result = run_with_nums(&script, &[17, 42]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[17, 42]));

    let err = run_with_nums(&script, &[18, 42]).unwrap_err();
    assert!(matches!(err, ExecError::EqualVerifyFailed { .. }));
}

#[test]
fn test_verify_bottom_constants_commitment() {
    let c0 = vec![0xDE, 0xAD];
    let c1 = vec![0xBE, 0xEF];
    let script = verify_bottom_constants(&[c0.clone(), c1.clone()]).expect("build failed");

    // Constants at the bottom, unrelated data above: the assert passes and
    // the stack is unchanged.
    let result = run_with_values(&script, vec![c0.clone(), c1.clone(), vec![0x01]])
        .expect("execution failed");
    assert_eq!(result.stack.items(), &[c0.clone(), c1, vec![0x01]]);

    // Tampering with either constant breaks the digest.
    let err = run_with_values(&script, vec![c0, vec![0xBE, 0xEE], vec![0x01]]).unwrap_err();
    assert!(matches!(err, ExecError::EqualVerifyFailed { .. }));
}

// ============================================================================
// Merkle path verification
// ============================================================================

fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn test_merkle_proof_with_bit_flags() {
    // Depth-2 tree over sha256: node = h(leaf), root = h(node || aux) when
    // the bit says the node goes left.
    let leaf = vec![0x11];
    let aux = sha256(&[0x22]);
    let node = sha256(&leaf);
    let mut preimage = node.clone();
    preimage.extend_from_slice(&aux);
    let root = sha256(&preimage);

    let tree = MerkleTree::new(&hex(&root), Script::from(stackscript_ops::Opcode::OpSha256), 2)
        .expect("tree failed");

    // Stack in: [aux, bit, leaf]; bit = 1 puts the node on the left.
    let script = tree.locking_merkle_proof_with_bit_flags(false);
    let result = run_with_values(&script, vec![aux.clone(), vec![0x01], leaf.clone()])
        .expect("execution failed");
    assert!(result.is_clean_success());

    // The same path with the bit flipped hashes the wrong concatenation.
    let result = run_with_values(&script, vec![aux, vec![], leaf]).expect("execution failed");
    assert!(!result.is_clean_success());
}

#[test]
fn test_merkle_proof_with_two_aux() {
    // Each level hashes aux_0 || node || aux_1.
    let leaf = vec![0x33];
    let aux0 = vec![0xA0];
    let aux1 = vec![0xA1];
    let node = sha256(&leaf);
    let mut preimage = aux0.clone();
    preimage.extend_from_slice(&node);
    preimage.extend_from_slice(&aux1);
    let root = sha256(&preimage);

    let tree = MerkleTree::new(&hex(&root), Script::from(stackscript_ops::Opcode::OpSha256), 2)
        .expect("tree failed");

    let script = tree.locking_merkle_proof_with_two_aux(true);
    let result =
        run_with_values(&script, vec![aux0.clone(), aux1.clone(), leaf]).expect("execution failed");
    assert!(result.stack.is_empty());

    let err = run_with_values(&script, vec![aux0, aux1, vec![0x34]]).unwrap_err();
    assert!(matches!(err, ExecError::EqualVerifyFailed { .. }));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_constant_guard_composes_with_arithmetic() {
    // A realistic locking shape: assert the committed modulus at the
    // bottom, then run a modular gate against it.
    let mut script = verify_bottom_constant(&BigInt::from(7)).expect("build failed");
    script += compute_mul_sub(&MulSubParams::default()).expect("build failed");

    let result = run_with_nums(&script, &[7, 10, 3, 3]).expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[7, 1]));
}

#[test]
fn test_builder_scripts_run_on_preloaded_stack() {
    let script = roll(2, 1).expect("roll failed");
    let stack = Stack::from_nums(&[5, 6, 7]);
    let result = Vm::default()
        .run_with_stack(&script, stack)
        .expect("execution failed");
    assert_eq!(stack_nums(&result), nums(&[6, 7, 5]));
}
