//! Cross-module interaction tests
//!
//! Tests the integration between the builder, the instruction-set crate's
//! text and binary codecs, and the runtime: a generated script must mean
//! the same thing after every representation change.

use stackscript_builder::{
    compute_mul_sub, pick, reverse_endianness_fixed_length, roll, verify_bottom_constants,
    MulSubParams, StackBaseElement,
};
use stackscript_ops::{decode_num, Instruction, Opcode, Script};
use stackscript_vm::{run_with_nums, Vm};

// ============================================================================
// Text round trips
// ============================================================================

#[test]
fn test_builder_output_survives_text_round_trip() {
    let script = compute_mul_sub(&MulSubParams::default()).expect("build failed");
    let reparsed = Script::parse(&script.to_string()).expect("parse failed");
    assert_eq!(script, reparsed);
}

#[test]
fn test_reparsed_script_executes_identically() {
    let script = roll(3, 2).expect("roll failed");
    let reparsed = Script::parse(&script.to_string()).expect("parse failed");

    let a = run_with_nums(&script, &[1, 2, 3, 4, 5]).expect("execution failed");
    let b = run_with_nums(&reparsed, &[1, 2, 3, 4, 5]).expect("execution failed");
    assert_eq!(a.stack, b.stack);
}

#[test]
fn test_pushdata_text_round_trip() {
    // A script carrying a 32-byte commitment push.
    let script = verify_bottom_constants(&[vec![0xAA; 4]]).expect("build failed");
    let reparsed = Script::parse(&script.to_string()).expect("parse failed");
    assert_eq!(script, reparsed);
}

// ============================================================================
// Binary round trips
// ============================================================================

#[test]
fn test_builder_output_survives_binary_round_trip() {
    let script = reverse_endianness_fixed_length(4, &StackBaseElement::new(0), true)
        .expect("build failed");
    let bytes = script.to_bytes();
    let decoded = Script::from_bytes(&bytes).expect("decode failed");
    assert_eq!(script, decoded);
}

#[test]
fn test_direct_push_under_76_bytes() {
    let mut script = Script::new();
    script.push_slice(&[0x42; 75]);
    let bytes = script.to_bytes();
    assert_eq!(bytes[0], 75);
    assert_eq!(bytes.len(), 76);
    assert_eq!(Script::from_bytes(&bytes).expect("decode failed"), script);
}

#[test]
fn test_pushdata1_from_76_bytes() {
    let mut script = Script::new();
    script.push_slice(&[0x42; 76]);
    let bytes = script.to_bytes();
    assert_eq!(bytes[0], 0x4C);
    assert_eq!(bytes[1], 76);
    assert_eq!(Script::from_bytes(&bytes).expect("decode failed"), script);
}

#[test]
fn test_pushdata2_from_256_bytes() {
    let mut script = Script::new();
    script.push_slice(&[0x42; 256]);
    let bytes = script.to_bytes();
    assert_eq!(bytes[0], 0x4D);
    assert_eq!(&bytes[1..3], &[0x00, 0x01]);
    assert_eq!(Script::from_bytes(&bytes).expect("decode failed"), script);
}

#[test]
fn test_empty_push_serializes_as_op_0() {
    let mut script = Script::new();
    script.push_slice(&[]);
    assert_eq!(script.to_bytes(), vec![0x00]);
}

// ============================================================================
// Serde
// ============================================================================

#[test]
fn test_builder_output_survives_bincode() {
    let script = pick(-1, 2).expect("pick failed");
    let encoded = bincode::serialize(&script).expect("serialize failed");
    let decoded: Script = bincode::deserialize(&encoded).expect("deserialize failed");
    assert_eq!(script, decoded);
}

// ============================================================================
// Builder output shape
// ============================================================================

#[test]
fn test_builder_emits_minimal_pushes() {
    // Depths above 16 are pushed as data, minimally encoded.
    let script = pick(17, 1).expect("pick failed");
    match &script.instructions()[0] {
        Instruction::Push(bytes) => assert_eq!(decode_num(bytes), 17.into()),
        other => panic!("expected a push, got {other}"),
    }
    assert_eq!(script.instructions()[1], Instruction::Op(Opcode::OpPick));
}

#[test]
fn test_concatenated_scripts_execute_in_sequence() {
    let first = pick(1, 1).expect("pick failed");
    let second = roll(2, 1).expect("roll failed");
    let combined = first.clone() + second.clone();
    assert_eq!(combined.len(), first.len() + second.len());

    // [1, 2] -> pick(1,1) -> [1, 2, 1] -> roll(2,1) -> [2, 1, 1]
    let result = run_with_nums(&combined, &[1, 2]).expect("execution failed");
    let nums: Vec<_> = result.stack.items().iter().map(|v| decode_num(v)).collect();
    assert_eq!(nums, vec![2.into(), 1.into(), 1.into()]);
}

#[test]
fn test_ops_counted_once_per_instruction() {
    let script = Script::parse("OP_1 OP_2 OP_ADD").expect("parse failed");
    let result = Vm::default().run(&script).expect("execution failed");
    assert_eq!(result.ops_executed, script.len() as u64);
}
