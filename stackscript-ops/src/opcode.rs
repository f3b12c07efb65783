//! # Opcode Definitions
//!
//! This module defines the opcode values for the fixed instruction
//! vocabulary of the target stack machine. Each opcode occupies one byte.
//!
//! ## Opcode Encoding
//!
//! Opcodes are organized by instruction family:
//! - 0x00, 0x4F-0x60: Constants (OP_0, OP_1NEGATE, OP_1..OP_16)
//! - 0x63-0x69: Flow control (IF, NOTIF, ELSE, ENDIF, VERIFY)
//! - 0x6B-0x7D: Stack manipulation (DUP, SWAP, PICK, ROLL, DEPTH, ...)
//! - 0x7E-0x82: Byte strings (CAT, SPLIT, NUM2BIN, BIN2NUM, SIZE)
//! - 0x87-0x88: Equality (EQUAL, EQUALVERIFY)
//! - 0x8B-0xA5: Arithmetic and comparison
//! - 0xA6-0xAA: Hashing (RIPEMD160, SHA1, SHA256, HASH160, HASH256)
//!
//! Byte values 0x01-0x4E are reserved for push-data prefixes and never
//! appear as bare opcodes; see [`crate::script::Script::to_bytes`].

use serde::{Deserialize, Serialize};

/// Instruction opcode (one byte)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Constants ==========
    /// OP_0: push the empty byte string (numeric zero)
    Op0 = 0x00,
    /// OP_1NEGATE: push -1
    Op1Negate = 0x4F,
    /// OP_1: push 1
    Op1 = 0x51,
    /// OP_2: push 2
    Op2 = 0x52,
    /// OP_3: push 3
    Op3 = 0x53,
    /// OP_4: push 4
    Op4 = 0x54,
    /// OP_5: push 5
    Op5 = 0x55,
    /// OP_6: push 6
    Op6 = 0x56,
    /// OP_7: push 7
    Op7 = 0x57,
    /// OP_8: push 8
    Op8 = 0x58,
    /// OP_9: push 9
    Op9 = 0x59,
    /// OP_10: push 10
    Op10 = 0x5A,
    /// OP_11: push 11
    Op11 = 0x5B,
    /// OP_12: push 12
    Op12 = 0x5C,
    /// OP_13: push 13
    Op13 = 0x5D,
    /// OP_14: push 14
    Op14 = 0x5E,
    /// OP_15: push 15
    Op15 = 0x5F,
    /// OP_16: push 16
    Op16 = 0x60,

    // ========== Flow control ==========
    /// OP_IF: execute the branch if the popped value is truthy
    OpIf = 0x63,
    /// OP_NOTIF: execute the branch if the popped value is falsy
    OpNotIf = 0x64,
    /// OP_ELSE: alternate branch
    OpElse = 0x67,
    /// OP_ENDIF: close a conditional
    OpEndIf = 0x68,
    /// OP_VERIFY: fail unless the popped value is truthy
    OpVerify = 0x69,

    // ========== Stack manipulation ==========
    /// OP_TOALTSTACK: move top element to the altstack
    OpToAltStack = 0x6B,
    /// OP_FROMALTSTACK: move top altstack element to the stack
    OpFromAltStack = 0x6C,
    /// OP_2DROP: drop the top two elements
    Op2Drop = 0x6D,
    /// OP_2DUP: duplicate the top two elements
    Op2Dup = 0x6E,
    /// OP_3DUP: duplicate the top three elements
    Op3Dup = 0x6F,
    /// OP_2OVER: copy the pair at depths 3,2 to the top
    Op2Over = 0x70,
    /// OP_2ROT: move the pair at depths 5,4 to the top
    Op2Rot = 0x71,
    /// OP_2SWAP: swap the top two pairs
    Op2Swap = 0x72,
    /// OP_DEPTH: push the current stack depth
    OpDepth = 0x74,
    /// OP_DROP: drop the top element
    OpDrop = 0x75,
    /// OP_DUP: duplicate the top element
    OpDup = 0x76,
    /// OP_NIP: drop the second element
    OpNip = 0x77,
    /// OP_OVER: copy the second element to the top
    OpOver = 0x78,
    /// OP_PICK: pop n, copy the element at depth n to the top
    OpPick = 0x79,
    /// OP_ROLL: pop n, move the element at depth n to the top
    OpRoll = 0x7A,
    /// OP_ROT: move the third element to the top
    OpRot = 0x7B,
    /// OP_SWAP: swap the top two elements
    OpSwap = 0x7C,
    /// OP_TUCK: copy the top element below the second
    OpTuck = 0x7D,

    // ========== Byte strings ==========
    /// OP_CAT: concatenate the top two byte strings
    OpCat = 0x7E,
    /// OP_SPLIT: pop n, split the byte string at index n
    OpSplit = 0x7F,
    /// OP_NUM2BIN: pop size, re-encode the number into that many bytes
    OpNum2Bin = 0x80,
    /// OP_BIN2NUM: re-encode the byte string as a minimal number
    OpBin2Num = 0x81,
    /// OP_SIZE: push the byte length of the top element
    OpSize = 0x82,

    // ========== Equality ==========
    /// OP_EQUAL: push 1 if the top two elements are byte-equal, else 0
    OpEqual = 0x87,
    /// OP_EQUALVERIFY: fail unless the top two elements are byte-equal
    OpEqualVerify = 0x88,

    // ========== Arithmetic ==========
    /// OP_1ADD: increment
    Op1Add = 0x8B,
    /// OP_1SUB: decrement
    Op1Sub = 0x8C,
    /// OP_NEGATE: arithmetic negation
    OpNegate = 0x8F,
    /// OP_ABS: absolute value
    OpAbs = 0x90,
    /// OP_NOT: boolean negation
    OpNot = 0x91,
    /// OP_ADD: a + b
    OpAdd = 0x93,
    /// OP_SUB: a - b
    OpSub = 0x94,
    /// OP_MUL: a * b
    OpMul = 0x95,
    /// OP_DIV: a / b, truncated toward zero
    OpDiv = 0x96,
    /// OP_MOD: a % b, sign follows the dividend
    OpMod = 0x97,

    // ========== Comparison ==========
    /// OP_NUMEQUAL: numeric equality
    OpNumEqual = 0x9C,
    /// OP_NUMEQUALVERIFY: fail unless numerically equal
    OpNumEqualVerify = 0x9D,
    /// OP_LESSTHAN: a < b
    OpLessThan = 0x9F,
    /// OP_GREATERTHAN: a > b
    OpGreaterThan = 0xA0,
    /// OP_LESSTHANOREQUAL: a <= b
    OpLessThanOrEqual = 0xA1,
    /// OP_GREATERTHANOREQUAL: a >= b
    OpGreaterThanOrEqual = 0xA2,
    /// OP_MIN: minimum of the top two numbers
    OpMin = 0xA3,
    /// OP_MAX: maximum of the top two numbers
    OpMax = 0xA4,

    // ========== Hashing ==========
    /// OP_RIPEMD160: RIPEMD-160 of the top element
    OpRipemd160 = 0xA6,
    /// OP_SHA1: SHA-1 of the top element
    OpSha1 = 0xA7,
    /// OP_SHA256: SHA-256 of the top element
    OpSha256 = 0xA8,
    /// OP_HASH160: RIPEMD-160 of SHA-256 of the top element
    OpHash160 = 0xA9,
    /// OP_HASH256: double SHA-256 of the top element
    OpHash256 = 0xAA,
}

impl Opcode {
    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            // Constants
            0x00 => Some(Opcode::Op0),
            0x4F => Some(Opcode::Op1Negate),
            0x51 => Some(Opcode::Op1),
            0x52 => Some(Opcode::Op2),
            0x53 => Some(Opcode::Op3),
            0x54 => Some(Opcode::Op4),
            0x55 => Some(Opcode::Op5),
            0x56 => Some(Opcode::Op6),
            0x57 => Some(Opcode::Op7),
            0x58 => Some(Opcode::Op8),
            0x59 => Some(Opcode::Op9),
            0x5A => Some(Opcode::Op10),
            0x5B => Some(Opcode::Op11),
            0x5C => Some(Opcode::Op12),
            0x5D => Some(Opcode::Op13),
            0x5E => Some(Opcode::Op14),
            0x5F => Some(Opcode::Op15),
            0x60 => Some(Opcode::Op16),

            // Flow control
            0x63 => Some(Opcode::OpIf),
            0x64 => Some(Opcode::OpNotIf),
            0x67 => Some(Opcode::OpElse),
            0x68 => Some(Opcode::OpEndIf),
            0x69 => Some(Opcode::OpVerify),

            // Stack manipulation
            0x6B => Some(Opcode::OpToAltStack),
            0x6C => Some(Opcode::OpFromAltStack),
            0x6D => Some(Opcode::Op2Drop),
            0x6E => Some(Opcode::Op2Dup),
            0x6F => Some(Opcode::Op3Dup),
            0x70 => Some(Opcode::Op2Over),
            0x71 => Some(Opcode::Op2Rot),
            0x72 => Some(Opcode::Op2Swap),
            0x74 => Some(Opcode::OpDepth),
            0x75 => Some(Opcode::OpDrop),
            0x76 => Some(Opcode::OpDup),
            0x77 => Some(Opcode::OpNip),
            0x78 => Some(Opcode::OpOver),
            0x79 => Some(Opcode::OpPick),
            0x7A => Some(Opcode::OpRoll),
            0x7B => Some(Opcode::OpRot),
            0x7C => Some(Opcode::OpSwap),
            0x7D => Some(Opcode::OpTuck),

            // Byte strings
            0x7E => Some(Opcode::OpCat),
            0x7F => Some(Opcode::OpSplit),
            0x80 => Some(Opcode::OpNum2Bin),
            0x81 => Some(Opcode::OpBin2Num),
            0x82 => Some(Opcode::OpSize),

            // Equality
            0x87 => Some(Opcode::OpEqual),
            0x88 => Some(Opcode::OpEqualVerify),

            // Arithmetic
            0x8B => Some(Opcode::Op1Add),
            0x8C => Some(Opcode::Op1Sub),
            0x8F => Some(Opcode::OpNegate),
            0x90 => Some(Opcode::OpAbs),
            0x91 => Some(Opcode::OpNot),
            0x93 => Some(Opcode::OpAdd),
            0x94 => Some(Opcode::OpSub),
            0x95 => Some(Opcode::OpMul),
            0x96 => Some(Opcode::OpDiv),
            0x97 => Some(Opcode::OpMod),

            // Comparison
            0x9C => Some(Opcode::OpNumEqual),
            0x9D => Some(Opcode::OpNumEqualVerify),
            0x9F => Some(Opcode::OpLessThan),
            0xA0 => Some(Opcode::OpGreaterThan),
            0xA1 => Some(Opcode::OpLessThanOrEqual),
            0xA2 => Some(Opcode::OpGreaterThanOrEqual),
            0xA3 => Some(Opcode::OpMin),
            0xA4 => Some(Opcode::OpMax),

            // Hashing
            0xA6 => Some(Opcode::OpRipemd160),
            0xA7 => Some(Opcode::OpSha1),
            0xA8 => Some(Opcode::OpSha256),
            0xA9 => Some(Opcode::OpHash160),
            0xAA => Some(Opcode::OpHash256),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The dedicated push opcode for n in [-1, 16], if any
    pub fn from_small_int(n: i64) -> Option<Self> {
        match n {
            -1 => Some(Opcode::Op1Negate),
            0 => Some(Opcode::Op0),
            1 => Some(Opcode::Op1),
            2 => Some(Opcode::Op2),
            3 => Some(Opcode::Op3),
            4 => Some(Opcode::Op4),
            5 => Some(Opcode::Op5),
            6 => Some(Opcode::Op6),
            7 => Some(Opcode::Op7),
            8 => Some(Opcode::Op8),
            9 => Some(Opcode::Op9),
            10 => Some(Opcode::Op10),
            11 => Some(Opcode::Op11),
            12 => Some(Opcode::Op12),
            13 => Some(Opcode::Op13),
            14 => Some(Opcode::Op14),
            15 => Some(Opcode::Op15),
            16 => Some(Opcode::Op16),
            _ => None,
        }
    }

    /// The small integer pushed by this opcode, if it is a constant opcode
    pub const fn small_int(self) -> Option<i64> {
        match self {
            Opcode::Op0 => Some(0),
            Opcode::Op1Negate => Some(-1),
            Opcode::Op1 => Some(1),
            Opcode::Op2 => Some(2),
            Opcode::Op3 => Some(3),
            Opcode::Op4 => Some(4),
            Opcode::Op5 => Some(5),
            Opcode::Op6 => Some(6),
            Opcode::Op7 => Some(7),
            Opcode::Op8 => Some(8),
            Opcode::Op9 => Some(9),
            Opcode::Op10 => Some(10),
            Opcode::Op11 => Some(11),
            Opcode::Op12 => Some(12),
            Opcode::Op13 => Some(13),
            Opcode::Op14 => Some(14),
            Opcode::Op15 => Some(15),
            Opcode::Op16 => Some(16),
            _ => None,
        }
    }

    /// Check if this is a constant-push opcode
    #[inline]
    pub const fn is_constant(self) -> bool {
        self.small_int().is_some()
    }

    /// Check if this is a hashing opcode
    #[inline]
    pub const fn is_hash(self) -> bool {
        matches!(
            self,
            Opcode::OpRipemd160
                | Opcode::OpSha1
                | Opcode::OpSha256
                | Opcode::OpHash160
                | Opcode::OpHash256
        )
    }

    /// Check if this is a flow-control opcode
    #[inline]
    pub const fn is_flow_control(self) -> bool {
        matches!(
            self,
            Opcode::OpIf | Opcode::OpNotIf | Opcode::OpElse | Opcode::OpEndIf
        )
    }

    /// The canonical OP_ name of this opcode
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Op0 => "OP_0",
            Opcode::Op1Negate => "OP_1NEGATE",
            Opcode::Op1 => "OP_1",
            Opcode::Op2 => "OP_2",
            Opcode::Op3 => "OP_3",
            Opcode::Op4 => "OP_4",
            Opcode::Op5 => "OP_5",
            Opcode::Op6 => "OP_6",
            Opcode::Op7 => "OP_7",
            Opcode::Op8 => "OP_8",
            Opcode::Op9 => "OP_9",
            Opcode::Op10 => "OP_10",
            Opcode::Op11 => "OP_11",
            Opcode::Op12 => "OP_12",
            Opcode::Op13 => "OP_13",
            Opcode::Op14 => "OP_14",
            Opcode::Op15 => "OP_15",
            Opcode::Op16 => "OP_16",
            Opcode::OpIf => "OP_IF",
            Opcode::OpNotIf => "OP_NOTIF",
            Opcode::OpElse => "OP_ELSE",
            Opcode::OpEndIf => "OP_ENDIF",
            Opcode::OpVerify => "OP_VERIFY",
            Opcode::OpToAltStack => "OP_TOALTSTACK",
            Opcode::OpFromAltStack => "OP_FROMALTSTACK",
            Opcode::Op2Drop => "OP_2DROP",
            Opcode::Op2Dup => "OP_2DUP",
            Opcode::Op3Dup => "OP_3DUP",
            Opcode::Op2Over => "OP_2OVER",
            Opcode::Op2Rot => "OP_2ROT",
            Opcode::Op2Swap => "OP_2SWAP",
            Opcode::OpDepth => "OP_DEPTH",
            Opcode::OpDrop => "OP_DROP",
            Opcode::OpDup => "OP_DUP",
            Opcode::OpNip => "OP_NIP",
            Opcode::OpOver => "OP_OVER",
            Opcode::OpPick => "OP_PICK",
            Opcode::OpRoll => "OP_ROLL",
            Opcode::OpRot => "OP_ROT",
            Opcode::OpSwap => "OP_SWAP",
            Opcode::OpTuck => "OP_TUCK",
            Opcode::OpCat => "OP_CAT",
            Opcode::OpSplit => "OP_SPLIT",
            Opcode::OpNum2Bin => "OP_NUM2BIN",
            Opcode::OpBin2Num => "OP_BIN2NUM",
            Opcode::OpSize => "OP_SIZE",
            Opcode::OpEqual => "OP_EQUAL",
            Opcode::OpEqualVerify => "OP_EQUALVERIFY",
            Opcode::Op1Add => "OP_1ADD",
            Opcode::Op1Sub => "OP_1SUB",
            Opcode::OpNegate => "OP_NEGATE",
            Opcode::OpAbs => "OP_ABS",
            Opcode::OpNot => "OP_NOT",
            Opcode::OpAdd => "OP_ADD",
            Opcode::OpSub => "OP_SUB",
            Opcode::OpMul => "OP_MUL",
            Opcode::OpDiv => "OP_DIV",
            Opcode::OpMod => "OP_MOD",
            Opcode::OpNumEqual => "OP_NUMEQUAL",
            Opcode::OpNumEqualVerify => "OP_NUMEQUALVERIFY",
            Opcode::OpLessThan => "OP_LESSTHAN",
            Opcode::OpGreaterThan => "OP_GREATERTHAN",
            Opcode::OpLessThanOrEqual => "OP_LESSTHANOREQUAL",
            Opcode::OpGreaterThanOrEqual => "OP_GREATERTHANOREQUAL",
            Opcode::OpMin => "OP_MIN",
            Opcode::OpMax => "OP_MAX",
            Opcode::OpRipemd160 => "OP_RIPEMD160",
            Opcode::OpSha1 => "OP_SHA1",
            Opcode::OpSha256 => "OP_SHA256",
            Opcode::OpHash160 => "OP_HASH160",
            Opcode::OpHash256 => "OP_HASH256",
        }
    }

    /// Look up an opcode by its canonical OP_ name
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_OPCODES.iter().copied().find(|op| op.name() == name)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every opcode in the vocabulary, in byte-value order
pub const ALL_OPCODES: &[Opcode] = &[
    Opcode::Op0,
    Opcode::Op1Negate,
    Opcode::Op1,
    Opcode::Op2,
    Opcode::Op3,
    Opcode::Op4,
    Opcode::Op5,
    Opcode::Op6,
    Opcode::Op7,
    Opcode::Op8,
    Opcode::Op9,
    Opcode::Op10,
    Opcode::Op11,
    Opcode::Op12,
    Opcode::Op13,
    Opcode::Op14,
    Opcode::Op15,
    Opcode::Op16,
    Opcode::OpIf,
    Opcode::OpNotIf,
    Opcode::OpElse,
    Opcode::OpEndIf,
    Opcode::OpVerify,
    Opcode::OpToAltStack,
    Opcode::OpFromAltStack,
    Opcode::Op2Drop,
    Opcode::Op2Dup,
    Opcode::Op3Dup,
    Opcode::Op2Over,
    Opcode::Op2Rot,
    Opcode::Op2Swap,
    Opcode::OpDepth,
    Opcode::OpDrop,
    Opcode::OpDup,
    Opcode::OpNip,
    Opcode::OpOver,
    Opcode::OpPick,
    Opcode::OpRoll,
    Opcode::OpRot,
    Opcode::OpSwap,
    Opcode::OpTuck,
    Opcode::OpCat,
    Opcode::OpSplit,
    Opcode::OpNum2Bin,
    Opcode::OpBin2Num,
    Opcode::OpSize,
    Opcode::OpEqual,
    Opcode::OpEqualVerify,
    Opcode::Op1Add,
    Opcode::Op1Sub,
    Opcode::OpNegate,
    Opcode::OpAbs,
    Opcode::OpNot,
    Opcode::OpAdd,
    Opcode::OpSub,
    Opcode::OpMul,
    Opcode::OpDiv,
    Opcode::OpMod,
    Opcode::OpNumEqual,
    Opcode::OpNumEqualVerify,
    Opcode::OpLessThan,
    Opcode::OpGreaterThan,
    Opcode::OpLessThanOrEqual,
    Opcode::OpGreaterThanOrEqual,
    Opcode::OpMin,
    Opcode::OpMax,
    Opcode::OpRipemd160,
    Opcode::OpSha1,
    Opcode::OpSha256,
    Opcode::OpHash160,
    Opcode::OpHash256,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(Opcode::Op0.to_u8(), 0x00);
        assert_eq!(Opcode::Op1Negate.to_u8(), 0x4F);
        assert_eq!(Opcode::Op1.to_u8(), 0x51);
        assert_eq!(Opcode::Op16.to_u8(), 0x60);
        assert_eq!(Opcode::OpPick.to_u8(), 0x79);
        assert_eq!(Opcode::OpRoll.to_u8(), 0x7A);
        assert_eq!(Opcode::OpCat.to_u8(), 0x7E);
        assert_eq!(Opcode::OpEqualVerify.to_u8(), 0x88);
        assert_eq!(Opcode::OpMod.to_u8(), 0x97);
        assert_eq!(Opcode::OpHash256.to_u8(), 0xAA);
    }

    #[test]
    fn test_opcode_from_u8() {
        assert_eq!(Opcode::from_u8(0x00), Some(Opcode::Op0));
        assert_eq!(Opcode::from_u8(0x79), Some(Opcode::OpPick));
        assert_eq!(Opcode::from_u8(0x01), None);
        assert_eq!(Opcode::from_u8(0xFF), None);
    }

    #[test]
    fn test_from_u8_round_trip() {
        for &op in ALL_OPCODES {
            assert_eq!(Opcode::from_u8(op.to_u8()), Some(op));
        }
    }

    #[test]
    fn test_small_int_mapping() {
        assert_eq!(Opcode::from_small_int(-1), Some(Opcode::Op1Negate));
        assert_eq!(Opcode::from_small_int(0), Some(Opcode::Op0));
        assert_eq!(Opcode::from_small_int(16), Some(Opcode::Op16));
        assert_eq!(Opcode::from_small_int(17), None);
        assert_eq!(Opcode::from_small_int(-2), None);

        for n in -1..=16 {
            let op = Opcode::from_small_int(n).unwrap();
            assert_eq!(op.small_int(), Some(n));
        }
    }

    #[test]
    fn test_name_round_trip() {
        for &op in ALL_OPCODES {
            assert_eq!(Opcode::from_name(op.name()), Some(op));
        }
        assert_eq!(Opcode::from_name("OP_BOGUS"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::OpPick.to_string(), "OP_PICK");
        assert_eq!(Opcode::Op1Negate.to_string(), "OP_1NEGATE");
    }
}
