//! Opcode registry for the pool contract.
//!
//! Lists the opcodes the template emits plus the full canonical
//! number-encoding set (`OP_0`, `OP_1NEGATE`, `OP_1..OP_16`, the push-data
//! prefixes). Byte values are fixed by the on-chain interpreter and must
//! never change.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Interpreter opcodes used by the pool contract template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Opcode {
    /// Push an empty byte string (canonical zero).
    Op0 = 0x00,
    /// Next byte is the push length.
    OpPushdata1 = 0x4C,
    /// Next two bytes (LE) are the push length.
    OpPushdata2 = 0x4D,
    /// Next four bytes (LE) are the push length.
    OpPushdata4 = 0x4E,
    /// Push the number -1.
    Op1Negate = 0x4F,
    Op1 = 0x51,
    Op2 = 0x52,
    Op3 = 0x53,
    Op4 = 0x54,
    Op5 = 0x55,
    Op6 = 0x56,
    Op7 = 0x57,
    Op8 = 0x58,
    Op9 = 0x59,
    Op10 = 0x5A,
    Op11 = 0x5B,
    Op12 = 0x5C,
    Op13 = 0x5D,
    Op14 = 0x5E,
    Op15 = 0x5F,
    Op16 = 0x60,
    OpIf = 0x63,
    OpElse = 0x67,
    OpEndif = 0x68,
    Op2Dup = 0x6E,
    OpDepth = 0x74,
    OpDrop = 0x75,
    OpDup = 0x76,
    OpNip = 0x77,
    OpRot = 0x7B,
    OpSwap = 0x7C,
    /// Split a byte string at a stack-supplied index.
    OpSplit = 0x7F,
    /// Convert a byte string to a canonical script number.
    OpBin2Num = 0x81,
    OpEqualVerify = 0x88,
    Op1Add = 0x8B,
    OpSub = 0x94,
    OpMul = 0x95,
    OpDiv = 0x96,
    OpGreaterThanOrEqual = 0xA2,
    OpHash160 = 0xA9,
    OpCheckSig = 0xAC,
    /// Boundary between a script's code portion and its state portion.
    OpStateSeparator = 0xBD,
    /// Push the separator index of the executing input's UTXO script.
    OpStateSeparatorIndexUtxo = 0xBE,
    /// Push the separator index of an output script.
    OpStateSeparatorIndexOutput = 0xBF,
    /// Push the index of the executing input.
    OpInputIndex = 0xC0,
    /// Push the value of an input's UTXO.
    OpUtxoValue = 0xC6,
    /// Push the locking script of an input's UTXO.
    OpUtxoBytecode = 0xC7,
    /// Push the value of an output.
    OpOutputValue = 0xCC,
    /// Push the locking script of an output.
    OpOutputBytecode = 0xCD,
    /// Require and push a 32-byte induction reference carried by an input.
    OpPushInputRef = 0xD0,
}

impl Opcode {
    /// Dedicated single-byte opcode for a small integer, if one exists.
    ///
    /// Canonical number encoding requires these to be used instead of an
    /// explicit push wherever they apply.
    pub fn from_small_int(n: i64) -> Option<Self> {
        match n {
            -1 => Some(Self::Op1Negate),
            0 => Some(Self::Op0),
            1..=16 => {
                // Op1..Op16 are contiguous byte values.
                Self::try_from(Self::Op1 as u8 + (n as u8 - 1)).ok()
            }
            _ => None,
        }
    }
}
