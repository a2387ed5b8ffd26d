//! Protocol constants shared by the codec, the invariant engine, and the
//! router.
//!
//! These values are fixed by the deployed on-chain contract. Changing any of
//! them breaks byte compatibility with every existing pool, so they live in
//! one place and are re-exported from the crate root.

/// Reserved byte separating a pool script's immutable code portion from its
/// mutable state suffix.
pub const STATE_SEPARATOR: u8 = 0xBD;

/// Width of the state portion: the token reserve as a little-endian signed
/// 64-bit integer, always exactly this many bytes.
pub const STATE_LEN: usize = 8;

/// Byte length of the owner identity hash (hash160 of the owner public key).
pub const OWNER_HASH_LEN: usize = 20;

/// Byte length of the optional token identity reference bound into the code
/// portion.
pub const TOKEN_REF_LEN: usize = 32;

/// Ledger dust threshold in base units. The minimum tradable amount on the
/// RXD side; pools holding less than this are withdrawal-only.
pub const DUST_LIMIT: i64 = 546;

/// Trade fee numerator: 3 / 1000 = 0.3% of the RXD-side delta, truncated
/// toward zero.
pub const FEE_NUMERATOR: i64 = 3;

/// Trade fee denominator.
pub const FEE_DENOMINATOR: i64 = 1000;

/// Largest operand admitted into a reserve multiplication: 2^62, a safety
/// margin below the interpreter's signed 64-bit ceiling that leaves headroom
/// for fee arithmetic.
pub const MAX_SAFE_OPERAND: i64 = 1 << 62;
