//! # Microswap Unified Types Library
//!
//! Shared type system for the microswap core: pool snapshots, trade routing
//! results, and the byte-level constants of the on-chain pool contract.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: every on-chain amount is a signed 64-bit integer
//!   in base units, matching the ledger interpreter's number domain exactly.
//!   `rust_decimal::Decimal` appears only in display-oriented fields (spot
//!   and average prices) that never feed back into consensus arithmetic.
//! - **Immutable Values**: a [`PoolState`] is never mutated in place. Every
//!   trade produces a fresh state, mirroring how the ledger replaces a pool
//!   UTXO with its successor.
//! - **Clear Boundaries**: this crate holds pure data structures only.
//!   Script encoding rules live in `codec`, trade arithmetic in `amm`, and
//!   allocation policy in `router`.
//!
//! ## Integration Points
//!
//! ```text
//! libs/types → codec / amm / router → transport (external)
//!     ↑              ↓                     ↓
//! Pure Data     Rules & Math         Tx assembly,
//! Structures    (this workspace)     broadcast (out of scope)
//! ```

pub mod constants;
pub mod pool;
pub mod trade;

pub use constants::{
    DUST_LIMIT, FEE_DENOMINATOR, FEE_NUMERATOR, MAX_SAFE_OPERAND, OWNER_HASH_LEN, STATE_LEN,
    STATE_SEPARATOR, TOKEN_REF_LEN,
};
pub use pool::{OutPoint, OwnerHash, Pool, PoolState, TokenRef, TypeError};
pub use trade::{SwapDirection, SwapRequest, TradeRoute, TradeStep};
