//! Pool snapshot types.
//!
//! A pool is a single ledger UTXO whose locking script carries both the
//! spending rules (code portion) and the current token reserve (state
//! portion). Off-chain we model it as an immutable snapshot: the UTXO
//! reference, the reserve pair, the owner identity hash, and the optional
//! token binding. Trades never mutate a [`Pool`]; they produce a successor
//! [`PoolState`] for the replacement UTXO.

use crate::constants::{DUST_LIMIT, MAX_SAFE_OPERAND, OWNER_HASH_LEN, TOKEN_REF_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for the shared data model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A reserve is negative or exceeds the safe 64-bit computation domain.
    #[error("reserve out of range: {field} = {value} (allowed 0..={max})")]
    ReserveOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },

    /// A fixed-width byte field has the wrong length.
    #[error("invalid {field} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Reference to the UTXO holding a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: [u8; 32],
    pub vout: u32,
}

impl OutPoint {
    pub const fn new(txid: [u8; 32], vout: u32) -> Self {
        Self { txid, vout }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid), self.vout)
    }
}

/// 20-byte hash of the pool owner's public key (hash160).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerHash(pub [u8; OWNER_HASH_LEN]);

impl OwnerHash {
    pub const fn new(bytes: [u8; OWNER_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds an owner hash from a byte slice, rejecting wrong lengths.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; OWNER_HASH_LEN] =
            bytes.try_into().map_err(|_| TypeError::InvalidLength {
                field: "owner hash",
                expected: OWNER_HASH_LEN,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; OWNER_HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// 32-byte token identity reference binding a pool to one fungible asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef(pub [u8; TOKEN_REF_LEN]);

impl TokenRef {
    pub const fn new(bytes: [u8; TOKEN_REF_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; TOKEN_REF_LEN] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
            field: "token ref",
            expected: TOKEN_REF_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; TOKEN_REF_LEN] {
        &self.0
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Immutable reserve pair of one pool.
///
/// The constant product `k = rxd_reserve × token_reserve` is always derived
/// on demand (by `amm::calculate_k`), never cached, so it cannot drift from
/// the reserves that define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolState {
    rxd_reserve: i64,
    token_reserve: i64,
}

impl PoolState {
    /// Creates a validated reserve pair.
    ///
    /// Both reserves must lie in `0..=MAX_SAFE_OPERAND`; anything outside
    /// that range could not appear in a consensus-valid pool script.
    pub fn new(rxd_reserve: i64, token_reserve: i64) -> Result<Self, TypeError> {
        for (field, value) in [("rxd_reserve", rxd_reserve), ("token_reserve", token_reserve)] {
            if !(0..=MAX_SAFE_OPERAND).contains(&value) {
                return Err(TypeError::ReserveOutOfRange {
                    field,
                    value,
                    max: MAX_SAFE_OPERAND,
                });
            }
        }
        Ok(Self {
            rxd_reserve,
            token_reserve,
        })
    }

    pub const fn rxd_reserve(&self) -> i64 {
        self.rxd_reserve
    }

    pub const fn token_reserve(&self) -> i64 {
        self.token_reserve
    }

    /// Whether the pool can accept trades at all.
    ///
    /// Pools below the dust limit on the RXD side or below one unit on the
    /// token side are withdrawal-only.
    pub const fn is_tradable(&self) -> bool {
        self.rxd_reserve >= DUST_LIMIT && self.token_reserve >= 1
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{rxd: {}, token: {}}}", self.rxd_reserve, self.token_reserve)
    }
}

/// Snapshot of one on-chain micro-pool.
///
/// Immutable except by replacement: a trade consumes the UTXO at `outpoint`
/// and re-creates the pool with a successor state; an owner withdrawal
/// terminates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub outpoint: OutPoint,
    pub state: PoolState,
    pub owner_hash: OwnerHash,
    pub token_ref: Option<TokenRef>,
}

impl Pool {
    pub const fn new(
        outpoint: OutPoint,
        state: PoolState,
        owner_hash: OwnerHash,
        token_ref: Option<TokenRef>,
    ) -> Self {
        Self {
            outpoint,
            state,
            owner_hash,
            token_ref,
        }
    }
}
