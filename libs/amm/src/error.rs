//! Arithmetic and liquidity errors for the invariant engine.
//!
//! All variants are fatal to the attempted quote; retries belong to layers
//! above the core. Each carries the numeric context a caller needs to
//! report requested-versus-available precisely.

use thiserror::Error;

/// Result type for invariant engine operations.
pub type AmmResult<T> = Result<T, AmmError>;

/// Trade math errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// The input (or implied) amount is below the minimum tradable unit.
    #[error("amount too small: requested {requested}, minimum tradable {minimum}")]
    AmountTooSmall { requested: i64, minimum: i64 },

    /// The pool's reserves cannot satisfy the request.
    #[error("insufficient liquidity: needed {needed}, available {available}")]
    InsufficientLiquidity { needed: i64, available: i64 },

    /// An operation would leave the safe 64-bit computation domain.
    /// Raised before the unsafe multiplication, never after.
    #[error("overflow in {op}: operands {lhs} and {rhs} exceed the safe 64-bit domain")]
    Overflow {
        op: &'static str,
        lhs: i64,
        rhs: i64,
    },
}

impl AmmError {
    pub fn amount_too_small(requested: i64, minimum: i64) -> Self {
        Self::AmountTooSmall { requested, minimum }
    }

    pub fn insufficient_liquidity(needed: i64, available: i64) -> Self {
        Self::InsufficientLiquidity { needed, available }
    }

    pub fn overflow(op: &'static str, lhs: i64, rhs: i64) -> Self {
        Self::Overflow { op, lhs, rhs }
    }
}
