//! Overflow-guarded 64-bit arithmetic.
//!
//! The on-chain interpreter computes in signed 64-bit integers. To stay
//! provably inside that domain the guard runs *before* every
//! multiplication: both operands must be non-negative and at most 2^62
//! (the margin reserved for fee arithmetic headroom), and for a positive
//! left operand the right one must not push the product past `i64::MAX`.

use crate::error::{AmmError, AmmResult};
use types::MAX_SAFE_OPERAND;

/// Guarded multiplication.
///
/// `op` names the calling operation; it is carried into the error so a
/// failed guard identifies exactly which computation would have overflowed.
pub fn checked_mul(op: &'static str, lhs: i64, rhs: i64) -> AmmResult<i64> {
    if !(0..=MAX_SAFE_OPERAND).contains(&lhs) || !(0..=MAX_SAFE_OPERAND).contains(&rhs) {
        return Err(AmmError::overflow(op, lhs, rhs));
    }
    if lhs > 0 && rhs > i64::MAX / lhs {
        return Err(AmmError::overflow(op, lhs, rhs));
    }
    Ok(lhs * rhs)
}

/// Guarded addition over the same non-negative domain.
pub fn checked_add(op: &'static str, lhs: i64, rhs: i64) -> AmmResult<i64> {
    if lhs < 0 || rhs < 0 {
        return Err(AmmError::overflow(op, lhs, rhs));
    }
    match lhs.checked_add(rhs) {
        Some(sum) if sum <= MAX_SAFE_OPERAND => Ok(sum),
        _ => Err(AmmError::overflow(op, lhs, rhs)),
    }
}

/// Ceiling division for non-negative numerator and positive denominator.
///
/// Written as `(n - 1) / d + 1` so the intermediate can never overflow.
pub fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(numerator >= 0 && denominator > 0);
    if numerator == 0 {
        0
    } else {
        (numerator - 1) / denominator + 1
    }
}

/// The constant product `k = rxd_reserve × token_reserve`.
pub fn calculate_k(rxd_reserve: i64, token_reserve: i64) -> AmmResult<i64> {
    checked_mul("calculate_k", rxd_reserve, token_reserve)
}
