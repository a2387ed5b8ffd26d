//! Property tests for the invariant engine.
//!
//! The binding property: no quote the engine produces may ever fail the
//! on-chain constant-product check, and exact-output quotes may never
//! under-deliver. Rounding favors the pool, not the trader.

use amm::{AmmError, CpmmMath};
use proptest::prelude::*;
use types::{PoolState, DUST_LIMIT};

fn pool(rxd: i64, token: i64) -> PoolState {
    PoolState::new(rxd, token).unwrap()
}

proptest! {
    /// Buys over the whole tested input range keep the invariant and stay
    /// strictly inside the token reserve.
    #[test]
    fn buys_preserve_the_invariant(
        rxd in DUST_LIMIT..=1i64 << 40,
        token in 1i64..=1 << 40,
        rxd_in in DUST_LIMIT..=1 << 40,
    ) {
        let state = pool(rxd, token);
        match CpmmMath::quote_tokens_out(&state, rxd_in) {
            Ok(quote) => {
                prop_assert!(quote.amount_out > 0);
                prop_assert!(quote.amount_out < token);
                prop_assert_eq!(quote.fee, rxd_in * 3 / 1000);
                prop_assert!(CpmmMath::verify_invariant(
                    rxd,
                    token,
                    quote.state_after.rxd_reserve(),
                    quote.state_after.token_reserve(),
                    quote.fee,
                )?);
            }
            // A pool can be too deep for the input to buy a whole token,
            // and reserve pairs whose product leaves the 64-bit domain are
            // rejected by the guard before any arithmetic happens.
            Err(AmmError::InsufficientLiquidity { .. }) | Err(AmmError::Overflow { .. }) => {}
            Err(other) => return Err(TestCaseError::fail(other.to_string())),
        }
    }

    /// Sells keep the invariant whenever they clear the dust floor.
    #[test]
    fn sells_preserve_the_invariant(
        rxd in DUST_LIMIT..=1i64 << 40,
        token in 1i64..=1 << 40,
        tokens_in in 1i64..=1 << 40,
    ) {
        let state = pool(rxd, token);
        match CpmmMath::quote_rxd_out(&state, tokens_in) {
            Ok(quote) => {
                prop_assert!(quote.amount_out > 0);
                prop_assert!(quote.amount_out < rxd);
                prop_assert!(quote.fee >= 1);
                prop_assert!(CpmmMath::verify_invariant(
                    rxd,
                    token,
                    quote.state_after.rxd_reserve(),
                    quote.state_after.token_reserve(),
                    quote.fee,
                )?);
            }
            // Sub-dust proceeds, drained pools, and guard rejections are
            // all legitimate refusals.
            Err(_) => {}
        }
    }

    /// Composing the inverse buy quote with the forward quote never yields
    /// less than the originally requested output.
    #[test]
    fn exact_buy_then_forward_never_under_delivers(
        rxd in DUST_LIMIT..=1i64 << 38,
        token in 2i64..=1 << 38,
        requested in 1i64..=1 << 20,
    ) {
        let state = pool(rxd, token);
        let requested = requested.min(token - 1).max(1);
        if let Ok(exact) = CpmmMath::quote_exact_tokens_out(&state, requested) {
            let forward = CpmmMath::quote_tokens_out(&state, exact.amount_in);
            match forward {
                Ok(quote) => prop_assert!(
                    quote.amount_out >= requested,
                    "requested {requested}, got {}",
                    quote.amount_out
                ),
                // The fee markup can push a near-ceiling K past the guard.
                Err(AmmError::Overflow { .. }) => {}
                Err(other) => return Err(TestCaseError::fail(other.to_string())),
            }
        }
    }

    /// Same composition for the sell direction.
    #[test]
    fn exact_sell_then_forward_never_under_delivers(
        rxd in 2 * DUST_LIMIT..=1i64 << 38,
        token in 1i64..=1 << 38,
        requested in DUST_LIMIT..=1 << 20,
    ) {
        let state = pool(rxd, token);
        if let Ok(exact) = CpmmMath::quote_exact_rxd_out(&state, requested) {
            let forward = CpmmMath::quote_rxd_out(&state, exact.amount_in);
            match forward {
                Ok(quote) => prop_assert!(
                    quote.amount_out >= requested,
                    "requested {requested}, got {}",
                    quote.amount_out
                ),
                Err(AmmError::Overflow { .. }) => {}
                Err(other) => return Err(TestCaseError::fail(other.to_string())),
            }
        }
    }

    /// The fee rule is exact and monotonic over the full safe range.
    #[test]
    fn fee_matches_the_closed_form(amount in 0i64..=1 << 60) {
        let fee = CpmmMath::compute_fee(amount).unwrap();
        prop_assert_eq!(fee, amount / 1000 * 3 + (amount % 1000) * 3 / 1000);
        prop_assert!(fee <= amount * 3 / 1000);
    }
}
