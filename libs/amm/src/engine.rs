//! Constant-product trade math with exact integer rounding.
//!
//! Fees are 3/1000 of the RXD-side delta, truncated toward zero, and always
//! stay in the pool. Post-trade reserves round *up* on the side being
//! depleted (ceiling on the token side for a buy; the retained fee covers
//! the floor rounding on the RXD side for a sell), so a quote can never
//! fail the on-chain `K_out >= K_in` check.
//!
//! # Buy (RXD → token)
//!
//! 1. `fee = rxd_in × 3 / 1000`
//! 2. `eff = rxd_in − fee`
//! 3. `token_after = ⌈k / (rxd + eff)⌉`
//! 4. pool keeps the whole input: `rxd_after = rxd + rxd_in`
//!
//! # Sell (token → RXD)
//!
//! 1. `gross = rxd − ⌊k / (token + tokens_in)⌋`
//! 2. `fee = gross × 3 / 1000` (gross is at or above the dust floor, so
//!    `fee >= 1` and the retained fee absorbs the floor rounding)
//! 3. trader receives `gross − fee`; `rxd_after = rxd − (gross − fee)`

use crate::error::{AmmError, AmmResult};
use crate::guard::{calculate_k, ceil_div, checked_add, checked_mul};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;
use types::{PoolState, DUST_LIMIT, FEE_DENOMINATOR, FEE_NUMERATOR};

/// Outcome of a forward quote: what the trader receives and the successor
/// reserve pair for the rebuilt pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount_out: i64,
    /// Fee retained by the pool, in RXD base units.
    pub fee: i64,
    pub state_after: PoolState,
}

/// Outcome of an inverse quote: the input required for an exact output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactQuote {
    pub amount_in: i64,
    pub fee: i64,
}

/// Constant-product math, one associated function per operation.
pub struct CpmmMath;

impl CpmmMath {
    /// The trade fee on an RXD-side delta: `⌊|amount| × 3 / 1000⌋`.
    pub fn compute_fee(amount: i64) -> AmmResult<i64> {
        let magnitude = amount.checked_abs().ok_or_else(|| {
            AmmError::overflow("compute_fee", amount, FEE_NUMERATOR)
        })?;
        Ok(checked_mul("compute_fee", magnitude, FEE_NUMERATOR)? / FEE_DENOMINATOR)
    }

    /// Quotes a buy: how many tokens `rxd_in` purchases from the pool.
    pub fn quote_tokens_out(state: &PoolState, rxd_in: i64) -> AmmResult<Quote> {
        if rxd_in < DUST_LIMIT {
            return Err(AmmError::amount_too_small(rxd_in, DUST_LIMIT));
        }
        if !state.is_tradable() {
            return Err(AmmError::insufficient_liquidity(
                rxd_in,
                state.rxd_reserve(),
            ));
        }

        let rxd = state.rxd_reserve();
        let token = state.token_reserve();
        let k = calculate_k(rxd, token)?;

        let fee = Self::compute_fee(rxd_in)?;
        let eff = rxd_in - fee;
        let curve_rxd = checked_add("quote_tokens_out", rxd, eff)?;
        let token_after = ceil_div(k, curve_rxd);
        let tokens_out = token - token_after;
        if tokens_out <= 0 {
            return Err(AmmError::insufficient_liquidity(1, tokens_out.max(0)));
        }

        // Fee stays in the pool, so the successor holds the full input.
        let rxd_after = checked_add("quote_tokens_out", rxd, rxd_in)?;
        // Reject quotes whose invariant check would itself overflow.
        checked_mul("quote_tokens_out", rxd_after, token_after)?;

        let state_after = PoolState::new(rxd_after, token_after)
            .map_err(|_| AmmError::overflow("quote_tokens_out", rxd_after, token_after))?;
        trace!(rxd_in, tokens_out, fee, "buy quote");
        Ok(Quote {
            amount_out: tokens_out,
            fee,
            state_after,
        })
    }

    /// Quotes a sell: how much RXD `tokens_in` redeems from the pool.
    pub fn quote_rxd_out(state: &PoolState, tokens_in: i64) -> AmmResult<Quote> {
        if tokens_in <= 0 {
            return Err(AmmError::amount_too_small(tokens_in, 1));
        }
        if !state.is_tradable() {
            return Err(AmmError::insufficient_liquidity(
                tokens_in,
                state.token_reserve(),
            ));
        }

        let rxd = state.rxd_reserve();
        let token = state.token_reserve();
        let k = calculate_k(rxd, token)?;

        let token_after = checked_add("quote_rxd_out", token, tokens_in)?;
        let curve_rxd = k / token_after;
        if curve_rxd < 1 {
            // Last defense against draining the RXD side to zero.
            return Err(AmmError::insufficient_liquidity(tokens_in, rxd - 1));
        }
        let gross = rxd - curve_rxd;
        if gross < DUST_LIMIT {
            return Err(AmmError::amount_too_small(gross.max(0), DUST_LIMIT));
        }

        let fee = Self::compute_fee(gross)?;
        let net = gross - fee;
        let rxd_after = rxd - net;
        checked_mul("quote_rxd_out", rxd_after, token_after)?;

        let state_after = PoolState::new(rxd_after, token_after)
            .map_err(|_| AmmError::overflow("quote_rxd_out", rxd_after, token_after))?;
        trace!(tokens_in, net, fee, "sell quote");
        Ok(Quote {
            amount_out: net,
            fee,
            state_after,
        })
    }

    /// Inverse buy quote: the RXD input required for an exact token output.
    ///
    /// Rounds the required reserve and the fee relation up, so supplying
    /// the returned amount can never under-deliver the requested output.
    pub fn quote_exact_tokens_out(state: &PoolState, tokens_out: i64) -> AmmResult<ExactQuote> {
        if tokens_out <= 0 {
            return Err(AmmError::amount_too_small(tokens_out, 1));
        }
        if !state.is_tradable() {
            return Err(AmmError::insufficient_liquidity(
                tokens_out,
                state.token_reserve(),
            ));
        }

        let rxd = state.rxd_reserve();
        let token = state.token_reserve();
        // The token side may never be drained below a 1-unit residual.
        if tokens_out > token - 1 {
            return Err(AmmError::insufficient_liquidity(tokens_out, token - 1));
        }
        let token_after = token - tokens_out;
        let k = calculate_k(rxd, token)?;

        let rxd_needed = ceil_div(k, token_after);
        let eff = (rxd_needed - rxd).max(1);
        // gross × 997/1000 >= eff must hold after truncation; solve the fee
        // relation with ceiling so it always does.
        let scaled = checked_mul("quote_exact_tokens_out", eff, FEE_DENOMINATOR)?;
        let gross = ceil_div(scaled, FEE_DENOMINATOR - FEE_NUMERATOR).max(DUST_LIMIT);
        let fee = Self::compute_fee(gross)?;
        Ok(ExactQuote {
            amount_in: gross,
            fee,
        })
    }

    /// Inverse sell quote: the token input required for an exact net RXD
    /// output.
    pub fn quote_exact_rxd_out(state: &PoolState, net_out: i64) -> AmmResult<ExactQuote> {
        if net_out < DUST_LIMIT {
            return Err(AmmError::amount_too_small(net_out, DUST_LIMIT));
        }
        if !state.is_tradable() {
            return Err(AmmError::insufficient_liquidity(
                net_out,
                state.rxd_reserve(),
            ));
        }

        let rxd = state.rxd_reserve();
        let token = state.token_reserve();
        let scaled = checked_mul("quote_exact_rxd_out", net_out, FEE_DENOMINATOR)?;
        let gross = ceil_div(scaled, FEE_DENOMINATOR - FEE_NUMERATOR);
        let rxd_after_curve = rxd - gross;
        if rxd_after_curve < 1 {
            return Err(AmmError::insufficient_liquidity(net_out, rxd - 1));
        }

        let k = calculate_k(rxd, token)?;
        let tokens_in = (ceil_div(k, rxd_after_curve) - token).max(1);
        let fee = Self::compute_fee(gross)?;
        Ok(ExactQuote {
            amount_in: tokens_in,
            fee,
        })
    }

    /// Recomputes the constant-product check exactly as the on-chain script
    /// does, for SDK self-checks before transaction construction.
    ///
    /// On an RXD inflow the fee is subtracted from the post-trade reserve;
    /// on an outflow the payout was already net of the retained fee, so the
    /// plain product is compared.
    pub fn verify_invariant(
        rxd_before: i64,
        token_before: i64,
        rxd_after: i64,
        token_after: i64,
        fee: i64,
    ) -> AmmResult<bool> {
        let k_in = checked_mul("verify_invariant", rxd_before, token_before)?;
        let net_rxd = if rxd_after >= rxd_before {
            rxd_after - fee
        } else {
            rxd_after
        };
        if net_rxd < 0 {
            return Ok(false);
        }
        let k_out = checked_mul("verify_invariant", net_rxd, token_after)?;
        Ok(k_out >= k_in)
    }

    /// Spot price in RXD per token. Display and quoting only; the on-chain
    /// equivalent check is strictly integer.
    pub fn spot_price(state: &PoolState) -> AmmResult<Decimal> {
        if state.token_reserve() == 0 {
            return Err(AmmError::insufficient_liquidity(1, 0));
        }
        Ok(Decimal::from(state.rxd_reserve()) / Decimal::from(state.token_reserve()))
    }
}
