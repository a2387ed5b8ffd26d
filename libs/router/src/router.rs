//! Greedy allocation across independent pools.

use crate::error::{RouteError, RouteResult};
use amm::{calculate_k, AmmError, CpmmMath, Quote};
use codec::update_state;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};
use types::{
    OutPoint, Pool, SwapDirection, SwapRequest, TradeRoute, TradeStep, DUST_LIMIT,
};

/// Compares two pools by spot price (RXD per token) without leaving integer
/// arithmetic: `a.rxd / a.token < b.rxd / b.token` iff
/// `a.rxd × b.token < b.rxd × a.token`. Exact, so sorting can never disagree
/// with the engine's own pricing.
fn cmp_price(a: &Pool, b: &Pool) -> Ordering {
    let lhs = a.state.rxd_reserve() as i128 * b.state.token_reserve() as i128;
    let rhs = b.state.rxd_reserve() as i128 * a.state.token_reserve() as i128;
    lhs.cmp(&rhs)
}

/// Multi-pool trade router.
pub struct TradeRouter;

impl TradeRouter {
    /// Routes a swap across the supplied pool set.
    ///
    /// Pools are consumed cheapest-first for a buy and richest-payout-first
    /// for a sell, each up to its capacity under the 1-unit residual rule.
    /// Either a complete route satisfying every invariant is returned, or a
    /// typed error; nothing is ever partially applied.
    pub fn route(request: &SwapRequest, pools: &[Pool]) -> RouteResult<TradeRoute> {
        if pools.is_empty() {
            return Err(RouteError::PoolNotFound);
        }
        let minimum_in = match request.direction {
            SwapDirection::RxdToToken => DUST_LIMIT,
            SwapDirection::TokenToRxd => 1,
        };
        if request.amount_in < minimum_in {
            return Err(AmmError::amount_too_small(request.amount_in, minimum_in).into());
        }

        let mut candidates: Vec<&Pool> = pools.iter().filter(|p| p.state.is_tradable()).collect();
        // Stable sort: equal-priced pools keep their caller-supplied order,
        // which is what makes routing deterministic for identical inputs.
        candidates.sort_by(|a, b| match request.direction {
            SwapDirection::RxdToToken => cmp_price(a, b),
            SwapDirection::TokenToRxd => cmp_price(a, b).reverse(),
        });
        debug!(
            supplied = pools.len(),
            tradable = candidates.len(),
            ?request.direction,
            "routing swap"
        );

        let mut remaining = request.amount_in;
        let mut steps: Vec<TradeStep> = Vec::new();
        for pool in candidates {
            if remaining <= 0 {
                break;
            }
            let Some(allocation) = Self::allocation(pool, request.direction, remaining) else {
                debug!(pool = %pool.outpoint, "pool skipped: no usable capacity");
                continue;
            };
            let quoted = match request.direction {
                SwapDirection::RxdToToken => CpmmMath::quote_tokens_out(&pool.state, allocation),
                SwapDirection::TokenToRxd => CpmmMath::quote_rxd_out(&pool.state, allocation),
            };
            let quote: Quote = match quoted {
                Ok(quote) => quote,
                Err(err) => {
                    debug!(pool = %pool.outpoint, %err, "pool skipped");
                    continue;
                }
            };

            // Self-check against the exact on-chain computation before the
            // step may exist. A route that fails here must never reach
            // transaction construction.
            let holds = CpmmMath::verify_invariant(
                pool.state.rxd_reserve(),
                pool.state.token_reserve(),
                quote.state_after.rxd_reserve(),
                quote.state_after.token_reserve(),
                quote.fee,
            )?;
            if !holds {
                warn!(pool = %pool.outpoint, "computed step fails the constant-product check");
                return Err(RouteError::KViolation {
                    pool: pool.outpoint,
                });
            }

            remaining -= allocation;
            steps.push(TradeStep {
                pool: pool.outpoint,
                amount_in: allocation,
                amount_out: quote.amount_out,
                fee: quote.fee,
                state_after: quote.state_after,
            });
        }

        if steps.is_empty() {
            return Err(RouteError::InsufficientLiquidity {
                requested: request.amount_in,
                pools: pools.len(),
            });
        }

        let total_in: i64 = steps.iter().map(|s| s.amount_in).sum();
        let total_out: i64 = steps.iter().map(|s| s.amount_out).sum();
        let total_fee: i64 = steps.iter().map(|s| s.fee).sum();
        if total_out < request.min_amount_out {
            return Err(RouteError::slippage_exceeded(
                request.min_amount_out,
                total_out,
            ));
        }

        // Volume-weighted average realized price, in RXD per token either way.
        let average_price = match request.direction {
            SwapDirection::RxdToToken => Decimal::from(total_in) / Decimal::from(total_out),
            SwapDirection::TokenToRxd => Decimal::from(total_out) / Decimal::from(total_in),
        };
        debug!(
            steps = steps.len(),
            total_in, total_out, total_fee, "route complete"
        );

        Ok(TradeRoute {
            direction: request.direction,
            steps,
            total_in,
            total_out,
            total_fee,
            average_price,
            recipient: request.recipient,
        })
    }

    /// Materializes the successor locking script for every step, in step
    /// order (positional index correspondence with the route).
    ///
    /// Delegates to the codec's `update_state` so code-portion continuity
    /// is structural, never hand-spliced bytes.
    pub fn output_scripts(
        route: &TradeRoute,
        scripts: &HashMap<OutPoint, Vec<u8>>,
    ) -> RouteResult<Vec<Vec<u8>>> {
        route
            .steps
            .iter()
            .map(|step| {
                let script = scripts
                    .get(&step.pool)
                    .ok_or(RouteError::MissingPoolScript { pool: step.pool })?;
                Ok(update_state(script, step.state_after.token_reserve())?)
            })
            .collect()
    }

    /// How much of `remaining` this pool can absorb without draining the
    /// depleted side below its 1-unit residual.
    fn allocation(pool: &Pool, direction: SwapDirection, remaining: i64) -> Option<i64> {
        match direction {
            SwapDirection::RxdToToken => {
                let max_out = pool.state.token_reserve() - 1;
                if max_out < 1 {
                    return None;
                }
                let capacity = CpmmMath::quote_exact_tokens_out(&pool.state, max_out).ok()?;
                let allocation = remaining.min(capacity.amount_in);
                (allocation >= DUST_LIMIT).then_some(allocation)
            }
            SwapDirection::TokenToRxd => {
                // Token input that walks the curve reserve down to 1 RXD.
                let k = calculate_k(pool.state.rxd_reserve(), pool.state.token_reserve()).ok()?;
                let capacity = k - pool.state.token_reserve();
                let allocation = remaining.min(capacity);
                (allocation >= 1).then_some(allocation)
            }
        }
    }
}
