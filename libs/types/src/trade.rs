//! Trade routing types.
//!
//! A logical swap is split across independent micro-pools. Each pool's
//! contribution is a [`TradeStep`]; the ordered collection plus aggregate
//! totals is a [`TradeRoute`]. Step order is load-bearing: consumers rely on
//! positional correspondence between a pool's input and its rebuilt output
//! in the final transaction.

use crate::pool::{OutPoint, OwnerHash, PoolState};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a swap from the trader's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Spend RXD, receive tokens (a "buy").
    RxdToToken,
    /// Spend tokens, receive RXD (a "sell").
    TokenToRxd,
}

/// A requested swap, as handed to the router.
///
/// The recipient is carried opaquely for the transaction-assembly layer;
/// the core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub direction: SwapDirection,
    /// Input amount in base units (RXD for a buy, tokens for a sell).
    pub amount_in: i64,
    /// Minimum acceptable total output; the route fails with slippage
    /// exceeded if the summed output falls short.
    pub min_amount_out: i64,
    pub recipient: OwnerHash,
}

/// One pool's contribution to a routed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeStep {
    /// UTXO reference of the pool consumed by this step.
    pub pool: OutPoint,
    /// Amount routed into this pool.
    pub amount_in: i64,
    /// Amount this pool pays out.
    pub amount_out: i64,
    /// Fee retained by the pool, in RXD base units.
    pub fee: i64,
    /// Successor reserve pair for the rebuilt pool UTXO.
    pub state_after: PoolState,
}

/// An ordered allocation of one logical trade across multiple pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub direction: SwapDirection,
    /// Steps in the exact order their pools must appear in the transaction.
    pub steps: Vec<TradeStep>,
    pub total_in: i64,
    pub total_out: i64,
    /// Summed fees across all steps, in RXD base units.
    pub total_fee: i64,
    /// Volume-weighted average realized price in RXD per token.
    /// Display/quoting only, never part of the on-chain-equivalent check.
    pub average_price: Decimal,
    pub recipient: OwnerHash,
}

impl TradeRoute {
    /// Number of pools this route touches.
    pub fn pool_count(&self) -> usize {
        self.steps.len()
    }
}
