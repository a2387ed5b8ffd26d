//! # Microswap Multi-Pool Trade Router
//!
//! ## Purpose
//!
//! Distributes one logical swap across many independent micro-pools and
//! produces an ordered [`types::TradeRoute`]. Each pool is a separate
//! on-chain object, so a large trade is a set of small trades: the router
//! picks the allocation, the invariant engine prices every step, and the
//! codec rebuilds every successor script.
//!
//! ## Allocation Strategy
//!
//! Greedy, cheapest-pool-first (richest-payout-first for sells): the whole
//! remaining amount goes to the best-priced pool up to its capacity before
//! the next pool is touched. This is deliberately not globally optimal for
//! aggregate price impact; determinism, capacity floors, and the
//! constant-product check are the contract, optimality is not.
//!
//! ## Ordering Guarantees
//!
//! Sorting is stable (ties keep caller order) and all inputs are immutable,
//! so identical pool sets and swap parameters always produce identical
//! routes. Steps are emitted in the exact order their pools must appear in
//! the transaction; consumers rely on positional index correspondence
//! between a pool's input and its rebuilt output.

pub mod error;
pub mod router;

pub use error::{RouteError, RouteResult};
pub use router::TradeRouter;
