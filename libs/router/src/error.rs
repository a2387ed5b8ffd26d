//! Routing errors.
//!
//! The router never partially applies a trade: either a full route
//! satisfying every invariant is returned, or one of these.

use amm::AmmError;
use codec::ScriptError;
use thiserror::Error;
use types::OutPoint;

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Trade routing errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// The caller supplied an empty pool set.
    #[error("no pools supplied for routing")]
    PoolNotFound,

    /// No supplied pool had usable capacity for the request.
    #[error(
        "insufficient liquidity: requested {requested} across {pools} pools, none routable"
    )]
    InsufficientLiquidity { requested: i64, pools: usize },

    /// The route's summed output falls short of the caller's minimum.
    #[error(
        "slippage exceeded: minimum acceptable output {min_out}, route yields {actual} \
         (short {shortfall})"
    )]
    SlippageExceeded {
        min_out: i64,
        actual: i64,
        shortfall: i64,
    },

    /// A computed step would fail the on-chain constant-product check.
    /// This must never reach transaction construction.
    #[error("constant-product violation in pool {pool}")]
    KViolation { pool: OutPoint },

    /// No locking script was supplied for a pool the route spends.
    #[error("no locking script supplied for pool {pool}")]
    MissingPoolScript { pool: OutPoint },

    /// Invariant engine failure surfaced unchanged.
    #[error(transparent)]
    Amm(#[from] AmmError),

    /// Codec failure surfaced unchanged.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl RouteError {
    pub fn slippage_exceeded(min_out: i64, actual: i64) -> Self {
        Self::SlippageExceeded {
            min_out,
            actual,
            shortfall: min_out - actual,
        }
    }
}
