//! # Microswap Invariant Engine - Exact Pool Mathematics
//!
//! ## Purpose
//!
//! Pure, deterministic trade math for constant-product micro-pools,
//! guaranteed consistent with the on-chain check `K_out >= K_in`. Every
//! quote this crate produces either satisfies the consensus invariant or is
//! rejected before it exists. A rounding mistake here does not crash a
//! program, it builds a transaction every validating node refuses.
//!
//! ## Integration Points
//!
//! - **Input Sources**: pool snapshots from UTXO discovery (external)
//! - **Output Destinations**: the trade router, SDK self-checks
//! - **Precision**: strictly signed 64-bit integer arithmetic, matching the
//!   interpreter's number domain; `Decimal` appears only in the
//!   display-oriented spot price
//!
//! ## Arithmetic Discipline
//!
//! Every multiplication is preceded by the overflow guard: operands bounded
//! by 2^62 (headroom for fee arithmetic below the signed 64-bit ceiling)
//! and the product bounded by `i64::MAX`. Violations abort with a typed
//! error *before* the unsafe operation, never after. Rounding always favors
//! the liquidity side: post-trade reserves round up on the side being
//! depleted, and exact-output quotes round required input up.

pub mod engine;
pub mod error;
pub mod guard;

pub use engine::{CpmmMath, ExactQuote, Quote};
pub use error::{AmmError, AmmResult};
pub use guard::{calculate_k, ceil_div, checked_add, checked_mul};
