//! # Microswap Pool Contract Codec
//!
//! ## Purpose
//!
//! This crate contains the "Rules" layer of the microswap core: the
//! deterministic, reversible mapping between a pool's parameters and the
//! exact locking-script bytes the on-chain interpreter validates. A pool
//! script it emits must be byte-for-byte what the consensus layer expects:
//! a single non-canonical push does not crash anything here, it produces a
//! transaction every validating node rejects.
//!
//! ## What This Crate Contains
//!
//! - **Opcode registry**: the subset of interpreter opcodes the pool
//!   contract uses, with their reserved byte values
//! - **Canonical number encoding**: minimal-form script integers and
//!   minimal push-data prefixes, with strict rejection of non-minimal input
//! - **Script template**: the versioned two-branch code portion (owner
//!   withdraw / anyone trade) rendered through one deterministic serializer
//! - **Parser**: locates the code/state boundary, recovers the owner hash,
//!   token binding, and token reserve
//! - **State update**: replaces the 8-byte state suffix while provably
//!   preserving the code portion, so the on-chain continuity check passes
//!
//! ## What This Crate Does NOT Contain
//!
//! - Signature generation or verification (external collaborator)
//! - Transaction byte assembly or broadcast (external collaborator)
//! - Trade arithmetic (belongs in `amm`)
//!
//! ## Script Layout
//!
//! ```text
//! code portion (variable) || 0xBD || token reserve (8 bytes, LE signed)
//! ```
//!
//! The code portion is immutable across a pool's lifetime; the 8-byte state
//! suffix is replaced atomically by every trade.

pub mod error;
pub mod opcodes;
pub mod parser;
pub mod script_num;
pub mod template;

pub use error::{ScriptError, ScriptResult};
pub use opcodes::Opcode;
pub use parser::{parse_script, split_script, update_state, PoolScript};
pub use script_num::{decode_script_num, encode_script_num, push_bytes, push_num};
pub use template::{build_script, build_script_raw, ScriptWriter, TEMPLATE_VERSION};
