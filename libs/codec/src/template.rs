//! Pool contract script template.
//!
//! The code portion is a fixed, versioned template with two typed slots
//! (owner identity hash, optional token reference) rendered through a single
//! deterministic serializer. Rendering the same slots always yields the same
//! bytes, which is what makes the on-chain continuity check (output code
//! portion equals input code portion) structurally satisfiable.
//!
//! Branch selection uses the witness stack depth: an owner withdrawal
//! supplies `⟨signature, publicKey⟩` and takes the hash-and-check-sig
//! branch; a trade supplies an empty witness and takes the covenant branch,
//! which verifies code-portion continuity at the pool's own input index and
//! then the constant-product inequality, net of the reserved 3/1000 fee on
//! an RXD inflow (an outflow's payout is already net of the retained fee).

use crate::error::{ScriptError, ScriptResult};
use crate::opcodes::Opcode;
use crate::script_num::{push_bytes, push_num};
use types::{OwnerHash, TokenRef, FEE_DENOMINATOR, FEE_NUMERATOR, OWNER_HASH_LEN, TOKEN_REF_LEN};

/// Version of the rendered code template. Bumped whenever the emitted byte
/// sequence changes; deployed pools keep validating under the version that
/// created them.
pub const TEMPLATE_VERSION: u16 = 2;

/// Deterministic script serializer.
///
/// All script construction in this crate goes through this writer; there is
/// deliberately no other way to append raw bytes to a script.
#[derive(Debug, Default, Clone)]
pub struct ScriptWriter {
    bytes: Vec<u8>,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bare opcode.
    pub fn op(&mut self, opcode: Opcode) -> &mut Self {
        self.bytes.push(opcode.into());
        self
    }

    /// Appends a minimal push of `data`.
    pub fn data(&mut self, data: &[u8]) -> &mut Self {
        push_bytes(&mut self.bytes, data);
        self
    }

    /// Appends a canonical integer push.
    pub fn num(&mut self, value: i64) -> &mut Self {
        push_num(&mut self.bytes, value);
        self
    }

    /// Appends raw bytes with no push prefix.
    ///
    /// Only the state suffix and the inline token reference use this; both
    /// are fixed-width fields the interpreter reads positionally.
    fn raw(&mut self, data: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Renders the immutable code portion for the given slots.
///
/// Byte-identical output for identical slots is a hard requirement; every
/// successor script of a pool embeds exactly this byte sequence.
fn render_code(owner_hash: &OwnerHash, token_ref: Option<&TokenRef>) -> Vec<u8> {
    let mut w = ScriptWriter::new();

    // Token binding, when present, heads the code portion so the ledger can
    // enforce the fungible-asset lineage of the pool.
    if let Some(token_ref) = token_ref {
        w.op(Opcode::OpPushInputRef)
            .raw(token_ref.as_bytes())
            .op(Opcode::OpDrop);
    }

    w.op(Opcode::OpDepth).op(Opcode::OpIf);

    // Withdraw branch: duplicate-hash-compare-signature against the owner
    // identity hash. Unconstrained outputs; this path terminates the pool.
    w.op(Opcode::OpDup)
        .op(Opcode::OpHash160)
        .data(owner_hash.as_bytes())
        .op(Opcode::OpEqualVerify)
        .op(Opcode::OpCheckSig);

    w.op(Opcode::OpElse);

    // Trade branch, part 1: code-portion continuity. The output script at
    // the pool's own index, truncated at its separator, must equal the
    // input's UTXO script truncated the same way.
    w.op(Opcode::OpInputIndex)
        .op(Opcode::OpOutputBytecode)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpStateSeparatorIndexOutput)
        .op(Opcode::OpSplit)
        .op(Opcode::OpDrop)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpUtxoBytecode)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpStateSeparatorIndexUtxo)
        .op(Opcode::OpSplit)
        .op(Opcode::OpDrop)
        .op(Opcode::OpEqualVerify);

    // Trade branch, part 2: constant product net of the fee. The fee is
    // subtracted only on an RXD inflow; on an outflow the payout is already
    // net of the retained fee.
    //   delta = rxd_after - rxd_before
    //   fee   = delta * 3 / 1000 when delta >= 0, else 0
    //   k_out = (rxd_after - fee) * token_after
    //   k_in  = rxd_before * token_before
    //   require k_out >= k_in
    w.op(Opcode::OpInputIndex)
        .op(Opcode::OpUtxoValue)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpOutputValue)
        .op(Opcode::Op2Dup)
        .op(Opcode::OpSwap)
        .op(Opcode::OpSub)
        .op(Opcode::OpDup)
        .num(0)
        .op(Opcode::OpGreaterThanOrEqual)
        .op(Opcode::OpIf)
        .num(FEE_NUMERATOR)
        .op(Opcode::OpMul)
        .num(FEE_DENOMINATOR)
        .op(Opcode::OpDiv)
        .op(Opcode::OpSub)
        .op(Opcode::OpElse)
        .op(Opcode::OpDrop)
        .op(Opcode::OpEndif);

    // token_after from the own-index output state suffix.
    w.op(Opcode::OpInputIndex)
        .op(Opcode::OpOutputBytecode)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpStateSeparatorIndexOutput)
        .op(Opcode::Op1Add)
        .op(Opcode::OpSplit)
        .op(Opcode::OpNip)
        .op(Opcode::OpBin2Num)
        .op(Opcode::OpMul);

    // token_before from the own-input UTXO state suffix.
    w.op(Opcode::OpInputIndex)
        .op(Opcode::OpUtxoBytecode)
        .op(Opcode::OpInputIndex)
        .op(Opcode::OpStateSeparatorIndexUtxo)
        .op(Opcode::Op1Add)
        .op(Opcode::OpSplit)
        .op(Opcode::OpNip)
        .op(Opcode::OpBin2Num)
        .op(Opcode::OpRot)
        .op(Opcode::OpMul)
        .op(Opcode::OpGreaterThanOrEqual);

    w.op(Opcode::OpEndif);
    w.into_bytes()
}

/// Builds the complete pool locking script for the given owner, optional
/// token binding, and current token reserve.
pub fn build_script(
    owner_hash: &OwnerHash,
    token_ref: Option<&TokenRef>,
    token_reserve: i64,
) -> ScriptResult<Vec<u8>> {
    if token_reserve < 0 {
        return Err(ScriptError::invalid_layout(format!(
            "negative token reserve {token_reserve} cannot be encoded"
        )));
    }

    let mut w = ScriptWriter::new();
    w.raw(&render_code(owner_hash, token_ref))
        .op(Opcode::OpStateSeparator)
        .raw(&token_reserve.to_le_bytes());
    Ok(w.into_bytes())
}

/// Raw-slice entry point for callers holding unvalidated bytes.
///
/// Fails with `InvalidLayout` when the owner hash or token reference has
/// the wrong length.
pub fn build_script_raw(
    owner_hash: &[u8],
    token_ref: Option<&[u8]>,
    token_reserve: i64,
) -> ScriptResult<Vec<u8>> {
    if owner_hash.len() != OWNER_HASH_LEN {
        return Err(ScriptError::invalid_layout(format!(
            "owner hash must be {OWNER_HASH_LEN} bytes, got {}",
            owner_hash.len()
        )));
    }
    let owner = OwnerHash::from_slice(owner_hash)
        .map_err(|e| ScriptError::invalid_layout(e.to_string()))?;

    let token_ref = match token_ref {
        Some(bytes) => {
            if bytes.len() != TOKEN_REF_LEN {
                return Err(ScriptError::invalid_layout(format!(
                    "token ref must be {TOKEN_REF_LEN} bytes, got {}",
                    bytes.len()
                )));
            }
            Some(
                TokenRef::from_slice(bytes)
                    .map_err(|e| ScriptError::invalid_layout(e.to_string()))?,
            )
        }
        None => None,
    };

    build_script(&owner, token_ref.as_ref(), token_reserve)
}
