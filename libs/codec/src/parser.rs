//! Pool script parser and state update.
//!
//! The inverse of the template: given raw locking-script bytes, locate the
//! code/state boundary, recover the owner identity hash, the optional token
//! binding, and the token reserve. Parsing is strict: a malformed script is
//! surfaced with its failure category, never repaired.
//!
//! ## Boundary rule
//!
//! The deployed on-chain convention scans for the *last* occurrence of the
//! separator byte. That scan is ambiguous: a `0xBD` inside the owner-hash
//! push or inside the state bytes themselves shifts the found boundary.
//! Because the state is a fixed-width 8-byte suffix, the true separator
//! position is known exactly (`len - 9`), so the parser anchors there.
//! This stays bit-compatible with every deployed pool (their separators sit
//! at that offset by construction) while eliminating the ambiguity. The
//! last-occurrence scan is retained only to choose the right diagnostic
//! when the anchor byte is wrong.

use crate::error::{ScriptError, ScriptResult};
use crate::opcodes::Opcode;
use serde::{Deserialize, Serialize};
use tracing::trace;
use types::{
    OwnerHash, TokenRef, OWNER_HASH_LEN, STATE_LEN, STATE_SEPARATOR, TOKEN_REF_LEN,
};

/// Decoded view of a pool locking script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolScript {
    pub owner_hash: OwnerHash,
    pub token_ref: Option<TokenRef>,
    pub token_reserve: i64,
}

/// Splits a script into its code portion and 8-byte state suffix.
///
/// The returned code slice excludes the separator byte.
pub fn split_script(script: &[u8]) -> ScriptResult<(&[u8], &[u8; STATE_LEN])> {
    let len = script.len();

    // Fixed-offset anchor: separator byte immediately before the 8-byte
    // state suffix.
    if len > STATE_LEN && script[len - STATE_LEN - 1] == STATE_SEPARATOR {
        let code = &script[..len - STATE_LEN - 1];
        let state: &[u8; STATE_LEN] = script[len - STATE_LEN..]
            .try_into()
            .expect("suffix length checked");
        return Ok((code, state));
    }

    // Anchor byte is wrong; classify the malformation for the caller.
    match script.iter().rposition(|&b| b == STATE_SEPARATOR) {
        None => Err(ScriptError::MissingSeparator {
            separator: STATE_SEPARATOR,
            script_len: len,
        }),
        Some(last) => {
            let trailing = len - 1 - last;
            if trailing < STATE_LEN {
                Err(ScriptError::state_too_short(STATE_LEN, trailing))
            } else {
                Err(ScriptError::invalid_layout(format!(
                    "separator at offset {last} leaves {trailing} trailing bytes, \
                     state portion must be exactly {STATE_LEN}"
                )))
            }
        }
    }
}

/// Locates the withdraw-branch pattern and extracts the owner hash.
///
/// The pattern is `OP_DUP OP_HASH160 <20-byte push> OP_EQUALVERIFY
/// OP_CHECKSIG`; its push length byte makes it unambiguous within the
/// template.
fn find_owner_hash(code: &[u8]) -> ScriptResult<OwnerHash> {
    let prefix = [
        Opcode::OpDup as u8,
        Opcode::OpHash160 as u8,
        OWNER_HASH_LEN as u8,
    ];
    let suffix = [Opcode::OpEqualVerify as u8, Opcode::OpCheckSig as u8];

    for start in 0..code.len().saturating_sub(prefix.len() + OWNER_HASH_LEN + suffix.len() - 1) {
        let hash_start = start + prefix.len();
        let hash_end = hash_start + OWNER_HASH_LEN;
        if code[start..hash_start] == prefix
            && code[hash_end..].starts_with(&suffix)
        {
            return OwnerHash::from_slice(&code[hash_start..hash_end])
                .map_err(|e| ScriptError::invalid_layout(e.to_string()));
        }
    }
    Err(ScriptError::OwnerHashNotFound {
        code_len: code.len(),
    })
}

/// Extracts the optional token binding from the head of the code portion.
fn find_token_ref(code: &[u8]) -> ScriptResult<Option<TokenRef>> {
    if code.first() != Some(&(Opcode::OpPushInputRef as u8)) {
        return Ok(None);
    }
    if code.len() < 1 + TOKEN_REF_LEN + 1 || code[1 + TOKEN_REF_LEN] != Opcode::OpDrop as u8 {
        return Err(ScriptError::invalid_layout(format!(
            "truncated token reference at head of {}-byte code portion",
            code.len()
        )));
    }
    let token_ref = TokenRef::from_slice(&code[1..1 + TOKEN_REF_LEN])
        .map_err(|e| ScriptError::invalid_layout(e.to_string()))?;
    Ok(Some(token_ref))
}

/// Parses a pool locking script into its semantic fields.
pub fn parse_script(script: &[u8]) -> ScriptResult<PoolScript> {
    trace!(script_len = script.len(), "parsing pool script");
    let (code, state) = split_script(script)?;

    let token_reserve = i64::from_le_bytes(*state);
    if token_reserve < 0 {
        return Err(ScriptError::invalid_layout(format!(
            "negative token reserve {token_reserve} in state portion"
        )));
    }

    let owner_hash = find_owner_hash(code)?;
    let token_ref = find_token_ref(code)?;

    Ok(PoolScript {
        owner_hash,
        token_ref,
        token_reserve,
    })
}

/// Replaces the 8-byte state suffix with a new token reserve.
///
/// The code portion, separator included, is carried over untouched, so the
/// result is byte-identical to what `build_script` would produce for the
/// same slots, which is exactly what the on-chain continuity check
/// requires of a trade's output script.
pub fn update_state(script: &[u8], new_token_reserve: i64) -> ScriptResult<Vec<u8>> {
    if new_token_reserve < 0 {
        return Err(ScriptError::invalid_layout(format!(
            "negative token reserve {new_token_reserve} cannot be encoded"
        )));
    }
    let (code, _) = split_script(script)?;

    let mut out = Vec::with_capacity(code.len() + 1 + STATE_LEN);
    out.extend_from_slice(code);
    out.push(STATE_SEPARATOR);
    out.extend_from_slice(&new_token_reserve.to_le_bytes());
    Ok(out)
}
