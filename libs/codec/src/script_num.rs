//! Canonical script number and push-data encoding.
//!
//! The on-chain interpreter accepts exactly one byte representation per
//! integer: zero is an empty push, 1..=16 and -1 use their dedicated
//! opcodes, and everything else is the smallest little-endian magnitude
//! with an explicit sign bit. Non-minimal encodings are consensus-invalid,
//! so the encoder never produces them and the decoder rejects them.

use crate::error::{ScriptError, ScriptResult};
use crate::opcodes::Opcode;

/// Longest script number the pool contract ever handles (the interpreter's
/// 64-bit number domain).
const MAX_NUM_LEN: usize = 8;

/// Encodes an integer in minimal sign-magnitude little-endian form.
///
/// Returns the raw payload bytes without any push prefix; zero encodes as
/// the empty byte string.
pub fn encode_script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut out = Vec::with_capacity(MAX_NUM_LEN + 1);
    while magnitude > 0 {
        out.push((magnitude & 0xFF) as u8);
        magnitude >>= 8;
    }

    // The most significant byte must leave the sign bit free; otherwise a
    // dedicated sign byte is appended.
    let last = *out.last().expect("non-zero value has at least one byte");
    if last & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        *out.last_mut().expect("checked non-empty") = last | 0x80;
    }
    out
}

/// Decodes a minimal sign-magnitude little-endian script number.
///
/// Rejects payloads longer than 8 bytes and any non-minimal encoding, since
/// a validator must refuse both.
pub fn decode_script_num(bytes: &[u8]) -> ScriptResult<i64> {
    if bytes.is_empty() {
        return Ok(0);
    }
    if bytes.len() > MAX_NUM_LEN {
        return Err(ScriptError::invalid_layout(format!(
            "script number of {} bytes exceeds the {}-byte interpreter domain",
            bytes.len(),
            MAX_NUM_LEN
        )));
    }

    let last = bytes[bytes.len() - 1];
    if last & 0x7F == 0 {
        // A trailing 0x00/0x80 is only minimal when the preceding byte
        // needs its high bit for magnitude.
        if bytes.len() == 1 || bytes[bytes.len() - 2] & 0x80 == 0 {
            return Err(ScriptError::invalid_layout(format!(
                "non-minimal script number encoding: {}",
                hex::encode(bytes)
            )));
        }
    }

    let negative = last & 0x80 != 0;
    let mut magnitude: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let byte = if i == bytes.len() - 1 { byte & 0x7F } else { byte };
        magnitude |= (byte as u64) << (8 * i);
    }

    if negative {
        Ok(-(magnitude as i64))
    } else {
        Ok(magnitude as i64)
    }
}

/// Appends a minimal push of arbitrary data.
///
/// Empty data becomes `OP_0`; short payloads use the direct length prefix;
/// longer ones the smallest applicable `OP_PUSHDATA` form.
pub fn push_bytes(out: &mut Vec<u8>, data: &[u8]) {
    match data.len() {
        0 => out.push(Opcode::Op0.into()),
        len @ 1..=0x4B => {
            out.push(len as u8);
            out.extend_from_slice(data);
        }
        len @ 0x4C..=0xFF => {
            out.push(Opcode::OpPushdata1.into());
            out.push(len as u8);
            out.extend_from_slice(data);
        }
        len @ 0x100..=0xFFFF => {
            out.push(Opcode::OpPushdata2.into());
            out.extend_from_slice(&(len as u16).to_le_bytes());
            out.extend_from_slice(data);
        }
        len => {
            out.push(Opcode::OpPushdata4.into());
            out.extend_from_slice(&(len as u32).to_le_bytes());
            out.extend_from_slice(data);
        }
    }
}

/// Appends an integer push in canonical form.
pub fn push_num(out: &mut Vec<u8>, value: i64) {
    if let Some(op) = Opcode::from_small_int(value) {
        out.push(op.into());
    } else {
        push_bytes(out, &encode_script_num(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty() {
        assert!(encode_script_num(0).is_empty());
        assert_eq!(decode_script_num(&[]).unwrap(), 0);
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode_script_num(1), vec![0x01]);
        assert_eq!(encode_script_num(127), vec![0x7F]);
        assert_eq!(encode_script_num(128), vec![0x80, 0x00]);
        assert_eq!(encode_script_num(1000), vec![0xE8, 0x03]);
        assert_eq!(encode_script_num(-1), vec![0x81]);
        assert_eq!(encode_script_num(-128), vec![0x80, 0x80]);
        assert_eq!(encode_script_num(-1000), vec![0xE8, 0x83]);
    }

    #[test]
    fn decode_rejects_non_minimal() {
        // 1 padded with a zero byte.
        assert!(decode_script_num(&[0x01, 0x00]).is_err());
        // Bare sign byte.
        assert!(decode_script_num(&[0x00]).is_err());
        assert!(decode_script_num(&[0x80]).is_err());
        // 128 requires its padding byte and is minimal.
        assert_eq!(decode_script_num(&[0x80, 0x00]).unwrap(), 128);
    }

    #[test]
    fn decode_rejects_oversized() {
        let err = decode_script_num(&[0x01; 9]).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidLayout { .. }));
    }

    #[test]
    fn round_trip_covers_sign_boundaries() {
        for value in [
            0, 1, -1, 16, 17, 127, 128, 129, -127, -128, -129, 255, 256, 1000, -1000,
            i64::MAX, i64::MIN + 1,
        ] {
            let encoded = encode_script_num(value);
            assert_eq!(decode_script_num(&encoded).unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn push_num_prefers_small_int_opcodes() {
        let mut out = Vec::new();
        push_num(&mut out, 3);
        assert_eq!(out, vec![Opcode::Op3 as u8]);

        out.clear();
        push_num(&mut out, 1000);
        assert_eq!(out, vec![0x02, 0xE8, 0x03]);
    }

    #[test]
    fn push_bytes_selects_smallest_prefix() {
        let mut out = Vec::new();
        push_bytes(&mut out, &[0xAA; 20]);
        assert_eq!(out[0], 20);
        assert_eq!(out.len(), 21);

        out.clear();
        push_bytes(&mut out, &[0xAA; 0x4C]);
        assert_eq!(out[0], Opcode::OpPushdata1 as u8);
        assert_eq!(out[1], 0x4C);

        out.clear();
        push_bytes(&mut out, &[0xAA; 0x100]);
        assert_eq!(out[0], Opcode::OpPushdata2 as u8);
        assert_eq!(&out[1..3], &[0x00, 0x01]);
    }
}
