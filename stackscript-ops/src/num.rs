//! # Script Number Encoding
//!
//! Numbers on the stack are byte strings in minimal little-endian
//! sign-magnitude form: the magnitude in little-endian order, with the sign
//! carried by the top bit of the final byte. Zero encodes as the empty
//! string. If the magnitude's own top bit is set, an extra byte is appended
//! so the sign bit has somewhere to live.
//!
//! ```text
//! 0    -> []            1  -> [0x01]        -1  -> [0x81]
//! 127  -> [0x7F]        128 -> [0x80, 0x00] -128 -> [0x80, 0x80]
//! ```

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::error::OpsError;

/// Encode a number in minimal little-endian sign-magnitude form.
pub fn encode_num(n: &BigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }

    let (sign, mut bytes) = n.to_bytes_le();
    if bytes.last().is_some_and(|b| b & 0x80 != 0) {
        bytes.push(0x00);
    }
    if sign == Sign::Minus {
        // Unwrap is fine: bytes is non-empty for non-zero n.
        *bytes.last_mut().unwrap() |= 0x80;
    }
    bytes
}

/// Convenience wrapper for machine-sized numbers.
pub fn encode_num_i64(n: i64) -> Vec<u8> {
    encode_num(&BigInt::from(n))
}

/// Decode a number from little-endian sign-magnitude bytes.
///
/// Non-minimal encodings (trailing zero padding) are accepted, matching the
/// leniency of the target VM's numeric-conversion instructions.
pub fn decode_num(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::zero();
    }

    let mut magnitude = bytes.to_vec();
    let last = magnitude.len() - 1;
    let negative = magnitude[last] & 0x80 != 0;
    magnitude[last] &= 0x7F;

    let value = BigInt::from_bytes_le(Sign::Plus, &magnitude);
    if negative {
        -value
    } else {
        value
    }
}

/// Decode a number, rejecting values wider than an i64.
pub fn decode_num_i64(bytes: &[u8]) -> Result<i64, OpsError> {
    let n = decode_num(bytes);
    i64::try_from(&n).map_err(|_| OpsError::NumberOutOfRange(n.to_string()))
}

/// Re-encode a byte string into exactly `size` bytes, preserving the
/// numeric value. The sign bit moves to the new final byte. Fails when the
/// value does not fit.
pub fn pad_num(bytes: &[u8], size: usize) -> Result<Vec<u8>, OpsError> {
    let n = decode_num(bytes);
    let mut out = encode_num(&n);
    if out.len() > size {
        return Err(OpsError::NumberTooWide {
            width: out.len(),
            size,
        });
    }

    let negative = n.sign() == Sign::Minus;
    if negative {
        let last = out.len() - 1;
        out[last] &= 0x7F;
    }
    out.resize(size, 0x00);
    if negative {
        let last = out.len() - 1;
        out[last] |= 0x80;
    }
    Ok(out)
}

/// Truthiness of a stack value: false when all bytes are zero, allowing a
/// lone sign bit on the final byte (negative zero).
pub fn is_truthy(bytes: &[u8]) -> bool {
    for (i, &b) in bytes.iter().enumerate() {
        if b != 0 {
            return !(i == bytes.len() - 1 && b == 0x80);
        }
    }
    false
}
