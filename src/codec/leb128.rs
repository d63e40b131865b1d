//! LEB128 variable-width integers, in the three flavors the DEX format uses.
//!
//! Values are stored as little-endian groups of 7 bits with the high bit of each byte
//! acting as a continuation flag. A 32-bit value therefore occupies at most five bytes.
//! `uleb128` is the unsigned form, `sleb128` sign-extends from the last significant
//! group, and `uleb128p1` stores `value + 1` so that an encoded zero can serve as a
//! reserved "absent" sentinel (no superclass, no source file, ...).
//!
//! All decoders are pure over `(&[u8], &mut usize)`: they read at the cursor, advance it
//! by the bytes consumed on success, and leave it untouched on failure.
//!
//! # Examples
//!
//! ```rust
//! use dexscope::codec::{decode_uleb128, decode_leb128p1, encode_uleb128};
//!
//! let mut offset = 0;
//! assert_eq!(decode_uleb128(&[0x80, 0x7F], &mut offset)?, 16256);
//! assert_eq!(offset, 2);
//!
//! let mut offset = 0;
//! assert_eq!(decode_leb128p1(&[0x00], &mut offset)?, None);
//!
//! assert_eq!(encode_uleb128(16256), vec![0x80, 0x7F]);
//! # Ok::<(), dexscope::Error>(())
//! ```

use crate::Result;

/// Maximum number of 7-bit groups in a 32-bit LEB128 sequence.
const MAX_GROUPS: usize = 5;

/// Decodes an unsigned LEB128 value at `offset`, advancing it past the sequence.
///
/// # Arguments
///
/// * `data` - The buffer holding the sequence
/// * `offset` - Cursor into `data`; advanced by the bytes consumed on success
///
/// # Errors
///
/// Returns [`crate::Error::VarintTruncated`] if the buffer ends before a byte without
/// the continuation bit, and [`crate::Error::VarintTooLong`] if no such byte appears
/// within five groups.
pub fn decode_uleb128(data: &[u8], offset: &mut usize) -> Result<u32> {
    let start = *offset;
    let mut result: u32 = 0;

    for group in 0..MAX_GROUPS {
        let Some(&byte) = data.get(start + group) else {
            return Err(crate::Error::VarintTruncated { offset: start });
        };

        result |= u32::from(byte & 0x7F) << (7 * group);
        if byte & 0x80 == 0 {
            *offset = start + group + 1;
            return Ok(result);
        }
    }

    Err(crate::Error::VarintTooLong { offset: start })
}

/// Decodes a signed LEB128 value at `offset`, advancing it past the sequence.
///
/// The value is sign-extended from the most significant bit of the last group.
///
/// # Arguments
///
/// * `data` - The buffer holding the sequence
/// * `offset` - Cursor into `data`; advanced by the bytes consumed on success
///
/// # Errors
///
/// Same conditions as [`decode_uleb128`].
pub fn decode_sleb128(data: &[u8], offset: &mut usize) -> Result<i32> {
    let start = *offset;
    let mut result: i32 = 0;
    let mut shift = 0;

    for group in 0..MAX_GROUPS {
        let Some(&byte) = data.get(start + group) else {
            return Err(crate::Error::VarintTruncated { offset: start });
        };

        result |= i32::from(byte & 0x7F) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            if shift < 32 && byte & 0x40 != 0 {
                result |= -1_i32 << shift;
            }
            *offset = start + group + 1;
            return Ok(result);
        }
    }

    Err(crate::Error::VarintTooLong { offset: start })
}

/// Decodes an unsigned LEB128 "plus one" value at `offset`, advancing it past the sequence.
///
/// The wire value is the logical value plus one; an encoded zero is the reserved
/// "absent" sentinel and decodes to `None`, never to a raw integer.
///
/// # Arguments
///
/// * `data` - The buffer holding the sequence
/// * `offset` - Cursor into `data`; advanced by the bytes consumed on success
///
/// # Errors
///
/// Same conditions as [`decode_uleb128`].
pub fn decode_leb128p1(data: &[u8], offset: &mut usize) -> Result<Option<u32>> {
    match decode_uleb128(data, offset)? {
        0 => Ok(None),
        value => Ok(Some(value - 1)),
    }
}

/// Encodes a value as unsigned LEB128.
#[must_use]
pub fn encode_uleb128(mut value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_GROUPS);

    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return out;
        }
        out.push(group | 0x80);
    }
}

/// Encodes a value as signed LEB128.
#[must_use]
pub fn encode_sleb128(mut value: i32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_GROUPS);

    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;

        let sign_clear = group & 0x40 == 0;
        if (value == 0 && sign_clear) || (value == -1 && !sign_clear) {
            out.push(group);
            return out;
        }
        out.push(group | 0x80);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn roundtrip_u(value: u32) {
        let encoded = encode_uleb128(value);
        let mut offset = 0;
        assert_eq!(decode_uleb128(&encoded, &mut offset).unwrap(), value);
        assert_eq!(offset, encoded.len());
    }

    fn roundtrip_s(value: i32) {
        let encoded = encode_sleb128(value);
        let mut offset = 0;
        assert_eq!(decode_sleb128(&encoded, &mut offset).unwrap(), value);
        assert_eq!(offset, encoded.len());
    }

    #[test]
    fn uleb128_boundaries() {
        for value in [0, 1, 127, 128, 16383, 16384, 0x7FFF_FFFF, u32::MAX] {
            roundtrip_u(value);
        }

        assert_eq!(encode_uleb128(0), vec![0x00]);
        assert_eq!(encode_uleb128(127), vec![0x7F]);
        assert_eq!(encode_uleb128(128), vec![0x80, 0x01]);
        assert_eq!(encode_uleb128(16383), vec![0xFF, 0x7F]);
    }

    #[test]
    fn uleb128_cursor_advances() {
        let data = [0x7F, 0x80, 0x01, 0x00];
        let mut offset = 0;

        assert_eq!(decode_uleb128(&data, &mut offset).unwrap(), 127);
        assert_eq!(offset, 1);
        assert_eq!(decode_uleb128(&data, &mut offset).unwrap(), 128);
        assert_eq!(offset, 3);
        assert_eq!(decode_uleb128(&data, &mut offset).unwrap(), 0);
        assert_eq!(offset, 4);
    }

    #[test]
    fn uleb128_truncated() {
        let mut offset = 0;
        let result = decode_uleb128(&[0x80, 0x80], &mut offset);
        assert!(matches!(result, Err(Error::VarintTruncated { offset: 0 })));
        // cursor untouched on failure
        assert_eq!(offset, 0);
    }

    #[test]
    fn uleb128_too_long() {
        let mut offset = 0;
        let result = decode_uleb128(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00], &mut offset);
        assert!(matches!(result, Err(Error::VarintTooLong { offset: 0 })));
        assert_eq!(offset, 0);
    }

    #[test]
    fn sleb128_values() {
        for value in [0, 1, -1, 63, 64, -64, -65, 127, 128, i32::MIN, i32::MAX] {
            roundtrip_s(value);
        }

        let mut offset = 0;
        assert_eq!(decode_sleb128(&[0x7F], &mut offset).unwrap(), -1);

        let mut offset = 0;
        assert_eq!(decode_sleb128(&[0x80, 0x7F], &mut offset).unwrap(), -128);
    }

    #[test]
    fn leb128p1_sentinel() {
        // encoded 0 is "absent", not -1 or 0
        let mut offset = 0;
        assert_eq!(decode_leb128p1(&[0x00], &mut offset).unwrap(), None);

        let mut offset = 0;
        assert_eq!(decode_leb128p1(&[0x01], &mut offset).unwrap(), Some(0));

        let mut offset = 0;
        assert_eq!(
            decode_leb128p1(&[0x80, 0x01], &mut offset).unwrap(),
            Some(127)
        );
    }
}
