//! Modified UTF-8, the string encoding of the DEX format.
//!
//! Modified UTF-8 differs from standard UTF-8 in two ways: the NUL character is encoded
//! as the overlong two-byte sequence `0xC0 0x80` so that a plain `0x00` byte can serve as
//! the string terminator, and supplementary code points are stored as a UTF-16 surrogate
//! pair with each half encoded as its own three-byte sequence. Four-byte sequences never
//! appear in well-formed data.
//!
//! The decoder consumes the payload of a `string_data_item` through its terminator. The
//! strict form rejects any damage; the lossy form substitutes U+FFFD for broken sequences
//! and unpaired surrogate halves, but still insists on the terminator being present.
//! Tolerance covers encoding damage, not framing damage.
//!
//! # Examples
//!
//! ```rust
//! use dexscope::codec::{mutf8_to_str, str_to_mutf8};
//!
//! assert_eq!(str_to_mutf8("Lfoo/Bar;"), b"Lfoo/Bar;\0");
//! assert_eq!(mutf8_to_str(b"Lfoo/Bar;\0")?, "Lfoo/Bar;");
//!
//! // embedded NUL survives the round trip
//! assert_eq!(str_to_mutf8("a\0b"), b"a\xC0\x80b\0");
//! assert_eq!(mutf8_to_str(b"a\xC0\x80b\0")?, "a\0b");
//! # Ok::<(), dexscope::Error>(())
//! ```

use crate::{Error, Result};

const REPLACEMENT: char = '\u{FFFD}';

fn is_lead_surrogate(unit: u16) -> bool {
    unit & 0xFC00 == 0xD800
}

fn is_trail_surrogate(unit: u16) -> bool {
    unit & 0xFC00 == 0xDC00
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn supplementary(lead: u16, trail: u16) -> u32 {
    0x10000 + ((u32::from(lead) - 0xD800) << 10) + (u32::from(trail) - 0xDC00)
}

/// One decoded UTF-16 code unit, or a malformed sequence.
///
/// `pos` is advanced past the consumed bytes; on damage it advances by one byte so the
/// lossy decoder can resynchronize.
fn next_unit(data: &[u8], pos: &mut usize) -> std::result::Result<u16, usize> {
    let at = *pos;
    let one = data[at];

    if one & 0x80 == 0 {
        *pos = at + 1;
        return Ok(u16::from(one));
    }

    if one & 0xE0 == 0xC0 {
        match data.get(at + 1) {
            Some(&two) if is_continuation(two) => {
                *pos = at + 2;
                return Ok(u16::from(one & 0x1F) << 6 | u16::from(two & 0x3F));
            }
            _ => {
                *pos = at + 1;
                return Err(at);
            }
        }
    }

    if one & 0xF0 == 0xE0 {
        match (data.get(at + 1), data.get(at + 2)) {
            (Some(&two), Some(&three)) if is_continuation(two) && is_continuation(three) => {
                *pos = at + 3;
                return Ok(u16::from(one & 0x0F) << 12
                    | u16::from(two & 0x3F) << 6
                    | u16::from(three & 0x3F));
            }
            _ => {
                *pos = at + 1;
                return Err(at);
            }
        }
    }

    // 0xF0.. leads (and stray continuation bytes) never appear in modified UTF-8
    *pos = at + 1;
    Err(at)
}

fn decode(data: &[u8], lossy: bool) -> Result<String> {
    let mut out = String::new();
    let mut pos = 0;

    loop {
        match data.get(pos) {
            None => return Err(Error::Mutf8MissingTerminator),
            Some(0) => return Ok(out),
            Some(_) => {}
        }

        let unit = match next_unit(data, &mut pos) {
            Ok(unit) => unit,
            Err(at) => {
                if !lossy {
                    return Err(Error::Mutf8Malformed { offset: at });
                }
                out.push(REPLACEMENT);
                continue;
            }
        };

        if is_lead_surrogate(unit) {
            // the trail half must follow as its own 3-byte sequence, before the terminator
            let mark = pos;
            let trail = match data.get(pos) {
                Some(&byte) if byte != 0 => next_unit(data, &mut pos).ok(),
                _ => None,
            };

            match trail {
                Some(trail) if is_trail_surrogate(trail) => {
                    let code_point = supplementary(unit, trail);
                    if let Some(ch) = char::from_u32(code_point) {
                        out.push(ch);
                        continue;
                    }
                }
                _ => {}
            }

            if !lossy {
                return Err(Error::Mutf8Malformed { offset: mark - 3 });
            }
            // drop the lone lead, reconsider whatever followed it on the next pass
            pos = mark;
            out.push(REPLACEMENT);
        } else if is_trail_surrogate(unit) {
            if !lossy {
                return Err(Error::Mutf8Malformed { offset: pos - 3 });
            }
            out.push(REPLACEMENT);
        } else {
            match char::from_u32(u32::from(unit)) {
                Some(ch) => out.push(ch),
                None => {
                    if !lossy {
                        return Err(Error::Mutf8Malformed { offset: pos - 1 });
                    }
                    out.push(REPLACEMENT);
                }
            }
        }
    }
}

/// Decodes a NUL-terminated modified-UTF8 payload into a `String`.
///
/// Bytes after the first terminator are ignored; [`crate::dex::DexFile::get_string_data`]
/// hands over exactly the terminated payload.
///
/// # Errors
///
/// Returns [`crate::Error::Mutf8MissingTerminator`] if no NUL byte is present, and
/// [`crate::Error::Mutf8Malformed`] for byte sequences no valid encoder produces,
/// including surrogate halves that cannot pair.
pub fn mutf8_to_str(data: &[u8]) -> Result<String> {
    decode(data, false)
}

/// Decodes a NUL-terminated modified-UTF8 payload, substituting U+FFFD for damage.
///
/// Malformed sequences and unpaired surrogate halves become replacement characters
/// instead of errors.
///
/// # Errors
///
/// Returns [`crate::Error::Mutf8MissingTerminator`] if no NUL byte is present; the
/// terminator requirement is framing, not encoding, and is never relaxed.
pub fn mutf8_to_str_lossy(data: &[u8]) -> Result<String> {
    decode(data, true)
}

/// Encodes a string as modified UTF-8, including the trailing NUL terminator.
///
/// NUL characters are written as the overlong pair `0xC0 0x80`; supplementary code
/// points as two three-byte surrogate encodings. Round-trips exactly through
/// [`mutf8_to_str`] for every Rust string.
#[must_use]
pub fn str_to_mutf8(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 1);

    for ch in text.chars() {
        let code_point = ch as u32;
        if code_point != 0 && code_point < 0x80 {
            out.push(code_point as u8);
        } else if code_point < 0x800 {
            // the overlong NUL falls out of this branch naturally
            out.push((code_point >> 6) as u8 | 0xC0);
            out.push((code_point & 0x3F) as u8 | 0x80);
        } else if code_point < 0x10000 {
            push_three_byte(&mut out, code_point as u16);
        } else {
            let mut pair = [0_u16; 2];
            ch.encode_utf16(&mut pair);
            push_three_byte(&mut out, pair[0]);
            push_three_byte(&mut out, pair[1]);
        }
    }

    out.push(0x00);
    out
}

/// Lossy encode of a string as modified UTF-8.
///
/// A `&str` can never hold the damage the lossy decoder tolerates, so this is
/// equivalent to [`str_to_mutf8`]; it exists so both directions of the codec offer
/// the same strict/lossy pairing.
#[must_use]
pub fn str_to_mutf8_lossy(text: &str) -> Vec<u8> {
    str_to_mutf8(text)
}

fn push_three_byte(out: &mut Vec<u8>, unit: u16) {
    out.push((unit >> 12) as u8 | 0xE0);
    out.push((unit >> 6) as u8 & 0x3F | 0x80);
    out.push((unit & 0x3F) as u8 | 0x80);
}
