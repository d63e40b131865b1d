//! Encoding primitives shared across the DEX container.
//!
//! Two codecs live here: the LEB128 family ([`decode_uleb128`], [`decode_sleb128`],
//! [`decode_leb128p1`] and the matching encoders) used for all variable-width integers,
//! and the modified UTF-8 codec ([`mutf8_to_str`], [`str_to_mutf8`] and their lossy
//! variants) used for all string data.
//!
//! Both codecs operate on plain byte slices and carry no container state, so they can be
//! used standalone on extracted data. The decoders never read past the provided buffer
//! and report damage through [`crate::Error`] instead of panicking.

mod leb128;
mod mutf8;

pub use leb128::{
    decode_leb128p1, decode_sleb128, decode_uleb128, encode_sleb128, encode_uleb128,
};
pub use mutf8::{mutf8_to_str, mutf8_to_str_lossy, str_to_mutf8, str_to_mutf8_lossy};
