//! Low-level byte order and safe reading utilities for DEX parsing.
//!
//! This module provides bounds-checked little-endian reads over raw byte buffers. Every
//! fixed-width field in a DEX container is little-endian, so the read surface here is
//! deliberately small: a [`crate::file::io::DexIO`] conversion trait for the primitive widths
//! the format uses, and two helpers that read either from the start of a buffer or from a
//! cursor that advances as fields are consumed.
//!
//! # Architecture
//!
//! All functions perform explicit bounds validation before any memory access and return
//! [`crate::Error::OutOfBounds`] instead of panicking. Multi-field structures are parsed by
//! threading one `&mut usize` cursor through consecutive [`crate::file::io::read_le_at`]
//! calls, which keeps each row parser a straight-line sequence of fallible reads.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use dexscope::file::io::read_le_at;
//!
//! let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!(first, 0x1234);
//!
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!(second, 0x12345678);
//! assert_eq!(offset, 6);
//! # Ok::<(), dexscope::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Conversion trait for the primitive types a DEX container stores in fixed-width fields.
///
/// Implementors tie a numeric type to its byte-array representation so that
/// [`crate::file::io::read_le`] and [`crate::file::io::read_le_at`] can be generic over the
/// field width. All implementations are pure conversions without shared state, so they are
/// safe to use concurrently.
pub trait DexIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

impl DexIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

impl DexIO for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

impl DexIO for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

impl DexIO for u64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u64::from_le_bytes(bytes)
    }
}

impl DexIO for i32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i32::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer bytes than `T` needs.
pub fn read_le<T: DexIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// Reads from the given offset and advances it by the number of bytes consumed, so
/// consecutive fields of a structure can be read by threading one cursor through
/// repeated calls.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes at `offset`;
/// the offset is left untouched in that case.
pub fn read_le_at<T: DexIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
