//! DEX container parsing, verification and access.
//!
//! This module implements the structural model of the Dalvik Executable format. A DEX
//! container starts with a fixed header that points at six index tables (strings, types,
//! prototypes, fields, methods, class definitions), a map list that locates additional
//! sections such as call sites and method handles, and a data section holding string
//! data, class data, type lists and code items.
//!
//! # Architecture
//!
//! Everything is a view over the borrowed [`crate::File`]:
//!
//! - [`crate::dex::DexFile`] parses the header at open time and resolves index rows on
//!   demand; it holds no decoded rows itself
//! - [`crate::dex::ClassAccessor`] walks the delta-encoded member lists of one class
//! - [`crate::dex::CodeItemAccessor`] exposes one method body and hands iteration over
//!   to [`crate::disassembler`]
//! - [`crate::dex::VerificationPreset`] selects the eager checks run by
//!   [`crate::dex::DexFile::open`]
//!
//! Strict accessors (`get_*`) report damage as typed errors; their `_opt` twins map an
//! out-of-range index to `None` for lookups driven by untrusted bytecode operands.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexscope::{File, dex::{DexFile, VerificationPreset}};
//!
//! let file = File::from_file("classes.dex".as_ref())?;
//! let dex = DexFile::open(&file, VerificationPreset::Basic)?;
//!
//! for idx in 0..dex.num_type_ids() {
//!     println!("{}", dex.get_type_desc_at(idx as u16)?);
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! # References
//!
//! - Android `dex_format` documentation (dalvik/dex-format)

mod class_accessor;
mod code;
mod dexfile;
mod header;
mod types;
mod verify;

pub use class_accessor::{ClassAccessor, EncodedField, EncodedMethod, FieldIterator, MethodIterator};
pub use code::CodeItemAccessor;
pub use dexfile::DexFile;
pub use header::Header;
pub use types::{
    AccessFlags, CallSiteIdItem, ClassDef, CodeItem, FieldId, MapItem, MethodHandleItem, MethodId,
    MethodKind, ProtoId, StringId, TryItem, TypeId,
};
pub use verify::VerificationPreset;

/// The four magic bytes every DEX container starts with.
pub const DEX_MAGIC: &[u8] = b"dex\n";

/// The version digit strings (with their NUL byte) this crate accepts.
pub const DEX_MAGIC_VERSIONS: &[&[u8]] = &[
    b"035\0",
    b"037\0",
    // Dex version 038: Android "O" and beyond.
    b"038\0",
    // Dex version 039: Android "P" and beyond.
    b"039\0",
    // Dex version 040: Android "Q" and beyond (aka Android 10).
    b"040\0",
    // Dex version 041: Android "V" and beyond (aka Android 15).
    b"041\0",
];

/// The only byte order the format (and ART) supports.
pub const DEX_ENDIAN_CONSTANT: u32 = 0x1234_5678;

/// Sentinel index meaning "no entry" (no superclass, no source file).
pub const NO_INDEX: u32 = 0xFFFF_FFFF;

/// Index into the string identifiers table.
pub type StringIndex = u32;
/// Index into the type identifiers table.
pub type TypeIndex = u16;
/// Index into the prototype identifiers table.
pub type ProtoIndex = u16;
/// Index into the field identifiers table.
pub type FieldIndex = u32;
/// Index into the method identifiers table.
pub type MethodIndex = u32;
/// Index into the class definitions table.
pub type ClassDefIndex = u32;
