//! # dexscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dexscope library. Import this module to get quick access to the essential
//! types for DEX container analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dexscope operations
pub use crate::Error;

/// The result type used throughout dexscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Container access and backing storage
pub use crate::{Backend, File};

/// Main entry point for DEX container analysis
pub use crate::dex::DexFile;

/// How much eager checking happens at open time
pub use crate::dex::VerificationPreset;

// ================================================================================================
// Container Structures
// ================================================================================================

/// The fixed file header
pub use crate::dex::Header;

/// Index-table row types
pub use crate::dex::{
    CallSiteIdItem, ClassDef, CodeItem, FieldId, MapItem, MethodHandleItem, MethodId, ProtoId,
    StringId, TryItem, TypeId,
};

/// Declared access modifiers and the derived dispatch kind
pub use crate::dex::{AccessFlags, MethodKind};

/// Table index aliases
pub use crate::dex::{ClassDefIndex, FieldIndex, MethodIndex, ProtoIndex, StringIndex, TypeIndex};

// ================================================================================================
// Class Data and Method Bodies
// ================================================================================================

/// Streaming access to `class_data_item` member lists
pub use crate::dex::{ClassAccessor, EncodedField, EncodedMethod, FieldIterator, MethodIterator};

/// Method body access
pub use crate::dex::CodeItemAccessor;

// ================================================================================================
// Disassembler
// ================================================================================================

/// Instruction decoding
pub use crate::disassembler::{Format, IndexType, InsnFlags, Instruction, InstructionIterator, Opcode};

// ================================================================================================
// Codecs
// ================================================================================================

/// Variable-length integer and string codecs
pub use crate::codec::{
    decode_leb128p1, decode_sleb128, decode_uleb128, mutf8_to_str, mutf8_to_str_lossy,
    str_to_mutf8,
};
