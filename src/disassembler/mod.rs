//! Dalvik bytecode disassembler and instruction decoding engine.
//!
//! This module provides support for decoding Dalvik bytecode from the instruction
//! streams of `code_item` structures. It covers the full one-byte opcode space,
//! the 26 published instruction formats, and the switch and array-data payloads
//! carried under `nop`.
//!
//! # Key Types
//! - [`Instruction`] - A decoded instruction borrowing its own code units
//! - [`InstructionIterator`] - Lazy walk over an instruction stream
//! - [`Opcode`] - The full opcode catalog with per-opcode metadata
//! - [`Format`] - The bit layouts instructions are encoded in
//! - [`IndexType`] - What an instruction's index operand refers to
//! - [`InsnFlags`] - Control-flow properties of an opcode
//!
//! # Example
//! ```rust
//! use dexscope::disassembler::{InstructionIterator, Opcode};
//!
//! // const/4 v0, #1; return-void
//! let insns = [0x12, 0x10, 0x0E, 0x00];
//! let decoded = InstructionIterator::new(&insns)
//!     .collect::<dexscope::Result<Vec<_>>>()?;
//! assert_eq!(decoded[1].opcode(), Opcode::ReturnVoid);
//! # Ok::<(), dexscope::Error>(())
//! ```

mod decoder;
mod instructions;

pub use decoder::{Instruction, InstructionIterator};
pub use instructions::{Format, IndexType, InsnFlags, Opcode};
