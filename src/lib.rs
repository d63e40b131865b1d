// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dexscope
//!
//! A cross-platform framework for parsing, verifying and disassembling Android DEX
//! (Dalvik Executable) bytecode containers. Purely written in Rust, designed for analysis,
//! reverse engineering and tooling that needs a trustworthy read-only view of `.dex` files.
//!
//! ## Features
//!
//! - **Container parsing**: header, index tables (strings, types, protos, fields, methods,
//!   class definitions), call sites and method handles located through the map list
//! - **Verification**: structural checks and the adler32 checksum behind an explicit
//!   [`dex::VerificationPreset`] chosen at open time
//! - **Codecs**: the DEX flavors of LEB128 (`uleb128`, `sleb128`, `uleb128p1`) and
//!   modified UTF-8, in strict and lossy variants
//! - **Class and code access**: delta-decoded field/method lists and lazy, restartable
//!   instruction iteration over 16-bit code units
//! - **Disassembly**: the full 256-entry Dalvik opcode catalog with format and
//!   index-type tagging and typed operand accessors
//! - **Memory safe**: no `unsafe` outside the memory-mapped file backend, every read
//!   bounds-checked
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dexscope::prelude::*;
//!
//! let file = File::from_file("classes.dex".as_ref())?;
//! let dex = DexFile::open(&file, VerificationPreset::Basic)?;
//!
//! println!("DEX version {}", dex.header().version());
//! for idx in 0..dex.num_class_defs() {
//!     let class_def = dex.get_class_def(idx)?;
//!     println!("class {}", dex.get_class_desc(&class_def)?);
//!
//!     let Some(accessor) = dex.get_class_accessor(&class_def)? else {
//!         continue;
//!     };
//!     for method in accessor.get_methods() {
//!         let method = method?;
//!         if !method.has_code() {
//!             continue;
//!         }
//!         let code = dex.get_code_item_accessor(method.code_off)?;
//!         for inst in code.insns() {
//!             println!("  {}", inst?.mnemonic());
//!         }
//!     }
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! The crate is layered bottom-up:
//!
//! - [`crate::File`] - pluggable byte source (owned buffer or memory-mapped file)
//! - [`crate::codec`] - LEB128 and modified-UTF8 primitives shared by all layers
//! - [`crate::dex`] - header, index tables, class data and code items
//! - [`crate::disassembler`] - instruction catalog and decoding
//!
//! All views above the [`crate::File`] borrow from it; nothing is copied out of the
//! container until a caller asks for decoded data.
//!
//! ### Testing
//!
//! The test suite builds its DEX fixtures in memory, checksums included:
//!
//! ```bash
//! cargo test
//! cargo test --release  # For performance tests
//! ```

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the dexscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use dexscope::prelude::*;
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Basic)?;
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod prelude;

/// Shared encoding primitives of the DEX format.
///
/// DEX stores variable-width integers as LEB128 (in three flavors) and strings as
/// NUL-terminated modified UTF-8. Both codecs live here, decoupled from the container
/// layer so they can be used on raw byte slices.
///
/// # Key Functions
///
/// - [`codec::decode_uleb128`] / [`codec::decode_sleb128`] / [`codec::decode_leb128p1`]
/// - [`codec::encode_uleb128`] / [`codec::encode_sleb128`]
/// - [`codec::mutf8_to_str`] / [`codec::mutf8_to_str_lossy`]
/// - [`codec::str_to_mutf8`]
pub mod codec;

/// Parsing, verification and access for DEX containers.
///
/// This module implements the container model of the Dalvik Executable format: the fixed
/// header, the index tables, class data and code items.
///
/// # Key Types
///
/// - [`dex::DexFile`] - the parsed container, entry point for all lookups
/// - [`dex::VerificationPreset`] - how much eager checking [`dex::DexFile::open`] performs
/// - [`dex::ClassAccessor`] - delta-decoded field and method lists of one class
/// - [`dex::CodeItemAccessor`] - one method body and its instruction stream
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Full)?;
/// println!("{} strings", dex.num_string_ids());
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod dex;

/// Instructions and disassembler for the Dalvik bytecode set.
///
/// This module provides the complete 256-entry opcode catalog together with lazy
/// instruction decoding over 16-bit code units. It includes:
///
/// - **Instruction Decoding**: parse individual Dalvik opcodes with full operand support
/// - **Format Model**: the published instruction formats (`10x` through `51l`)
/// - **Index Tagging**: which constant-pool table an index operand refers to
/// - **Payload Handling**: packed-switch, sparse-switch and fill-array-data sizing
///
/// # Key Types
///
/// - [`disassembler::Instruction`] - a decoded instruction view over borrowed code units
/// - [`disassembler::InstructionIterator`] - lazy walk over an instruction stream
/// - [`disassembler::Opcode`] / [`disassembler::Format`] / [`disassembler::IndexType`]
///
/// # Examples
///
/// ```rust
/// use dexscope::disassembler::{Instruction, Opcode};
///
/// // const/4 v0, #1 followed by return-void
/// let insns = [0x12u8, 0x10, 0x0E, 0x00];
/// let inst = Instruction::at(&insns)?;
/// assert_eq!(inst.opcode(), Opcode::Const4);
/// assert_eq!(inst.a()?, 0);
/// assert_eq!(inst.b()?, 1);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod disassembler;

/// Represents the result type used throughout the crate, that wraps the custom `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all errors that can happen during parsing, verification and disassembly
pub use error::Error;

/// Represents loaded files, either from memory or from disk
pub use file::{Backend, File};
