//! Code items: method bodies and their instruction streams.
//!
//! A `code_item` starts with a fixed 16-byte header (register counts, try count, debug
//! info offset, instruction count) followed by `insns_size` 16-bit code units, and -
//! when tries exist - a 4-aligned try list. [`CodeItemAccessor`] reads the header once
//! and borrows the instruction buffer; decoding individual instructions is lazy and
//! happens through [`crate::disassembler::InstructionIterator`].

use crate::{
    dex::{CodeItem, DexFile, TryItem},
    disassembler::{Instruction, InstructionIterator},
    Result,
};

/// View of one method body inside the container.
///
/// Iteration over [`CodeItemAccessor::insns`] stops exactly at the declared
/// `insns_size`; trailing alignment padding before the try list is never interpreted
/// as instructions.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Basic)?;
/// let code = dex.get_code_item_accessor(0x1_0000)?;
///
/// println!("{} registers", code.registers_size());
/// for inst in code.insns() {
///     println!("{}", inst?.mnemonic());
/// }
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct CodeItemAccessor<'a> {
    code_off: u32,
    code_item: CodeItem,
    /// The instruction stream, `insns_size` code units as little-endian bytes.
    insns: &'a [u8],
    /// The whole container, needed to reach the try list past the instructions.
    container: &'a [u8],
}

impl<'a> CodeItemAccessor<'a> {
    /// Reads the code item header at `code_off` and borrows its instruction buffer.
    ///
    /// # Errors
    ///
    /// Fails for a zero offset (a method without a body has no code item) and for a
    /// header or instruction buffer that does not fit the container.
    pub fn from_offset(dex: &DexFile<'a>, code_off: u32) -> Result<CodeItemAccessor<'a>> {
        if code_off == 0 {
            return Err(malformed_error!(
                "Code item offset 0 marks an absent body; check has_code first"
            ));
        }

        let file = dex.file();
        let header = file.data_slice(code_off as usize, CodeItem::SIZE).map_err(|_| {
            crate::Error::Truncated {
                offset: code_off as usize,
                wanted: CodeItem::SIZE,
            }
        })?;
        let code_item = CodeItem::parse(header)?;

        let insns_off = code_off as usize + CodeItem::SIZE;
        let insns_len = code_item.insns_size as usize * 2;
        let insns = file.data_slice(insns_off, insns_len).map_err(|_| {
            crate::Error::Truncated {
                offset: insns_off,
                wanted: insns_len,
            }
        })?;

        Ok(CodeItemAccessor {
            code_off,
            code_item,
            insns,
            container: file.data(),
        })
    }

    /// The container offset this code item was read from.
    #[must_use]
    pub fn code_off(&self) -> u32 {
        self.code_off
    }

    /// The parsed fixed header.
    #[must_use]
    pub fn code_item(&self) -> &CodeItem {
        &self.code_item
    }

    /// Number of registers the method uses.
    #[must_use]
    pub fn registers_size(&self) -> u16 {
        self.code_item.registers_size
    }

    /// Number of words of incoming arguments.
    #[must_use]
    pub fn ins_size(&self) -> u16 {
        self.code_item.ins_size
    }

    /// Number of words of outgoing argument space.
    #[must_use]
    pub fn outs_size(&self) -> u16 {
        self.code_item.outs_size
    }

    /// Number of try-list entries.
    #[must_use]
    pub fn tries_size(&self) -> u16 {
        self.code_item.tries_size
    }

    /// Offset of the debug info item, or 0.
    #[must_use]
    pub fn debug_info_off(&self) -> u32 {
        self.code_item.debug_info_off
    }

    /// Length of the instruction stream in 16-bit code units.
    #[must_use]
    pub fn insns_size_in_code_units(&self) -> u32 {
        self.code_item.insns_size
    }

    /// Whether the method body holds any instructions.
    #[must_use]
    pub fn has_code(&self) -> bool {
        self.code_item.insns_size > 0
    }

    /// The raw instruction buffer as little-endian bytes.
    #[must_use]
    pub fn insns_raw(&self) -> &'a [u8] {
        self.insns
    }

    /// Lazily iterates the instruction stream from the first code unit.
    ///
    /// Each call starts a fresh walk; the iterator yields `Err` and fuses on the first
    /// undecodable instruction.
    #[must_use]
    pub fn insns(&self) -> InstructionIterator<'a> {
        InstructionIterator::new(self.insns)
    }

    /// Decodes the single instruction at a code-unit offset.
    ///
    /// # Errors
    ///
    /// Fails if `pc` lies outside the stream or the instruction there is invalid.
    pub fn inst_at(&self, pc: usize) -> Result<Instruction<'a>> {
        let byte_off = pc * 2;
        if byte_off >= self.insns.len() {
            return Err(crate::Error::Truncated {
                offset: byte_off,
                wanted: 2,
            });
        }
        Instruction::at(&self.insns[byte_off..])
    }

    /// Reads the try list that follows the instruction stream.
    ///
    /// The list starts at the next 4-aligned offset past the instructions; an item
    /// count of zero yields an empty vector.
    ///
    /// # Errors
    ///
    /// Fails if the declared entries do not fit the container.
    pub fn tries(&self) -> Result<Vec<TryItem>> {
        let count = self.code_item.tries_size as usize;
        if count == 0 {
            return Ok(Vec::new());
        }

        let insns_end = self.code_off as usize + CodeItem::SIZE + self.insns.len();
        let tries_off = (insns_end + 3) & !3;

        let mut tries = Vec::with_capacity(count);
        for entry in 0..count {
            let offset = tries_off + entry * TryItem::SIZE;
            let Some(end) = offset.checked_add(TryItem::SIZE) else {
                return Err(crate::Error::OutOfBounds);
            };
            if end > self.container.len() {
                return Err(crate::Error::Truncated {
                    offset,
                    wanted: TryItem::SIZE,
                });
            }
            tries.push(TryItem::parse(&self.container[offset..end])?);
        }

        Ok(tries)
    }
}
