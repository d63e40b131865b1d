//! Lazy decoding of Dalvik instruction streams.
//!
//! [`Instruction`] is a zero-copy view over the code units of one instruction; operands
//! are extracted on demand from the borrowed bytes. [`InstructionIterator`] walks a
//! stream instruction by instruction, advancing by each decoded width, and fuses after
//! the first error so damage never yields phantom instructions.

use crate::{
    disassembler::{
        instructions::OPCODES, Format, IndexType, InsnFlags, Opcode,
    },
    Result,
};

/// Payload identifier code units, stored in place of a plain `nop` first unit.
const PACKED_SWITCH_PAYLOAD: u16 = 0x0100;
const SPARSE_SWITCH_PAYLOAD: u16 = 0x0200;
const FILL_ARRAY_DATA_PAYLOAD: u16 = 0x0300;

/// One decoded instruction, borrowing exactly its own code units.
///
/// Construction validates the opcode and that the full width (including a payload for
/// the pseudo-instructions under `nop`) lies within the buffer, so the operand
/// accessors only fail when the requested operand does not exist for the format.
///
/// # Examples
///
/// ```rust
/// use dexscope::disassembler::{Instruction, Opcode};
///
/// // const/4 v0, #+7
/// let inst = Instruction::at(&[0x12, 0x70])?;
/// assert_eq!(inst.opcode(), Opcode::Const4);
/// assert_eq!(inst.a()?, 0);
/// assert_eq!(inst.literal()?, 7);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct Instruction<'a> {
    /// Exactly `size * 2` bytes, validated at construction.
    code: &'a [u8],
    opcode: Opcode,
    /// Width in code units, including any payload data.
    size: usize,
}

impl<'a> Instruction<'a> {
    /// Decodes the instruction at the start of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidOpcode`] for an unassigned opcode slot and
    /// [`crate::Error::InstructionOverrun`] when the instruction's width (or its
    /// payload header) runs past the end of the buffer.
    pub fn at(code: &'a [u8]) -> Result<Instruction<'a>> {
        Instruction::decode_at(code, 0)
    }

    /// Decodes at the start of `code`; `pc` is the code-unit position within the
    /// surrounding stream, used for error reporting only.
    pub(crate) fn decode_at(code: &'a [u8], pc: usize) -> Result<Instruction<'a>> {
        let Some(&opcode_byte) = code.first() else {
            return Err(crate::Error::OutOfBounds);
        };

        let info = &OPCODES[opcode_byte as usize];
        if info.index_type == IndexType::Unknown {
            return Err(crate::Error::InvalidOpcode {
                opcode: opcode_byte,
                offset: pc,
            });
        }

        let overrun = |size: usize| crate::Error::InstructionOverrun {
            mnemonic: info.mnemonic,
            offset: pc,
            size,
        };

        let mut size = info.format.size_in_code_units();
        if code.len() < 2 {
            return Err(overrun(size));
        }

        // nop doubles as the carrier for switch and array payloads
        if opcode_byte == 0x00 {
            size = match u16::from_le_bytes([code[0], code[1]]) {
                PACKED_SWITCH_PAYLOAD => {
                    if code.len() < 4 {
                        return Err(overrun(2));
                    }
                    let entries = u16::from_le_bytes([code[2], code[3]]) as usize;
                    entries * 2 + 4
                }
                SPARSE_SWITCH_PAYLOAD => {
                    if code.len() < 4 {
                        return Err(overrun(2));
                    }
                    let entries = u16::from_le_bytes([code[2], code[3]]) as usize;
                    entries * 4 + 2
                }
                FILL_ARRAY_DATA_PAYLOAD => {
                    if code.len() < 8 {
                        return Err(overrun(4));
                    }
                    let width = u16::from_le_bytes([code[2], code[3]]) as usize;
                    let count = u32::from_le_bytes([code[4], code[5], code[6], code[7]]) as usize;
                    (width * count + 1) / 2 + 4
                }
                _ => size,
            };
        }

        let Some(byte_len) = size.checked_mul(2) else {
            return Err(overrun(size));
        };
        if byte_len > code.len() {
            return Err(overrun(size));
        }

        Ok(Instruction {
            code: &code[..byte_len],
            opcode: info.opcode,
            size,
        })
    }

    /// The decoded opcode.
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The assembler mnemonic.
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    /// The bit layout of this instruction.
    #[must_use]
    pub fn format(&self) -> Format {
        self.opcode.format()
    }

    /// What the index operand refers to, if any.
    #[must_use]
    pub fn index_type(&self) -> IndexType {
        self.opcode.index_type()
    }

    /// Control-flow properties of the opcode.
    #[must_use]
    pub fn flags(&self) -> InsnFlags {
        self.opcode.flags()
    }

    /// The instruction width in 16-bit code units, payload included.
    #[must_use]
    pub fn size_in_code_units(&self) -> usize {
        self.size
    }

    /// The raw code units of this instruction as little-endian bytes.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.code
    }

    /// Whether this is one of the data payloads carried under a `nop` opcode.
    #[must_use]
    pub fn is_payload(&self) -> bool {
        self.opcode == Opcode::Nop && self.size > 1
    }

    /// Code unit `unit` of this instruction. Bounds are guaranteed by construction.
    fn fetch16(&self, unit: usize) -> u16 {
        let off = unit * 2;
        u16::from_le_bytes([self.code[off], self.code[off + 1]])
    }

    /// The 32-bit value spanning units `unit` and `unit + 1`.
    fn fetch32(&self, unit: usize) -> u32 {
        u32::from_le_bytes([
            self.code[unit * 2],
            self.code[unit * 2 + 1],
            self.code[unit * 2 + 2],
            self.code[unit * 2 + 3],
        ])
    }

    fn no_operand(&self, operand: &'static str) -> crate::Error {
        crate::Error::OperandAccess {
            mnemonic: self.mnemonic(),
            operand,
        }
    }

    /// The A operand: the first register, the register count for the variable-arity
    /// formats, or the signed branch offset for the `goto` family.
    ///
    /// # Errors
    ///
    /// Fails for formats without an A operand (`10x` and payloads).
    pub fn a(&self) -> Result<i32> {
        let unit0 = self.fetch16(0);
        Ok(match self.format() {
            Format::F10x => return Err(self.no_operand("A")),
            Format::F12x
            | Format::F11n
            | Format::F22t
            | Format::F22s
            | Format::F22c => i32::from((unit0 >> 8) & 0xF),
            Format::F11x
            | Format::F21t
            | Format::F21s
            | Format::F21h
            | Format::F21c
            | Format::F22x
            | Format::F23x
            | Format::F22b
            | Format::F31t
            | Format::F31i
            | Format::F31c
            | Format::F3rc
            | Format::F4rcc
            | Format::F51l => i32::from(unit0 >> 8),
            Format::F10t => i32::from((unit0 >> 8) as u8 as i8),
            Format::F20t => i32::from(self.fetch16(1) as i16),
            Format::F30t => self.fetch32(1) as i32,
            Format::F32x => i32::from(self.fetch16(1)),
            Format::F35c | Format::F45cc => i32::from(unit0 >> 12),
        })
    }

    /// The B operand: the second register, the raw index field, or the signed branch
    /// offset of the two-operand branch formats.
    ///
    /// Index-carrying formats return the raw field here; [`Instruction::index`]
    /// resolves which table it addresses. Literal-carrying formats return the raw
    /// field as well; [`Instruction::literal`] applies sign extension and shifts.
    ///
    /// # Errors
    ///
    /// Fails for formats without a B operand.
    pub fn b(&self) -> Result<i32> {
        let unit0 = self.fetch16(0);
        Ok(match self.format() {
            Format::F12x | Format::F22t | Format::F22s | Format::F22c => {
                i32::from(unit0 >> 12)
            }
            Format::F11n => i32::from((unit0 as i16) >> 12),
            Format::F22x | Format::F21c | Format::F21s | Format::F21h | Format::F35c
            | Format::F3rc | Format::F45cc | Format::F4rcc => i32::from(self.fetch16(1)),
            Format::F21t => i32::from(self.fetch16(1) as i16),
            Format::F23x | Format::F22b => i32::from(self.fetch16(1) & 0xFF),
            Format::F32x => i32::from(self.fetch16(2)),
            Format::F31t | Format::F31i => self.fetch32(1) as i32,
            Format::F31c => return Err(self.no_operand("B (use index for 32-bit fields)")),
            Format::F10x | Format::F11x | Format::F10t | Format::F20t | Format::F30t
            | Format::F51l => return Err(self.no_operand("B")),
        })
    }

    /// The C operand: the third register, the raw index field of `22c`, or the signed
    /// branch offset / literal of the `22t`/`22s`/`22b` formats.
    ///
    /// # Errors
    ///
    /// Fails for formats without a C operand.
    pub fn c(&self) -> Result<i32> {
        Ok(match self.format() {
            Format::F23x => i32::from(self.fetch16(1) >> 8),
            Format::F22b => i32::from((self.fetch16(1) >> 8) as u8 as i8),
            Format::F22t => i32::from(self.fetch16(1) as i16),
            Format::F22s => i32::from(self.fetch16(1) as i16),
            Format::F22c => i32::from(self.fetch16(1)),
            Format::F3rc | Format::F4rcc => i32::from(self.fetch16(2)),
            _ => return Err(self.no_operand("C")),
        })
    }

    /// The secondary `proto_ids` index of the `45cc`/`4rcc` formats.
    ///
    /// # Errors
    ///
    /// Fails for every other format.
    pub fn h(&self) -> Result<u16> {
        match self.format() {
            Format::F45cc | Format::F4rcc => Ok(self.fetch16(3)),
            _ => Err(self.no_operand("H")),
        }
    }

    /// The table index this instruction carries, for formats whose
    /// [`Instruction::index_type`] is not [`IndexType::None`].
    ///
    /// # Errors
    ///
    /// Fails for formats without an index operand.
    pub fn index(&self) -> Result<u32> {
        match self.format() {
            Format::F21c | Format::F35c | Format::F3rc | Format::F45cc | Format::F4rcc => {
                Ok(u32::from(self.fetch16(1)))
            }
            Format::F22c => Ok(u32::from(self.fetch16(1))),
            Format::F31c => Ok(self.fetch32(1)),
            _ => Err(self.no_operand("index")),
        }
    }

    /// The sign-extended literal of the const and literal-arithmetic formats, with the
    /// `high16` shifts applied.
    ///
    /// # Errors
    ///
    /// Fails for formats without a literal operand.
    pub fn literal(&self) -> Result<i64> {
        Ok(match self.format() {
            Format::F11n => i64::from((self.fetch16(0) as i16) >> 12),
            Format::F21s => i64::from(self.fetch16(1) as i16),
            Format::F21h => {
                let value = i64::from(self.fetch16(1) as i16);
                if self.opcode == Opcode::ConstWideHigh16 {
                    value << 48
                } else {
                    value << 16
                }
            }
            Format::F22b => i64::from((self.fetch16(1) >> 8) as u8 as i8),
            Format::F22s => i64::from(self.fetch16(1) as i16),
            Format::F31i => i64::from(self.fetch32(1) as i32),
            Format::F51l => {
                (u64::from(self.fetch32(1)) | (u64::from(self.fetch32(3)) << 32)) as i64
            }
            _ => return Err(self.no_operand("literal")),
        })
    }

    /// The five register nibbles `[C, D, E, F, G]` of the `35c`/`45cc` formats; only
    /// the first [`Instruction::a`] of them are meaningful.
    ///
    /// # Errors
    ///
    /// Fails for every other format.
    pub fn var_args(&self) -> Result<[u8; 5]> {
        match self.format() {
            Format::F35c | Format::F45cc => {
                let regs = self.fetch16(2);
                Ok([
                    (regs & 0x000F) as u8,
                    ((regs >> 4) & 0x000F) as u8,
                    ((regs >> 8) & 0x000F) as u8,
                    ((regs >> 12) & 0x000F) as u8,
                    ((self.fetch16(0) >> 8) & 0x000F) as u8,
                ])
            }
            _ => Err(self.no_operand("argument registers")),
        }
    }

    /// The `(first register, count)` pair of the range formats `3rc`/`4rcc`.
    ///
    /// # Errors
    ///
    /// Fails for every other format.
    pub fn args_range(&self) -> Result<(u16, u16)> {
        match self.format() {
            Format::F3rc | Format::F4rcc => {
                Ok((self.fetch16(2), self.fetch16(0) >> 8))
            }
            _ => Err(self.no_operand("register range")),
        }
    }
}

/// Walks an instruction stream from its first code unit.
///
/// Yields `Err` once and then fuses when it hits an unassigned opcode or an
/// instruction that runs past the end of the stream; a well-formed stream is walked
/// to exactly its declared length.
pub struct InstructionIterator<'a> {
    insns: &'a [u8],
    pc: usize,
    failed: bool,
}

impl<'a> InstructionIterator<'a> {
    /// Creates an iterator over a buffer of little-endian code units.
    #[must_use]
    pub fn new(insns: &'a [u8]) -> InstructionIterator<'a> {
        InstructionIterator {
            insns,
            pc: 0,
            failed: false,
        }
    }

    /// The code-unit position of the next instruction to decode.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }
}

impl<'a> Iterator for InstructionIterator<'a> {
    type Item = Result<Instruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pc * 2 >= self.insns.len() {
            return None;
        }

        match Instruction::decode_at(&self.insns[self.pc * 2..], self.pc) {
            Ok(inst) => {
                self.pc += inst.size_in_code_units();
                Some(Ok(inst))
            }
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl std::iter::FusedIterator for InstructionIterator<'_> {}
