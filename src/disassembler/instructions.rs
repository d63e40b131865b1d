//! The Dalvik instruction catalog: formats, reference kinds, flags and opcodes.
//!
//! The one-byte opcode space is fully populated; slots the published catalog leaves
//! unassigned carry an `Unused*` entry whose [`IndexType::Unknown`] marks them as
//! undecodable. Layouts follow the published instruction-format list
//! (<https://source.android.com/docs/core/runtime/instruction-formats>).

use bitflags::bitflags;

/// The bit layout of an instruction, named after the published format IDs.
///
/// The first digit is the width in 16-bit code units, the second the number of
/// registers, and the trailing letters encode the operand kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `op` - one unit, no operands
    F10x,
    /// `op vA, vB` - `B|A|op`
    F12x,
    /// `op vA, #+B` - `B|A|op`
    F11n,
    /// `op vAA` - `AA|op`
    F11x,
    /// `op +AA` - `AA|op`
    F10t,
    /// `op +AAAA` - `00|op AAAA`
    F20t,
    /// `op vAA, vBBBB` - `AA|op BBBB`
    F22x,
    /// `op vAA, +BBBB` - `AA|op BBBB`
    F21t,
    /// `op vAA, #+BBBB` - `AA|op BBBB`
    F21s,
    /// `op vAA, #+BBBB0000(00000000)` - `AA|op BBBB`
    F21h,
    /// `op vAA, thing@BBBB` - `AA|op BBBB`
    F21c,
    /// `op vAA, vBB, vCC` - `AA|op CC|BB`
    F23x,
    /// `op vAA, vBB, #+CC` - `AA|op CC|BB`
    F22b,
    /// `op vA, vB, +CCCC` - `B|A|op CCCC`
    F22t,
    /// `op vA, vB, #+CCCC` - `B|A|op CCCC`
    F22s,
    /// `op vA, vB, thing@CCCC` - `B|A|op CCCC`
    F22c,
    /// `op vAAAA, vBBBB` - `00|op AAAA BBBB`
    F32x,
    /// `op +AAAAAAAA` - `00|op AAAA_lo AAAA_hi`
    F30t,
    /// `op vAA, +BBBBBBBB` - `AA|op BBBB_lo BBBB_hi`
    F31t,
    /// `op vAA, #+BBBBBBBB` - `AA|op BBBB_lo BBBB_hi`
    F31i,
    /// `op vAA, string@BBBBBBBB` - `AA|op BBBB_lo BBBB_hi`
    F31c,
    /// `op {vC..vG}, thing@BBBB` - `A|G|op BBBB F|E|D|C`
    F35c,
    /// `op {vCCCC..vNNNN}, thing@BBBB` - `AA|op BBBB CCCC`
    F3rc,
    /// `op {vC..vG}, method@BBBB, proto@HHHH` - `A|G|op BBBB F|E|D|C HHHH`
    F45cc,
    /// `op {vCCCC..vNNNN}, method@BBBB, proto@HHHH` - `AA|op BBBB CCCC HHHH`
    F4rcc,
    /// `op vAA, #+BBBBBBBBBBBBBBBB` - `AA|op BBBB x4`
    F51l,
}

impl Format {
    /// The fixed width of this format in 16-bit code units.
    ///
    /// Payload pseudo-instructions under `nop` are the only case where an actual
    /// instruction is wider than its format; [`super::Instruction::size_in_code_units`]
    /// accounts for those.
    #[must_use]
    pub fn size_in_code_units(self) -> usize {
        match self {
            Format::F10x | Format::F12x | Format::F11n | Format::F11x | Format::F10t => 1,
            Format::F20t
            | Format::F22x
            | Format::F21t
            | Format::F21s
            | Format::F21h
            | Format::F21c
            | Format::F23x
            | Format::F22b
            | Format::F22t
            | Format::F22s
            | Format::F22c => 2,
            Format::F32x
            | Format::F30t
            | Format::F31t
            | Format::F31i
            | Format::F31c
            | Format::F35c
            | Format::F3rc => 3,
            Format::F45cc | Format::F4rcc => 4,
            Format::F51l => 5,
        }
    }
}

/// What the literal index operand of an instruction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// The instruction carries no index operand.
    None,
    /// The opcode slot is unassigned; decoding it is an error.
    Unknown,
    /// Index into the `type_ids` table.
    TypeRef,
    /// Index into the `string_ids` table.
    StringRef,
    /// Index into the `method_ids` table.
    MethodRef,
    /// Index into the `field_ids` table.
    FieldRef,
    /// Primary index into `method_ids`, secondary into `proto_ids`.
    MethodAndProtoRef,
    /// Index into the `call_site_ids` table.
    CallSiteRef,
    /// Index into the `method_handles` table.
    MethodHandleRef,
    /// Index into the `proto_ids` table.
    ProtoRef,
}

bitflags! {
    /// Control-flow properties of an opcode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InsnFlags: u8 {
        /// Execution can fall through to the following instruction.
        const CONTINUE      = 0x01;
        /// The instruction carries a branch target.
        const BRANCH        = 0x02;
        /// The instruction selects among multiple targets via a payload.
        const SWITCH        = 0x04;
        /// The instruction can raise a runtime exception.
        const THROW         = 0x08;
        /// The instruction leaves the method.
        const RETURN        = 0x10;
        /// The instruction calls another method.
        const INVOKE        = 0x20;
        /// The branch is always taken.
        const UNCONDITIONAL = 0x40;
    }
}

/// Descriptor for one slot of the opcode space.
pub(crate) struct OpcodeInfo {
    pub(crate) opcode: Opcode,
    pub(crate) mnemonic: &'static str,
    pub(crate) format: Format,
    pub(crate) index_type: IndexType,
    pub(crate) flags: InsnFlags,
}

macro_rules! opcodes {
    ($(($value:literal, $variant:ident, $mnemonic:literal, $format:ident, $index:ident $(, $flag:ident)*),)*) => {
        /// Every slot of the one-byte Dalvik opcode space.
        ///
        /// The discriminant always equals the raw opcode byte; unassigned slots carry
        /// an `Unused*` variant that fails to decode.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Opcode {
            $(
                #[doc = concat!("`", $mnemonic, "`")]
                $variant = $value,
            )*
        }

        pub(crate) static OPCODES: [OpcodeInfo; 256] = [
            $(
                OpcodeInfo {
                    opcode: Opcode::$variant,
                    mnemonic: $mnemonic,
                    format: Format::$format,
                    index_type: IndexType::$index,
                    flags: InsnFlags::from_bits_retain(0 $(| InsnFlags::$flag.bits())*),
                },
            )*
        ];
    };
}

impl Opcode {
    /// Maps a raw opcode byte to its catalog entry.
    #[must_use]
    pub fn from_byte(value: u8) -> Opcode {
        OPCODES[value as usize].opcode
    }

    /// The assembler mnemonic.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        OPCODES[self as usize].mnemonic
    }

    /// The bit layout this opcode uses.
    #[must_use]
    pub fn format(self) -> Format {
        OPCODES[self as usize].format
    }

    /// What the index operand refers to, if any.
    #[must_use]
    pub fn index_type(self) -> IndexType {
        OPCODES[self as usize].index_type
    }

    /// Control-flow properties.
    #[must_use]
    pub fn flags(self) -> InsnFlags {
        OPCODES[self as usize].flags
    }

    /// Whether the catalog assigns this slot.
    #[must_use]
    pub fn is_assigned(self) -> bool {
        OPCODES[self as usize].index_type != IndexType::Unknown
    }
}

opcodes! {
    (0x00, Nop, "nop", F10x, None, CONTINUE),
    (0x01, Move, "move", F12x, None, CONTINUE),
    (0x02, MoveFrom16, "move/from16", F22x, None, CONTINUE),
    (0x03, Move16, "move/16", F32x, None, CONTINUE),
    (0x04, MoveWide, "move-wide", F12x, None, CONTINUE),
    (0x05, MoveWideFrom16, "move-wide/from16", F22x, None, CONTINUE),
    (0x06, MoveWide16, "move-wide/16", F32x, None, CONTINUE),
    (0x07, MoveObject, "move-object", F12x, None, CONTINUE),
    (0x08, MoveObjectFrom16, "move-object/from16", F22x, None, CONTINUE),
    (0x09, MoveObject16, "move-object/16", F32x, None, CONTINUE),
    (0x0A, MoveResult, "move-result", F11x, None, CONTINUE),
    (0x0B, MoveResultWide, "move-result-wide", F11x, None, CONTINUE),
    (0x0C, MoveResultObject, "move-result-object", F11x, None, CONTINUE),
    (0x0D, MoveException, "move-exception", F11x, None, CONTINUE),
    (0x0E, ReturnVoid, "return-void", F10x, None, RETURN),
    (0x0F, Return, "return", F11x, None, RETURN),
    (0x10, ReturnWide, "return-wide", F11x, None, RETURN),
    (0x11, ReturnObject, "return-object", F11x, None, RETURN),
    (0x12, Const4, "const/4", F11n, None, CONTINUE),
    (0x13, Const16, "const/16", F21s, None, CONTINUE),
    (0x14, Const, "const", F31i, None, CONTINUE),
    (0x15, ConstHigh16, "const/high16", F21h, None, CONTINUE),
    (0x16, ConstWide16, "const-wide/16", F21s, None, CONTINUE),
    (0x17, ConstWide32, "const-wide/32", F31i, None, CONTINUE),
    (0x18, ConstWide, "const-wide", F51l, None, CONTINUE),
    (0x19, ConstWideHigh16, "const-wide/high16", F21h, None, CONTINUE),
    (0x1A, ConstString, "const-string", F21c, StringRef, CONTINUE, THROW),
    (0x1B, ConstStringJumbo, "const-string/jumbo", F31c, StringRef, CONTINUE, THROW),
    (0x1C, ConstClass, "const-class", F21c, TypeRef, CONTINUE, THROW),
    (0x1D, MonitorEnter, "monitor-enter", F11x, None, CONTINUE, THROW),
    (0x1E, MonitorExit, "monitor-exit", F11x, None, CONTINUE, THROW),
    (0x1F, CheckCast, "check-cast", F21c, TypeRef, CONTINUE, THROW),
    (0x20, InstanceOf, "instance-of", F22c, TypeRef, CONTINUE, THROW),
    (0x21, ArrayLength, "array-length", F12x, None, CONTINUE, THROW),
    (0x22, NewInstance, "new-instance", F21c, TypeRef, CONTINUE, THROW),
    (0x23, NewArray, "new-array", F22c, TypeRef, CONTINUE, THROW),
    (0x24, FilledNewArray, "filled-new-array", F35c, TypeRef, CONTINUE, THROW),
    (0x25, FilledNewArrayRange, "filled-new-array/range", F3rc, TypeRef, CONTINUE, THROW),
    (0x26, FillArrayData, "fill-array-data", F31t, None, CONTINUE),
    (0x27, Throw, "throw", F11x, None, THROW),
    (0x28, Goto, "goto", F10t, None, BRANCH, UNCONDITIONAL),
    (0x29, Goto16, "goto/16", F20t, None, BRANCH, UNCONDITIONAL),
    (0x2A, Goto32, "goto/32", F30t, None, BRANCH, UNCONDITIONAL),
    (0x2B, PackedSwitch, "packed-switch", F31t, None, CONTINUE, SWITCH),
    (0x2C, SparseSwitch, "sparse-switch", F31t, None, CONTINUE, SWITCH),
    (0x2D, CmplFloat, "cmpl-float", F23x, None, CONTINUE),
    (0x2E, CmpgFloat, "cmpg-float", F23x, None, CONTINUE),
    (0x2F, CmplDouble, "cmpl-double", F23x, None, CONTINUE),
    (0x30, CmpgDouble, "cmpg-double", F23x, None, CONTINUE),
    (0x31, CmpLong, "cmp-long", F23x, None, CONTINUE),
    (0x32, IfEq, "if-eq", F22t, None, CONTINUE, BRANCH),
    (0x33, IfNe, "if-ne", F22t, None, CONTINUE, BRANCH),
    (0x34, IfLt, "if-lt", F22t, None, CONTINUE, BRANCH),
    (0x35, IfGe, "if-ge", F22t, None, CONTINUE, BRANCH),
    (0x36, IfGt, "if-gt", F22t, None, CONTINUE, BRANCH),
    (0x37, IfLe, "if-le", F22t, None, CONTINUE, BRANCH),
    (0x38, IfEqz, "if-eqz", F21t, None, CONTINUE, BRANCH),
    (0x39, IfNez, "if-nez", F21t, None, CONTINUE, BRANCH),
    (0x3A, IfLtz, "if-ltz", F21t, None, CONTINUE, BRANCH),
    (0x3B, IfGez, "if-gez", F21t, None, CONTINUE, BRANCH),
    (0x3C, IfGtz, "if-gtz", F21t, None, CONTINUE, BRANCH),
    (0x3D, IfLez, "if-lez", F21t, None, CONTINUE, BRANCH),
    (0x3E, Unused3E, "unused-3e", F10x, Unknown),
    (0x3F, Unused3F, "unused-3f", F10x, Unknown),
    (0x40, Unused40, "unused-40", F10x, Unknown),
    (0x41, Unused41, "unused-41", F10x, Unknown),
    (0x42, Unused42, "unused-42", F10x, Unknown),
    (0x43, Unused43, "unused-43", F10x, Unknown),
    (0x44, Aget, "aget", F23x, None, CONTINUE, THROW),
    (0x45, AgetWide, "aget-wide", F23x, None, CONTINUE, THROW),
    (0x46, AgetObject, "aget-object", F23x, None, CONTINUE, THROW),
    (0x47, AgetBoolean, "aget-boolean", F23x, None, CONTINUE, THROW),
    (0x48, AgetByte, "aget-byte", F23x, None, CONTINUE, THROW),
    (0x49, AgetChar, "aget-char", F23x, None, CONTINUE, THROW),
    (0x4A, AgetShort, "aget-short", F23x, None, CONTINUE, THROW),
    (0x4B, Aput, "aput", F23x, None, CONTINUE, THROW),
    (0x4C, AputWide, "aput-wide", F23x, None, CONTINUE, THROW),
    (0x4D, AputObject, "aput-object", F23x, None, CONTINUE, THROW),
    (0x4E, AputBoolean, "aput-boolean", F23x, None, CONTINUE, THROW),
    (0x4F, AputByte, "aput-byte", F23x, None, CONTINUE, THROW),
    (0x50, AputChar, "aput-char", F23x, None, CONTINUE, THROW),
    (0x51, AputShort, "aput-short", F23x, None, CONTINUE, THROW),
    (0x52, Iget, "iget", F22c, FieldRef, CONTINUE, THROW),
    (0x53, IgetWide, "iget-wide", F22c, FieldRef, CONTINUE, THROW),
    (0x54, IgetObject, "iget-object", F22c, FieldRef, CONTINUE, THROW),
    (0x55, IgetBoolean, "iget-boolean", F22c, FieldRef, CONTINUE, THROW),
    (0x56, IgetByte, "iget-byte", F22c, FieldRef, CONTINUE, THROW),
    (0x57, IgetChar, "iget-char", F22c, FieldRef, CONTINUE, THROW),
    (0x58, IgetShort, "iget-short", F22c, FieldRef, CONTINUE, THROW),
    (0x59, Iput, "iput", F22c, FieldRef, CONTINUE, THROW),
    (0x5A, IputWide, "iput-wide", F22c, FieldRef, CONTINUE, THROW),
    (0x5B, IputObject, "iput-object", F22c, FieldRef, CONTINUE, THROW),
    (0x5C, IputBoolean, "iput-boolean", F22c, FieldRef, CONTINUE, THROW),
    (0x5D, IputByte, "iput-byte", F22c, FieldRef, CONTINUE, THROW),
    (0x5E, IputChar, "iput-char", F22c, FieldRef, CONTINUE, THROW),
    (0x5F, IputShort, "iput-short", F22c, FieldRef, CONTINUE, THROW),
    (0x60, Sget, "sget", F21c, FieldRef, CONTINUE, THROW),
    (0x61, SgetWide, "sget-wide", F21c, FieldRef, CONTINUE, THROW),
    (0x62, SgetObject, "sget-object", F21c, FieldRef, CONTINUE, THROW),
    (0x63, SgetBoolean, "sget-boolean", F21c, FieldRef, CONTINUE, THROW),
    (0x64, SgetByte, "sget-byte", F21c, FieldRef, CONTINUE, THROW),
    (0x65, SgetChar, "sget-char", F21c, FieldRef, CONTINUE, THROW),
    (0x66, SgetShort, "sget-short", F21c, FieldRef, CONTINUE, THROW),
    (0x67, Sput, "sput", F21c, FieldRef, CONTINUE, THROW),
    (0x68, SputWide, "sput-wide", F21c, FieldRef, CONTINUE, THROW),
    (0x69, SputObject, "sput-object", F21c, FieldRef, CONTINUE, THROW),
    (0x6A, SputBoolean, "sput-boolean", F21c, FieldRef, CONTINUE, THROW),
    (0x6B, SputByte, "sput-byte", F21c, FieldRef, CONTINUE, THROW),
    (0x6C, SputChar, "sput-char", F21c, FieldRef, CONTINUE, THROW),
    (0x6D, SputShort, "sput-short", F21c, FieldRef, CONTINUE, THROW),
    (0x6E, InvokeVirtual, "invoke-virtual", F35c, MethodRef, CONTINUE, THROW, INVOKE),
    (0x6F, InvokeSuper, "invoke-super", F35c, MethodRef, CONTINUE, THROW, INVOKE),
    (0x70, InvokeDirect, "invoke-direct", F35c, MethodRef, CONTINUE, THROW, INVOKE),
    (0x71, InvokeStatic, "invoke-static", F35c, MethodRef, CONTINUE, THROW, INVOKE),
    (0x72, InvokeInterface, "invoke-interface", F35c, MethodRef, CONTINUE, THROW, INVOKE),
    (0x73, Unused73, "unused-73", F10x, Unknown),
    (0x74, InvokeVirtualRange, "invoke-virtual/range", F3rc, MethodRef, CONTINUE, THROW, INVOKE),
    (0x75, InvokeSuperRange, "invoke-super/range", F3rc, MethodRef, CONTINUE, THROW, INVOKE),
    (0x76, InvokeDirectRange, "invoke-direct/range", F3rc, MethodRef, CONTINUE, THROW, INVOKE),
    (0x77, InvokeStaticRange, "invoke-static/range", F3rc, MethodRef, CONTINUE, THROW, INVOKE),
    (0x78, InvokeInterfaceRange, "invoke-interface/range", F3rc, MethodRef, CONTINUE, THROW, INVOKE),
    (0x79, Unused79, "unused-79", F10x, Unknown),
    (0x7A, Unused7A, "unused-7a", F10x, Unknown),
    (0x7B, NegInt, "neg-int", F12x, None, CONTINUE),
    (0x7C, NotInt, "not-int", F12x, None, CONTINUE),
    (0x7D, NegLong, "neg-long", F12x, None, CONTINUE),
    (0x7E, NotLong, "not-long", F12x, None, CONTINUE),
    (0x7F, NegFloat, "neg-float", F12x, None, CONTINUE),
    (0x80, NegDouble, "neg-double", F12x, None, CONTINUE),
    (0x81, IntToLong, "int-to-long", F12x, None, CONTINUE),
    (0x82, IntToFloat, "int-to-float", F12x, None, CONTINUE),
    (0x83, IntToDouble, "int-to-double", F12x, None, CONTINUE),
    (0x84, LongToInt, "long-to-int", F12x, None, CONTINUE),
    (0x85, LongToFloat, "long-to-float", F12x, None, CONTINUE),
    (0x86, LongToDouble, "long-to-double", F12x, None, CONTINUE),
    (0x87, FloatToInt, "float-to-int", F12x, None, CONTINUE),
    (0x88, FloatToLong, "float-to-long", F12x, None, CONTINUE),
    (0x89, FloatToDouble, "float-to-double", F12x, None, CONTINUE),
    (0x8A, DoubleToInt, "double-to-int", F12x, None, CONTINUE),
    (0x8B, DoubleToLong, "double-to-long", F12x, None, CONTINUE),
    (0x8C, DoubleToFloat, "double-to-float", F12x, None, CONTINUE),
    (0x8D, IntToByte, "int-to-byte", F12x, None, CONTINUE),
    (0x8E, IntToChar, "int-to-char", F12x, None, CONTINUE),
    (0x8F, IntToShort, "int-to-short", F12x, None, CONTINUE),
    (0x90, AddInt, "add-int", F23x, None, CONTINUE),
    (0x91, SubInt, "sub-int", F23x, None, CONTINUE),
    (0x92, MulInt, "mul-int", F23x, None, CONTINUE),
    (0x93, DivInt, "div-int", F23x, None, CONTINUE, THROW),
    (0x94, RemInt, "rem-int", F23x, None, CONTINUE, THROW),
    (0x95, AndInt, "and-int", F23x, None, CONTINUE),
    (0x96, OrInt, "or-int", F23x, None, CONTINUE),
    (0x97, XorInt, "xor-int", F23x, None, CONTINUE),
    (0x98, ShlInt, "shl-int", F23x, None, CONTINUE),
    (0x99, ShrInt, "shr-int", F23x, None, CONTINUE),
    (0x9A, UshrInt, "ushr-int", F23x, None, CONTINUE),
    (0x9B, AddLong, "add-long", F23x, None, CONTINUE),
    (0x9C, SubLong, "sub-long", F23x, None, CONTINUE),
    (0x9D, MulLong, "mul-long", F23x, None, CONTINUE),
    (0x9E, DivLong, "div-long", F23x, None, CONTINUE, THROW),
    (0x9F, RemLong, "rem-long", F23x, None, CONTINUE, THROW),
    (0xA0, AndLong, "and-long", F23x, None, CONTINUE),
    (0xA1, OrLong, "or-long", F23x, None, CONTINUE),
    (0xA2, XorLong, "xor-long", F23x, None, CONTINUE),
    (0xA3, ShlLong, "shl-long", F23x, None, CONTINUE),
    (0xA4, ShrLong, "shr-long", F23x, None, CONTINUE),
    (0xA5, UshrLong, "ushr-long", F23x, None, CONTINUE),
    (0xA6, AddFloat, "add-float", F23x, None, CONTINUE),
    (0xA7, SubFloat, "sub-float", F23x, None, CONTINUE),
    (0xA8, MulFloat, "mul-float", F23x, None, CONTINUE),
    (0xA9, DivFloat, "div-float", F23x, None, CONTINUE),
    (0xAA, RemFloat, "rem-float", F23x, None, CONTINUE),
    (0xAB, AddDouble, "add-double", F23x, None, CONTINUE),
    (0xAC, SubDouble, "sub-double", F23x, None, CONTINUE),
    (0xAD, MulDouble, "mul-double", F23x, None, CONTINUE),
    (0xAE, DivDouble, "div-double", F23x, None, CONTINUE),
    (0xAF, RemDouble, "rem-double", F23x, None, CONTINUE),
    (0xB0, AddInt2Addr, "add-int/2addr", F12x, None, CONTINUE),
    (0xB1, SubInt2Addr, "sub-int/2addr", F12x, None, CONTINUE),
    (0xB2, MulInt2Addr, "mul-int/2addr", F12x, None, CONTINUE),
    (0xB3, DivInt2Addr, "div-int/2addr", F12x, None, CONTINUE, THROW),
    (0xB4, RemInt2Addr, "rem-int/2addr", F12x, None, CONTINUE, THROW),
    (0xB5, AndInt2Addr, "and-int/2addr", F12x, None, CONTINUE),
    (0xB6, OrInt2Addr, "or-int/2addr", F12x, None, CONTINUE),
    (0xB7, XorInt2Addr, "xor-int/2addr", F12x, None, CONTINUE),
    (0xB8, ShlInt2Addr, "shl-int/2addr", F12x, None, CONTINUE),
    (0xB9, ShrInt2Addr, "shr-int/2addr", F12x, None, CONTINUE),
    (0xBA, UshrInt2Addr, "ushr-int/2addr", F12x, None, CONTINUE),
    (0xBB, AddLong2Addr, "add-long/2addr", F12x, None, CONTINUE),
    (0xBC, SubLong2Addr, "sub-long/2addr", F12x, None, CONTINUE),
    (0xBD, MulLong2Addr, "mul-long/2addr", F12x, None, CONTINUE),
    (0xBE, DivLong2Addr, "div-long/2addr", F12x, None, CONTINUE, THROW),
    (0xBF, RemLong2Addr, "rem-long/2addr", F12x, None, CONTINUE, THROW),
    (0xC0, AndLong2Addr, "and-long/2addr", F12x, None, CONTINUE),
    (0xC1, OrLong2Addr, "or-long/2addr", F12x, None, CONTINUE),
    (0xC2, XorLong2Addr, "xor-long/2addr", F12x, None, CONTINUE),
    (0xC3, ShlLong2Addr, "shl-long/2addr", F12x, None, CONTINUE),
    (0xC4, ShrLong2Addr, "shr-long/2addr", F12x, None, CONTINUE),
    (0xC5, UshrLong2Addr, "ushr-long/2addr", F12x, None, CONTINUE),
    (0xC6, AddFloat2Addr, "add-float/2addr", F12x, None, CONTINUE),
    (0xC7, SubFloat2Addr, "sub-float/2addr", F12x, None, CONTINUE),
    (0xC8, MulFloat2Addr, "mul-float/2addr", F12x, None, CONTINUE),
    (0xC9, DivFloat2Addr, "div-float/2addr", F12x, None, CONTINUE),
    (0xCA, RemFloat2Addr, "rem-float/2addr", F12x, None, CONTINUE),
    (0xCB, AddDouble2Addr, "add-double/2addr", F12x, None, CONTINUE),
    (0xCC, SubDouble2Addr, "sub-double/2addr", F12x, None, CONTINUE),
    (0xCD, MulDouble2Addr, "mul-double/2addr", F12x, None, CONTINUE),
    (0xCE, DivDouble2Addr, "div-double/2addr", F12x, None, CONTINUE),
    (0xCF, RemDouble2Addr, "rem-double/2addr", F12x, None, CONTINUE),
    (0xD0, AddIntLit16, "add-int/lit16", F22s, None, CONTINUE),
    (0xD1, RsubInt, "rsub-int", F22s, None, CONTINUE),
    (0xD2, MulIntLit16, "mul-int/lit16", F22s, None, CONTINUE),
    (0xD3, DivIntLit16, "div-int/lit16", F22s, None, CONTINUE, THROW),
    (0xD4, RemIntLit16, "rem-int/lit16", F22s, None, CONTINUE, THROW),
    (0xD5, AndIntLit16, "and-int/lit16", F22s, None, CONTINUE),
    (0xD6, OrIntLit16, "or-int/lit16", F22s, None, CONTINUE),
    (0xD7, XorIntLit16, "xor-int/lit16", F22s, None, CONTINUE),
    (0xD8, AddIntLit8, "add-int/lit8", F22b, None, CONTINUE),
    (0xD9, RsubIntLit8, "rsub-int/lit8", F22b, None, CONTINUE),
    (0xDA, MulIntLit8, "mul-int/lit8", F22b, None, CONTINUE),
    (0xDB, DivIntLit8, "div-int/lit8", F22b, None, CONTINUE, THROW),
    (0xDC, RemIntLit8, "rem-int/lit8", F22b, None, CONTINUE, THROW),
    (0xDD, AndIntLit8, "and-int/lit8", F22b, None, CONTINUE),
    (0xDE, OrIntLit8, "or-int/lit8", F22b, None, CONTINUE),
    (0xDF, XorIntLit8, "xor-int/lit8", F22b, None, CONTINUE),
    (0xE0, ShlIntLit8, "shl-int/lit8", F22b, None, CONTINUE),
    (0xE1, ShrIntLit8, "shr-int/lit8", F22b, None, CONTINUE),
    (0xE2, UshrIntLit8, "ushr-int/lit8", F22b, None, CONTINUE),
    (0xE3, UnusedE3, "unused-e3", F10x, Unknown),
    (0xE4, UnusedE4, "unused-e4", F10x, Unknown),
    (0xE5, UnusedE5, "unused-e5", F10x, Unknown),
    (0xE6, UnusedE6, "unused-e6", F10x, Unknown),
    (0xE7, UnusedE7, "unused-e7", F10x, Unknown),
    (0xE8, UnusedE8, "unused-e8", F10x, Unknown),
    (0xE9, UnusedE9, "unused-e9", F10x, Unknown),
    (0xEA, UnusedEA, "unused-ea", F10x, Unknown),
    (0xEB, UnusedEB, "unused-eb", F10x, Unknown),
    (0xEC, UnusedEC, "unused-ec", F10x, Unknown),
    (0xED, UnusedED, "unused-ed", F10x, Unknown),
    (0xEE, UnusedEE, "unused-ee", F10x, Unknown),
    (0xEF, UnusedEF, "unused-ef", F10x, Unknown),
    (0xF0, UnusedF0, "unused-f0", F10x, Unknown),
    (0xF1, UnusedF1, "unused-f1", F10x, Unknown),
    (0xF2, UnusedF2, "unused-f2", F10x, Unknown),
    (0xF3, UnusedF3, "unused-f3", F10x, Unknown),
    (0xF4, UnusedF4, "unused-f4", F10x, Unknown),
    (0xF5, UnusedF5, "unused-f5", F10x, Unknown),
    (0xF6, UnusedF6, "unused-f6", F10x, Unknown),
    (0xF7, UnusedF7, "unused-f7", F10x, Unknown),
    (0xF8, UnusedF8, "unused-f8", F10x, Unknown),
    (0xF9, UnusedF9, "unused-f9", F10x, Unknown),
    (0xFA, InvokePolymorphic, "invoke-polymorphic", F45cc, MethodAndProtoRef, CONTINUE, THROW, INVOKE),
    (0xFB, InvokePolymorphicRange, "invoke-polymorphic/range", F4rcc, MethodAndProtoRef, CONTINUE, THROW, INVOKE),
    (0xFC, InvokeCustom, "invoke-custom", F35c, CallSiteRef, CONTINUE, THROW, INVOKE),
    (0xFD, InvokeCustomRange, "invoke-custom/range", F3rc, CallSiteRef, CONTINUE, THROW, INVOKE),
    (0xFE, ConstMethodHandle, "const-method-handle", F21c, MethodHandleRef, CONTINUE, THROW),
    (0xFF, ConstMethodType, "const-method-type", F21c, ProtoRef, CONTINUE, THROW),
}
