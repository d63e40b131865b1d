//! Index-table rows and fixed data structures of the DEX format.
//!
//! Each struct here mirrors one published on-disk layout. Rows are decoded field by
//! field through [`crate::file::io::read_le_at`] from a slice the
//! [`crate::dex::DexFile`] has already bounds-checked, so the parsers themselves are
//! straight-line sequences of little-endian reads. Padding fields are consumed and
//! discarded.

use crate::{
    dex::{ProtoIndex, StringIndex, TypeIndex, NO_INDEX},
    file::io::read_le_at,
    Result,
};

use bitflags::bitflags;

/// A row of the string identifiers table: the offset of one `string_data_item`.
#[derive(Debug, Clone)]
pub struct StringId {
    /// Offset of the string data (uleb128 UTF-16 length, payload, NUL) in the data section.
    pub string_data_off: u32,
}

impl StringId {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 4;

    pub(crate) fn parse(data: &[u8]) -> Result<StringId> {
        let mut offset = 0;
        Ok(StringId {
            string_data_off: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the type identifiers table.
#[derive(Debug, Clone)]
pub struct TypeId {
    /// Index into the string identifiers for the type descriptor (e.g. `I`, `Lfoo/Bar;`).
    pub descriptor_idx: StringIndex,
}

impl TypeId {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 4;

    pub(crate) fn parse(data: &[u8]) -> Result<TypeId> {
        let mut offset = 0;
        Ok(TypeId {
            descriptor_idx: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the field identifiers table.
#[derive(Debug, Clone)]
pub struct FieldId {
    /// Index into the type identifiers for the defining class.
    pub class_idx: TypeIndex,
    /// Index into the type identifiers for the field type.
    pub type_idx: TypeIndex,
    /// Index into the string identifiers for the field name.
    pub name_idx: StringIndex,
}

impl FieldId {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 8;

    pub(crate) fn parse(data: &[u8]) -> Result<FieldId> {
        let mut offset = 0;
        Ok(FieldId {
            class_idx: read_le_at::<u16>(data, &mut offset)?,
            type_idx: read_le_at::<u16>(data, &mut offset)?,
            name_idx: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the prototype identifiers table.
#[derive(Debug, Clone)]
pub struct ProtoId {
    /// Index into the string identifiers for the shorty descriptor.
    pub shorty_idx: StringIndex,
    /// Index into the type identifiers for the return type.
    pub return_type_idx: TypeIndex,
    /// Offset of the parameter `type_list`, or 0 for no parameters.
    pub parameters_off: u32,
}

impl ProtoId {
    /// On-disk row size in bytes (including 2 bytes of padding).
    pub const SIZE: usize = 12;

    pub(crate) fn parse(data: &[u8]) -> Result<ProtoId> {
        let mut offset = 0;
        let shorty_idx = read_le_at::<u32>(data, &mut offset)?;
        let return_type_idx = read_le_at::<u16>(data, &mut offset)?;
        let _pad = read_le_at::<u16>(data, &mut offset)?;
        Ok(ProtoId {
            shorty_idx,
            return_type_idx,
            parameters_off: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the method identifiers table.
#[derive(Debug, Clone)]
pub struct MethodId {
    /// Index into the type identifiers for the defining class.
    pub class_idx: TypeIndex,
    /// Index into the prototype identifiers for the method signature.
    pub proto_idx: ProtoIndex,
    /// Index into the string identifiers for the method name.
    pub name_idx: StringIndex,
}

impl MethodId {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 8;

    pub(crate) fn parse(data: &[u8]) -> Result<MethodId> {
        let mut offset = 0;
        Ok(MethodId {
            class_idx: read_le_at::<u16>(data, &mut offset)?,
            proto_idx: read_le_at::<u16>(data, &mut offset)?,
            name_idx: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the class definitions table.
///
/// The superclass and source-file fields use the [`crate::dex::NO_INDEX`] sentinel for
/// "none"; prefer the [`ClassDef::superclass`] / [`ClassDef::source_file`] accessors
/// over comparing raw values.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Index into the type identifiers for this class.
    pub class_idx: TypeIndex,
    /// Access flags of the class; see [`AccessFlags`].
    pub access_flags: u32,
    /// Index into the type identifiers for the superclass, or [`crate::dex::NO_INDEX`].
    pub superclass_idx: u32,
    /// Offset of the interfaces `type_list`, or 0 for no interfaces.
    pub interfaces_off: u32,
    /// Index into the string identifiers for the source file, or [`crate::dex::NO_INDEX`].
    pub source_file_idx: u32,
    /// Offset of the `annotations_directory_item`, or 0.
    pub annotations_off: u32,
    /// Offset of the `class_data_item`, or 0 for a class without members.
    pub class_data_off: u32,
    /// Offset of the static-values `encoded_array_item`, or 0.
    pub static_values_off: u32,
}

impl ClassDef {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 32;

    pub(crate) fn parse(data: &[u8]) -> Result<ClassDef> {
        let mut offset = 0;
        let class_idx = read_le_at::<u16>(data, &mut offset)?;
        let _pad = read_le_at::<u16>(data, &mut offset)?;
        Ok(ClassDef {
            class_idx,
            access_flags: read_le_at::<u32>(data, &mut offset)?,
            superclass_idx: read_le_at::<u32>(data, &mut offset)?,
            interfaces_off: read_le_at::<u32>(data, &mut offset)?,
            source_file_idx: read_le_at::<u32>(data, &mut offset)?,
            annotations_off: read_le_at::<u32>(data, &mut offset)?,
            class_data_off: read_le_at::<u32>(data, &mut offset)?,
            static_values_off: read_le_at::<u32>(data, &mut offset)?,
        })
    }

    /// The superclass type index, or `None` for `java.lang.Object` and interfaces
    /// without one.
    #[must_use]
    pub fn superclass(&self) -> Option<TypeIndex> {
        if self.superclass_idx == NO_INDEX {
            None
        } else {
            u16::try_from(self.superclass_idx).ok()
        }
    }

    /// The source-file string index, or `None` if the compiler dropped it.
    #[must_use]
    pub fn source_file(&self) -> Option<StringIndex> {
        if self.source_file_idx == NO_INDEX {
            None
        } else {
            Some(self.source_file_idx)
        }
    }

    /// The parsed access flags.
    #[must_use]
    pub fn access_flags(&self) -> AccessFlags {
        AccessFlags::from_bits_truncate(self.access_flags)
    }
}

/// The fixed part of a `code_item`: sizes and the instruction count.
#[derive(Debug, Clone)]
pub struct CodeItem {
    /// Number of registers the method uses.
    pub registers_size: u16,
    /// Number of words of incoming arguments.
    pub ins_size: u16,
    /// Number of words of outgoing argument space for calls.
    pub outs_size: u16,
    /// Number of entries in the try list.
    pub tries_size: u16,
    /// Offset of the `debug_info_item`, or 0.
    pub debug_info_off: u32,
    /// Size of the instruction stream in 16-bit code units.
    pub insns_size: u32,
}

impl CodeItem {
    /// On-disk size of the fixed part in bytes.
    pub const SIZE: usize = 16;

    pub(crate) fn parse(data: &[u8]) -> Result<CodeItem> {
        let mut offset = 0;
        Ok(CodeItem {
            registers_size: read_le_at::<u16>(data, &mut offset)?,
            ins_size: read_le_at::<u16>(data, &mut offset)?,
            outs_size: read_le_at::<u16>(data, &mut offset)?,
            tries_size: read_le_at::<u16>(data, &mut offset)?,
            debug_info_off: read_le_at::<u32>(data, &mut offset)?,
            insns_size: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// One entry of a code item's try list.
#[derive(Debug, Clone)]
pub struct TryItem {
    /// First code unit covered by this try block.
    pub start_addr: u32,
    /// Number of code units covered.
    pub insn_count: u16,
    /// Offset into the `encoded_catch_handler_list` for this block's handlers.
    pub handler_off: u16,
}

impl TryItem {
    /// On-disk entry size in bytes.
    pub const SIZE: usize = 8;

    pub(crate) fn parse(data: &[u8]) -> Result<TryItem> {
        let mut offset = 0;
        Ok(TryItem {
            start_addr: read_le_at::<u32>(data, &mut offset)?,
            insn_count: read_le_at::<u16>(data, &mut offset)?,
            handler_off: read_le_at::<u16>(data, &mut offset)?,
        })
    }
}

/// One entry of the map list.
///
/// The map list enumerates every section of the container. Only the entries locating
/// call sites and method handles are consumed here; the raw `item_type` is kept so
/// callers can inspect the rest.
#[derive(Debug, Clone)]
pub struct MapItem {
    /// The section kind, one of the `TYPE_*` constants.
    pub item_type: u16,
    /// Number of items in the section.
    pub size: u32,
    /// Offset of the section's first item.
    pub off: u32,
}

impl MapItem {
    /// On-disk entry size in bytes (including 2 bytes of padding).
    pub const SIZE: usize = 12;

    /// Map-list type for `call_site_id_item` sections.
    pub const TYPE_CALL_SITE_ID_ITEM: u16 = 0x0007;
    /// Map-list type for `method_handle_item` sections.
    pub const TYPE_METHOD_HANDLE_ITEM: u16 = 0x0008;

    pub(crate) fn parse(data: &[u8]) -> Result<MapItem> {
        let mut offset = 0;
        let item_type = read_le_at::<u16>(data, &mut offset)?;
        let _pad = read_le_at::<u16>(data, &mut offset)?;
        Ok(MapItem {
            item_type,
            size: read_le_at::<u32>(data, &mut offset)?,
            off: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

/// A row of the method handles section.
#[derive(Debug, Clone)]
pub struct MethodHandleItem {
    /// The handle kind (static-put, instance-get, invoke-static, ...).
    pub method_handle_type: u16,
    /// Field index for accessor kinds, method index otherwise.
    pub field_or_method_idx: u16,
}

impl MethodHandleItem {
    /// On-disk row size in bytes (including 4 bytes of padding).
    pub const SIZE: usize = 8;

    pub(crate) fn parse(data: &[u8]) -> Result<MethodHandleItem> {
        let mut offset = 0;
        let method_handle_type = read_le_at::<u16>(data, &mut offset)?;
        let _pad = read_le_at::<u16>(data, &mut offset)?;
        let field_or_method_idx = read_le_at::<u16>(data, &mut offset)?;
        Ok(MethodHandleItem {
            method_handle_type,
            field_or_method_idx,
        })
    }
}

/// A row of the call site identifiers section.
#[derive(Debug, Clone)]
pub struct CallSiteIdItem {
    /// Offset of the call site's `encoded_array_item` in the data section.
    pub data_off: u32,
}

impl CallSiteIdItem {
    /// On-disk row size in bytes.
    pub const SIZE: usize = 4;

    pub(crate) fn parse(data: &[u8]) -> Result<CallSiteIdItem> {
        let mut offset = 0;
        Ok(CallSiteIdItem {
            data_off: read_le_at::<u32>(data, &mut offset)?,
        })
    }
}

bitflags! {
    /// Access flags for classes, fields and methods.
    ///
    /// Some bit positions are shared between kinds (`SYNCHRONIZED`/`SUPER`,
    /// `VOLATILE`/`BRIDGE`, `TRANSIENT`/`VARARGS`); which meaning applies follows
    /// from what the flags are attached to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessFlags: u32 {
        /// Public visibility.
        const PUBLIC = 0x0001;
        /// Private visibility (field, method, inner class).
        const PRIVATE = 0x0002;
        /// Protected visibility (field, method, inner class).
        const PROTECTED = 0x0004;
        /// Static member.
        const STATIC = 0x0008;
        /// Final class, field or method.
        const FINAL = 0x0010;
        /// Synchronized method (only allowed on natives).
        const SYNCHRONIZED = 0x0020;
        /// Volatile field / bridge method.
        const VOLATILE = 0x0040;
        /// Transient field / varargs method.
        const TRANSIENT = 0x0080;
        /// Native method.
        const NATIVE = 0x0100;
        /// Interface class.
        const INTERFACE = 0x0200;
        /// Abstract class or method.
        const ABSTRACT = 0x0400;
        /// Strict floating-point method.
        const STRICT = 0x0800;
        /// Compiler-synthesized member.
        const SYNTHETIC = 0x1000;
        /// Annotation class.
        const ANNOTATION = 0x2000;
        /// Enum class or field.
        const ENUM = 0x4000;
        /// Constructor method (`<init>` / `<clinit>`), dex only.
        const CONSTRUCTOR = 0x0001_0000;
        /// Declared synchronized method, dex only.
        const DECLARED_SYNCHRONIZED = 0x0002_0000;
    }
}

/// How a method is dispatched, derived from its access flags and list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Static method, invoked without a receiver.
    Static,
    /// Non-overridable instance method (private or constructor).
    Direct,
    /// Virtually dispatched instance method.
    Virtual,
    /// Interface method.
    Interface,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_proto_id_skips_padding() {
        let mut data = Vec::new();
        data.extend_from_slice(&7_u32.to_le_bytes());
        data.extend_from_slice(&2_u16.to_le_bytes());
        data.extend_from_slice(&0xFFFF_u16.to_le_bytes()); // padding, ignored
        data.extend_from_slice(&0x200_u32.to_le_bytes());

        let proto = ProtoId::parse(&data).unwrap();
        assert_eq!(proto.shorty_idx, 7);
        assert_eq!(proto.return_type_idx, 2);
        assert_eq!(proto.parameters_off, 0x200);
    }

    #[test]
    fn parse_class_def_sentinels() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_u16.to_le_bytes()); // class_idx
        data.extend_from_slice(&0_u16.to_le_bytes()); // pad
        data.extend_from_slice(&0x0001_u32.to_le_bytes()); // access_flags
        data.extend_from_slice(&crate::dex::NO_INDEX.to_le_bytes()); // superclass
        data.extend_from_slice(&0_u32.to_le_bytes()); // interfaces_off
        data.extend_from_slice(&crate::dex::NO_INDEX.to_le_bytes()); // source_file
        data.extend_from_slice(&0_u32.to_le_bytes()); // annotations_off
        data.extend_from_slice(&0x300_u32.to_le_bytes()); // class_data_off
        data.extend_from_slice(&0_u32.to_le_bytes()); // static_values_off
        assert_eq!(data.len(), ClassDef::SIZE);

        let class_def = ClassDef::parse(&data).unwrap();
        assert_eq!(class_def.class_idx, 1);
        assert_eq!(class_def.superclass(), None);
        assert_eq!(class_def.source_file(), None);
        assert!(class_def.access_flags().contains(AccessFlags::PUBLIC));
        assert_eq!(class_def.class_data_off, 0x300);
    }

    #[test]
    fn parse_truncated_row() {
        assert!(FieldId::parse(&[0x00; 4]).is_err());
        assert!(CodeItem::parse(&[0x00; 15]).is_err());
    }

    #[test]
    fn parse_code_item() {
        let mut data = Vec::new();
        for value in [1_u16, 1, 2, 0] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&4_u32.to_le_bytes());

        let code = CodeItem::parse(&data).unwrap();
        assert_eq!(code.registers_size, 1);
        assert_eq!(code.outs_size, 2);
        assert_eq!(code.tries_size, 0);
        assert_eq!(code.insns_size, 4);
    }
}
