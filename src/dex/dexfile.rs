//! The parsed DEX container and its table accessors.
//!
//! [`DexFile`] is the entry point of the structural layer. Opening one parses the fixed
//! header, records where each index table lives, walks the map list to locate the call
//! site and method handle sections, and runs the eager checks of the chosen
//! [`crate::dex::VerificationPreset`]. Everything else is resolved on demand: a row
//! accessor decodes its row straight out of the borrowed [`crate::File`] at call time,
//! so the `DexFile` itself stays small and immutable and can be shared across threads.
//!
//! # Accessor conventions
//!
//! Every table has three entry points, all built on one fallible core:
//!
//! - `num_*()` - the row count the header (or map list) declares
//! - `get_*(idx)` - strict lookup, failing with [`crate::Error::IndexOutOfBounds`]
//! - `get_*_opt(idx)` - tolerant lookup for untrusted indices, `None` when out of range
//!
//! String resolution comes in strict ([`DexFile::get_utf16_at`]) and lossy
//! ([`DexFile::get_utf16_lossy_at`]) forms; lossy tolerates encoding damage but never a
//! missing terminator.

use crate::{
    codec::{decode_uleb128, mutf8_to_str, mutf8_to_str_lossy},
    dex::{
        CallSiteIdItem, ClassAccessor, ClassDef, ClassDefIndex, CodeItemAccessor, FieldId,
        FieldIndex, Header, MapItem, MethodHandleItem, MethodId, MethodIndex, ProtoId, ProtoIndex,
        StringId, StringIndex, TypeId, TypeIndex, VerificationPreset,
    },
    file::io::read_le_at,
    File, Result,
};

/// Location of a section discovered through the map list.
#[derive(Debug, Clone, Copy, Default)]
struct Section {
    off: u32,
    count: u32,
}

/// A read-only view of one parsed DEX container.
///
/// Borrows the [`crate::File`] it was opened from; all slices handed out by its
/// accessors share that borrow. The struct holds only the parsed header, the two
/// map-list-located section descriptors and the verification preset - rows are decoded
/// on demand.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Full)?;
///
/// for idx in 0..dex.num_string_ids() {
///     println!("{}", dex.get_utf16_at(idx)?);
/// }
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct DexFile<'a> {
    file: &'a File,
    header: Header,
    preset: VerificationPreset,
    call_sites: Section,
    method_handles: Section,
}

impl<'a> DexFile<'a> {
    /// Opens a DEX container from loaded bytes.
    ///
    /// Parses the header, locates the call site and method handle sections through the
    /// map list, and runs the eager checks the preset selects. The preset is an explicit
    /// argument on purpose - how much a caller trusts its input is a per-open decision,
    /// never ambient state.
    ///
    /// # Arguments
    ///
    /// * `file` - The loaded container bytes
    /// * `preset` - Which eager structural checks to run
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the container cannot hold a header, plus
    /// whatever the preset's checks reject - see [`crate::dex::VerificationPreset`].
    pub fn open(file: &'a File, preset: VerificationPreset) -> Result<DexFile<'a>> {
        let header = Header::parse(file.data())?;

        let mut dex = DexFile {
            file,
            header,
            preset,
            call_sites: Section::default(),
            method_handles: Section::default(),
        };
        dex.locate_map_sections();
        dex.verify()?;

        Ok(dex)
    }

    /// The parsed fixed header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The verification preset this container was opened with.
    #[must_use]
    pub fn preset(&self) -> VerificationPreset {
        self.preset
    }

    /// The container size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.file.len()
    }

    pub(crate) fn file(&self) -> &'a File {
        self.file
    }

    /// Walks the map list for the sections the header does not describe.
    ///
    /// Damage in the map list is tolerated here - the affected tables just stay empty.
    /// The Basic checks reject a map offset that lies outside the container.
    fn locate_map_sections(&mut self) {
        let data = self.file.data();
        let mut offset = self.header.map_off as usize;
        if offset == 0 {
            return;
        }

        let Ok(count) = read_le_at::<u32>(data, &mut offset) else {
            return;
        };

        for _ in 0..count {
            let Ok(item) = MapItem::parse(&data[offset.min(data.len())..]) else {
                return;
            };
            offset += MapItem::SIZE;

            match item.item_type {
                MapItem::TYPE_CALL_SITE_ID_ITEM => {
                    self.call_sites = Section {
                        off: item.off,
                        count: item.size,
                    };
                }
                MapItem::TYPE_METHOD_HANDLE_ITEM => {
                    self.method_handles = Section {
                        off: item.off,
                        count: item.size,
                    };
                }
                _ => {}
            }
        }
    }

    /// Bounds-checks an index against a table and returns the raw row bytes.
    fn row_slice(
        &self,
        off: u32,
        count: u32,
        row_size: usize,
        idx: u32,
        table: &'static str,
    ) -> Result<&'a [u8]> {
        if idx >= count {
            return Err(crate::Error::IndexOutOfBounds {
                index: idx,
                table,
                len: count as usize,
            });
        }

        let offset = off as usize + idx as usize * row_size;
        self.file.data_slice(offset, row_size)
    }

    /// Number of rows in the string identifiers table.
    #[must_use]
    pub fn num_string_ids(&self) -> u32 {
        self.header.string_ids_size
    }

    /// Number of rows in the type identifiers table.
    #[must_use]
    pub fn num_type_ids(&self) -> u32 {
        self.header.type_ids_size
    }

    /// Number of rows in the prototype identifiers table.
    #[must_use]
    pub fn num_proto_ids(&self) -> u32 {
        self.header.proto_ids_size
    }

    /// Number of rows in the field identifiers table.
    #[must_use]
    pub fn num_field_ids(&self) -> u32 {
        self.header.field_ids_size
    }

    /// Number of rows in the method identifiers table.
    #[must_use]
    pub fn num_method_ids(&self) -> u32 {
        self.header.method_ids_size
    }

    /// Number of rows in the class definitions table.
    #[must_use]
    pub fn num_class_defs(&self) -> u32 {
        self.header.class_defs_size
    }

    /// Number of rows in the call site identifiers section.
    #[must_use]
    pub fn num_call_site_ids(&self) -> u32 {
        self.call_sites.count
    }

    /// Number of rows in the method handles section.
    #[must_use]
    pub fn num_method_handles(&self) -> u32 {
        self.method_handles.count
    }

    /// Looks up a string identifier row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_string_id(&self, idx: StringIndex) -> Result<StringId> {
        StringId::parse(self.row_slice(
            self.header.string_ids_off,
            self.header.string_ids_size,
            StringId::SIZE,
            idx,
            "string-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_string_id`].
    #[must_use]
    pub fn get_string_id_opt(&self, idx: StringIndex) -> Option<StringId> {
        self.get_string_id(idx).ok()
    }

    /// Looks up a type identifier row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_type_id(&self, idx: TypeIndex) -> Result<TypeId> {
        TypeId::parse(self.row_slice(
            self.header.type_ids_off,
            self.header.type_ids_size,
            TypeId::SIZE,
            u32::from(idx),
            "type-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_type_id`].
    #[must_use]
    pub fn get_type_id_opt(&self, idx: TypeIndex) -> Option<TypeId> {
        self.get_type_id(idx).ok()
    }

    /// Looks up a prototype identifier row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_proto_id(&self, idx: ProtoIndex) -> Result<ProtoId> {
        ProtoId::parse(self.row_slice(
            self.header.proto_ids_off,
            self.header.proto_ids_size,
            ProtoId::SIZE,
            u32::from(idx),
            "proto-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_proto_id`].
    #[must_use]
    pub fn get_proto_id_opt(&self, idx: ProtoIndex) -> Option<ProtoId> {
        self.get_proto_id(idx).ok()
    }

    /// Looks up a field identifier row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_field_id(&self, idx: FieldIndex) -> Result<FieldId> {
        FieldId::parse(self.row_slice(
            self.header.field_ids_off,
            self.header.field_ids_size,
            FieldId::SIZE,
            idx,
            "field-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_field_id`].
    #[must_use]
    pub fn get_field_id_opt(&self, idx: FieldIndex) -> Option<FieldId> {
        self.get_field_id(idx).ok()
    }

    /// Looks up a method identifier row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_method_id(&self, idx: MethodIndex) -> Result<MethodId> {
        MethodId::parse(self.row_slice(
            self.header.method_ids_off,
            self.header.method_ids_size,
            MethodId::SIZE,
            idx,
            "method-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_method_id`].
    #[must_use]
    pub fn get_method_id_opt(&self, idx: MethodIndex) -> Option<MethodId> {
        self.get_method_id(idx).ok()
    }

    /// Looks up a class definition row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_class_def(&self, idx: ClassDefIndex) -> Result<ClassDef> {
        ClassDef::parse(self.row_slice(
            self.header.class_defs_off,
            self.header.class_defs_size,
            ClassDef::SIZE,
            idx,
            "class-defs",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_class_def`].
    #[must_use]
    pub fn get_class_def_opt(&self, idx: ClassDefIndex) -> Option<ClassDef> {
        self.get_class_def(idx).ok()
    }

    /// Looks up a call site identifier row.
    ///
    /// The section is located through the map list; a container without one has an
    /// empty table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_call_site_id(&self, idx: u32) -> Result<CallSiteIdItem> {
        CallSiteIdItem::parse(self.row_slice(
            self.call_sites.off,
            self.call_sites.count,
            CallSiteIdItem::SIZE,
            idx,
            "call-site-ids",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_call_site_id`].
    #[must_use]
    pub fn get_call_site_id_opt(&self, idx: u32) -> Option<CallSiteIdItem> {
        self.get_call_site_id(idx).ok()
    }

    /// Looks up a method handle row.
    ///
    /// The section is located through the map list; a container without one has an
    /// empty table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] past the table end.
    pub fn get_method_handle(&self, idx: u32) -> Result<MethodHandleItem> {
        MethodHandleItem::parse(self.row_slice(
            self.method_handles.off,
            self.method_handles.count,
            MethodHandleItem::SIZE,
            idx,
            "method-handles",
        )?)
    }

    /// Tolerant twin of [`DexFile::get_method_handle`].
    #[must_use]
    pub fn get_method_handle_opt(&self, idx: u32) -> Option<MethodHandleItem> {
        self.get_method_handle(idx).ok()
    }

    /// Returns the declared UTF-16 length and the terminated payload of a string.
    ///
    /// The slice runs from after the uleb128 length prefix through the NUL terminator
    /// inclusive, ready for the [`crate::codec`] decoders.
    ///
    /// # Errors
    ///
    /// Fails if the data offset lies outside the container, the length prefix is a bad
    /// varint, or no terminator exists before the end of the container.
    pub fn get_string_data(&self, string_id: &StringId) -> Result<(u32, &'a [u8])> {
        let data = self.file.data();
        let mut pos = string_id.string_data_off as usize;
        if pos >= data.len() {
            return Err(malformed_error!(
                "String data offset {:#x} lies outside the container ({} bytes)",
                string_id.string_data_off,
                data.len()
            ));
        }

        let utf16_len = decode_uleb128(data, &mut pos)?;

        match data[pos..].iter().position(|&byte| byte == 0) {
            Some(nul) => Ok((utf16_len, &data[pos..=pos + nul])),
            None => Err(crate::Error::Mutf8MissingTerminator),
        }
    }

    /// Decodes a string strictly; see [`crate::codec::mutf8_to_str`].
    ///
    /// # Errors
    ///
    /// Fails on bad framing or any modified-UTF8 damage.
    pub fn get_utf16(&self, string_id: &StringId) -> Result<String> {
        let (_, payload) = self.get_string_data(string_id)?;
        mutf8_to_str(payload)
    }

    /// Strict string lookup by index.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index, bad framing or any modified-UTF8 damage.
    pub fn get_utf16_at(&self, idx: StringIndex) -> Result<String> {
        self.get_utf16(&self.get_string_id(idx)?)
    }

    /// Decodes a string tolerantly; see [`crate::codec::mutf8_to_str_lossy`].
    ///
    /// # Errors
    ///
    /// Fails on bad framing; encoding damage becomes U+FFFD.
    pub fn get_utf16_lossy(&self, string_id: &StringId) -> Result<String> {
        let (_, payload) = self.get_string_data(string_id)?;
        mutf8_to_str_lossy(payload)
    }

    /// Lossy string lookup by index.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index or bad framing; encoding damage becomes U+FFFD.
    pub fn get_utf16_lossy_at(&self, idx: StringIndex) -> Result<String> {
        self.get_utf16_lossy(&self.get_string_id(idx)?)
    }

    /// Resolves a type row to its descriptor string.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor string index or data is damaged.
    pub fn get_type_desc(&self, type_id: &TypeId) -> Result<String> {
        self.get_utf16_at(type_id.descriptor_idx)
    }

    /// Resolves a type index to its descriptor string (e.g. `I` or `Lfoo/Bar;`).
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index or damaged descriptor data.
    pub fn get_type_desc_at(&self, idx: TypeIndex) -> Result<String> {
        self.get_type_desc(&self.get_type_id(idx)?)
    }

    /// Resolves a prototype row to its shorty descriptor.
    ///
    /// # Errors
    ///
    /// Fails if the shorty string index or data is damaged.
    pub fn get_shorty(&self, proto_id: &ProtoId) -> Result<String> {
        self.get_utf16_at(proto_id.shorty_idx)
    }

    /// Resolves a prototype index to its shorty descriptor.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index or damaged shorty data.
    pub fn get_shorty_at(&self, idx: ProtoIndex) -> Result<String> {
        self.get_shorty(&self.get_proto_id(idx)?)
    }

    /// Resolves a class definition to its type descriptor.
    ///
    /// # Errors
    ///
    /// Fails if the class type index or descriptor data is damaged.
    pub fn get_class_desc(&self, class_def: &ClassDef) -> Result<String> {
        self.get_type_desc_at(class_def.class_idx)
    }

    /// Reads a `type_list` at the given offset.
    ///
    /// An offset of 0 means "no list" and yields `None`, per the format's convention
    /// for optional offsets.
    ///
    /// # Errors
    ///
    /// Fails if the list does not fit the container.
    pub fn get_type_list(&self, offset: u32) -> Result<Option<Vec<TypeIndex>>> {
        if offset == 0 {
            return Ok(None);
        }

        let data = self.file.data();
        let mut pos = offset as usize;
        let count = read_le_at::<u32>(data, &mut pos)?;

        let mut entries = Vec::with_capacity(count.min(0xFFFF) as usize);
        for _ in 0..count {
            entries.push(read_le_at::<u16>(data, &mut pos)?);
        }

        Ok(Some(entries))
    }

    /// The interfaces a class implements, or `None` for no interfaces.
    ///
    /// # Errors
    ///
    /// Fails if the list does not fit the container.
    pub fn get_interfaces_list(&self, class_def: &ClassDef) -> Result<Option<Vec<TypeIndex>>> {
        self.get_type_list(class_def.interfaces_off)
    }

    /// The parameter types of a prototype, or `None` for a nullary signature.
    ///
    /// # Errors
    ///
    /// Fails if the list does not fit the container.
    pub fn get_parameters_list(&self, proto_id: &ProtoId) -> Result<Option<Vec<TypeIndex>>> {
        self.get_type_list(proto_id.parameters_off)
    }

    /// Opens the class data of a definition.
    ///
    /// Returns `Ok(None)` for a `class_data_off` of 0, which marks a class without
    /// any declared members (marker interfaces and the like).
    ///
    /// # Errors
    ///
    /// Fails if the offset lies outside the container or the member counts are bad
    /// varints.
    pub fn get_class_accessor(&self, class_def: &ClassDef) -> Result<Option<ClassAccessor<'a>>> {
        if class_def.class_data_off == 0 {
            return Ok(None);
        }

        let data = self.file.data();
        let offset = class_def.class_data_off as usize;
        if offset >= data.len() {
            return Err(malformed_error!(
                "Class data offset {:#x} lies outside the container ({} bytes)",
                class_def.class_data_off,
                data.len()
            ));
        }

        ClassAccessor::from_raw(&data[offset..]).map(Some)
    }

    /// Opens the code item at `code_off`.
    ///
    /// # Errors
    ///
    /// Fails for a zero offset (callers should consult
    /// [`crate::dex::EncodedMethod::has_code`] first) or a code item that does not fit
    /// the container.
    pub fn get_code_item_accessor(&self, code_off: u32) -> Result<CodeItemAccessor<'a>> {
        CodeItemAccessor::from_offset(self, code_off)
    }
}
