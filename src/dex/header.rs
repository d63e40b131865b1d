//! The fixed DEX header.
//!
//! Every container starts with a 0x70-byte header: the magic with its version digits, an
//! adler32 checksum over everything after the first 12 bytes, a SHA-1 signature, overall
//! sizes, the endian tag, and `(size, offset)` pairs locating each index table and the
//! data section. Version 041 containers append two fields and declare a 0x78-byte header.
//!
//! Parsing here is purely structural; whether the declared values are sane is decided by
//! the checks behind [`crate::dex::VerificationPreset`].

use crate::{
    file::io::read_le_at,
    Result,
};

/// The parsed fixed header of a DEX container.
///
/// All multi-byte fields are little-endian. Offsets are absolute within the container;
/// a `(size, off)` pair with `size == 0` has `off == 0`.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Basic)?;
/// let header = dex.header();
///
/// println!("version {}", header.version());
/// println!("{} strings, {} types", header.string_ids_size, header.type_ids_size);
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Header {
    /// Magic value: `dex\n` followed by three version digits and a NUL.
    magic: [u8; 8],
    /// Adler32 checksum of the rest of the file (everything but `magic` and this
    /// field); used to detect file corruption.
    pub checksum: u32,
    /// SHA-1 signature (hash) of the rest of the file (everything but `magic`,
    /// `checksum`, and this field); used to uniquely identify files. Carried as
    /// raw bytes, never recomputed.
    signature: [u8; 20],
    /// Size of the entire file including the header.
    pub file_size: u32,
    /// Size of this header in bytes: 0x70, or 0x78 for version 041.
    pub header_size: u32,
    /// Endian constant; only [`crate::dex::DEX_ENDIAN_CONSTANT`] is supported.
    pub endian_tag: u32,
    /// Size of the link section, or 0 if this file isn't statically linked.
    pub link_size: u32,
    /// Offset of the link section, or 0 if `link_size == 0`.
    pub link_off: u32,
    /// Offset of the map list, inside the data section. Must be non-zero.
    pub map_off: u32,
    /// Count of strings in the string identifiers list.
    pub string_ids_size: u32,
    /// Offset of the string identifiers list, or 0 if empty.
    pub string_ids_off: u32,
    /// Count of elements in the type identifiers list, at most 65535.
    pub type_ids_size: u32,
    /// Offset of the type identifiers list, or 0 if empty.
    pub type_ids_off: u32,
    /// Count of elements in the prototype identifiers list, at most 65535.
    pub proto_ids_size: u32,
    /// Offset of the prototype identifiers list, or 0 if empty.
    pub proto_ids_off: u32,
    /// Count of elements in the field identifiers list.
    pub field_ids_size: u32,
    /// Offset of the field identifiers list, or 0 if empty.
    pub field_ids_off: u32,
    /// Count of elements in the method identifiers list.
    pub method_ids_size: u32,
    /// Offset of the method identifiers list, or 0 if empty.
    pub method_ids_off: u32,
    /// Count of elements in the class definitions list.
    pub class_defs_size: u32,
    /// Offset of the class definitions list, or 0 if empty.
    pub class_defs_off: u32,
    /// Size of the data section in bytes.
    pub data_size: u32,
    /// Offset of the data section.
    pub data_off: u32,
}

impl Header {
    /// Byte size of the fixed header.
    pub const SIZE: usize = 0x70;
    /// Byte size of the extended version-041 header.
    pub const SIZE_V41: usize = 0x78;

    /// Parses the fixed header from the start of a container.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if fewer than [`Header::SIZE`] bytes are
    /// available. No value checks happen here.
    pub(crate) fn parse(data: &[u8]) -> Result<Header> {
        if data.len() < Self::SIZE {
            return Err(malformed_error!(
                "Container too small for a DEX header - {} bytes, need {:#x}",
                data.len(),
                Self::SIZE
            ));
        }

        let mut magic = [0_u8; 8];
        magic.copy_from_slice(&data[0..8]);

        let mut signature = [0_u8; 20];
        signature.copy_from_slice(&data[12..32]);

        let mut offset = 8;
        let checksum = read_le_at::<u32>(data, &mut offset)?;

        let mut offset = 32;
        Ok(Header {
            magic,
            checksum,
            signature,
            file_size: read_le_at::<u32>(data, &mut offset)?,
            header_size: read_le_at::<u32>(data, &mut offset)?,
            endian_tag: read_le_at::<u32>(data, &mut offset)?,
            link_size: read_le_at::<u32>(data, &mut offset)?,
            link_off: read_le_at::<u32>(data, &mut offset)?,
            map_off: read_le_at::<u32>(data, &mut offset)?,
            string_ids_size: read_le_at::<u32>(data, &mut offset)?,
            string_ids_off: read_le_at::<u32>(data, &mut offset)?,
            type_ids_size: read_le_at::<u32>(data, &mut offset)?,
            type_ids_off: read_le_at::<u32>(data, &mut offset)?,
            proto_ids_size: read_le_at::<u32>(data, &mut offset)?,
            proto_ids_off: read_le_at::<u32>(data, &mut offset)?,
            field_ids_size: read_le_at::<u32>(data, &mut offset)?,
            field_ids_off: read_le_at::<u32>(data, &mut offset)?,
            method_ids_size: read_le_at::<u32>(data, &mut offset)?,
            method_ids_off: read_le_at::<u32>(data, &mut offset)?,
            class_defs_size: read_le_at::<u32>(data, &mut offset)?,
            class_defs_off: read_le_at::<u32>(data, &mut offset)?,
            data_size: read_le_at::<u32>(data, &mut offset)?,
            data_off: read_le_at::<u32>(data, &mut offset)?,
        })
    }

    /// The raw 8-byte magic, version digits included.
    #[must_use]
    pub fn magic(&self) -> &[u8; 8] {
        &self.magic
    }

    /// The raw 20-byte SHA-1 signature field.
    #[must_use]
    pub fn signature(&self) -> &[u8; 20] {
        &self.signature
    }

    /// The container version parsed from the magic's ASCII digits.
    ///
    /// An unparsable version yields 0, which no verification tier accepts.
    #[must_use]
    pub fn version(&self) -> u32 {
        let digits = &self.magic[4..7];
        std::str::from_utf8(digits)
            .ok()
            .and_then(|text| text.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header() -> Vec<u8> {
        let mut data = vec![0_u8; Header::SIZE];
        data[0..8].copy_from_slice(b"dex\n035\0");
        data[8..12].copy_from_slice(&0xDEAD_BEEF_u32.to_le_bytes());
        data[12..32].fill(0xAA);
        data[32..36].copy_from_slice(&0x70_u32.to_le_bytes()); // file_size
        data[36..40].copy_from_slice(&0x70_u32.to_le_bytes()); // header_size
        data[40..44].copy_from_slice(&crate::dex::DEX_ENDIAN_CONSTANT.to_le_bytes());
        data[0x38..0x3C].copy_from_slice(&7_u32.to_le_bytes()); // string_ids_size
        data[0x3C..0x40].copy_from_slice(&0x70_u32.to_le_bytes()); // string_ids_off
        data
    }

    #[test]
    fn parse_fields() {
        let header = Header::parse(&raw_header()).unwrap();

        assert_eq!(header.magic(), b"dex\n035\0");
        assert_eq!(header.version(), 35);
        assert_eq!(header.checksum, 0xDEAD_BEEF);
        assert_eq!(header.signature(), &[0xAA; 20]);
        assert_eq!(header.file_size, 0x70);
        assert_eq!(header.header_size, 0x70);
        assert_eq!(header.endian_tag, crate::dex::DEX_ENDIAN_CONSTANT);
        assert_eq!(header.string_ids_size, 7);
        assert_eq!(header.string_ids_off, 0x70);
        assert_eq!(header.map_off, 0);
    }

    #[test]
    fn parse_too_small() {
        assert!(matches!(
            Header::parse(&[0x64, 0x65, 0x78]),
            Err(crate::Error::Malformed { .. })
        ));
        assert!(Header::parse(&[0; Header::SIZE - 1]).is_err());
    }

    #[test]
    fn version_digits() {
        let mut data = raw_header();
        data[4..8].copy_from_slice(b"041\0");
        assert_eq!(Header::parse(&data).unwrap().version(), 41);

        data[4..8].copy_from_slice(b"xyz\0");
        assert_eq!(Header::parse(&data).unwrap().version(), 0);
    }
}
