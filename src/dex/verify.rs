//! Eager structural verification of a container.
//!
//! How much checking happens at open time is an explicit, per-open decision carried by
//! [`VerificationPreset`]. The tiers are strictly ordered: `Skip` runs nothing beyond
//! the header physically fitting, `Basic` validates everything structural the header
//! declares, and `Full` adds the adler32 checksum over the container payload.
//!
//! Lazy validity - per-string encoding, per-instruction well-formedness - is a property
//! of the strict accessors and applies under every preset; the tolerant `_opt` and
//! `_lossy` accessors stay tolerant under every preset as well.

use adler32::RollingAdler32;

use crate::{
    dex::{
        ClassDef, DexFile, FieldId, Header, MethodId, ProtoId, StringId, TypeId, DEX_MAGIC,
        DEX_MAGIC_VERSIONS, DEX_ENDIAN_CONSTANT,
    },
    Result,
};

/// How much eager checking [`crate::dex::DexFile::open`] performs.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
///
/// // trusted input from the build pipeline: skip the checksum
/// let dex = DexFile::open(&file, VerificationPreset::Basic)?;
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationPreset {
    /// No eager checks. The header must still physically fit the container, since its
    /// table bounds drive every accessor.
    Skip,
    /// Magic and version, header size against the version, declared file size against
    /// the container, endian tag, and offset+size bounds for every declared section.
    #[default]
    Basic,
    /// Everything `Basic` checks, plus the adler32 checksum over all bytes after the
    /// first 12.
    Full,
}

impl DexFile<'_> {
    /// Whether the first four magic bytes are `dex\n`.
    #[must_use]
    pub fn is_magic_valid(&self) -> bool {
        &self.header().magic()[..4] == DEX_MAGIC
    }

    /// Whether the version digits name a released format version.
    #[must_use]
    pub fn is_version_valid(&self) -> bool {
        DEX_MAGIC_VERSIONS.contains(&&self.header().magic()[4..])
    }

    /// Computes the adler32 checksum over everything after the magic and checksum
    /// fields, the way `dexdump`/ART define it.
    #[must_use]
    pub fn compute_checksum(&self) -> u32 {
        RollingAdler32::from_buffer(&self.file().data()[12..]).hash()
    }

    /// Runs the eager checks the open-time preset selects.
    pub(crate) fn verify(&self) -> Result<()> {
        match self.preset() {
            VerificationPreset::Skip => Ok(()),
            VerificationPreset::Basic => self.check_structure(false),
            VerificationPreset::Full => self.check_structure(true),
        }
    }

    fn check_structure(&self, with_checksum: bool) -> Result<()> {
        let header = self.header();

        if !self.is_magic_valid() {
            return Err(malformed_error!(
                "Bad file magic {:02x?}",
                &header.magic()[..4]
            ));
        }
        if !self.is_version_valid() {
            return Err(malformed_error!("Unknown dex version {}", header.version()));
        }

        let expected_header_size = if header.version() >= 41 {
            Header::SIZE_V41
        } else {
            Header::SIZE
        };
        if header.header_size as usize != expected_header_size {
            return Err(malformed_error!(
                "Bad header size {:#x}, expected {:#x}",
                header.header_size,
                expected_header_size
            ));
        }

        let container_size = self.file_size();
        let file_size = header.file_size as usize;
        if file_size < expected_header_size {
            return Err(malformed_error!(
                "Declared file size {} cannot hold the header ({} bytes)",
                file_size,
                expected_header_size
            ));
        }
        if file_size > container_size {
            return Err(malformed_error!(
                "Declared file size {} exceeds the container ({} bytes)",
                file_size,
                container_size
            ));
        }

        if header.endian_tag != DEX_ENDIAN_CONSTANT {
            return Err(malformed_error!(
                "Unexpected endian tag {:#010x}",
                header.endian_tag
            ));
        }

        if with_checksum {
            let actual = self.compute_checksum();
            if actual != header.checksum {
                return Err(crate::Error::ChecksumMismatch {
                    actual,
                    expected: header.checksum,
                });
            }
        }

        self.check_section(header.link_off, header.link_size as usize, "link")?;
        self.check_section(header.map_off, 4, "map")?;
        self.check_section(
            header.string_ids_off,
            header.string_ids_size as usize * StringId::SIZE,
            "string-ids",
        )?;
        self.check_section(
            header.type_ids_off,
            header.type_ids_size as usize * TypeId::SIZE,
            "type-ids",
        )?;
        self.check_section(
            header.proto_ids_off,
            header.proto_ids_size as usize * ProtoId::SIZE,
            "proto-ids",
        )?;
        self.check_section(
            header.field_ids_off,
            header.field_ids_size as usize * FieldId::SIZE,
            "field-ids",
        )?;
        self.check_section(
            header.method_ids_off,
            header.method_ids_size as usize * MethodId::SIZE,
            "method-ids",
        )?;
        self.check_section(
            header.class_defs_off,
            header.class_defs_size as usize * ClassDef::SIZE,
            "class-defs",
        )?;
        self.check_section(header.data_off, header.data_size as usize, "data")?;

        Ok(())
    }

    /// Validates one `(offset, byte length)` section declaration.
    ///
    /// An empty section must declare offset 0; a non-empty one must start past the
    /// fixed header and end within the declared file size.
    fn check_section(&self, offset: u32, byte_len: usize, section: &'static str) -> Result<()> {
        if byte_len == 0 {
            if offset != 0 {
                return Err(malformed_error!(
                    "Offset {:#x} should be zero when the {} section is empty",
                    offset,
                    section
                ));
            }
            return Ok(());
        }

        let offset = offset as usize;
        if offset < Header::SIZE {
            return Err(malformed_error!(
                "Offset {:#x} of the {} section lies inside the header",
                offset,
                section
            ));
        }

        let file_size = self.header().file_size as usize;
        if offset > file_size || file_size - offset < byte_len {
            return Err(malformed_error!(
                "The {} section ({:#x} + {} bytes) runs past the file size {}",
                section,
                offset,
                byte_len,
                file_size
            ));
        }

        Ok(())
    }
}
