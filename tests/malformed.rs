//! Damage-tolerance tests: every kind of corruption must surface as a typed error
//! under the preset that checks for it, and stay out of the way under the presets
//! that do not.

mod common;

use common::{
    build_classes_dex, patch_checksum, ENDIAN_TAG_OFFSET, FILE_SIZE_OFFSET,
    STRING_IDS_OFF_OFFSET,
};
use dexscope::prelude::*;

#[test]
fn empty_input() {
    assert!(matches!(File::from_mem(Vec::new()), Err(Error::Empty)));
}

#[test]
fn input_smaller_than_a_header() -> Result<()> {
    let file = File::from_mem(vec![0x64, 0x65, 0x78])?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Skip),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn bad_magic() -> Result<()> {
    let mut dex = build_classes_dex();
    dex[0] = b'x';
    patch_checksum(&mut dex);

    let file = File::from_mem(dex)?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn unknown_version() -> Result<()> {
    let mut dex = build_classes_dex();
    dex[4..8].copy_from_slice(b"099\0");
    patch_checksum(&mut dex);

    let file = File::from_mem(dex)?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));

    // the header still parses, so Skip tolerates it
    let file = File::from_mem({
        let mut dex = build_classes_dex();
        dex[4..8].copy_from_slice(b"099\0");
        dex
    })?;
    let dex = DexFile::open(&file, VerificationPreset::Skip)?;
    assert!(!dex.is_version_valid());
    Ok(())
}

#[test]
fn checksum_mismatch_is_a_full_only_failure() -> Result<()> {
    // the signature field is covered by the checksum but by no structural check
    let mut dex = build_classes_dex();
    dex[12] ^= 0xFF;

    let file = File::from_mem(dex.clone())?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Full),
        Err(Error::ChecksumMismatch { .. })
    ));

    let file = File::from_mem(dex)?;
    assert!(DexFile::open(&file, VerificationPreset::Basic).is_ok());
    Ok(())
}

#[test]
fn bad_endian_tag() -> Result<()> {
    let mut dex = build_classes_dex();
    dex[ENDIAN_TAG_OFFSET..ENDIAN_TAG_OFFSET + 4]
        .copy_from_slice(&0x7856_3412_u32.to_le_bytes());
    patch_checksum(&mut dex);

    let file = File::from_mem(dex.clone())?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));

    // Skip still opens; the tables remain reachable
    let file = File::from_mem(dex)?;
    let parsed = DexFile::open(&file, VerificationPreset::Skip)?;
    assert_eq!(parsed.get_type_desc_at(0)?, "I");
    Ok(())
}

#[test]
fn declared_file_size_exceeding_container() -> Result<()> {
    let mut dex = build_classes_dex();
    let bloated = (dex.len() as u32 + 64).to_le_bytes();
    dex[FILE_SIZE_OFFSET..FILE_SIZE_OFFSET + 4].copy_from_slice(&bloated);
    patch_checksum(&mut dex);

    let file = File::from_mem(dex)?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn truncated_container() -> Result<()> {
    let mut dex = build_classes_dex();
    dex.truncate(0x80); // keeps the header, loses every table

    let file = File::from_mem(dex)?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn section_running_past_the_file_size() -> Result<()> {
    let mut dex = build_classes_dex();
    let bad_off = (dex.len() as u32 - 4).to_le_bytes();
    dex[STRING_IDS_OFF_OFFSET..STRING_IDS_OFF_OFFSET + 4].copy_from_slice(&bad_off);
    patch_checksum(&mut dex);

    let file = File::from_mem(dex)?;
    assert!(matches!(
        DexFile::open(&file, VerificationPreset::Basic),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn lazy_accessors_fail_without_eager_checks() -> Result<()> {
    // point the string-ids table past the end and open with Skip; the failure
    // moves from open time to access time
    let mut dex = build_classes_dex();
    let bad_off = (dex.len() as u32 + 0x1000).to_le_bytes();
    dex[STRING_IDS_OFF_OFFSET..STRING_IDS_OFF_OFFSET + 4].copy_from_slice(&bad_off);

    let file = File::from_mem(dex)?;
    let parsed = DexFile::open(&file, VerificationPreset::Skip)?;

    assert!(parsed.get_string_id(0).is_err());
    assert!(parsed.get_string_id_opt(0).is_none());
    // tables the corruption does not touch keep working
    assert_eq!(parsed.num_class_defs(), 1);
    assert!(parsed.get_class_def(0).is_ok());
    Ok(())
}

#[test]
fn damaged_string_payload() -> Result<()> {
    let mut dex = build_classes_dex();

    // locate the payload of string 0 ("<init>") through the container itself and
    // plant an invalid lead byte
    let file = File::from_mem(dex.clone())?;
    let parsed = DexFile::open(&file, VerificationPreset::Basic)?;
    let data_off = parsed.get_string_id(0)?.string_data_off as usize;
    drop(parsed);
    drop(file);
    dex[data_off + 1] = 0xF0; // first payload byte, after the uleb128 length

    let file = File::from_mem(dex)?;
    let parsed = DexFile::open(&file, VerificationPreset::Basic)?;

    assert!(matches!(
        parsed.get_utf16_at(0),
        Err(Error::Mutf8Malformed { .. })
    ));
    // the lossy accessor substitutes and keeps the rest
    let lossy = parsed.get_utf16_lossy_at(0)?;
    assert!(lossy.contains('\u{FFFD}'));
    assert!(lossy.ends_with("init>"));
    Ok(())
}

#[test]
fn zero_code_offset_is_rejected() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let parsed = DexFile::open(&file, VerificationPreset::Basic)?;

    assert!(matches!(
        parsed.get_code_item_accessor(0),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn code_item_past_the_container() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let parsed = DexFile::open(&file, VerificationPreset::Basic)?;

    assert!(matches!(
        parsed.get_code_item_accessor(0x10_0000),
        Err(Error::Truncated { .. })
    ));
    Ok(())
}
