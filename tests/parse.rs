//! End-to-end parsing tests against the in-memory fixture container.
//!
//! The fixture holds one class `LFoo;` with a single constructor; see
//! `common/mod.rs` for its exact layout.

mod common;

use common::{build_classes_dex, FIXTURE_STRINGS};
use dexscope::prelude::*;

fn open_fixture(file: &File) -> DexFile<'_> {
    DexFile::open(file, VerificationPreset::Full).expect("fixture should verify cleanly")
}

#[test]
fn header_fields() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    let header = dex.header();
    assert_eq!(header.version(), 35);
    assert_eq!(header.file_size as usize, dex.file_size());
    assert_eq!(header.header_size, 0x70);

    assert_eq!(dex.num_string_ids(), 6);
    assert_eq!(dex.num_type_ids(), 3);
    assert_eq!(dex.num_proto_ids(), 1);
    assert_eq!(dex.num_field_ids(), 0);
    assert_eq!(dex.num_method_ids(), 1);
    assert_eq!(dex.num_class_defs(), 1);
    Ok(())
}

#[test]
fn string_resolution() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    for (idx, expected) in FIXTURE_STRINGS.iter().enumerate() {
        assert_eq!(dex.get_utf16_at(idx as u32)?, *expected);
        assert_eq!(dex.get_utf16_lossy_at(idx as u32)?, *expected);
    }

    let (utf16_len, payload) = dex.get_string_data(&dex.get_string_id(0)?)?;
    assert_eq!(utf16_len, 6);
    assert_eq!(payload, b"<init>\0");
    Ok(())
}

#[test]
fn type_and_proto_resolution() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    assert_eq!(dex.get_type_id(0)?.descriptor_idx, 3);
    assert_eq!(dex.get_type_desc_at(0)?, "I");
    assert_eq!(dex.get_type_desc_at(1)?, "LFoo;");
    assert_eq!(dex.get_type_desc_at(2)?, "V");

    let proto = dex.get_proto_id(0)?;
    assert_eq!(dex.get_shorty(&proto)?, "V");
    assert_eq!(proto.return_type_idx, 2);
    assert_eq!(dex.get_parameters_list(&proto)?, None);
    Ok(())
}

#[test]
fn method_resolution() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    let method = dex.get_method_id(0)?;
    assert_eq!(method.class_idx, 1);
    assert_eq!(method.proto_idx, 0);
    assert_eq!(dex.get_utf16_at(method.name_idx)?, "<init>");
    Ok(())
}

#[test]
fn strict_and_tolerant_lookups_disagree_past_the_end() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    assert!(matches!(
        dex.get_type_id(500),
        Err(Error::IndexOutOfBounds { index: 500, len: 3, .. })
    ));
    assert!(dex.get_type_id_opt(500).is_none());
    assert!(dex.get_type_id_opt(2).is_some());

    assert!(dex.get_string_id_opt(6).is_none());
    assert!(dex.get_method_id_opt(1).is_none());
    assert!(dex.get_field_id_opt(0).is_none()); // the fixture declares no fields
    Ok(())
}

#[test]
fn class_definition() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    let class_def = dex.get_class_def(0)?;
    assert_eq!(dex.get_class_desc(&class_def)?, "LFoo;");
    assert_eq!(class_def.superclass(), None);
    assert_eq!(class_def.source_file(), None);
    assert!(class_def.access_flags().contains(AccessFlags::PUBLIC));
    assert_eq!(dex.get_interfaces_list(&class_def)?, None);
    Ok(())
}

#[test]
fn class_members() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    let class_def = dex.get_class_def(0)?;
    let accessor = dex
        .get_class_accessor(&class_def)?
        .expect("fixture class has class data");

    assert_eq!(accessor.num_fields(), 0);
    assert_eq!(accessor.num_direct_methods(), 1);
    assert_eq!(accessor.num_virtual_methods(), 0);

    let methods = accessor.get_methods().collect::<Result<Vec<_>>>()?;
    assert_eq!(methods.len(), 1);
    let init = &methods[0];
    assert_eq!(init.method_idx, 0);
    assert!(init.is_direct);
    assert!(AccessFlags::from_bits_retain(init.access_flags).contains(AccessFlags::CONSTRUCTOR));
    assert!(init.has_code());
    assert_eq!(init.kind(class_def.access_flags()), MethodKind::Direct);

    // iteration is restartable, each call walks from the first entry
    let again = accessor.get_methods().collect::<Result<Vec<_>>>()?;
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].method_idx, 0);
    Ok(())
}

#[test]
fn method_body_walk() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    let class_def = dex.get_class_def(0)?;
    let accessor = dex.get_class_accessor(&class_def)?.unwrap();
    let init = accessor.get_methods().next().unwrap()?;

    let code = dex.get_code_item_accessor(init.code_off)?;
    assert_eq!(code.registers_size(), 1);
    assert_eq!(code.ins_size(), 1);
    assert_eq!(code.insns_size_in_code_units(), 4);
    assert!(code.tries()?.is_empty());

    let insns = code.insns().collect::<Result<Vec<_>>>()?;
    assert_eq!(insns.len(), 2);
    assert_eq!(insns[0].opcode(), Opcode::InvokeDirect);
    assert_eq!(insns[0].index()?, 0);
    assert_eq!(insns[1].opcode(), Opcode::ReturnVoid);

    // direct decode at the code unit past the 3-unit invoke
    assert_eq!(code.inst_at(3)?.opcode(), Opcode::ReturnVoid);
    Ok(())
}

#[test]
fn map_located_sections_are_empty() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    assert_eq!(dex.num_call_site_ids(), 0);
    assert_eq!(dex.num_method_handles(), 0);
    assert!(dex.get_call_site_id_opt(0).is_none());
    assert!(dex.get_method_handle_opt(0).is_none());
    Ok(())
}

#[test]
fn checksum_matches_header() -> Result<()> {
    let file = File::from_mem(build_classes_dex())?;
    let dex = open_fixture(&file);

    assert_eq!(dex.compute_checksum(), dex.header().checksum);
    assert!(dex.is_magic_valid());
    assert!(dex.is_version_valid());
    Ok(())
}
