//! Shared in-memory container fixture for the integration tests.
//!
//! [`build_classes_dex`] assembles a small but complete v035 container holding one
//! class, `LFoo;`, with a single constructor whose body is an `invoke-direct`
//! followed by `return-void`. All offsets are computed while assembling, and the
//! header checksum is patched last, so tests can corrupt individual bytes and
//! re-patch with [`patch_checksum`].

use adler32::RollingAdler32;

/// Header byte offsets the tests poke at.
pub const CHECKSUM_OFFSET: usize = 8;
/// Offset of the declared file size within the header.
pub const FILE_SIZE_OFFSET: usize = 32;
/// Offset of the endian tag within the header.
pub const ENDIAN_TAG_OFFSET: usize = 40;
/// Offset of the string-ids section offset within the header.
pub const STRING_IDS_OFF_OFFSET: usize = 60;

/// String table of the fixture, in code-point order as the format requires.
pub const FIXTURE_STRINGS: [&str; 6] = ["<init>", "D", "F", "I", "LFoo;", "V"];

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_uleb128(buf: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Recomputes the adler32 checksum over everything after the first 12 bytes and
/// writes it into the header.
pub fn patch_checksum(dex: &mut [u8]) {
    let checksum = RollingAdler32::from_buffer(&dex[12..]).hash();
    dex[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 4].copy_from_slice(&checksum.to_le_bytes());
}

/// Builds the canonical fixture container. Passes `VerificationPreset::Full`.
pub fn build_classes_dex() -> Vec<u8> {
    const HEADER_SIZE: usize = 0x70;

    let string_ids_off = HEADER_SIZE;
    let type_ids_off = string_ids_off + FIXTURE_STRINGS.len() * 4;
    let proto_ids_off = type_ids_off + 3 * 4;
    let method_ids_off = proto_ids_off + 12;
    let class_defs_off = method_ids_off + 8;
    let data_off = class_defs_off + 32;

    // The data section is assembled first so the index tables can point into it.
    let mut data = Vec::new();
    let mut string_offs = Vec::new();
    for s in FIXTURE_STRINGS {
        string_offs.push((data_off + data.len()) as u32);
        push_uleb128(&mut data, s.chars().count() as u32);
        data.extend_from_slice(s.as_bytes());
        data.push(0);
    }

    while (data_off + data.len()) % 4 != 0 {
        data.push(0);
    }
    let code_off = (data_off + data.len()) as u32;
    push_u16(&mut data, 1); // registers_size
    push_u16(&mut data, 1); // ins_size
    push_u16(&mut data, 1); // outs_size
    push_u16(&mut data, 0); // tries_size
    push_u32(&mut data, 0); // debug_info_off
    push_u32(&mut data, 4); // insns_size
    // invoke-direct {v0}, meth@0; return-void
    data.extend_from_slice(&[0x70, 0x10, 0x00, 0x00, 0x00, 0x00, 0x0E, 0x00]);

    let class_data_off = (data_off + data.len()) as u32;
    push_uleb128(&mut data, 0); // static fields
    push_uleb128(&mut data, 0); // instance fields
    push_uleb128(&mut data, 1); // direct methods
    push_uleb128(&mut data, 0); // virtual methods
    push_uleb128(&mut data, 0); // method_idx delta -> meth@0
    push_uleb128(&mut data, 0x1_0001); // ACC_PUBLIC | ACC_CONSTRUCTOR
    push_uleb128(&mut data, code_off);

    while (data_off + data.len()) % 4 != 0 {
        data.push(0);
    }
    let map_off = (data_off + data.len()) as u32;
    push_u32(&mut data, 1); // one map entry
    push_u16(&mut data, 0x0000); // TYPE_HEADER_ITEM
    push_u16(&mut data, 0);
    push_u32(&mut data, 1);
    push_u32(&mut data, 0);

    let file_size = (data_off + data.len()) as u32;

    let mut dex = Vec::with_capacity(file_size as usize);
    dex.extend_from_slice(b"dex\n035\0");
    push_u32(&mut dex, 0); // checksum, patched below
    dex.extend_from_slice(&[0u8; 20]); // signature, not verified
    push_u32(&mut dex, file_size);
    push_u32(&mut dex, HEADER_SIZE as u32);
    push_u32(&mut dex, 0x1234_5678); // endian tag
    push_u32(&mut dex, 0); // link_size
    push_u32(&mut dex, 0); // link_off
    push_u32(&mut dex, map_off);
    push_u32(&mut dex, FIXTURE_STRINGS.len() as u32);
    push_u32(&mut dex, string_ids_off as u32);
    push_u32(&mut dex, 3); // type_ids
    push_u32(&mut dex, type_ids_off as u32);
    push_u32(&mut dex, 1); // proto_ids
    push_u32(&mut dex, proto_ids_off as u32);
    push_u32(&mut dex, 0); // no field_ids
    push_u32(&mut dex, 0);
    push_u32(&mut dex, 1); // method_ids
    push_u32(&mut dex, method_ids_off as u32);
    push_u32(&mut dex, 1); // class_defs
    push_u32(&mut dex, class_defs_off as u32);
    push_u32(&mut dex, file_size - data_off as u32);
    push_u32(&mut dex, data_off as u32);

    for off in string_offs {
        push_u32(&mut dex, off);
    }
    // type_ids: I, LFoo;, V
    for descriptor_idx in [3_u32, 4, 5] {
        push_u32(&mut dex, descriptor_idx);
    }
    // proto_ids: ()V with shorty "V"
    push_u32(&mut dex, 5); // shorty_idx -> "V"
    push_u16(&mut dex, 2); // return_type_idx -> V
    push_u16(&mut dex, 0);
    push_u32(&mut dex, 0); // parameters_off
    // method_ids: LFoo;.<init>()V
    push_u16(&mut dex, 1); // class_idx -> LFoo;
    push_u16(&mut dex, 0); // proto_idx
    push_u32(&mut dex, 0); // name_idx -> "<init>"
    // class_defs: public class Foo
    push_u16(&mut dex, 1); // class_idx -> LFoo;
    push_u16(&mut dex, 0);
    push_u32(&mut dex, 0x0001); // ACC_PUBLIC
    push_u32(&mut dex, 0xFFFF_FFFF); // no superclass
    push_u32(&mut dex, 0); // interfaces_off
    push_u32(&mut dex, 0xFFFF_FFFF); // no source file
    push_u32(&mut dex, 0); // annotations_off
    push_u32(&mut dex, class_data_off);
    push_u32(&mut dex, 0); // static_values_off

    assert_eq!(dex.len(), data_off);
    dex.extend_from_slice(&data);
    assert_eq!(dex.len(), file_size as usize);

    patch_checksum(&mut dex);
    dex
}
