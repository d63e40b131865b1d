//! Benchmarks for container parsing and instruction decoding.
//!
//! Measures the hot paths: opening a container under each verification preset,
//! resolving strings, walking class members and decoding instruction streams.

extern crate dexscope;

#[path = "../tests/common/mod.rs"]
mod common;

use criterion::{criterion_group, criterion_main, Criterion};
use dexscope::prelude::*;
use std::hint::black_box;

/// Benchmark opening the fixture under each preset.
fn bench_open(c: &mut Criterion) {
    let bytes = common::build_classes_dex();
    let file = File::from_mem(bytes).unwrap();

    c.bench_function("open_skip", |b| {
        b.iter(|| {
            let dex = DexFile::open(black_box(&file), VerificationPreset::Skip).unwrap();
            black_box(dex)
        });
    });

    c.bench_function("open_basic", |b| {
        b.iter(|| {
            let dex = DexFile::open(black_box(&file), VerificationPreset::Basic).unwrap();
            black_box(dex)
        });
    });

    c.bench_function("open_full", |b| {
        b.iter(|| {
            let dex = DexFile::open(black_box(&file), VerificationPreset::Full).unwrap();
            black_box(dex)
        });
    });
}

/// Benchmark resolving every string of the container.
fn bench_strings(c: &mut Criterion) {
    let bytes = common::build_classes_dex();
    let file = File::from_mem(bytes).unwrap();
    let dex = DexFile::open(&file, VerificationPreset::Basic).unwrap();

    c.bench_function("resolve_strings", |b| {
        b.iter(|| {
            for idx in 0..dex.num_string_ids() {
                black_box(dex.get_utf16_at(black_box(idx)).unwrap());
            }
        });
    });
}

/// Benchmark walking class members down to decoded instructions.
fn bench_method_walk(c: &mut Criterion) {
    let bytes = common::build_classes_dex();
    let file = File::from_mem(bytes).unwrap();
    let dex = DexFile::open(&file, VerificationPreset::Basic).unwrap();

    c.bench_function("walk_methods_and_insns", |b| {
        b.iter(|| {
            let class_def = dex.get_class_def(0).unwrap();
            let accessor = dex.get_class_accessor(&class_def).unwrap().unwrap();
            for method in accessor.get_methods() {
                let method = method.unwrap();
                if !method.has_code() {
                    continue;
                }
                let code = dex.get_code_item_accessor(method.code_off).unwrap();
                for inst in code.insns() {
                    black_box(inst.unwrap().opcode());
                }
            }
        });
    });
}

/// Benchmark raw instruction decoding on a synthetic stream.
fn bench_decode_stream(c: &mut Criterion) {
    // 256 copies of: const/4 v0 #1; add-int v0, v0, v0; return-void is appended once
    let mut insns = Vec::new();
    for _ in 0..256 {
        insns.extend_from_slice(&[0x12, 0x10, 0x90, 0x00, 0x00, 0x00]);
    }
    insns.extend_from_slice(&[0x0E, 0x00]);

    c.bench_function("decode_stream_513", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for inst in InstructionIterator::new(black_box(&insns)) {
                black_box(inst.unwrap());
                count += 1;
            }
            black_box(count)
        });
    });
}

criterion_group!(
    benches,
    bench_open,
    bench_strings,
    bench_method_walk,
    bench_decode_stream
);
criterion_main!(benches);
