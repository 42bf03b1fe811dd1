//! Benchmarks for the BCH codec
//!
//! Run with: cargo bench --bench bch_bench

use bch_ecc::{Bch, BchConfig};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for t in [4u32, 8] {
        let bch = Bch::new(BchConfig::new(13, t, 512)).unwrap();
        let data = vec![0xA5u8; 512];
        let mut ecc = vec![0u8; bch.ecc_bytes()];

        group.throughput(Throughput::Bytes(512));
        group.bench_with_input(BenchmarkId::new("block_512", t), &t, |b, _| {
            b.iter(|| bch.encode(black_box(&data), &mut ecc).unwrap())
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for flips in [0usize, 4] {
        let mut bch = Bch::new(BchConfig::nand_step_512_t4()).unwrap();
        let data = vec![0xA5u8; 512];
        let mut ecc = vec![0u8; bch.ecc_bytes()];
        bch.encode(&data, &mut ecc).unwrap();

        let mut corrupted = data.clone();
        for i in 0..flips {
            corrupted[i * 100 + 3] ^= 1 << (i % 8);
        }

        group.throughput(Throughput::Bytes(512));
        group.bench_with_input(BenchmarkId::new("block_512_flips", flips), &flips, |b, _| {
            b.iter_batched(
                || corrupted.clone(),
                |mut block| {
                    black_box(bch.decode(&mut block, &ecc).unwrap());
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
