use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_cmac::{Aes128Key, Cmac, TagLength};
use aes_core::{encrypt_block, expand_key};

fn bench_block(c: &mut Criterion) {
    let key = Aes128Key::from([0u8; 16]);
    let round_keys = expand_key(&key);
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);

    let mut group = c.benchmark_group("aes");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&key));
    });
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        b.iter(|| encrypt_block(&block, &round_keys));
    });
    group.finish();
}

fn bench_cmac(c: &mut Criterion) {
    let cmac = Cmac::new(&Aes128Key::from([1u8; 16]));
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);

    let mut group = c.benchmark_group("cmac");
    for size in [0usize, 16, 64, 1024, 16 * 1024] {
        let mut message = vec![0u8; size];
        rng.fill_bytes(&mut message);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, msg| {
            b.iter(|| cmac.compute(msg, TagLength::FULL));
        });
    }
    group.bench_function("new", |b| {
        b.iter(|| Cmac::new(&Aes128Key::from([2u8; 16])));
    });
    group.finish();
}

criterion_group!(benches, bench_block, bench_cmac);
criterion_main!(benches);
