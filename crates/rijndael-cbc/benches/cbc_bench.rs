use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use rijndael_cbc::{PaddingScheme, Rijndael, RijndaelCbc};

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut group = c.benchmark_group("block");
    for block_size in [16usize, 24, 32] {
        let cipher = Rijndael::with_block_size(&[0u8; 32], block_size).expect("valid sizes");
        let mut block = vec![0u8; block_size];
        rng.fill_bytes(&mut block);
        group.throughput(Throughput::Bytes(block_size as u64));
        group.bench_with_input(
            BenchmarkId::new("encrypt_in_place", block_size),
            &block,
            |b, block| {
                b.iter(|| {
                    let mut data = block.clone();
                    cipher.encrypt_in_place(&mut data).expect("sized block");
                    data
                });
            },
        );
    }
    group.finish();
}

fn bench_cbc(c: &mut Criterion) {
    let cbc =
        RijndaelCbc::new(&[1u8; 32], &[2u8; 32], PaddingScheme::Pkcs7, 32).expect("valid config");
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    let mut plaintext = vec![0u8; 4096];
    rng.fill_bytes(&mut plaintext);
    let ciphertext = cbc.encrypt(&plaintext).expect("encrypt");

    let mut group = c.benchmark_group("cbc");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(plaintext.len() as u64));
    group.bench_function("encrypt_4k", |b| {
        b.iter(|| cbc.encrypt(&plaintext).expect("encrypt"));
    });
    group.bench_function("decrypt_4k", |b| {
        b.iter(|| cbc.decrypt(&ciphertext).expect("decrypt"));
    });
    group.finish();
}

criterion_group!(benches, bench_block, bench_cbc);
criterion_main!(benches);
