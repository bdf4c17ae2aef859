use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{encrypt_block, expand_key, AesEngine, CipherMode, Key};
use aes_stream::{decrypt_to_vec, encrypt_to_vec};

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut group = c.benchmark_group("block");
    for mode in [
        CipherMode::AES_128_ECB,
        CipherMode::AES_192_ECB,
        CipherMode::AES_256_ECB,
    ] {
        let mut key_bytes = vec![0u8; mode.key_len()];
        rng.fill_bytes(&mut key_bytes);
        let round_keys = expand_key(&Key::new(mode, &key_bytes).unwrap());
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        group.bench_function(format!("encrypt_block/{mode}"), |b| {
            b.iter(|| encrypt_block(&block, &round_keys));
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut data = vec![0u8; 64 * 1024];
    rng.fill_bytes(&mut data);
    let key = [7u8; 32];

    let mut group = c.benchmark_group("stream");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encrypt/aes-256-cbc", |b| {
        b.iter(|| {
            let mut engine = AesEngine::new(CipherMode::AES_256_CBC, &key).unwrap();
            encrypt_to_vec(&mut engine, &data).unwrap()
        });
    });

    let mut engine = AesEngine::new(CipherMode::AES_256_CBC, &key).unwrap();
    let ciphertext = encrypt_to_vec(&mut engine, &data).unwrap();
    group.bench_function("decrypt/aes-256-cbc", |b| {
        b.iter(|| {
            let mut engine = AesEngine::new(CipherMode::AES_256_CBC, &key).unwrap();
            decrypt_to_vec(&mut engine, &ciphertext).unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_block, bench_stream);
criterion_main!(benches);
