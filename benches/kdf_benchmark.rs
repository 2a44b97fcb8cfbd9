//! Benchmark: key stretching vs. per-record cipher cost.
//!
//! PBKDF2 at 100k iterations is deliberately slow (tens of milliseconds);
//! the AES-GCM record transform is microseconds. This benchmark puts
//! numbers on both so callers can weigh password-based operations, which
//! pay the stretch on every call, against system-key operations, which
//! resolve the key once.
//!
//! Run with: `cargo bench --bench kdf_benchmark`

use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};
use credvault::{decrypt, derive_key, encrypt, KeyMaterial, StoredCredential, KEY_LEN, SALT_LEN};

fn bench_key_stretching(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_stretching");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10); // each iteration is tens of milliseconds

    let salt = [7u8; SALT_LEN];
    group.bench_function("pbkdf2_sha512_100k", |b| {
        b.iter(|| derive_key(black_box("a modest secret"), black_box(&salt)));
    });

    group.finish();
}

fn bench_record_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_cipher");

    let key = KeyMaterial::from_bytes([9u8; KEY_LEN]);
    let payload = "x".repeat(1024);

    group.bench_function("encrypt_1kb", |b| {
        b.iter(|| encrypt(black_box(Some(payload.as_str())), black_box(&key)).unwrap());
    });

    let stored = StoredCredential::Record(encrypt(Some(payload.as_str()), &key).unwrap());
    group.bench_function("decrypt_1kb", |b| {
        b.iter(|| decrypt(black_box(Some(&stored)), black_box(&key)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_key_stretching, bench_record_cipher);
criterion_main!(benches);
