use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dh_relay::math::{PrimeFactorizer, PrimitiveRootFinder, SafePrimeGenerator};
use dh_relay::security::{derive_session_key, CipherSession};
use num_bigint_dig::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_factorization(c: &mut Criterion) {
    let factorizer = PrimeFactorizer::new(20_000, 64);
    let smooth = BigUint::from(2u64 * 3 * 5 * 7 * 11 * 13 * 17 * 19 * 23 * 29 * 31 * 37);
    let semiprime = BigUint::from(10_007u64 * 10_009);
    c.bench_function("factor smooth", |b| {
        b.iter(|| factorizer.factor(black_box(&smooth)))
    });
    c.bench_function("factor truncated semiprime", |b| {
        b.iter(|| factorizer.factor(black_box(&semiprime)))
    });
}

fn bench_root_search(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let generator = SafePrimeGenerator::new(64, 100_000);
    let finder = PrimitiveRootFinder::new(PrimeFactorizer::new(20_000, 64), 3, 100_000_000);

    let mut group = c.benchmark_group("find_root");
    for bits in [64usize, 128, 256] {
        let Ok(prime) = generator.generate(bits, &mut rng) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(bits), &prime, |b, prime| {
            b.iter(|| finder.find_root(black_box(prime)))
        });
    }
    group.finish();
}

fn bench_safe_prime(c: &mut Criterion) {
    let generator = SafePrimeGenerator::new(64, 100_000);
    let mut group = c.benchmark_group("safe_prime");
    group.sample_size(10);
    for bits in [64usize, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            let mut rng = ChaCha20Rng::seed_from_u64(bits as u64);
            b.iter(|| generator.generate(bits, &mut rng))
        });
    }
    group.finish();
}

fn bench_ecb(c: &mut Criterion) {
    let session = CipherSession::from_key(derive_session_key(&BigUint::from(2u64)));
    let mut group = c.benchmark_group("ecb");
    for size in [16usize, 256, 4096] {
        let plaintext = vec![0x5au8; size];
        let ciphertext = session.encrypt(&plaintext);
        group.bench_with_input(BenchmarkId::new("encrypt", size), &plaintext, |b, p| {
            b.iter(|| session.encrypt(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &ciphertext, |b, ct| {
            b.iter(|| session.decrypt(black_box(ct)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_factorization,
    bench_root_search,
    bench_safe_prime,
    bench_ecb
);
criterion_main!(benches);
