use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pcks::context::SchemeContext;
use pcks::math::Poly;
use pcks::params::SchemeParams;
use pcks::pcks::PcksProtocol;
use pcks::rlwe::{Ciphertext, PublicKey, SecretKey};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const SMUDGING_SIGMA: f64 = (1u64 << 20) as f64;

fn pcks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pcks");

    for ring_dim in [1024, 2048, 4096] {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(ring_dim));

        let sk = SecretKey::generate(&ctx, &mut rng);
        let pk = PublicKey::generate(&ctx, &sk, &mut rng);
        let sk_out = SecretKey::generate(&ctx, &mut rng);
        let pk_out = PublicKey::generate(&ctx, &sk_out, &mut rng);
        let message = Poly::constant(1, ring_dim, ctx.params().p);
        let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);

        let mut pcks = PcksProtocol::new(ctx.clone(), SMUDGING_SIGMA);
        let mut share = pcks.allocate_share();
        pcks.generate_share(&sk, &pk_out, &ct, &mut share, &mut rng);

        group.bench_with_input(
            BenchmarkId::new("generate_share", ring_dim),
            &ring_dim,
            |b, _| {
                b.iter(|| pcks.generate_share(&sk, &pk_out, &ct, &mut share, &mut rng));
            },
        );

        let mut combined = pcks.allocate_share();
        group.bench_with_input(BenchmarkId::new("aggregate", ring_dim), &ring_dim, |b, _| {
            b.iter(|| pcks.aggregate_shares(&share, &share, &mut combined));
        });

        let mut ct_out = Ciphertext::zero(ctx.ring());
        group.bench_with_input(BenchmarkId::new("key_switch", ring_dim), &ring_dim, |b, _| {
            b.iter(|| pcks.key_switch(&combined, &ct, &mut ct_out));
        });
    }

    group.finish();
}

criterion_group!(benches, pcks_benchmark);
criterion_main!(benches);
