use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigUint;
use vdf_core::VdfConfig;
use vdf_prover::{evaluate, GroupParams, VdfProver};

fn squaring_chain_bench(c: &mut Criterion) {
    let cfg = VdfConfig::default();
    let n = cfg.modulus().unwrap();
    let x = cfg.base().unwrap();

    c.bench_function("squaring_chain_2048bit_t1024", |b| {
        b.iter(|| {
            let _ = evaluate(black_box(&x), 1024, &n).unwrap();
        })
    });
}

fn halving_proof_bench(c: &mut Criterion) {
    let cfg = VdfConfig::default();
    let params = GroupParams::new(cfg.modulus().unwrap(), 1024).unwrap();
    let prover = VdfProver::new(params);
    let x = cfg.base().unwrap();

    c.bench_function("halving_proof_2048bit_t1024", |b| {
        b.iter(|| {
            let _ = prover.prove(black_box(&x)).unwrap();
        })
    });

    let small = VdfProver::new(GroupParams::new(BigUint::from(1009u32 * 1013), 1 << 12).unwrap());
    c.bench_function("halving_proof_toy_t4096", |b| {
        b.iter(|| {
            let _ = small.prove(black_box(&BigUint::from(5u8))).unwrap();
        })
    });
}

criterion_group!(benches, squaring_chain_bench, halving_proof_bench);
criterion_main!(benches);
