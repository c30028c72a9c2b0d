#![no_main]
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use vdf_core::HashAlgorithm;
use vdf_prover::{GroupParams, VdfProver};

fuzz_target!(|input: (u64, u32, bool)| {
    let (t, seed, keccak) = input;
    // Limit difficulty parameter
    let t = t % 256 + 1;
    // Simple RSA modulus n = p*q with small primes for fuzzing
    let n = BigUint::from(1009u32) * BigUint::from(1013u32);
    let x = BigUint::from(seed) % &n;
    let hash = if keccak { HashAlgorithm::Keccak256 } else { HashAlgorithm::Sha3_256 };

    let prover = VdfProver::new(GroupParams::new(n, t).unwrap()).with_hash(hash);
    let chain = prover.prove(&x).unwrap();
    assert!(chain.base_case().unwrap().is_base_case_valid());
});
