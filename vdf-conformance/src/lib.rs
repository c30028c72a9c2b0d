#![forbid(unsafe_code)]

//! Shared fixtures for the conformance suite.
//!
//! Moduli here are tiny products of primes so that every property can be
//! checked against direct `modpow` in microseconds. They offer no security.

use num_bigint::BigUint;
use num_traits::One;
use vdf_prover::{Claim, GroupParams, VdfProver};

/// `13 * 17`, the modulus of the worked example.
pub const TOY_MODULUS: u32 = 221;

/// `1009 * 1013`.
pub const SMALL_MODULUS: u32 = 1_022_117;

/// Semiprimes used by property tests.
pub const MODULI: [u32; 4] = [TOY_MODULUS, SMALL_MODULUS, 97 * 89, 65_521 * 3];

#[must_use]
pub fn big(v: u32) -> BigUint {
    BigUint::from(v)
}

/// Independent reference `x^(2^t) mod n` via one big exponent.
#[must_use]
pub fn reference_pow2(x: &BigUint, t: u64, n: &BigUint) -> BigUint {
    x.modpow(&(BigUint::one() << t), n)
}

/// Honest top-level claim built without the crate's evaluator.
#[must_use]
pub fn honest_claim(n: u32, x: u32, t: u64) -> Claim {
    let (n, x) = (big(n), big(x));
    let t_half = t / 2 + t % 2;
    let y = reference_pow2(&x, t, &n);
    let v = reference_pow2(&x, t_half, &n);
    Claim::new(n, x, y, t, v)
}

/// Prover over one of the fixture moduli.
#[must_use]
pub fn prover(n: u32, t: u64) -> VdfProver {
    VdfProver::new(GroupParams::new(big(n), t).expect("fixture modulus > 1"))
}

/// `⌈log2 t⌉ + 1`: the bit length of `t - 1` plus the base case.
#[must_use]
pub fn expected_chain_len(t: u64) -> usize {
    if t <= 1 {
        1
    } else {
        (64 - (t - 1).leading_zeros()) as usize + 1
    }
}
