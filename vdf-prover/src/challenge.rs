#![forbid(unsafe_code)]

//! Fiat–Shamir challenge for one halving step.
//!
//! `r = H(bytes(x) || bytes(y) || bytes(v))[..16]` read as a big-endian
//! integer, where `bytes` is the minimal big-endian encoding (zero is the
//! empty string) and nothing separates or prefixes the three encodings.
//! Any verifier must reproduce this byte for byte.

use num_bigint::BigUint;
use sha3::{Digest, Keccak256, Sha3_256};
use vdf_core::HashAlgorithm;

use crate::group::minimal_be_bytes;

/// Challenge width in bytes (128-bit challenge).
pub const CHALLENGE_BYTES: usize = 16;

/// Derive the 128-bit challenge for the claim `(x, y, v)`.
#[must_use]
pub fn derive_challenge(hash: HashAlgorithm, x: &BigUint, y: &BigUint, v: &BigUint) -> BigUint {
    let elements = [x, y, v];
    match hash {
        HashAlgorithm::Sha3_256 => truncated_digest::<Sha3_256>(&elements),
        HashAlgorithm::Keccak256 => truncated_digest::<Keccak256>(&elements),
    }
}

fn truncated_digest<D: Digest>(elements: &[&BigUint]) -> BigUint {
    let mut hasher = D::new();
    for e in elements {
        hasher.update(minimal_be_bytes(e));
    }
    let digest = hasher.finalize();
    BigUint::from_bytes_be(&digest[..CHALLENGE_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{Num, Zero};

    #[test]
    fn empty_transcript_vectors() {
        let z = BigUint::zero();
        // SHA3-256("") = a7ffc6f8bf1ed76651c14756a061d662...
        assert_eq!(
            derive_challenge(HashAlgorithm::Sha3_256, &z, &z, &z),
            BigUint::from_str_radix("a7ffc6f8bf1ed76651c14756a061d662", 16).unwrap()
        );
        // Keccak-256("") = c5d2460186f7233c927e7db2dcc703c0...
        assert_eq!(
            derive_challenge(HashAlgorithm::Keccak256, &z, &z, &z),
            BigUint::from_str_radix("c5d2460186f7233c927e7db2dcc703c0", 16).unwrap()
        );
    }

    #[test]
    fn toy_claim_vector() {
        let r = derive_challenge(
            HashAlgorithm::Sha3_256,
            &BigUint::from(5u8),
            &BigUint::from(1u8),
            &BigUint::from(183u8),
        );
        assert_eq!(r, BigUint::from_str_radix("91424fac8170cf49e1647deab052aa02", 16).unwrap());
        assert!(r.bits() <= 128);
    }

    #[test]
    fn concatenation_has_no_separators() {
        // (0x01, 0x0203, 0) and (0x0102, 0x03, 0) hash the same byte string.
        let a = derive_challenge(HashAlgorithm::Sha3_256, &BigUint::from(1u8), &BigUint::from(0x0203u16), &BigUint::zero());
        let b = derive_challenge(HashAlgorithm::Sha3_256, &BigUint::from(0x0102u16), &BigUint::from(3u8), &BigUint::zero());
        assert_eq!(a, b);
    }
}
