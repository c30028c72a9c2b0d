#![forbid(unsafe_code)]

//! Witness extraction from a recorded squaring chain.
//!
//! Since `chain[i] = x0^(2^i)`, any power `x0^e` is the product of the chain
//! entries at the set bits of `e`. A power-of-two exponent `2^k` is a single
//! lookup of `chain[k]`.

use num_bigint::BigUint;
use num_traits::One;
use vdf_core::{VdfError, VdfResult};

use crate::chain::SquaringChain;
use crate::group::ensure_modulus;

/// `chain[0]^exponent mod n`, reading only `chain[0..bitlen(exponent)]`.
///
/// Fails with [`VdfError::OutOfRange`] when the exponent's top bit lies past
/// the recorded chain, or when a sparse chain is missing a needed entry.
/// `n` must be the modulus the chain was built over.
pub fn witness_for(chain: &SquaringChain, exponent: &BigUint, n: &BigUint) -> VdfResult<BigUint> {
    ensure_modulus(n)?;
    if n != chain.modulus() {
        return Err(VdfError::InvalidParameter(format!(
            "modulus {n} does not match the chain modulus {}",
            chain.modulus()
        )));
    }

    let bits = exponent.bits();
    if bits > chain.len() {
        return Err(VdfError::OutOfRange { index: bits - 1, len: chain.len() });
    }

    let mut w = BigUint::one();
    for (word, digit) in exponent.iter_u64_digits().enumerate() {
        if digit == 0 {
            continue;
        }
        for bit in 0..64u64 {
            if (digit >> bit) & 1 == 1 {
                let index = word as u64 * 64 + bit;
                w = (w * chain.power(index)?) % n;
            }
        }
    }
    Ok(w % n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{evaluate, evaluate_with, Retention};
    use num_traits::Zero;

    fn toy_chain() -> (BigUint, SquaringChain) {
        let n = BigUint::from(221u32);
        let (_, chain) = evaluate(&BigUint::from(5u8), 4, &n).unwrap();
        (n, chain)
    }

    #[test]
    fn power_of_two_is_lookup() {
        let (n, chain) = toy_chain();
        assert_eq!(witness_for(&chain, &BigUint::from(4u8), &n).unwrap(), BigUint::from(183u32));
    }

    #[test]
    fn multi_bit_exponent() {
        let (n, chain) = toy_chain();
        for e in 0u32..32 {
            let e = BigUint::from(e);
            assert_eq!(witness_for(&chain, &e, &n).unwrap(), BigUint::from(5u8).modpow(&e, &n));
        }
    }

    #[test]
    fn zero_exponent_is_identity() {
        let (n, chain) = toy_chain();
        assert_eq!(witness_for(&chain, &BigUint::zero(), &n).unwrap(), BigUint::one());
    }

    #[test]
    fn out_of_range_exponent() {
        let (n, chain) = toy_chain();
        // 2^5 needs chain[5]; only chain[0..=4] exists.
        let err = witness_for(&chain, &BigUint::from(32u8), &n).unwrap_err();
        assert!(matches!(err, VdfError::OutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn mismatched_modulus_rejected() {
        let (_, chain) = toy_chain();
        let other = BigUint::from(1_022_117u32);
        assert!(matches!(
            witness_for(&chain, &BigUint::from(4u8), &other),
            Err(VdfError::InvalidParameter(_))
        ));
    }

    #[test]
    fn sparse_chain_missing_entry() {
        let n = BigUint::from(221u32);
        let keep = [2u64].into_iter().collect();
        let (_, chain) = evaluate_with(&BigUint::from(5u8), 4, &n, &Retention::Sparse(keep)).unwrap();
        assert_eq!(witness_for(&chain, &BigUint::from(4u8), &n).unwrap(), BigUint::from(183u32));
        assert!(matches!(
            witness_for(&chain, &BigUint::from(6u8), &n),
            Err(VdfError::OutOfRange { index: 1, .. })
        ));
    }
}
