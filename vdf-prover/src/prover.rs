#![forbid(unsafe_code)]

//! End-to-end prover: evaluate, extract the midpoint witness, fold.

use std::collections::BTreeSet;
use std::time::Instant;

use num_bigint::BigUint;
use num_traits::One;
use tracing::{info, warn};
use vdf_core::{ChainRetention, HashAlgorithm, VdfConfig, VdfError, VdfResult};

use crate::chain::{evaluate_with, Retention};
use crate::group::GroupParams;
use crate::halving::{halve_delay, Claim, HalvingProver, ProofChain};
use crate::witness::witness_for;

/// Proves `x0^(2^T) mod N` for the configured group.
#[derive(Debug, Clone)]
pub struct VdfProver {
    params: GroupParams,
    hash: HashAlgorithm,
    retention: ChainRetention,
}

impl VdfProver {
    #[must_use]
    pub fn new(params: GroupParams) -> Self {
        Self { params, hash: HashAlgorithm::default(), retention: ChainRetention::default() }
    }

    /// Build a prover from a loaded configuration.
    pub fn from_config(cfg: &VdfConfig) -> VdfResult<Self> {
        Ok(Self::new(GroupParams::from_config(cfg)?)
            .with_hash(cfg.challenge_hash)
            .with_retention(cfg.retention))
    }

    #[must_use]
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    #[must_use]
    pub fn with_retention(mut self, retention: ChainRetention) -> Self {
        self.retention = retention;
        self
    }

    #[must_use]
    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    /// Run the squaring chain and package `{N, x0, y, T, v}` with
    /// `v = x0^(2^⌈T/2⌉)` taken from the chain.
    pub fn initial_claim(&self, base: &BigUint) -> VdfResult<Claim> {
        let n = self.params.modulus();
        let t = self.params.delay();
        if t == 0 {
            return Err(VdfError::InvalidParameter("proof generation needs a delay of at least 1".into()));
        }
        self.params.check_element("base", base)?;

        let t_half = halve_delay(t);
        let retention = match self.retention {
            ChainRetention::Full => Retention::Full,
            ChainRetention::Sparse => Retention::Sparse(BTreeSet::from([t_half])),
        };

        let (y, chain) = evaluate_with(base, t, n, &retention)?;
        let v = witness_for(&chain, &(BigUint::one() << t_half), n)?;
        Ok(Claim::new(n.clone(), base.clone(), y, t, v))
    }

    /// Evaluate the VDF on `base` and produce the full halving proof chain.
    pub fn prove(&self, base: &BigUint) -> VdfResult<ProofChain> {
        let start = Instant::now();
        let claim = self.initial_claim(base)?;
        let chain = HalvingProver::new(self.hash).generate(&claim)?;

        match chain.base_case() {
            Some(last) if last.is_base_case_valid() => {}
            _ => warn!("base case does not satisfy y = x^2 mod n"),
        }
        info!(
            t = self.params.delay(),
            claims = chain.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "proof generated"
        );
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy(delay: u64) -> VdfProver {
        VdfProver::new(GroupParams::new(BigUint::from(221u32), delay).unwrap())
    }

    #[test]
    fn initial_claim_matches_vector() {
        let claim = toy(4).initial_claim(&BigUint::from(5u8)).unwrap();
        assert_eq!(
            claim,
            Claim::new(BigUint::from(221u32), BigUint::from(5u8), BigUint::one(), 4, BigUint::from(183u32))
        );
    }

    #[test]
    fn sparse_and_full_agree() {
        let base = BigUint::from(7u8);
        let full = toy(9).prove(&base).unwrap();
        let sparse = toy(9).with_retention(ChainRetention::Sparse).prove(&base).unwrap();
        assert_eq!(full, sparse);
    }

    #[test]
    fn zero_delay_rejected() {
        assert!(matches!(toy(0).prove(&BigUint::from(5u8)), Err(VdfError::InvalidParameter(_))));
    }

    #[test]
    fn base_outside_group_rejected() {
        assert!(matches!(toy(4).prove(&BigUint::from(300u32)), Err(VdfError::InvalidParameter(_))));
    }

    #[test]
    fn hash_choice_changes_chain() {
        let base = BigUint::from(5u8);
        let sha3 = toy(8).prove(&base).unwrap();
        let keccak = toy(8).with_hash(HashAlgorithm::Keccak256).prove(&base).unwrap();
        assert_eq!(sha3.original(), keccak.original());
        assert_eq!(sha3.len(), keccak.len());
        assert!(keccak.base_case().unwrap().is_base_case_valid());
    }
}
