#![forbid(unsafe_code)]

//! Pietrzak halving proof ("Simple Verifiable Delay Functions", 2018).
//!
//! A claim `{n, x, y, t, v}` asserts `y = x^(2^t) mod n` with the midpoint
//! witness `v = x^(2^⌈t/2⌉) mod n`. One halving step derives the challenge
//! `r = H(x, y, v)` and folds the two halves of the squaring chain into a
//! single claim about `⌈t/2⌉` squarings:
//!
//! ```text
//! x' = x^r * v        (mod n)
//! y' = v^r * y        (mod n)     y lifted to y^2 first when t is odd
//! t' = ⌈t/2⌉
//! v' = x'^(2^⌈t'/2⌉)  (mod n)
//! ```
//!
//! Folding repeats until `t == 1`, where `y == x^2 mod n` is checked
//! directly and no witness is needed. The resulting [`ProofChain`] has
//! `⌈log2 t⌉ + 1` claims and is a pure function of the initial claim.

use std::time::Instant;

use num_bigint::BigUint;
use num_integer::Integer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use vdf_core::{HashAlgorithm, VdfError, VdfResult};

use crate::challenge::derive_challenge;
use crate::group::{ensure_element, ensure_modulus, square_repeatedly};

/// Proof generator state for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofState {
    /// `t > 1`: another halving step follows.
    Folding,
    /// `t == 1`: terminal, checked directly.
    Base,
}

/// Immutable proof-of-exponentiation claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    n: BigUint,
    x: BigUint,
    y: BigUint,
    t: u64,
    v: BigUint,
}

impl Claim {
    #[must_use]
    pub fn new(n: BigUint, x: BigUint, y: BigUint, t: u64, v: BigUint) -> Self {
        Self { n, x, y, t, v }
    }

    #[must_use]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[must_use]
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    #[must_use]
    pub fn t(&self) -> u64 {
        self.t
    }

    #[must_use]
    pub fn v(&self) -> &BigUint {
        &self.v
    }

    #[must_use]
    pub fn state(&self) -> ProofState {
        if self.t > 1 {
            ProofState::Folding
        } else {
            ProofState::Base
        }
    }

    /// `true` iff this is a base-case claim (`t == 1`) with `y == x^2 mod n`.
    #[must_use]
    pub fn is_base_case_valid(&self) -> bool {
        self.t == 1 && self.y == (&self.x * &self.x) % &self.n
    }

    fn validate(&self) -> VdfResult<()> {
        ensure_modulus(&self.n)?;
        if self.t == 0 {
            return Err(VdfError::InvalidParameter("claim delay must be at least 1".into()));
        }
        ensure_element("x", &self.x, &self.n)?;
        ensure_element("y", &self.y, &self.n)?;
        ensure_element("v", &self.v, &self.n)
    }
}

/// `⌈t/2⌉`: odd delays round up.
#[must_use]
pub fn halve_delay(t: u64) -> u64 {
    if t.is_even() {
        t / 2
    } else {
        t / 2 + 1
    }
}

/// Number of claims in a proof chain for delay `t >= 1`: `⌈log2 t⌉ + 1`.
fn chain_len(t: u64) -> usize {
    let halvings = if t <= 1 { 0 } else { 64 - (t - 1).leading_zeros() };
    halvings as usize + 1
}

/// Ordered claims from the original instance down to the `t == 1` base case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofChain {
    claims: Vec<Claim>,
}

#[allow(clippy::len_without_is_empty)]
impl ProofChain {
    /// Wrap an existing claim sequence (e.g. one read back from disk).
    pub fn from_claims(claims: Vec<Claim>) -> VdfResult<Self> {
        if claims.is_empty() {
            return Err(VdfError::EmptyProofChain);
        }
        Ok(Self { claims })
    }

    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// The top-level claim.
    #[must_use]
    pub fn original(&self) -> Option<&Claim> {
        self.claims.first()
    }

    /// The terminal `t == 1` claim.
    #[must_use]
    pub fn base_case(&self) -> Option<&Claim> {
        self.claims.last()
    }

    /// Witnesses of every claim except the base case, in order.
    pub fn witnesses(&self) -> impl Iterator<Item = &BigUint> + '_ {
        let folding = self.claims.len().saturating_sub(1);
        self.claims[..folding].iter().map(Claim::v)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    #[must_use]
    pub fn into_claims(self) -> Vec<Claim> {
        self.claims
    }
}

impl<'a> IntoIterator for &'a ProofChain {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

/// Halving proof generator bound to a challenge hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalvingProver {
    hash: HashAlgorithm,
}

impl HalvingProver {
    #[must_use]
    pub fn new(hash: HashAlgorithm) -> Self {
        Self { hash }
    }

    #[must_use]
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// One halving step. Fails on a base-case claim.
    pub fn fold(&self, claim: &Claim) -> VdfResult<Claim> {
        if claim.state() == ProofState::Base {
            return Err(VdfError::InvalidParameter(format!("cannot fold a claim with t = {}", claim.t)));
        }
        let n = &claim.n;

        let r = derive_challenge(self.hash, &claim.x, &claim.y, &claim.v);
        trace!(t = claim.t, challenge = %r, "derived challenge");

        // Odd t: treat the claim as t + 1 squarings ending in y^2.
        let y = if claim.t.is_odd() { (&claim.y * &claim.y) % n } else { claim.y.clone() };

        let t_half = halve_delay(claim.t);
        let x_next = (claim.x.modpow(&r, n) * &claim.v) % n;
        let y_next = (claim.v.modpow(&r, n) * y) % n;
        // Fresh exponentiation: the folded instance has a new base.
        let v_next = square_repeatedly(&x_next, n, halve_delay(t_half));

        Ok(Claim { n: n.clone(), x: x_next, y: y_next, t: t_half, v: v_next })
    }

    /// Fold `claim` down to the base case, returning every intermediate claim.
    pub fn generate(&self, claim: &Claim) -> VdfResult<ProofChain> {
        claim.validate()?;
        let start = Instant::now();

        let mut claims = Vec::with_capacity(chain_len(claim.t));
        let mut current = claim.clone();
        while current.state() == ProofState::Folding {
            let next = self.fold(&current)?;
            debug!(from = current.t, to = next.t, "halving step");
            claims.push(current);
            current = next;
        }
        claims.push(current);

        info!(
            t = claim.t,
            claims = claims.len(),
            hash = %self.hash,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "halving proof complete"
        );
        Ok(ProofChain { claims })
    }
}

/// [`HalvingProver::generate`] with the default SHA3-256 challenge.
pub fn generate_proof(claim: &Claim) -> VdfResult<ProofChain> {
    HalvingProver::default().generate(claim)
}
