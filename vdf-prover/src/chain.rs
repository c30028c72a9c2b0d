#![forbid(unsafe_code)]

//! Sequential squaring evaluator.
//!
//! Given `x0`, `t` and `n`, computes `y = x0^(2^t) mod n` with exactly `t`
//! modular squarings, each depending on the previous one. The loop is the
//! delay itself: it is never parallelised, cached across calls or
//! short-circuited.
//!
//! Every intermediate power `chain[i] = x0^(2^i)` is recorded so the witness
//! extractor can read powers of `x0` back without recomputing them. For
//! `t = 2^20` and a 2048-bit modulus the full chain is roughly 256 MiB; use
//! [`Retention::Sparse`] when only a few indices will be queried.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use num_bigint::BigUint;
use tracing::{debug, info};
use vdf_core::{VdfError, VdfResult};

use crate::group::{ensure_element, ensure_modulus};

/// Which chain entries the evaluator keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep `chain[0..=t]`.
    #[default]
    Full,
    /// Keep only the listed indices. `0` and `t` are always kept.
    Sparse(BTreeSet<u64>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entries {
    Full(Vec<BigUint>),
    Sparse(BTreeMap<u64, BigUint>),
}

/// Recorded squaring chain `chain[i] = x0^(2^i) mod n` for `i` in `0..=t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquaringChain {
    modulus: BigUint,
    steps: u64,
    entries: Entries,
}

#[allow(clippy::len_without_is_empty)]
impl SquaringChain {
    /// Number of squarings `t` that produced this chain.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Logical chain length `t + 1`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.steps + 1
    }

    #[must_use]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        matches!(self.entries, Entries::Sparse(_))
    }

    /// Entry `index`, if it was recorded.
    #[must_use]
    pub fn get(&self, index: u64) -> Option<&BigUint> {
        match &self.entries {
            Entries::Full(v) => usize::try_from(index).ok().and_then(|i| v.get(i)),
            Entries::Sparse(m) => m.get(&index),
        }
    }

    /// Entry `index`, or [`VdfError::OutOfRange`] if it was not recorded.
    pub fn power(&self, index: u64) -> VdfResult<&BigUint> {
        self.get(index)
            .ok_or(VdfError::OutOfRange { index, len: self.len() })
    }

    /// The base `chain[0]`.
    #[must_use]
    pub fn base(&self) -> &BigUint {
        self.endpoint(0)
    }

    /// The output `chain[t]`.
    #[must_use]
    pub fn output(&self) -> &BigUint {
        self.endpoint(self.steps)
    }

    fn endpoint(&self, index: u64) -> &BigUint {
        match &self.entries {
            Entries::Full(v) => &v[if index == 0 { 0 } else { v.len() - 1 }],
            // Both endpoints are inserted unconditionally by `evaluate_with`.
            Entries::Sparse(m) => &m[&index],
        }
    }

    /// Recorded `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (u64, &BigUint)> + '_> {
        match &self.entries {
            Entries::Full(v) => Box::new(v.iter().enumerate().map(|(i, x)| (i as u64, x))),
            Entries::Sparse(m) => Box::new(m.iter().map(|(i, x)| (*i, x))),
        }
    }
}

/// Evaluate `x0^(2^t) mod n`, keeping the full chain. Returns `(y, chain)`.
pub fn evaluate(x0: &BigUint, t: u64, n: &BigUint) -> VdfResult<(BigUint, SquaringChain)> {
    evaluate_with(x0, t, n, &Retention::Full)
}

/// Evaluate `x0^(2^t) mod n` with the given retention policy.
///
/// Fails with [`VdfError::InvalidParameter`] before the first squaring when
/// `n <= 1` or `x0 >= n`.
pub fn evaluate_with(
    x0: &BigUint,
    t: u64,
    n: &BigUint,
    retention: &Retention,
) -> VdfResult<(BigUint, SquaringChain)> {
    ensure_modulus(n)?;
    ensure_element("base", x0, n)?;

    let sparse = matches!(retention, Retention::Sparse(_));
    debug!(t, modulus_bits = n.bits(), sparse, "starting squaring chain");
    let start = Instant::now();

    let entries = match retention {
        Retention::Full => {
            let too_large = || VdfError::InvalidParameter(format!("delay {t} does not fit in memory"));
            let cap = usize::try_from(t).ok().and_then(|t| t.checked_add(1)).ok_or_else(too_large)?;
            let mut chain = Vec::new();
            chain.try_reserve_exact(cap).map_err(|_| too_large())?;
            chain.push(x0.clone());
            let mut y = x0.clone();
            for _ in 0..t {
                y = (&y * &y) % n;
                chain.push(y.clone());
            }
            Entries::Full(chain)
        }
        Retention::Sparse(keep) => {
            let mut chain = BTreeMap::new();
            chain.insert(0, x0.clone());
            let mut y = x0.clone();
            for i in 1..=t {
                y = (&y * &y) % n;
                if i == t || keep.contains(&i) {
                    chain.insert(i, y.clone());
                }
            }
            Entries::Sparse(chain)
        }
    };

    let chain = SquaringChain { modulus: n.clone(), steps: t, entries };
    info!(t, elapsed_ms = start.elapsed().as_millis() as u64, "squaring chain complete");
    Ok((chain.output().clone(), chain))
}
