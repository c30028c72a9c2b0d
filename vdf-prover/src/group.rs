#![forbid(unsafe_code)]

//! Group parameters and the handful of modular helpers shared by the
//! evaluator and the halving prover.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use vdf_core::{VdfConfig, VdfError, VdfResult};

/// Immutable parameters of an RSA group of unknown order: the modulus `N`
/// and the delay `T` of the top-level instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParams {
    modulus: BigUint,
    delay: u64,
}

impl GroupParams {
    /// Validate and wrap `(N, T)`. Rejects `N <= 1`.
    pub fn new(modulus: BigUint, delay: u64) -> VdfResult<Self> {
        ensure_modulus(&modulus)?;
        Ok(Self { modulus, delay })
    }

    /// Build parameters from a loaded configuration.
    pub fn from_config(cfg: &VdfConfig) -> VdfResult<Self> {
        Self::new(cfg.modulus()?, cfg.delay)
    }

    #[must_use]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    #[must_use]
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Check that `value` is a canonical group element, i.e. lies in `[0, N)`.
    pub fn check_element(&self, name: &str, value: &BigUint) -> VdfResult<()> {
        ensure_element(name, value, &self.modulus)
    }
}

pub(crate) fn ensure_modulus(n: &BigUint) -> VdfResult<()> {
    if *n <= BigUint::one() {
        return Err(VdfError::InvalidParameter(format!("modulus must exceed 1, got {n}")));
    }
    Ok(())
}

pub(crate) fn ensure_element(name: &str, value: &BigUint, n: &BigUint) -> VdfResult<()> {
    if value >= n {
        return Err(VdfError::InvalidParameter(format!(
            "{name} must lie in [0, N) (bit-length {} vs modulus {})",
            value.bits(),
            n.bits()
        )));
    }
    Ok(())
}

/// Big-endian, minimal-length encoding. Zero encodes to the empty string,
/// unlike [`BigUint::to_bytes_be`] which yields a single `0x00` byte.
#[must_use]
pub fn minimal_be_bytes(x: &BigUint) -> Vec<u8> {
    if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    }
}

/// `x^(2^t) mod n` by `t` sequential squarings.
#[must_use]
pub fn square_repeatedly(x: &BigUint, n: &BigUint, t: u64) -> BigUint {
    let mut y = x % n;
    for _ in 0..t {
        y = (&y * &y) % n;
    }
    y
}
