#![forbid(unsafe_code)]

//! Sequential-squaring VDF prover with Pietrzak halving proofs.
//!
//! The pipeline runs leaves first:
//! 1. [`chain::evaluate`] performs the `T` strictly sequential squarings and
//!    records the intermediate powers.
//! 2. [`witness::witness_for`] reads the midpoint witness out of that chain.
//! 3. [`halving::HalvingProver`] folds the claim with Fiat–Shamir challenges
//!    ([`challenge::derive_challenge`]) until the delay reaches one.
//! 4. [`artifact::OnchainProof`] renders the proof chain for an on-chain
//!    verifier; [`solidity`] prints it as a Solidity literal.
//!
//! [`prover::VdfProver`] wires the steps together from an immutable
//! [`group::GroupParams`] value.
//!
//! Not constant-time. Do not feed secret inputs.

pub mod artifact;
pub mod chain;
pub mod challenge;
pub mod group;
pub mod halving;
pub mod prover;
pub mod solidity;
pub mod witness;

pub use artifact::{BigNumber, OnchainProof, WitnessEntry};
pub use chain::{evaluate, evaluate_with, Retention, SquaringChain};
pub use challenge::derive_challenge;
pub use group::GroupParams;
pub use halving::{generate_proof, halve_delay, Claim, HalvingProver, ProofChain, ProofState};
pub use prover::VdfProver;
pub use witness::witness_for;

pub use vdf_core::{ChainRetention, HashAlgorithm, VdfError, VdfResult};
