//! Configuration-driven end-to-end runs.

use num_traits::One;
use vdf_conformance::{big, reference_pow2, TOY_MODULUS};
use vdf_core::{ChainRetention, HashAlgorithm, VdfConfig, VdfError};
use vdf_prover::{GroupParams, OnchainProof, VdfProver};

fn toy_config(delay: u64) -> VdfConfig {
    VdfConfig::from_toml(&format!(
        r#"
        modulus = "1022117"
        base = "5"
        delay = {delay}
        "#
    ))
    .unwrap()
}

#[test]
fn config_to_artifact() {
    let cfg = toy_config(100);
    let prover = VdfProver::from_config(&cfg).unwrap();
    let chain = prover.prove(&cfg.base().unwrap()).unwrap();
    let original = chain.original().unwrap();
    assert_eq!(original.y(), &big(977_705));
    assert_eq!(original.v(), &big(3_411));
    let artifact = OnchainProof::from_chain(&chain).unwrap();
    assert_eq!(artifact.v.len(), 7);
}

#[test]
fn delay_one_has_no_witnesses() {
    let cfg = toy_config(1);
    let chain = VdfProver::from_config(&cfg).unwrap().prove(&big(5)).unwrap();
    assert_eq!(chain.len(), 1);
    assert!(chain.base_case().unwrap().is_base_case_valid());
    assert!(OnchainProof::from_chain(&chain).unwrap().v.is_empty());
}

#[test]
fn malformed_modulus_fails_fast() {
    let cfg = VdfConfig::from_toml(r#"modulus = "not-a-number""#).unwrap();
    assert!(matches!(VdfProver::from_config(&cfg), Err(VdfError::Parse { field: "modulus", .. })));
}

#[test]
fn degenerate_modulus_rejected() {
    let cfg = VdfConfig::from_toml(r#"modulus = "1""#).unwrap();
    assert!(matches!(VdfProver::from_config(&cfg), Err(VdfError::InvalidParameter(_))));
}

#[test]
fn retention_and_hash_options_flow_through() {
    let mut cfg = toy_config(37);
    let full = VdfProver::from_config(&cfg).unwrap().prove(&big(9)).unwrap();
    cfg.retention = ChainRetention::Sparse;
    let sparse = VdfProver::from_config(&cfg).unwrap().prove(&big(9)).unwrap();
    assert_eq!(full, sparse);

    cfg.challenge_hash = HashAlgorithm::Keccak256;
    let keccak = VdfProver::from_config(&cfg).unwrap().prove(&big(9)).unwrap();
    assert_eq!(keccak.original(), full.original());
    assert!(keccak.base_case().unwrap().is_base_case_valid());
}

#[test]
fn default_group_small_delay() {
    // The built-in 2047-bit group with a short delay.
    let cfg = VdfConfig::default();
    let params = GroupParams::new(cfg.modulus().unwrap(), 16).unwrap();
    let base = cfg.base().unwrap();
    let chain = VdfProver::new(params).prove(&base).unwrap();
    let original = chain.original().unwrap();
    assert_eq!(original.y(), &reference_pow2(&base, 16, original.n()));
    assert_eq!(chain.len(), 5);
    assert!(chain.base_case().unwrap().is_base_case_valid());
    assert!(!original.y().is_one());
}

#[test]
fn toy_modulus_initial_claim() {
    let params = GroupParams::new(big(TOY_MODULUS), 4).unwrap();
    let claim = VdfProver::new(params).initial_claim(&big(5)).unwrap();
    assert_eq!(claim.v(), &big(183));
    assert_eq!(claim.y(), &big(1));
}
