#![no_main]
use libfuzzer_sys::fuzz_target;
use vdf_prover::{solidity, OnchainProof};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(proof) = OnchainProof::from_json(text) {
            let _ = solidity::render_witness_array(&proof);
            for entry in &proof.v {
                let _ = entry.v.to_biguint();
            }
        }
    }
});
