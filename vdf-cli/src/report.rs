//! Console summary of a generated proof.

use comfy_table::{presets::UTF8_FULL, Table};
use std::time::Duration;

use vdf_prover::{OnchainProof, ProofChain};

pub fn summary_table(chain: &ProofChain, artifact: &OnchainProof, elapsed: Duration) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Field", "Value"]);

    table.add_row(vec!["T".to_string(), artifact.t.to_string()]);
    table.add_row(vec!["modulus bits".to_string(), artifact.n.bitlen.to_string()]);
    table.add_row(vec!["y bits".to_string(), artifact.y.bitlen.to_string()]);
    table.add_row(vec!["claims".to_string(), chain.len().to_string()]);
    table.add_row(vec!["witnesses".to_string(), artifact.v.len().to_string()]);
    let base_ok = chain.base_case().map(|c| c.is_base_case_valid()).unwrap_or(false);
    table.add_row(vec!["base case y = x^2".to_string(), if base_ok { "ok" } else { "FAILED" }.to_string()]);
    table.add_row(vec!["elapsed".to_string(), format!("{:.2?}", elapsed)]);
    table
}
