#![forbid(unsafe_code)]

//! Render the witness list of an artifact as a Solidity `BigNumber[]`
//! initialiser, for pasting into verifier tests and deployment scripts.

use std::fmt::Write;

use crate::artifact::{BigNumber, OnchainProof};

/// Hex digits padded to an even count, as `hex"…"` literals require.
fn hex_literal(b: &BigNumber) -> String {
    let digits = b.hex_digits();
    if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    }
}

#[must_use]
pub fn render_witness_array(proof: &OnchainProof) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "BigNumber[] memory v = new BigNumber[]({});\n", proof.v.len());
    for (i, entry) in proof.v.iter().enumerate() {
        let _ = writeln!(out, "v[{i}] = BigNumber({{");
        let _ = writeln!(out, "    val: hex\"{}\",", hex_literal(&entry.v));
        let _ = writeln!(out, "    bitlen: {}", entry.v.bitlen);
        let _ = writeln!(out, "}});\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::WitnessEntry;

    fn num(val: &str, bitlen: u64) -> BigNumber {
        BigNumber { val: val.into(), bitlen }
    }

    #[test]
    fn renders_each_witness() {
        let proof = OnchainProof {
            n: num("0xdd", 8),
            x: num("0x5", 3),
            y: num("0x1", 1),
            t: 4,
            v: vec![WitnessEntry { v: num("0xb7", 8) }, WitnessEntry { v: num("0x9", 4) }],
        };
        let expected = "BigNumber[] memory v = new BigNumber[](2);\n\n\
v[0] = BigNumber({\n    val: hex\"b7\",\n    bitlen: 8\n});\n\n\
v[1] = BigNumber({\n    val: hex\"09\",\n    bitlen: 4\n});\n\n";
        assert_eq!(render_witness_array(&proof), expected);
    }

    #[test]
    fn empty_witness_list() {
        let proof = OnchainProof { n: num("0xdd", 8), x: num("0x5", 3), y: num("0x19", 5), t: 1, v: vec![] };
        assert_eq!(render_witness_array(&proof), "BigNumber[] memory v = new BigNumber[](0);\n\n");
    }
}
