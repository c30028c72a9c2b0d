#![forbid(unsafe_code)]

//! On-chain proof artifact and proof-chain persistence.
//!
//! The JSON record consumed by the on-chain verifier:
//!
//! ```json
//! {
//!  "n": { "val": "0x…", "bitlen": 2047 },
//!  "x": { "val": "0x…", "bitlen": 2047 },
//!  "y": { "val": "0x…", "bitlen": 2046 },
//!  "T": 1048576,
//!  "v": [ { "v": { "val": "0x…", "bitlen": 2047 } }, … ]
//! }
//! ```
//!
//! `val` is lowercase hex without leading zeros, prefixed `0x`; `bitlen` is
//! the minimal bit count (zero renders as `0x0` with bitlen 0). `v` lists the
//! witness of every claim except the base case.
//!
//! The complete chain (all five fields of every claim) can additionally be
//! dumped as CBOR. Both writers go through a sibling temporary file and a
//! rename, so a failed write never leaves a truncated file at `path`.

use std::fs;
use std::path::{Path, PathBuf};

use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vdf_core::{VdfError, VdfResult};

use crate::halving::ProofChain;

/// Group element as `{ "val": "0x…", "bitlen": … }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigNumber {
    pub val: String,
    pub bitlen: u64,
}

impl BigNumber {
    #[must_use]
    pub fn from_biguint(x: &BigUint) -> Self {
        Self { val: format!("0x{x:x}"), bitlen: x.bits() }
    }

    /// Hex digits without the `0x` prefix.
    #[must_use]
    pub fn hex_digits(&self) -> &str {
        self.val.strip_prefix("0x").unwrap_or(&self.val)
    }

    /// Parse the value back. Fails with [`VdfError::Parse`] on bad hex.
    pub fn to_biguint(&self) -> VdfResult<BigUint> {
        BigUint::from_str_radix(self.hex_digits(), 16)
            .map_err(|_| VdfError::Parse { field: "val", value: self.val.clone() })
    }
}

/// One witness entry, wrapped as `{ "v": { … } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessEntry {
    pub v: BigNumber,
}

/// On-chain proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnchainProof {
    pub n: BigNumber,
    pub x: BigNumber,
    pub y: BigNumber,
    #[serde(rename = "T")]
    pub t: u64,
    pub v: Vec<WitnessEntry>,
}

impl OnchainProof {
    /// Format a proof chain, dropping the base-case witness.
    pub fn from_chain(chain: &ProofChain) -> VdfResult<Self> {
        let original = chain.original().ok_or(VdfError::EmptyProofChain)?;
        Ok(Self {
            n: BigNumber::from_biguint(original.n()),
            x: BigNumber::from_biguint(original.x()),
            y: BigNumber::from_biguint(original.y()),
            t: original.t(),
            v: chain
                .witnesses()
                .map(|v| WitnessEntry { v: BigNumber::from_biguint(v) })
                .collect(),
        })
    }

    /// Pretty JSON with a one-space indent.
    pub fn to_json_pretty(&self) -> VdfResult<String> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(data: &str) -> VdfResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Write the artifact to `path`.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> VdfResult<()> {
        let json = self.to_json_pretty()?;
        write_atomic(path.as_ref(), json.as_bytes())
    }

    /// Read a previously written artifact.
    pub fn read_json<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

impl ProofChain {
    pub fn to_cbor(&self) -> VdfResult<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Decode a CBOR dump. An empty claim list is rejected.
    pub fn from_cbor(data: &[u8]) -> VdfResult<Self> {
        let chain: ProofChain = serde_cbor::from_slice(data)?;
        ProofChain::from_claims(chain.into_claims())
    }

    pub fn write_cbor<P: AsRef<Path>>(&self, path: P) -> VdfResult<()> {
        write_atomic(path.as_ref(), &self.to_cbor()?)
    }

    pub fn read_cbor<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        Self::from_cbor(&fs::read(path)?)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Write `bytes` to `path` via a temporary sibling and rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> VdfResult<()> {
    let tmp = temp_sibling(path);
    if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}
