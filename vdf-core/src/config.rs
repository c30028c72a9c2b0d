#![forbid(unsafe_code)]

//! Prover configuration. Parses a TOML file into a strongly-typed structure.
//! Group parameters are kept as decimal strings until a caller asks for them,
//! so a malformed value is reported against the field that carried it.

use num_bigint::BigUint;
use serde::Deserialize;
use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

use crate::{VdfError, VdfResult};

/// 2047-bit RSA modulus of unknown factorisation used when no config is supplied.
pub const DEFAULT_MODULUS_DEC: &str = "14901995024560329904961350434753246183585009359863918037600291689447425867236233280234158146280526361619483655084377817580307380713779960796538243284679321655995122337644690241899724673620138350577731488123546542205271115215104758591923818947441465813939827252468298458501512274934213283394474929252890272815322072728121545402142127571518643073412545552919444768620193923721115040874821490498192845163014782819480348378252338278631734877270049886059699056015701542491308767095812631609792009922308416690626638089323812382387729710604396893335711577183169675469709449341880762946125460470722355849832821059916566355909";

/// Default instance base `X0`.
pub const DEFAULT_BASE_DEC: &str = "2702608519755635878385320996194610791442298388087698459044354793170875406089102944208228897289234467866935860388679875443893545529554466363689608332379411342297088895328433512853915563930540281202658854965180942641321964738112144788639457955979237709811724908275386797159050672018353503846816144798133930123748117553972278601687176377164166082122222343096089655297954001896904931170987004646968232225410249512300600847730961776536544804567518739034725203121423156686985987754942333378456987899405303956315178985033112973699885750499423186910017346183705830610146945539653233129271006104510030972052573668194938717513";

/// Default delay parameter (2^20 squarings).
pub const DEFAULT_DELAY: u64 = 1 << 20;

/// 256-bit hash feeding the Fiat–Shamir challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum HashAlgorithm {
    /// FIPS-202 SHA3-256.
    #[default]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// Original Keccak-256 padding, as exposed by the EVM `keccak256` opcode.
    #[serde(rename = "keccak-256")]
    Keccak256,
}

impl HashAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Keccak256 => "keccak-256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = VdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha3-256" | "sha3" => Ok(HashAlgorithm::Sha3_256),
            "keccak-256" | "keccak" => Ok(HashAlgorithm::Keccak256),
            other => Err(VdfError::InvalidParameter(format!("unknown challenge hash {other:?}"))),
        }
    }
}

/// How much of the squaring chain the evaluator keeps in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainRetention {
    /// Every intermediate power `chain[0..=T]`.
    #[default]
    Full,
    /// Only the entries the top-level witness needs, plus the endpoints.
    Sparse,
}

/// Prover configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VdfConfig {
    /// Group modulus `N` as a decimal string.
    pub modulus: String,

    /// Instance base `X0` as a decimal string.
    pub base: String,

    /// Number of sequential squarings `T`.
    pub delay: u64,

    /// Hash used for challenge derivation.
    pub challenge_hash: HashAlgorithm,

    /// Squaring chain retention policy.
    pub retention: ChainRetention,

    /// Destination of the on-chain JSON artifact.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional destination of the full CBOR proof chain.
    pub chain_output: Option<PathBuf>,

    /// Logging verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,
}

impl Default for VdfConfig {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS_DEC.to_string(),
            base: DEFAULT_BASE_DEC.to_string(),
            delay: DEFAULT_DELAY,
            challenge_hash: HashAlgorithm::default(),
            retention: ChainRetention::default(),
            output: default_output(),
            chain_output: None,
            log_level: Some("info".to_string()),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("proof.json")
}

impl VdfConfig {
    /// Load a configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        let data = fs::read_to_string(&path).map_err(VdfError::from)?;
        Self::from_toml(&data)
    }

    /// Load config alias version
    pub fn load<P: AsRef<Path>>(path: P) -> VdfResult<Self> {
        Self::from_file(path)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(data: &str) -> VdfResult<Self> {
        toml::from_str::<VdfConfig>(data).map_err(VdfError::ConfigParse)
    }

    /// Parsed modulus `N`.
    pub fn modulus(&self) -> VdfResult<BigUint> {
        parse_decimal("modulus", &self.modulus)
    }

    /// Parsed base `X0`.
    pub fn base(&self) -> VdfResult<BigUint> {
        parse_decimal("base", &self.base)
    }
}

/// Parse a decimal big-integer string, naming `field` on failure.
pub fn parse_decimal(field: &'static str, value: &str) -> VdfResult<BigUint> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VdfError::Parse { field, value: value.to_string() });
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10)
        .ok_or_else(|| VdfError::Parse { field, value: value.to_string() })
}
