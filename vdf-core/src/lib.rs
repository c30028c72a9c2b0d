#![forbid(unsafe_code)]

pub mod config;
pub mod error;

pub use config::{ChainRetention, HashAlgorithm, VdfConfig};
pub use error::{VdfError, VdfResult};
