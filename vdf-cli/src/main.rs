#![forbid(unsafe_code)]

//! VDF prover command line tool.
//!
//! `prove` runs the sequential squaring chain, builds the halving proof and
//! writes the on-chain JSON artifact. `solidity` prints the witness list of a
//! saved artifact as a Solidity initialiser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vdf_core::{ChainRetention, HashAlgorithm, VdfConfig};
use vdf_prover::{solidity, OnchainProof, VdfProver};

mod report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML). Built-in parameters are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the VDF and write the proof artifact
    Prove {
        /// Instance base as a decimal integer
        #[arg(short, long)]
        base: Option<String>,
        /// Number of sequential squarings
        #[arg(short = 't', long)]
        delay: Option<u64>,
        /// Output path for the on-chain JSON artifact
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also dump the full proof chain as CBOR
        #[arg(long)]
        chain_out: Option<PathBuf>,
        /// Challenge hash (sha3-256, keccak-256)
        #[arg(long)]
        hash: Option<HashAlgorithm>,
        /// Keep only the squaring-chain entries the witness needs
        #[arg(long)]
        sparse: bool,
    },
    /// Print the witnesses of a saved artifact as a Solidity BigNumber[] literal
    Solidity {
        /// Proof artifact to read
        #[arg(short, long, default_value = "proof.json")]
        proof: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => VdfConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VdfConfig::default(),
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    init_tracing(&level);

    match cli.command {
        Commands::Prove { base, delay, out, chain_out, hash, sparse } => {
            let cfg = apply_overrides(cfg, base, delay, out, chain_out, hash, sparse);
            cmd_prove(&cfg)
        }
        Commands::Solidity { proof } => cmd_solidity(&proof),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Diagnostics go to stderr; stdout carries the command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[allow(clippy::too_many_arguments)]
fn apply_overrides(
    mut cfg: VdfConfig,
    base: Option<String>,
    delay: Option<u64>,
    out: Option<PathBuf>,
    chain_out: Option<PathBuf>,
    hash: Option<HashAlgorithm>,
    sparse: bool,
) -> VdfConfig {
    if let Some(base) = base {
        cfg.base = base;
    }
    if let Some(delay) = delay {
        cfg.delay = delay;
    }
    if let Some(out) = out {
        cfg.output = out;
    }
    if chain_out.is_some() {
        cfg.chain_output = chain_out;
    }
    if let Some(hash) = hash {
        cfg.challenge_hash = hash;
    }
    if sparse {
        cfg.retention = ChainRetention::Sparse;
    }
    cfg
}

fn cmd_prove(cfg: &VdfConfig) -> Result<()> {
    let base = cfg.base()?;
    let prover = VdfProver::from_config(cfg)?;

    println!(
        "{}",
        style(format!("Evaluating {} sequential squarings ({} challenges)", cfg.delay, cfg.challenge_hash)).cyan()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg} [{elapsed_precise}]")?,
    );
    spinner.set_message("computing squaring chain and halving proof");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let start = Instant::now();
    let result = prover.prove(&base);
    spinner.finish_and_clear();
    let chain = result?;
    let elapsed = start.elapsed();

    println!("{}", style(format!("Proof generated in {:.2?}", elapsed)).green());

    let artifact = OnchainProof::from_chain(&chain)?;
    artifact
        .write_json(&cfg.output)
        .with_context(|| format!("failed to write {}", cfg.output.display()))?;
    info!(path = %cfg.output.display(), "artifact saved");

    if let Some(path) = &cfg.chain_output {
        chain
            .write_cbor(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "proof chain saved");
    }

    println!("{}", report::summary_table(&chain, &artifact, elapsed));
    println!("{}", style(format!("Proof saved to {}", cfg.output.display())).bold().green());
    Ok(())
}

fn cmd_solidity(path: &Path) -> Result<()> {
    let artifact = OnchainProof::read_json(path)
        .with_context(|| format!("failed to read proof artifact {}", path.display()))?;
    print!("{}", solidity::render_witness_array(&artifact));
    Ok(())
}
