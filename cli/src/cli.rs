//! # CLI Interface
//!
//! Defines the command-line argument structure for `nem-signer` using
//! `clap` derive. Supports three subcommands: `sign`, `mosaics`, and
//! `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nem_transfer::transaction::Network;

/// Host-side driver for the NEM transfer signing flow.
///
/// Loads a signing request, walks through every confirmation prompt on the
/// terminal, and prints the canonical unsigned transaction bytes as hex.
#[derive(Parser, Debug)]
#[command(
    name = "nem-signer",
    about = "Confirm and serialize NEM transfers",
    version,
    propagate_version = true
)]
pub struct NemSignerCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "NEM_SIGNER_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the signer binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Confirm a request and print the unsigned transaction as hex.
    Sign(SignArgs),
    /// List the known mosaic definitions.
    Mosaics(MosaicsArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Path to the JSON signing request.
    #[arg(long, short = 'r')]
    pub request: PathBuf,

    /// Extra mosaic definitions (JSON array), consulted after the built-in ones.
    #[arg(long, short = 'm', env = "NEM_SIGNER_MOSAICS")]
    pub mosaics: Option<PathBuf>,

    /// Signer policy file (JSON).
    #[arg(long, short = 'c', env = "NEM_SIGNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hex-encoded public key of the signing account.
    #[arg(long, env = "NEM_SIGNER_PUBLIC_KEY")]
    pub signer_key: String,

    /// Hex-encoded X25519 secret used to seal encrypted messages.
    ///
    /// Required only when the request asks for an encrypted message.
    #[arg(long, env = "NEM_SIGNER_ENCRYPTION_SECRET", hide_env_values = true)]
    pub encryption_secret: Option<String>,

    /// Approve every prompt without asking. Prompts are still printed.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the `mosaics` subcommand.
#[derive(Parser, Debug)]
pub struct MosaicsArgs {
    /// Only list definitions valid on this network.
    #[arg(long, short = 'n')]
    pub network: Option<Network>,

    /// Extra mosaic definitions (JSON array) to include.
    #[arg(long, short = 'm', env = "NEM_SIGNER_MOSAICS")]
    pub mosaics: Option<PathBuf>,
}
