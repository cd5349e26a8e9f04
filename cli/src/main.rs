// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEM Signer
//!
//! Entry point for the `nem-signer` binary. Parses CLI arguments,
//! initializes logging, loads the request and mosaic definitions, runs the
//! confirmation flow on the terminal, and prints the unsigned transaction.
//!
//! The binary supports three subcommands:
//!
//! - `sign`    - confirm a request and print its bytes as hex
//! - `mosaics` - list known mosaic definitions
//! - `version` - print build version information

mod cli;
mod logging;
mod request;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;

use nem_transfer::config::{network_name, SignerConfig};
use nem_transfer::crypto::SealedBoxCipher;
use nem_transfer::mosaic::{LevyKind, MosaicDefinition, MosaicRegistry};
use nem_transfer::transaction::TransactionSigner;
use nem_transfer::TransactionError;

use cli::{Commands, NemSignerCli};
use logging::LogFormat;
use request::{parse_key, RequestFile};
use ui::TerminalUi;

fn main() -> Result<()> {
    let cli = NemSignerCli::parse();
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Sign(args) => sign(args),
        Commands::Mosaics(args) => list_mosaics(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Confirms the request on the terminal and prints the transaction hex.
fn sign(args: cli::SignArgs) -> Result<()> {
    let registry = load_registry(args.mosaics.as_deref())?;
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SignerConfig::from_json(&raw)?
        }
        None => SignerConfig::default(),
    };

    let signer_key = parse_key(&args.signer_key).context("invalid --signer-key")?;
    let cipher = args
        .encryption_secret
        .as_deref()
        .map(|secret| {
            parse_key(secret)
                .map(SealedBoxCipher::from_secret_bytes)
                .context("invalid --encryption-secret")
        })
        .transpose()?;

    let (common, request) = RequestFile::load(&args.request)?.into_request(chrono::Utc::now())?;
    tracing::info!(
        kind = %request,
        network = %common.network,
        timestamp = common.timestamp,
        deadline = common.deadline,
        "signing request loaded"
    );

    let mut signer = TransactionSigner::new(signer_key, &registry).with_config(config);
    if let Some(cipher) = &cipher {
        signer = signer.with_cipher(cipher);
    }

    let mut ui = TerminalUi::stdio(args.yes);
    match signer.sign_request(&mut ui, &common, &request) {
        Ok(bytes) => {
            println!("{}", hex::encode(bytes));
            Ok(())
        }
        Err(TransactionError::UserRejected(step)) => {
            bail!("transaction rejected at the {step} prompt")
        }
        Err(e) => Err(anyhow::Error::new(e).context("failed to build transaction")),
    }
}

/// Prints the known definitions, one per line.
fn list_mosaics(args: cli::MosaicsArgs) -> Result<()> {
    let registry = load_registry(args.mosaics.as_deref())?;

    let definitions: Vec<&MosaicDefinition> = match args.network {
        Some(network) => registry.for_network(network).collect(),
        None => registry.definitions().iter().collect(),
    };

    for def in definitions {
        println!("{}", describe(def));
    }
    Ok(())
}

fn describe(def: &MosaicDefinition) -> String {
    let mut line = format!(
        "{}.{}\t{}\t{}\tdivisibility={}",
        def.namespace, def.mosaic, def.ticker, def.name, def.divisibility
    );
    if let Some(levy) = &def.levy {
        let kind = match levy.kind {
            LevyKind::Absolute => "absolute",
            LevyKind::Percentile => "per-10000",
        };
        line.push_str(&format!(
            "\tlevy={} {} in {}.{}",
            levy.fee, kind, levy.namespace, levy.mosaic
        ));
    }
    if let Some(networks) = &def.networks {
        let names: Vec<String> = networks.iter().map(|n| network_name(n.id())).collect();
        line.push_str(&format!("\tnetworks={}", names.join(",")));
    }
    line
}

/// Built-in definitions, followed by any from `extra`.
fn load_registry(extra: Option<&Path>) -> Result<MosaicRegistry> {
    let mut registry = MosaicRegistry::builtin();
    if let Some(path) = extra {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read mosaic definitions {}", path.display()))?;
        let more = MosaicRegistry::from_json(&raw)?;
        tracing::info!(count = more.len(), path = %path.display(), "loaded mosaic definitions");
        registry.extend(more);
    }
    Ok(registry)
}

/// Prints version information to stdout.
fn print_version() {
    println!("nem-signer   {}", env!("CARGO_PKG_VERSION"));
    println!("nem-transfer {}", nem_transfer::VERSION);
}
