//! # Issue Subcommand
//!
//! Assigns the next nonce, commits the certificate with its token
//! identifier embedded, and appends the record to the metadata store.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use kcert_vc::NonceSequence;

use crate::commit::read_certificate;
use crate::Settings;

/// Arguments for `kcert issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Certificate data (JSON object with the certificate fields).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Mint under this nonce instead of one past the highest stored.
    #[arg(long)]
    pub start_nonce: Option<u64>,
}

/// Execute `kcert issue`.
pub fn run_issue(args: &IssueArgs, settings: &Settings) -> Result<u8> {
    let data = read_certificate(&args.file)?;
    let store = settings.store();
    let mut records = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    let mut sequence = match args.start_nonce {
        Some(nonce) => NonceSequence::starting_at(nonce),
        None => NonceSequence::after(&records),
    };
    let nonce = sequence.peek();
    if records.iter().any(|r| r.nonce == nonce) {
        bail!("nonce {nonce} is already issued in {}", store.path().display());
    }

    let record = settings
        .issuer()
        .issue(data, &mut sequence)
        .context("failed to issue certificate")?;

    println!("Issued {}", record.nft_id);
    println!("  Nonce: {}", record.nonce);
    println!("  Root:  {}", record.root_hash.as_deref().unwrap_or_default());
    if !record.verify_url.is_empty() {
        println!("  Verify: {}", record.verify_url);
    }

    records.push(record);
    store
        .save(&records)
        .with_context(|| format!("failed to save {}", store.path().display()))?;
    tracing::debug!(path = %store.path().display(), total = records.len(), "metadata saved");

    Ok(0)
}
