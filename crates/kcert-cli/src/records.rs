//! # List and Payload Subcommands
//!
//! Read-only views of the metadata store.

use anyhow::{bail, Context, Result};
use clap::Args;

use kcert_vc::summarize;

use crate::Settings;

/// Arguments for `kcert list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the summaries as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `kcert payload`.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Nonce of the record.
    #[arg(long)]
    pub nonce: u64,
}

/// Execute `kcert list`.
pub fn run_list(args: &ListArgs, settings: &Settings) -> Result<u8> {
    let store = settings.store();
    let records = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let summaries = summarize(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(0);
    }

    if summaries.is_empty() {
        println!("No certificates in {}", store.path().display());
        return Ok(0);
    }

    for summary in &summaries {
        println!(
            "{:>5}  {:<16}  {:<16}  {}",
            summary.nonce,
            summary.nft_id,
            summary.root_short.as_deref().unwrap_or("-"),
            summary.holder.as_deref().unwrap_or("-"),
        );
        if let Some(course) = &summary.course {
            println!("       {course}");
        }
    }
    println!("{} certificate(s)", summaries.len());
    Ok(0)
}

/// Execute `kcert payload`.
pub fn run_payload(args: &PayloadArgs, settings: &Settings) -> Result<u8> {
    let store = settings.store();
    let records = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    let Some(record) = records.iter().find(|r| r.nonce == args.nonce) else {
        bail!("no record with nonce {}", args.nonce);
    };
    if record.root_hash.is_none() {
        tracing::warn!(nft_id = %record.nft_id, "record has no commitment root");
    }

    println!("{}", serde_json::to_string_pretty(&record.ledger_payload())?);
    Ok(0)
}
