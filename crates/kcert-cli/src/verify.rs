//! # Verify Subcommand
//!
//! Checks a disclosed `(field, value)` claim against the metadata store,
//! for one record (`--nonce` or `--nft-id`) or by searching all records.
//!
//! Exit code 0 when at least one record verifies, 1 otherwise.

use anyhow::{Context, Result};
use clap::Args;

use kcert_vc::{verify_field, CertificateField, FieldOutcome, RecordSelector, VerificationReport};

use crate::Settings;

/// Arguments for `kcert verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Field to check.
    #[arg(long, value_parser = parse_field)]
    pub field: CertificateField,

    /// Claimed value.
    #[arg(long)]
    pub value: String,

    /// Check only the record minted under this nonce.
    #[arg(long, conflicts_with = "nft_id")]
    pub nonce: Option<u64>,

    /// Check only the record with this token identifier.
    #[arg(long)]
    pub nft_id: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_field(s: &str) -> Result<CertificateField, String> {
    s.parse().map_err(|e: kcert_core::KcertError| e.to_string())
}

impl VerifyArgs {
    fn selector(&self) -> RecordSelector {
        match (self.nonce, &self.nft_id) {
            (Some(nonce), _) => RecordSelector::Nonce(nonce),
            (None, Some(id)) => RecordSelector::NftId(id.clone()),
            (None, None) => RecordSelector::Any,
        }
    }
}

/// Execute `kcert verify`.
pub fn run_verify(args: &VerifyArgs, settings: &Settings) -> Result<u8> {
    let store = settings.store();
    let records = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    let report = verify_field(&records, &args.selector(), args.field.as_str(), &args.value)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, records.len());
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_report(report: &VerificationReport, total: usize) {
    for outcome in &report.outcomes {
        let holder = outcome.holder.as_deref().unwrap_or("unknown holder");
        match outcome.outcome {
            FieldOutcome::Verified => println!(
                "OK: {} = verified for {} ({holder})",
                report.field, outcome.nft_id
            ),
            FieldOutcome::Mismatch => {
                println!("FAIL: {} does not match {}", report.field, outcome.nft_id)
            }
            FieldOutcome::MissingRoot => println!("FAIL: {} has no root hash", outcome.nft_id),
            FieldOutcome::MissingProof => println!(
                "FAIL: {} has no proof for {}",
                outcome.nft_id, report.field
            ),
            FieldOutcome::MalformedProof => println!(
                "FAIL: {} has a malformed proof for {}",
                outcome.nft_id, report.field
            ),
        }
    }
    if report.searched {
        println!(
            "{} of {total} records verified for {}",
            report.verified_count(),
            report.field
        );
    }
}
