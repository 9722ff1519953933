//! # Record Verification
//!
//! Checks a disclosed `(field, value)` claim against stored certificate
//! records, either for one selected record or by searching every record
//! for one whose commitment accepts the claim.
//!
//! A claim that does not verify is a normal outcome, reported per record.
//! Only asking for a record that does not exist is an error.

use serde::Serialize;

use kcert_core::KcertError;
use kcert_crypto::short_hash;

use crate::certificate::{verify_certificate_field, CertificateField};
use crate::metadata::CertificateRecord;

/// Which records a verification applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// The record minted under this nonce.
    Nonce(u64),
    /// The record with this token identifier.
    NftId(String),
    /// Every record; only those that verify are reported.
    Any,
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nonce(nonce) => write!(f, "nonce {nonce}"),
            Self::NftId(id) => write!(f, "NFT ID {id}"),
            Self::Any => f.write_str("any record"),
        }
    }
}

/// Result of checking one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    /// The proof reproduces the record's root.
    Verified,
    /// The proof is well-formed but does not reproduce the root.
    Mismatch,
    /// The record has no root.
    MissingRoot,
    /// The record has no proof for the field.
    MissingProof,
    /// The stored proof is not a list of valid steps.
    MalformedProof,
}

impl FieldOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// One record's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub nonce: u64,
    pub nft_id: String,
    pub holder: Option<String>,
    pub outcome: FieldOutcome,
}

/// Outcomes of one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// The field that was checked.
    pub field: String,
    /// True if every record was searched.
    pub searched: bool,
    /// Per-record outcomes. In search mode only verified records appear.
    pub outcomes: Vec<RecordOutcome>,
}

impl VerificationReport {
    /// Number of records that verified.
    pub fn verified_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_verified())
            .count()
    }

    /// At least one record verified.
    pub fn is_success(&self) -> bool {
        self.verified_count() > 0
    }
}

/// Check a claim against one record.
pub fn check_record(record: &CertificateRecord, field: &str, value: &str) -> FieldOutcome {
    let Some(root) = record.root_hash.as_deref().filter(|r| !r.is_empty()) else {
        return FieldOutcome::MissingRoot;
    };

    let proof = match record.proof_for(field) {
        Ok(Some(proof)) => proof,
        Ok(None) => return FieldOutcome::MissingProof,
        Err(e) => {
            tracing::warn!(nft_id = %record.nft_id, field, error = %e, "unreadable proof");
            return FieldOutcome::MalformedProof;
        }
    };

    if !proof.is_well_formed() {
        tracing::warn!(nft_id = %record.nft_id, field, "proof has malformed steps");
        return FieldOutcome::MalformedProof;
    }

    if verify_certificate_field(field, value, root, &proof) {
        FieldOutcome::Verified
    } else {
        FieldOutcome::Mismatch
    }
}

fn outcome_for(record: &CertificateRecord, outcome: FieldOutcome) -> RecordOutcome {
    RecordOutcome {
        nonce: record.nonce,
        nft_id: record.nft_id.clone(),
        holder: record.holder().map(str::to_string),
        outcome,
    }
}

/// Verify a `(field, value)` claim against `records`.
///
/// # Errors
///
/// [`KcertError::RecordNotFound`] if `selector` names a record that is not
/// in `records`.
pub fn verify_field(
    records: &[CertificateRecord],
    selector: &RecordSelector,
    field: &str,
    value: &str,
) -> Result<VerificationReport, KcertError> {
    let selected = match selector {
        RecordSelector::Nonce(nonce) => records.iter().find(|r| r.nonce == *nonce),
        RecordSelector::NftId(id) => records.iter().find(|r| &r.nft_id == id),
        RecordSelector::Any => None,
    };

    let (searched, outcomes) = match (selector, selected) {
        (RecordSelector::Any, _) => {
            let outcomes: Vec<RecordOutcome> = records
                .iter()
                .map(|record| (record, check_record(record, field, value)))
                .filter(|(_, outcome)| outcome.is_verified())
                .map(|(record, outcome)| outcome_for(record, outcome))
                .collect();
            tracing::debug!(
                field,
                checked = records.len(),
                matched = outcomes.len(),
                "searched records"
            );
            (true, outcomes)
        }
        (_, Some(record)) => {
            let outcome = check_record(record, field, value);
            tracing::debug!(nft_id = %record.nft_id, field, ?outcome, "checked record");
            (false, vec![outcome_for(record, outcome)])
        }
        (_, None) => return Err(KcertError::RecordNotFound(selector.to_string())),
    };

    Ok(VerificationReport {
        field: field.to_string(),
        searched,
        outcomes,
    })
}

/// A listing line for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub nonce: u64,
    pub nft_id: String,
    pub holder: Option<String>,
    pub course: Option<String>,
    /// First 16 hex chars of the root, for display only.
    pub root_short: Option<String>,
    pub salt: Option<String>,
}

/// Summarize records for listing.
pub fn summarize(records: &[CertificateRecord]) -> Vec<RecordSummary> {
    records
        .iter()
        .map(|record| RecordSummary {
            nonce: record.nonce,
            nft_id: record.nft_id.clone(),
            holder: record.holder().map(str::to_string),
            course: record
                .private_field(CertificateField::Course)
                .map(str::to_string),
            root_short: record.root_hash.as_deref().map(|r| short_hash(r).to_string()),
            salt: record.salt.clone(),
        })
        .collect()
}
