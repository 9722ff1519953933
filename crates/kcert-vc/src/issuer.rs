//! # Certificate Issuance
//!
//! Turns certificate data into a committed [`CertificateRecord`]. The token
//! identifier is itself a committed field, so it is assigned before the
//! tree is built.

use serde::{Deserialize, Serialize};

use kcert_core::KcertError;
use kcert_crypto::short_hash;

use crate::certificate::{commit_certificate, CertificateData};
use crate::metadata::CertificateRecord;
use crate::sequence::NonceSequence;

/// Issues certificate records for one token collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateIssuer {
    /// Ledger collection identifier, e.g. `KCERT-V2YJ`.
    pub collection_id: String,
    /// Base of the public verification link. Empty disables links.
    pub verify_base_url: String,
}

impl CertificateIssuer {
    pub fn new(collection_id: impl Into<String>, verify_base_url: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            verify_base_url: verify_base_url.into(),
        }
    }

    /// The token identifier for `nonce`.
    pub fn nft_id(&self, nonce: u64) -> String {
        format!("{}/{nonce}", self.collection_id)
    }

    /// The verification link for `nft_id`.
    pub fn verify_url(&self, nft_id: &str) -> String {
        if self.verify_base_url.is_empty() {
            return String::new();
        }
        format!("{}?nft={nft_id}", self.verify_base_url)
    }

    /// Assign the next nonce to `data`, commit it, and build its record.
    pub fn issue(
        &self,
        mut data: CertificateData,
        sequence: &mut NonceSequence,
    ) -> Result<CertificateRecord, KcertError> {
        let nonce = sequence.next_nonce();
        let nft_id = self.nft_id(nonce);
        data.nft_id = nft_id.clone();

        let commitment = commit_certificate(&data)?;

        let mut record = CertificateRecord::new(nonce, nft_id);
        record.set_commitment(&commitment)?;
        record.verify_url = self.verify_url(&record.nft_id);
        if !data.pdf_hash.is_empty() {
            record.hash = Some(data.pdf_hash.clone());
        }
        record.private_data = Some(data.display_fields());

        tracing::info!(
            nonce,
            nft_id = %record.nft_id,
            root = short_hash(&commitment.root_hash),
            "issued certificate record"
        );
        Ok(record)
    }
}
