//! # Certificate Metadata Records
//!
//! One [`CertificateRecord`] per issued certificate, persisted as a JSON
//! array. Field names follow the established file layout: `rootHash`,
//! `_privateData`, and one `<field>Proof` key per committed field at the
//! top level of the record.
//!
//! The ledger only ever sees the [`LedgerPayload`]: hashes and proofs, no
//! attribute values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use kcert_core::KcertError;
use kcert_crypto::InclusionProof;

use crate::certificate::{CertificateCommitment, CertificateField};

/// A persisted certificate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Ledger mint sequence number.
    pub nonce: u64,
    /// `<collection>/<nonce>`.
    pub nft_id: String,
    /// SHA-256 of the final rendered document, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Commitment root over all certificate fields.
    #[serde(rename = "rootHash", default, skip_serializing_if = "Option::is_none")]
    pub root_hash: Option<String>,
    /// Public verification link.
    #[serde(default)]
    pub verify_url: String,
    /// Opaque salt carried for the ledger record; not part of the commitment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    /// Display field values. Never published.
    #[serde(rename = "_privateData", default, skip_serializing_if = "Option::is_none")]
    pub private_data: Option<BTreeMap<String, String>>,
    /// `<field>Proof` entries and any other keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CertificateRecord {
    /// Create a record with no commitment attached yet.
    pub fn new(nonce: u64, nft_id: impl Into<String>) -> Self {
        Self {
            nonce,
            nft_id: nft_id.into(),
            hash: None,
            root_hash: None,
            verify_url: String::new(),
            salt: None,
            private_data: None,
            extra: BTreeMap::new(),
        }
    }

    /// The stored proof for `field`.
    ///
    /// Returns `Ok(None)` when the record has no (or a `null`) proof for the
    /// field.
    ///
    /// # Errors
    ///
    /// [`KcertError::Serialization`] if the stored value is not a list of
    /// proof steps.
    pub fn proof_for(&self, field: &str) -> Result<Option<InclusionProof>, KcertError> {
        match self.extra.get(&format!("{field}Proof")) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }

    /// Attach a commitment: root plus every `<field>Proof` entry.
    pub fn set_commitment(&mut self, commitment: &CertificateCommitment) -> Result<(), KcertError> {
        self.root_hash = Some(commitment.root_hash.clone());
        for (key, proof) in &commitment.proofs {
            self.extra.insert(key.clone(), serde_json::to_value(proof)?);
        }
        Ok(())
    }

    /// The document hash, also accepted under the legacy `pdf_hash` key.
    pub fn document_hash(&self) -> Option<&str> {
        self.hash
            .as_deref()
            .or_else(|| self.extra.get("pdf_hash").and_then(Value::as_str))
    }

    /// The certificate holder, if private data is present.
    pub fn holder(&self) -> Option<&str> {
        self.private_field(CertificateField::Name)
    }

    /// A display field value from the private data.
    pub fn private_field(&self, field: CertificateField) -> Option<&str> {
        self.private_data
            .as_ref()
            .and_then(|data| data.get(field.as_str()))
            .map(String::as_str)
    }

    /// The on-ledger metadata document for this record.
    ///
    /// Carries hashes and the proofs of every disclosable field. Missing
    /// proofs are published as empty lists.
    pub fn ledger_payload(&self) -> LedgerPayload {
        let proofs = CertificateField::ALL
            .iter()
            .filter(|field| field.is_disclosable())
            .map(|field| {
                let key = field.proof_key();
                let proof = self
                    .extra
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new()));
                (key, proof)
            })
            .collect();

        LedgerPayload {
            hash: self.document_hash().unwrap_or_default().to_string(),
            root_hash: self.root_hash.clone().unwrap_or_default(),
            nft_id: self.nft_id.clone(),
            verify_url: self.verify_url.clone(),
            proofs,
        }
    }
}

/// Metadata stored on the ledger token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerPayload {
    /// Document hash.
    pub hash: String,
    /// Commitment root.
    #[serde(rename = "rootHash")]
    pub root_hash: String,
    /// Token identifier.
    pub nft_id: String,
    /// Public verification link.
    pub verify_url: String,
    /// `<field>Proof` → proof steps.
    pub proofs: BTreeMap<String, Value>,
}

/// A JSON file of certificate records.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<CertificateRecord>, KcertError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the file contents with `records`.
    ///
    /// Writes to a sibling temporary file first and renames it into place.
    pub fn save(&self, records: &[CertificateRecord]) -> Result<(), KcertError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Load, append `record`, save.
    pub fn append(&self, record: CertificateRecord) -> Result<(), KcertError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}
