//! # kcert-cli: Certificate Commitment CLI
//!
//! Provides the `kcert` command-line interface over the certificate
//! commitment libraries.
//!
//! ## Subcommands
//!
//! - `kcert commit`: Root and per-field proofs for one certificate.
//! - `kcert prove`: Stateless check of one field against a root and proof.
//! - `kcert issue`: Assign a nonce, commit, and append a metadata record.
//! - `kcert verify`: Check a disclosed field against stored records.
//! - `kcert list`: Summarize stored records.
//! - `kcert payload`: Print the ledger metadata document of a record.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers return the
//!   process exit code (0 success, 1 verification failure).
//! - Business logic lives in `kcert-vc` and `kcert-crypto`.

pub mod commit;
pub mod config;
pub mod issue;
pub mod records;
pub mod verify;

#[cfg(test)]
pub(crate) mod testutil;

use std::path::PathBuf;

use kcert_vc::{CertificateIssuer, MetadataStore};

use crate::config::CliConfig;

/// Resolved settings shared by all subcommands.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the metadata JSON file.
    pub metadata: PathBuf,
    /// Ledger collection identifier.
    pub collection_id: String,
    /// Base of verification links.
    pub verify_base_url: String,
}

impl Settings {
    /// Merge the config file with command-line overrides.
    pub fn resolve(config: CliConfig, metadata_override: Option<PathBuf>) -> Self {
        Self {
            metadata: metadata_override.unwrap_or(config.metadata),
            collection_id: config.collection_id,
            verify_base_url: config.verify_base_url,
        }
    }

    /// The metadata store these settings point at.
    pub fn store(&self) -> MetadataStore {
        MetadataStore::new(&self.metadata)
    }

    /// An issuer for the configured collection.
    pub fn issuer(&self) -> CertificateIssuer {
        CertificateIssuer::new(&self.collection_id, &self.verify_base_url)
    }
}
