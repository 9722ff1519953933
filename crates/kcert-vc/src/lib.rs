//! # kcert-vc: Course Certificates
//!
//! Applies the attribute commitment from `kcert-crypto` to course-completion
//! certificates:
//!
//! - **Certificate** (`certificate.rs`): the certificate schema, its fixed
//!   commitment order, and root/proof generation for one certificate.
//!
//! - **Encoding** (`encoding.rs`): the `field|value||field|value` string a
//!   document carries so its display fields can be read back.
//!
//! - **Metadata** (`metadata.rs`): persisted certificate records and the
//!   on-ledger payload derived from them.
//!
//! - **Issuance** (`issuer.rs`, `sequence.rs`): turning certificate data into
//!   a record under an explicit nonce sequence.
//!
//! - **Registry** (`registry.rs`): verifying one disclosed field against the
//!   stored records.
//!
//! ## Crate Policy
//!
//! - Depends on `kcert-core` and `kcert-crypto` internally.
//! - Record I/O is JSON only; transport to documents or ledgers lives
//!   with the caller.

pub mod certificate;
pub mod encoding;
pub mod issuer;
pub mod metadata;
pub mod registry;
pub mod sequence;

pub use certificate::{
    commit_certificate, verify_certificate_field, CertificateCommitment, CertificateData,
    CertificateField,
};
pub use encoding::{decode_certificate_data, encode_certificate_data};
pub use issuer::CertificateIssuer;
pub use metadata::{CertificateRecord, LedgerPayload, MetadataStore};
pub use registry::{
    check_record, summarize, verify_field, FieldOutcome, RecordOutcome, RecordSelector,
    RecordSummary, VerificationReport,
};
pub use sequence::NonceSequence;
