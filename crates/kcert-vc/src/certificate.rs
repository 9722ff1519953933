//! # Certificate Schema and Commitment
//!
//! A course-completion certificate commits to ten fields in a fixed order.
//! The order is part of the committed data: reordering the schema would
//! change every root issued under it.
//!
//! `course_load`, `issuer`, `nft_id` and `pdf_hash` may be absent from
//! input JSON. The schema commits them as the empty string in that case,
//! so every certificate has the same tree shape.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use kcert_core::{Attribute, CommitmentError, KcertError};
use kcert_crypto::{verify, Commitment, InclusionProof};

/// A field of the certificate schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateField {
    /// Certificate holder.
    Name,
    /// Course title.
    Course,
    /// Course workload, e.g. "12 horas".
    CourseLoad,
    /// Where the course took place.
    Location,
    /// Completion date as displayed.
    Date,
    /// Instructor name.
    Instructor,
    /// Instructor title.
    InstructorTitle,
    /// Issuing organization.
    Issuer,
    /// Ledger token identifier, `<collection>/<nonce>`.
    NftId,
    /// SHA-256 of the rendered document.
    PdfHash,
}

impl CertificateField {
    /// Every field in commitment order.
    pub const ALL: [Self; 10] = [
        Self::Name,
        Self::Course,
        Self::CourseLoad,
        Self::Location,
        Self::Date,
        Self::Instructor,
        Self::InstructorTitle,
        Self::Issuer,
        Self::NftId,
        Self::PdfHash,
    ];

    /// Fields shown on the document itself.
    pub const DISPLAY: [Self; 8] = [
        Self::Name,
        Self::Course,
        Self::CourseLoad,
        Self::Location,
        Self::Date,
        Self::Instructor,
        Self::InstructorTitle,
        Self::Issuer,
    ];

    /// Returns the attribute name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Course => "course",
            Self::CourseLoad => "course_load",
            Self::Location => "location",
            Self::Date => "date",
            Self::Instructor => "instructor",
            Self::InstructorTitle => "instructor_title",
            Self::Issuer => "issuer",
            Self::NftId => "nft_id",
            Self::PdfHash => "pdf_hash",
        }
    }

    /// The key under which this field's proof is persisted.
    pub fn proof_key(&self) -> String {
        format!("{}Proof", self.as_str())
    }

    /// Whether the field's proof is published. The document hash is not:
    /// it can only be computed after the proofs are embedded.
    pub fn is_disclosable(&self) -> bool {
        !matches!(self, Self::PdfHash)
    }
}

impl std::fmt::Display for CertificateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateField {
    type Err = KcertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| KcertError::UnknownField(s.to_string()))
    }
}

/// The attribute values of one certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateData {
    pub name: String,
    pub course: String,
    #[serde(default)]
    pub course_load: String,
    pub location: String,
    pub date: String,
    pub instructor: String,
    pub instructor_title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub nft_id: String,
    #[serde(default)]
    pub pdf_hash: String,
}

impl CertificateData {
    /// The value committed for `field`.
    pub fn value_of(&self, field: CertificateField) -> &str {
        match field {
            CertificateField::Name => &self.name,
            CertificateField::Course => &self.course,
            CertificateField::CourseLoad => &self.course_load,
            CertificateField::Location => &self.location,
            CertificateField::Date => &self.date,
            CertificateField::Instructor => &self.instructor,
            CertificateField::InstructorTitle => &self.instructor_title,
            CertificateField::Issuer => &self.issuer,
            CertificateField::NftId => &self.nft_id,
            CertificateField::PdfHash => &self.pdf_hash,
        }
    }

    /// The ordered attribute list fed to the commitment tree.
    pub fn attributes(&self) -> Result<Vec<Attribute>, CommitmentError> {
        CertificateField::ALL
            .iter()
            .map(|field| Attribute::new(field.as_str(), self.value_of(*field)))
            .collect()
    }

    /// The display fields as a name → value map.
    pub fn display_fields(&self) -> BTreeMap<String, String> {
        CertificateField::DISPLAY
            .iter()
            .map(|field| (field.as_str().to_string(), self.value_of(*field).to_string()))
            .collect()
    }
}

/// Root and per-field proofs for one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateCommitment {
    /// The commitment root (64 hex chars).
    #[serde(rename = "rootHash")]
    pub root_hash: String,
    /// Proofs keyed by `<field>Proof`.
    pub proofs: BTreeMap<String, InclusionProof>,
}

impl CertificateCommitment {
    /// The proof for `field`.
    pub fn proof(&self, field: CertificateField) -> Option<&InclusionProof> {
        self.proofs.get(&field.proof_key())
    }
}

/// Commit to every field of `data` in schema order.
pub fn commit_certificate(data: &CertificateData) -> Result<CertificateCommitment, CommitmentError> {
    let commitment = Commitment::from_attributes(data.attributes()?)?;
    let proofs = commitment
        .proofs
        .into_iter()
        .map(|(field, proof)| (format!("{field}Proof"), proof))
        .collect();
    Ok(CertificateCommitment {
        root_hash: commitment.root,
        proofs,
    })
}

/// Check one disclosed certificate field against a root.
pub fn verify_certificate_field(
    field: &str,
    value: &str,
    root_hash: &str,
    proof: &InclusionProof,
) -> bool {
    verify(field, value, root_hash, proof.steps())
}
