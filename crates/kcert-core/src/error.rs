//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Commitment construction errors are programming errors on the caller's
//!   side and are surfaced immediately.
//! - A proof that fails to reproduce a root is NOT an error. Verifiers
//!   return `false` for it.

use thiserror::Error;

/// Top-level error type for kcert.
#[derive(Error, Debug)]
pub enum KcertError {
    /// Building or querying a commitment failed.
    #[error("commitment error: {0}")]
    Commitment(#[from] CommitmentError),

    /// A field name is not part of the certificate schema.
    #[error("unknown certificate field `{0}`")]
    UnknownField(String),

    /// No certificate record matched the requested selector.
    #[error("certificate record not found: {0}")]
    RecordNotFound(String),

    /// The delimited certificate data string could not be decoded.
    #[error("certificate data codec error: {0}")]
    Codec(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the commitment builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    /// `build()` was invoked before any attribute was added.
    #[error("cannot build a commitment over zero attributes")]
    EmptyInput,

    /// A proof was requested for a name that was never added, or before
    /// the tree was built.
    #[error("no inclusion proof for attribute `{0}`")]
    NotFound(String),

    /// Attribute names must be non-empty.
    #[error("attribute name must not be empty")]
    EmptyFieldName,

    /// The attribute name was already added to this builder.
    #[error("duplicate attribute name `{0}`")]
    DuplicateField(String),

    /// Attributes are frozen once the tree has been built.
    #[error("commitment already built; attribute `{0}` rejected")]
    AlreadyBuilt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_error_converts_into_top_level() {
        let err: KcertError = CommitmentError::EmptyInput.into();
        assert!(matches!(
            err,
            KcertError::Commitment(CommitmentError::EmptyInput)
        ));
        assert_eq!(
            err.to_string(),
            "commitment error: cannot build a commitment over zero attributes"
        );
    }

    #[test]
    fn not_found_names_the_field() {
        let err = CommitmentError::NotFound("course".to_string());
        assert_eq!(err.to_string(), "no inclusion proof for attribute `course`");
    }
}
