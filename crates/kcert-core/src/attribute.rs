//! # Credential Attributes
//!
//! An [`Attribute`] is one named value of a credential that can be proven
//! on its own. Its canonical encoding, `"name:value"`, is what the leaf
//! hash is computed over.

use serde::{Deserialize, Serialize};

use crate::error::CommitmentError;

/// A non-empty attribute name.
///
/// The name is part of the committed leaf data, so it is kept verbatim:
/// no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a field name.
    ///
    /// # Errors
    ///
    /// Returns [`CommitmentError::EmptyFieldName`] for an empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, CommitmentError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CommitmentError::EmptyFieldName);
        }
        Ok(Self(name))
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldName {
    type Error = CommitmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `(name, value)` pair subject to independent proof.
///
/// Values may be empty. Whether an optional attribute is present at all is
/// decided by whoever assembles the attribute list; nothing here turns a
/// missing value into an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name.
    pub name: FieldName,
    /// The attribute value.
    pub value: String,
}

impl Attribute {
    /// Create an attribute, validating the name.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, CommitmentError> {
        Ok(Self {
            name: FieldName::new(name)?,
            value: value.into(),
        })
    }

    /// The canonical leaf encoding `"name:value"`.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_name_rejected() {
        assert_eq!(FieldName::new(""), Err(CommitmentError::EmptyFieldName));
        assert!(Attribute::new("", "x").is_err());
    }

    #[test]
    fn empty_value_allowed() {
        let attr = Attribute::new("issuer", "").unwrap();
        assert_eq!(attr.canonical(), "issuer:");
    }

    #[test]
    fn name_is_not_normalized() {
        let name = FieldName::new(" Name ").unwrap();
        assert_eq!(name.as_str(), " Name ");
    }

    #[test]
    fn field_name_deserialize_rejects_empty() {
        let ok: Result<FieldName, _> = serde_json::from_str("\"course\"");
        assert_eq!(ok.unwrap().as_str(), "course");
        let err: Result<FieldName, _> = serde_json::from_str("\"\"");
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn canonical_joins_with_colon(name in "[a-z_]{1,12}", value in ".*") {
            let attr = Attribute::new(name.clone(), value.clone()).unwrap();
            prop_assert_eq!(attr.canonical(), format!("{name}:{value}"));
        }
    }
}
