//! # kcert-core: Foundational Types
//!
//! Defines the primitives every other kcert crate builds on:
//!
//! - **Attributes** (`attribute.rs`): a validated [`FieldName`] paired with a
//!   string value. Insertion order of attributes is part of what a credential
//!   commits to, so collections of attributes are always ordered `Vec`s.
//!
//! - **Errors** (`error.rs`): the structured error hierarchy. Construction-time
//!   misuse (no attributes, unknown field, duplicate field) is an error;
//!   verification mismatch is not, and is reported as a plain `bool`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `kcert-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod attribute;
pub mod error;

pub use attribute::{Attribute, FieldName};
pub use error::{CommitmentError, KcertError};
