//! # kcert-crypto: Commitment Primitives
//!
//! Provides the cryptographic core of kcert:
//!
//! - **SHA-256 helpers** (`sha256.rs`): the double-hashed attribute leaf and
//!   the sorted-pair node hash.
//! - **Merkle commitment** (`merkle.rs`): the [`CommitmentBuilder`] that folds
//!   an ordered attribute list into a root and one inclusion proof per
//!   attribute, and [`verify`], the stateless proof replay.
//!
//! ## Crate Policy
//!
//! - Depends only on `kcert-core` internally.
//! - Pure code: no I/O, no logging, no shared state.
//! - All hashes cross the public API as 64-char lowercase hex strings.

pub mod merkle;
pub mod sha256;

pub use merkle::{verify, Commitment, CommitmentBuilder, InclusionProof, Leaf, Position, ProofStep};
pub use sha256::{
    attribute_hash, is_digest_hex, leaf_hash, pair_hash, sha256_hex, short_hash,
};
