//! # SHA-256 Hashing Primitives
//!
//! - Leaf: `hex(SHA256(SHA256(name ":" value)))`. The inner digest is fed to
//!   the outer hash as raw bytes.
//! - Node: `hex(SHA256(min(a, b) || max(a, b)))` over the hex TEXT of the two
//!   children. Ordering the operands makes the node hash commutative.

use sha2::{Digest, Sha256};

use kcert_core::Attribute;

/// Length of a SHA-256 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = 64;

/// Length of the abbreviated hash used in human-facing listings.
pub const SHORT_HASH_LEN: usize = 16;

/// Compute the SHA-256 of raw bytes as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn double_sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(Sha256::digest(data)))
}

/// Compute the leaf hash for one attribute.
pub fn leaf_hash(name: &str, value: &str) -> String {
    double_sha256_hex(format!("{name}:{value}").as_bytes())
}

/// Leaf hash of an already validated attribute.
pub fn attribute_hash(attribute: &Attribute) -> String {
    double_sha256_hex(attribute.canonical().as_bytes())
}

/// Hash two child nodes into their parent.
///
/// The operands are ordered lexicographically before concatenation, so
/// `pair_hash(a, b) == pair_hash(b, a)`.
pub fn pair_hash(a: &str, b: &str) -> String {
    let (left, right) = if a > b { (b, a) } else { (a, b) };
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hex::encode(hasher.finalize())
}

/// True if `s` is exactly 64 lowercase hex characters.
pub fn is_digest_hex(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Abbreviate a hash for display. Never compare the result.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
