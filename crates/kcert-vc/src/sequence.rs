//! # Nonce Sequence
//!
//! Certificates are minted under increasing nonces. The next nonce is an
//! explicit value owned by the caller and threaded through issuance, never
//! process-wide state.

use serde::{Deserialize, Serialize};

use crate::metadata::CertificateRecord;

/// The next nonce to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceSequence {
    next: u64,
}

impl NonceSequence {
    /// Start at `next`. Nonce 0 is reserved, so 0 starts at 1.
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// Continue after the highest nonce in `records` (1 if there are none).
    pub fn after(records: &[CertificateRecord]) -> Self {
        let highest = records.iter().map(|r| r.nonce).max().unwrap_or(0);
        Self::starting_at(highest.saturating_add(1))
    }

    /// The nonce the next call to [`next_nonce`](Self::next_nonce) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Take the next nonce.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.next;
        self.next = self.next.saturating_add(1);
        nonce
    }
}

impl Default for NonceSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
