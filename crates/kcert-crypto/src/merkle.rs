//! # Attribute Commitment Tree
//!
//! A binary hash tree over the ordered attributes of one credential. The
//! root commits to every `(name, value)` pair and to their order; each
//! attribute gets an inclusion proof that lets it be disclosed and checked
//! on its own.
//!
//! ## Algorithm
//!
//! - Level 0 is the list of leaf hashes in insertion order.
//! - Level `k+1` pairs adjacent entries of level `k` left-to-right with the
//!   sorted-pair hash. A trailing unpaired entry is promoted unchanged.
//! - Folding stops when one hash remains: the root.
//!
//! A proof records, per level, the sibling hash and the side it sits on.
//! Levels where the path node is the promoted trailing entry contribute no
//! step. Because the pair hash is commutative the side is informational:
//! [`verify`] checks that it is well-formed but never branches on it.

use serde::{Deserialize, Serialize};

use kcert_core::{Attribute, CommitmentError, FieldName};

use crate::sha256::{attribute_hash, is_digest_hex, leaf_hash, pair_hash};

// ---------------------------------------------------------------------------
// Proof representation
// ---------------------------------------------------------------------------

/// Which side of the path node a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Sibling precedes the path node.
    Left,
    /// Sibling follows the path node.
    Right,
}

impl Position {
    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a wire tag. Only the exact lowercase tags are accepted.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an inclusion proof.
///
/// Both fields are kept as the raw persisted strings so that a proof read
/// back from storage reaches [`verify`] unmodified, malformed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// The sibling hash (64 hex chars).
    #[serde(alias = "siblingHash")]
    pub hash: String,
    /// `"left"` or `"right"`.
    pub position: String,
}

impl ProofStep {
    /// Create a well-formed proof step.
    pub fn new(hash: impl Into<String>, position: Position) -> Self {
        Self {
            hash: hash.into(),
            position: position.as_str().to_string(),
        }
    }

    /// Parse the position tag, `None` if it is not `left`/`right`.
    pub fn side(&self) -> Option<Position> {
        Position::parse(&self.position)
    }
}

/// The ordered sibling path from one leaf to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InclusionProof(Vec<ProofStep>);

impl InclusionProof {
    /// Wrap an ordered list of steps (leaf to root).
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self(steps)
    }

    /// The steps, leaf to root.
    pub fn steps(&self) -> &[ProofStep] {
        &self.0
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if every step carries a 64-char lowercase hex hash and a known
    /// position tag. [`verify`] rejects proofs that are not.
    pub fn is_well_formed(&self) -> bool {
        self.0
            .iter()
            .all(|step| is_digest_hex(&step.hash) && step.side().is_some())
    }
}

impl From<Vec<ProofStep>> for InclusionProof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self(steps)
    }
}

impl AsRef<[ProofStep]> for InclusionProof {
    fn as_ref(&self) -> &[ProofStep] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

/// A hashed attribute at a fixed position in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// The originating attribute name.
    pub field: FieldName,
    /// Position in the ordered attribute list.
    pub index: usize,
    /// `H(H(name ":" value))` as hex.
    pub hash: String,
}

/// Fold one level into the next, promoting a trailing odd entry.
fn fold_level(level: &[String]) -> Vec<String> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for i in (0..level.len()).step_by(2) {
        next.push(match level.get(i + 1) {
            Some(right) => pair_hash(&level[i], right),
            None => level[i].clone(),
        });
    }
    next
}

/// Build every level from the leaf hashes up to the single root.
fn build_levels(leaf_hashes: Vec<String>) -> Vec<Vec<String>> {
    let mut levels = vec![leaf_hashes];
    while let Some(top) = levels.last().filter(|level| level.len() > 1) {
        let next = fold_level(top);
        levels.push(next);
    }
    levels
}

/// Collect the sibling path for `leaf_index`.
fn proof_path(levels: &[Vec<String>], leaf_index: usize) -> InclusionProof {
    let below_root = levels.split_last().map_or(&[][..], |(_, rest)| rest);
    let mut steps = Vec::with_capacity(below_root.len());
    let mut index = leaf_index;

    for level in below_root {
        let (sibling, position) = if index % 2 == 0 {
            (index + 1, Position::Right)
        } else {
            (index - 1, Position::Left)
        };
        if let Some(hash) = level.get(sibling) {
            steps.push(ProofStep::new(hash.clone(), position));
        }
        index /= 2;
    }

    InclusionProof(steps)
}

/// Builds the commitment for one credential.
///
/// Create one builder per credential, add its attributes in order, call
/// [`build`](Self::build), then read proofs. Attributes are frozen once the
/// tree is built.
#[derive(Debug, Clone, Default)]
pub struct CommitmentBuilder {
    leaves: Vec<Leaf>,
    levels: Vec<Vec<String>>,
    proofs: Vec<InclusionProof>,
    built: bool,
}

impl CommitmentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute as the next leaf.
    ///
    /// # Errors
    ///
    /// - [`CommitmentError::EmptyFieldName`] for an empty name.
    /// - [`CommitmentError::DuplicateField`] if the name was already added.
    /// - [`CommitmentError::AlreadyBuilt`] after [`build`](Self::build).
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CommitmentError> {
        self.add(Attribute::new(name, value)?)
    }

    /// Append an already validated attribute.
    pub fn add(&mut self, attribute: Attribute) -> Result<(), CommitmentError> {
        if self.built {
            return Err(CommitmentError::AlreadyBuilt(attribute.name.into()));
        }
        if self.leaves.iter().any(|leaf| leaf.field == attribute.name) {
            return Err(CommitmentError::DuplicateField(attribute.name.into()));
        }
        let hash = attribute_hash(&attribute);
        self.leaves.push(Leaf {
            field: attribute.name,
            index: self.leaves.len(),
            hash,
        });
        Ok(())
    }

    /// Materialize all levels and proofs, returning the root.
    ///
    /// Repeated calls return the same root.
    ///
    /// # Errors
    ///
    /// [`CommitmentError::EmptyInput`] if no attribute was added.
    pub fn build(&mut self) -> Result<String, CommitmentError> {
        if self.leaves.is_empty() {
            return Err(CommitmentError::EmptyInput);
        }
        if !self.built {
            let levels = build_levels(self.leaves.iter().map(|l| l.hash.clone()).collect());
            self.proofs = (0..self.leaves.len())
                .map(|index| proof_path(&levels, index))
                .collect();
            self.levels = levels;
            self.built = true;
        }
        self.root()
            .map(str::to_string)
            .ok_or(CommitmentError::EmptyInput)
    }

    /// The inclusion proof for `name`.
    ///
    /// # Errors
    ///
    /// [`CommitmentError::NotFound`] if `name` was never added or the tree
    /// has not been built yet.
    pub fn proof_for(&self, name: &str) -> Result<&InclusionProof, CommitmentError> {
        if !self.built {
            return Err(CommitmentError::NotFound(name.to_string()));
        }
        self.leaves
            .iter()
            .find(|leaf| leaf.field.as_str() == name)
            .and_then(|leaf| self.proofs.get(leaf.index))
            .ok_or_else(|| CommitmentError::NotFound(name.to_string()))
    }

    /// The root, once built.
    pub fn root(&self) -> Option<&str> {
        self.levels
            .last()
            .and_then(|top| top.first())
            .map(String::as_str)
    }

    /// All levels, leaves first. Empty before [`build`](Self::build).
    pub fn levels(&self) -> &[Vec<String>] {
        &self.levels
    }

    /// The leaves in insertion order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Number of attributes added.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True if no attribute was added.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Build (if needed) and move the outputs into a [`Commitment`].
    pub fn finish(mut self) -> Result<Commitment, CommitmentError> {
        let root = self.build()?;
        let level_count = self.levels.len();
        let proofs = self
            .leaves
            .into_iter()
            .zip(self.proofs)
            .map(|(leaf, proof)| (leaf.field, proof))
            .collect();
        Ok(Commitment {
            root,
            proofs,
            level_count,
        })
    }
}

/// The extracted outputs of a built tree: root plus one proof per attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    /// The root hash (64 hex chars).
    pub root: String,
    /// One proof per attribute, in insertion order.
    pub proofs: Vec<(FieldName, InclusionProof)>,
    /// Number of tree levels including the leaves.
    pub level_count: usize,
}

impl Commitment {
    /// Build a commitment over `attributes` in one step.
    pub fn from_attributes(
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Result<Self, CommitmentError> {
        let mut builder = CommitmentBuilder::new();
        for attribute in attributes {
            builder.add(attribute)?;
        }
        builder.finish()
    }

    /// The proof for `name`, if it was committed.
    pub fn proof_for(&self, name: &str) -> Option<&InclusionProof> {
        self.proofs
            .iter()
            .find(|(field, _)| field.as_str() == name)
            .map(|(_, proof)| proof)
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Check a claimed `(name, value)` against `root` using `proof`.
///
/// Recomputes the leaf, folds in each sibling with the sorted-pair hash and
/// compares the result to `root` exactly. Returns `false` for any mismatch,
/// including truncated or extended proofs, a sibling hash that is not 64
/// lowercase hex chars, or an unknown position tag. Never panics.
pub fn verify(name: &str, value: &str, root: &str, proof: &[ProofStep]) -> bool {
    let mut current = leaf_hash(name, value);
    for step in proof {
        if !is_digest_hex(&step.hash) || step.side().is_none() {
            return false;
        }
        current = pair_hash(&current, &step.hash);
    }
    current == root
}
