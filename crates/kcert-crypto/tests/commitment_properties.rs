//! # Commitment Properties
//!
//! Exercises the public builder/verifier API the way an issuing service
//! uses it: one builder per credential, outputs extracted and persisted as
//! JSON, verification done later from the persisted form only.

use kcert_core::CommitmentError;
use kcert_crypto::{leaf_hash, pair_hash, verify, CommitmentBuilder, InclusionProof};

fn build(pairs: &[(&str, &str)]) -> CommitmentBuilder {
    let mut builder = CommitmentBuilder::new();
    for (name, value) in pairs {
        builder.add_attribute(*name, *value).unwrap();
    }
    builder.build().unwrap();
    builder
}

#[test]
fn worked_three_attribute_example() {
    let builder = build(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let (ha, hb, hc) = (leaf_hash("A", "a"), leaf_hash("B", "b"), leaf_hash("C", "c"));
    let level1 = [pair_hash(&ha, &hb), hc.clone()];
    assert_eq!(builder.levels()[1], level1);
    assert_eq!(builder.root().unwrap(), pair_hash(&level1[0], &level1[1]));
}

#[test]
fn persisted_proofs_verify() {
    let pairs = [
        ("name", "Ana"),
        ("course", "Rust"),
        ("course_load", "12 horas"),
        ("location", "Fortaleza"),
        ("date", "2025-07-20"),
    ];
    let builder = build(&pairs);
    let root = builder.root().unwrap().to_string();

    let persisted: Vec<(String, String)> = pairs
        .iter()
        .map(|(name, _)| {
            let proof = builder.proof_for(name).unwrap();
            (name.to_string(), serde_json::to_string(proof).unwrap())
        })
        .collect();
    drop(builder);

    for ((name, json), (_, value)) in persisted.iter().zip(pairs.iter()) {
        let proof: InclusionProof = serde_json::from_str(json).unwrap();
        assert!(verify(name, value, &root, proof.steps()), "{name}");
        assert!(!verify(name, "tampered", &root, proof.steps()), "{name}");
    }
}

#[test]
fn hashes_are_lowercase_hex() {
    let builder = build(&[("a", "1"), ("b", "2"), ("c", "3")]);
    for level in builder.levels() {
        for hash in level {
            assert_eq!(hash.len(), 64);
            assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}

#[test]
fn misuse_is_reported() {
    let mut builder = CommitmentBuilder::new();
    assert_eq!(builder.build(), Err(CommitmentError::EmptyInput));
    assert!(matches!(
        builder.proof_for("name"),
        Err(CommitmentError::NotFound(_))
    ));
}
