//! # Selective Disclosure Flow
//!
//! Issues certificates into a metadata file, reloads them, and checks that
//! a single disclosed field verifies from the published payload alone:
//! root plus that field's proof, with no other attribute values.

use kcert_crypto::InclusionProof;
use kcert_vc::{
    verify_certificate_field, verify_field, CertificateData, CertificateIssuer, MetadataStore,
    NonceSequence, RecordSelector,
};

fn certificate(name: &str) -> CertificateData {
    CertificateData {
        name: name.to_string(),
        course: "Smart Contracts na Prática".to_string(),
        course_load: "12 horas".to_string(),
        location: "Fortaleza".to_string(),
        date: "Julho de 2025".to_string(),
        instructor: "Nicollas Gabriel".to_string(),
        instructor_title: "Blockchain Leader".to_string(),
        issuer: String::new(),
        nft_id: String::new(),
        pdf_hash: String::new(),
    }
}

#[test]
fn issued_records_verify_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = MetadataStore::new(dir.path().join("metadata.json"));
    let issuer = CertificateIssuer::new("KCERT-TEST", "https://verify.example.org");

    let mut seq = NonceSequence::after(&store.load().unwrap());
    for name in ["Ana Lima", "Bruno Reis", "Carla Dias"] {
        let record = issuer.issue(certificate(name), &mut seq).unwrap();
        store.append(record).unwrap();
    }

    let records = store.load().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(NonceSequence::after(&records).peek(), 4);

    let report = verify_field(&records, &RecordSelector::Nonce(2), "name", "Bruno Reis").unwrap();
    assert!(report.is_success());

    let report = verify_field(
        &records,
        &RecordSelector::NftId("KCERT-TEST/3".to_string()),
        "name",
        "Bruno Reis",
    )
    .unwrap();
    assert!(!report.is_success());

    let report = verify_field(&records, &RecordSelector::Any, "location", "Fortaleza").unwrap();
    assert_eq!(report.verified_count(), 3);
}

#[test]
fn ledger_payload_alone_proves_one_field() {
    let issuer = CertificateIssuer::new("KCERT-TEST", "");
    let mut seq = NonceSequence::default();
    let record = issuer.issue(certificate("Ana Lima"), &mut seq).unwrap();

    // Only the published payload crosses to the verifier.
    let published = serde_json::to_string(&record.ledger_payload()).unwrap();
    assert!(!published.contains("Ana Lima"));

    let payload: serde_json::Value = serde_json::from_str(&published).unwrap();
    let root = payload["rootHash"].as_str().unwrap();
    let proof: InclusionProof =
        serde_json::from_value(payload["proofs"]["nameProof"].clone()).unwrap();

    assert!(verify_certificate_field("name", "Ana Lima", root, &proof));
    assert!(!verify_certificate_field("name", "Ana  Lima", root, &proof));
    assert!(!verify_certificate_field("course", "Ana Lima", root, &proof));
}

#[test]
fn proof_from_one_certificate_fails_on_another() {
    let issuer = CertificateIssuer::new("KCERT-TEST", "");
    let mut seq = NonceSequence::default();
    let first = issuer.issue(certificate("Ana Lima"), &mut seq).unwrap();
    let second = issuer.issue(certificate("Ana Lima"), &mut seq).unwrap();

    let proof = first.proof_for("course").unwrap().unwrap();
    let course = "Smart Contracts na Prática";
    assert!(verify_certificate_field(
        "course",
        course,
        first.root_hash.as_deref().unwrap(),
        &proof
    ));
    assert!(!verify_certificate_field(
        "course",
        course,
        second.root_hash.as_deref().unwrap(),
        &proof
    ));
}
