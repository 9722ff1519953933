//! # Commit and Prove Subcommands
//!
//! Stateless operations: `commit` prints the root and per-field proofs for
//! a certificate JSON file, `prove` checks one disclosed field against a
//! root and a proof file. Neither touches the metadata store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use kcert_crypto::{verify, InclusionProof};
use kcert_vc::{commit_certificate, CertificateData, CertificateField};

/// Arguments for `kcert commit`.
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Certificate data (JSON object with the certificate fields).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the commitment JSON here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `kcert prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Expected commitment root (64 hex chars).
    #[arg(long)]
    pub root: String,

    /// Disclosed field name.
    #[arg(long)]
    pub field: String,

    /// Disclosed value.
    #[arg(long)]
    pub value: String,

    /// JSON file holding the proof steps.
    #[arg(long, value_name = "FILE")]
    pub proof: PathBuf,
}

/// Read a certificate data file.
pub fn read_certificate(path: &Path) -> Result<CertificateData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read certificate data: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse certificate data: {}", path.display()))
}

/// Execute `kcert commit`.
pub fn run_commit(args: &CommitArgs) -> Result<u8> {
    let data = read_certificate(&args.file)?;
    let commitment = commit_certificate(&data).context("failed to commit certificate")?;
    tracing::info!(root = %commitment.root_hash, fields = commitment.proofs.len(), "committed");

    let json = serde_json::to_string_pretty(&commitment)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Commitment written to {}", path.display());
            println!("  Root: {}", commitment.root_hash);
        }
        None => println!("{json}"),
    }
    Ok(0)
}

/// Execute `kcert prove`.
///
/// An unreadable or malformed proof is reported as a failed check, not as
/// an error.
pub fn run_prove(args: &ProveArgs) -> Result<u8> {
    if let Err(e) = args.field.parse::<CertificateField>() {
        tracing::warn!("{e}; checking anyway");
    }

    let content = std::fs::read_to_string(&args.proof)
        .with_context(|| format!("failed to read proof: {}", args.proof.display()))?;
    let proof: InclusionProof = match serde_json::from_str(&content) {
        Ok(proof) => proof,
        Err(e) => {
            println!("FAIL: proof is not a list of steps: {e}");
            return Ok(1);
        }
    };

    if verify(&args.field, &args.value, &args.root, proof.steps()) {
        println!("OK: field '{}' is committed under the root", args.field);
        Ok(0)
    } else {
        println!("FAIL: field '{}' does not verify against the root", args.field);
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("cert.json");
        let data = json!({
            "name": "Ana Lima",
            "course": "Rust Fundamentals",
            "course_load": "8 horas",
            "location": "Fortaleza",
            "date": "Agosto de 2025",
            "instructor": "Bia",
            "instructor_title": "Lead",
            "issuer": "Klever",
        });
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
        path
    }

    fn commit_to_file(dir: &Path) -> serde_json::Value {
        let out = dir.join("commitment.json");
        let args = CommitArgs {
            file: write_sample(dir),
            output: Some(out.clone()),
        };
        assert_eq!(run_commit(&args).unwrap(), 0);
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap()
    }

    #[test]
    fn commit_writes_root_and_proofs() {
        let dir = tempfile::tempdir().unwrap();
        let commitment = commit_to_file(dir.path());
        assert_eq!(commitment["rootHash"].as_str().unwrap().len(), 64);
        assert_eq!(commitment["proofs"].as_object().unwrap().len(), 10);
    }

    #[test]
    fn commit_rejects_incomplete_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "Ana"}"#).unwrap();
        let args = CommitArgs {
            file: path,
            output: None,
        };
        assert!(run_commit(&args).is_err());
    }

    #[test]
    fn prove_accepts_and_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let commitment = commit_to_file(dir.path());
        let proof_path = dir.path().join("name.proof.json");
        std::fs::write(&proof_path, commitment["proofs"]["nameProof"].to_string()).unwrap();

        let mut args = ProveArgs {
            root: commitment["rootHash"].as_str().unwrap().to_string(),
            field: "name".to_string(),
            value: "Ana Lima".to_string(),
            proof: proof_path,
        };
        assert_eq!(run_prove(&args).unwrap(), 0);

        args.value = "Ana Silva".to_string();
        assert_eq!(run_prove(&args).unwrap(), 1);
    }

    #[test]
    fn prove_reports_malformed_proof_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let proof_path = dir.path().join("bad.json");
        std::fs::write(&proof_path, r#"{"hash": "00"}"#).unwrap();
        let args = ProveArgs {
            root: "00".repeat(32),
            field: "name".to_string(),
            value: "Ana".to_string(),
            proof: proof_path,
        };
        assert_eq!(run_prove(&args).unwrap(), 1);

        let missing = ProveArgs {
            proof: dir.path().join("missing.json"),
            ..args
        };
        assert!(run_prove(&missing).is_err());
    }
}
