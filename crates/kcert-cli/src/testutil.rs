//! Shared fixtures for subcommand tests.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::config::CliConfig;
use crate::Settings;

/// Settings pointing at a metadata file under `dir`.
pub(crate) fn settings(dir: &Path) -> Settings {
    let config = CliConfig {
        verify_base_url: "https://certs.example.org/verify".to_string(),
        ..CliConfig::default()
    };
    Settings::resolve(config, Some(dir.join("certificates").join("metadata.json")))
}

/// Write a certificate data file for `name` and return its path.
pub(crate) fn write_data(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name.replace(' ', "_")));
    let data = json!({
        "name": name,
        "course": "Rust Fundamentals",
        "course_load": "8 horas",
        "location": "Fortaleza",
        "date": "Agosto de 2025",
        "instructor": "Bia",
        "instructor_title": "Lead",
        "issuer": "Klever",
    });
    std::fs::write(&path, data.to_string()).unwrap();
    path
}
