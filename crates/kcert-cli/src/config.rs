//! # CLI Configuration
//!
//! Optional YAML file selected with `--config`:
//!
//! ```yaml
//! metadata: certificates/metadata.json
//! collection_id: KCERT-V2YJ
//! verify_base_url: https://certs.example.org/verify
//! ```
//!
//! Missing keys take the defaults below. Unknown keys are rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use kcert_core::KcertError;

/// Default metadata file, relative to the working directory.
pub const DEFAULT_METADATA_PATH: &str = "certificates/metadata.json";

/// Default ledger collection identifier.
pub const DEFAULT_COLLECTION_ID: &str = "KCERT-V2YJ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub metadata: PathBuf,
    pub collection_id: String,
    pub verify_base_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            metadata: PathBuf::from(DEFAULT_METADATA_PATH),
            collection_id: DEFAULT_COLLECTION_ID.to_string(),
            verify_base_url: String::new(),
        }
    }
}

impl CliConfig {
    /// Parse a YAML config document.
    pub fn from_yaml(content: &str) -> Result<Self, KcertError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| KcertError::Config(e.to_string()))
    }

    /// Load the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, KcertError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KcertError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, KcertError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load_or_default(None).unwrap();
        assert_eq!(config.metadata, PathBuf::from(DEFAULT_METADATA_PATH));
        assert_eq!(config.collection_id, "KCERT-V2YJ");
        assert_eq!(config, CliConfig::from_yaml("").unwrap());
    }

    #[test]
    fn test_partial_yaml() {
        let config = CliConfig::from_yaml("collection_id: KCERT-ABCD\n").unwrap();
        assert_eq!(config.collection_id, "KCERT-ABCD");
        assert_eq!(config.metadata, PathBuf::from(DEFAULT_METADATA_PATH));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CliConfig::from_yaml("network: mainnet\n").unwrap_err();
        assert!(matches!(err, KcertError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kcert.yaml");
        std::fs::write(
            &path,
            "metadata: out/meta.json\nverify_base_url: https://v.example.org\n",
        )
        .unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.metadata, PathBuf::from("out/meta.json"));
        assert_eq!(config.verify_base_url, "https://v.example.org");

        assert!(CliConfig::load(&dir.path().join("missing.yaml")).is_err());
    }
}
