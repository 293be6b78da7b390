// ⚙️ Configuration - Explicit MLS and site settings
// Replaces the implicit browser-storage settings with a config object that
// gets passed to whatever needs it

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// MLS CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlsConfig {
    /// API key for the listing provider
    #[serde(default)]
    pub api_key: String,

    /// Provider endpoint base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// MLS board identifier
    #[serde(default)]
    pub board_id: String,

    /// Local JSON file to load the inventory from; falls back to the sample
    /// inventory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listings_path: Option<PathBuf>,

    /// Whether the sync job should run automatically
    #[serde(default)]
    pub auto_sync: bool,
}

fn default_endpoint() -> String {
    "https://api.repliers.io".to_string()
}

impl Default for MlsConfig {
    fn default() -> Self {
        MlsConfig {
            api_key: String::new(),
            endpoint: default_endpoint(),
            board_id: String::new(),
            listings_path: None,
            auto_sync: false,
        }
    }
}

impl MlsConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Load from a file if it exists, otherwise the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(MlsConfig::default())
        }
    }

    /// Persist config as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Credentials present and plausible
    pub fn is_configured(&self) -> bool {
        self.api_key.len() >= 5 && !self.endpoint.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
