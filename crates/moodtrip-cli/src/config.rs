//! Application configuration

use moodtrip_lexicon::{BuilderConfig, LexiconConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level `moodtrip.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub lexicon: LexiconConfig,

    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from file, or use defaults if the file is absent
    pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = serde_yaml::from_str(&content)?;
            info!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

/// Trip catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file of trips
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// Maximum trips returned per recommendation
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            limit: default_limit(),
        }
    }
}

/// Inference history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Save each recommendation's inference
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: default_log_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/trips.json")
}

fn default_limit() -> usize {
    10
}

fn default_log_path() -> PathBuf {
    PathBuf::from("data/inferences.jsonl")
}

fn default_true() -> bool {
    true
}
