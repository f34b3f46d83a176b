//! Analysis configuration
//!
//! Every field has a default, so an empty document is a valid config and
//! reproduces the stock behaviour. Files are read as YAML (`.yaml`, `.yml`)
//! or JSON (`.json`).

use crate::classifier::ClassifierPolicy;
use crate::algo::EscalationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What node insertion does when the name is already held by another id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Accept it; name lookups resolve to the earliest-inserted holder
    #[default]
    FirstWins,
    /// Refuse the insertion with `GraphError::DuplicateName`
    Reject,
}

/// Top-level analysis settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub duplicate_names: DuplicateNamePolicy,
    pub escalation: EscalationOptions,
    pub classifier: ClassifierPolicy,
}

impl AnalysisConfig {
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let contents = std::fs::read_to_string(path)?;

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            "json" => Self::from_json_str(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        info!(
            "Loaded analysis config from {:?} ({} classifier rules)",
            path,
            config.classifier.rules.len()
        );
        Ok(config)
    }
}
