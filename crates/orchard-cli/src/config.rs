//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full configuration for the orchard CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrchardConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Distribution output settings.
    #[serde(default)]
    pub distribution: DistributionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Directory the tree command writes to when `--output` is not given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Write one claims file per recipient instead of a single tree.json.
    #[serde(default)]
    pub separate: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./distribution")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            separate: false,
        }
    }
}

impl OrchardConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: OrchardConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
