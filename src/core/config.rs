//! Configuration management

use crate::core::error::Result;
use crate::extract::UsageMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Name of the optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = "nestscan.toml";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    /// Per-data-type usage counting mode (e.g. `pattern = "flag"`)
    #[serde(default)]
    pub usage_modes: HashMap<String, UsageMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name prefix identifying component base reports
    pub file_prefix: String,
    /// File extension of component base reports
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            usage_modes: HashMap::new(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "ComponentBase".to_string(),
            extension: ".csv".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `nestscan.toml` from a directory, falling back to defaults
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid {}: {}", CONFIG_FILE_NAME, e);
                }
            }
        }
        Self::default()
    }

    /// Usage counting mode configured for a data type
    pub fn usage_mode_for(&self, data_type: &str) -> UsageMode {
        self.usage_modes
            .get(data_type)
            .copied()
            .unwrap_or(UsageMode::Count)
    }
}
