//! User configuration
//!
//! Optional TOML file with default paths so the usual invocation needs no
//! arguments. Command-line flags always win over values from here.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete falcon8 configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalconConfig {
    /// Firmware image on the keypad's storage (e.g. `/media/FALCON/FIRMWARE.BIN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_path: Option<PathBuf>,
    /// Bindings file used when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings_path: Option<PathBuf>,
    /// Log level when neither `RUST_LOG` nor `--log-level` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for FalconConfig {
    fn default() -> Self {
        Self {
            firmware_path: None,
            bindings_path: None,
            log_level: default_log_level(),
        }
    }
}

impl FalconConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("falcon8")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: FalconConfig = toml::from_str(&content)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
