//! Application configuration management.
//!
//! Configuration is stored at `~/.config/swingstats/config.json` (the
//! platform config directory). Every field has a default, so a missing or
//! partial file is fine. Command line flags override what is loaded here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::{LOOKUP_URL, REQUEST_TIMEOUT_SECS};
use crate::transform::DEFAULT_DANCE_STYLE;

/// Application name used for the config directory path
const APP_NAME: &str = "swingstats";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// One past the highest assigned WSDC id when the scanner was last tuned
pub const DEFAULT_END_ID: u32 = 16802;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub dance_style: String,
    pub start_id: u32,
    /// Exclusive
    pub end_id: u32,
    pub request_timeout_secs: u64,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: LOOKUP_URL.to_string(),
            dance_style: DEFAULT_DANCE_STYLE.to_string(),
            start_id: 0,
            end_id: DEFAULT_END_ID,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            output: PathBuf::from("data.csv"),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
