//! Client configuration.
//!
//! Lives at `config.toml` under the platform config directory
//! (`~/.config/taskpro/` on Linux). A missing file means defaults.
//! `TASKPRO_CONFIG_DIR` overrides the directory for tests and custom
//! deployments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the TaskPro backend.
    pub api_url: String,
    /// Reminder poll interval for `taskpro watch`, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Config> {
        Self::load_from(&config_dir().join("config.toml"))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir().join("config.toml"))
    }

    fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config at {}", path.display()))
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/taskpro/` by default. Override with
/// the `TASKPRO_CONFIG_DIR` environment variable.
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TASKPRO_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("taskpro"))
        .unwrap_or_else(|| PathBuf::from("/tmp/taskpro-config"))
}
