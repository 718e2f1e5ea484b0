// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::BrowserOptions;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_PER_PAGE, DEFAULT_TIMEOUT_SECS,
    MAX_DEBOUNCE_MS, MIN_DEBOUNCE_MS,
};
use crate::infrastructure::notehub::ClientSettings;

/// TOML configuration for the notehub client
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

// Default value functions
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_per_page() -> u32 { DEFAULT_PER_PAGE }
fn default_debounce_ms() -> u64 { DEFAULT_DEBOUNCE_MS }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;

        Ok(config)
    }

    /// `<config dir>/notehub/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notehub").join("config.toml"))
    }

    /// Load an explicitly given file, else the default file if present, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default path");
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Connection settings with command-line / environment overrides applied
    pub fn client_settings(&self, base_url: Option<&str>, token: Option<&str>) -> ClientSettings {
        ClientSettings {
            base_url: base_url.unwrap_or(&self.api.base_url).to_string(),
            token: token
                .map(str::to_string)
                .or_else(|| self.api.token.clone()),
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
        }
    }

    /// Search quiet period, clamped to the supported range
    pub fn debounce(&self) -> Duration {
        let requested = self.list.debounce_ms;
        let clamped = requested.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        if clamped != requested {
            warn!(
                requested,
                used = clamped,
                "debounce_ms outside {MIN_DEBOUNCE_MS}..={MAX_DEBOUNCE_MS}, clamping"
            );
        }
        Duration::from_millis(clamped)
    }

    pub fn browser_options(&self, per_page: Option<u32>) -> BrowserOptions {
        BrowserOptions {
            per_page: per_page.unwrap_or(self.list.per_page).max(1),
            debounce: self.debounce(),
        }
    }
}
