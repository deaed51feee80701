use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Current-weather endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Static credential used when no `api_key` is configured.
pub const DEFAULT_API_KEY: &str = "b6fd43b195acb137f7d9294ca3d7312e";

/// Unit specifier sent with every request. Not configurable.
pub const UNITS: &str = "metric";

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "CITYWEATHER_API_KEY";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// api_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Config {
    /// API key to send, falling back to the built-in credential.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(DEFAULT_API_KEY)
    }

    /// Endpoint to query, falling back to OpenWeatherMap.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Store a custom endpoint; `None` restores the default.
    pub fn set_api_url(&mut self, api_url: Option<String>) {
        self.api_url = api_url;
    }

    /// Replace the API key when `value` is a non-blank override.
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Load config from the platform location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&Self::config_file_path()?)?;
        cfg.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
