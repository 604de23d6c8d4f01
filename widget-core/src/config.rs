use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::TemperatureUnit;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "WEATHER_API_BASE_URL";
pub const ENV_UNIT: &str = "WEATHER_UNIT";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit = "celsius"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// weatherapi.com key. Left unvalidated: a missing key simply makes
    /// requests fail.
    pub api_key: Option<String>,

    /// Override for the provider origin, mostly useful for testing.
    pub base_url: Option<String>,

    pub unit: Option<TemperatureUnit>,

    /// Request timeout in seconds. No timeout when absent.
    pub timeout_secs: Option<u64>,
}

/// Resolved values handed to a provider at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub unit: TemperatureUnit,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

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
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = var(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(unit) = var(ENV_UNIT) {
            let unit = TemperatureUnit::try_from(unit.as_str())
                .with_context(|| format!("Invalid value in {ENV_UNIT}"))?;
            self.unit = Some(unit);
        }

        Ok(self)
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit.unwrap_or_default()
    }

    /// Resolve everything a provider needs. An absent key resolves to an
    /// empty string rather than an error.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.api_key().unwrap_or_default().to_owned(),
            base_url: self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            unit: self.unit(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
