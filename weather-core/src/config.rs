use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Settings for the OpenWeather endpoint. Requests use the HTTP client's
/// default timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenWeatherConfig {
    /// API root; `/weather` is appended to it.
    pub base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
        }
    }
}

/// Top-level configuration. Every field has a default, so the file is optional.
///
/// Example TOML:
/// [openweather]
/// base_url = "http://api.openweathermap.org/data/2.5"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub openweather: OpenWeatherConfig,
}

impl Config {
    /// Load config from `path` if given, otherwise from the platform config
    /// directory. A missing file yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let p = Self::config_file_path()?;
                if !p.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&p)
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;

        if cfg.openweather.base_url.trim().is_empty() {
            return Err(anyhow!("openweather.base_url must not be empty"));
        }

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-action", "weather-action")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
