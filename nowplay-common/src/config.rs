//! Configuration loading and base URL resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Compiled default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Compiled default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the TOML `base_url`
pub const BASE_URL_ENV: &str = "NOWPLAY_BASE_URL";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load the config file, tolerating a missing default file
    ///
    /// An explicit path must exist. Without one, the platform config
    /// directory is searched and a missing file yields defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            Some(path) => {
                warn!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `~/.config/nowplay/config.toml` on Linux, the platform equivalent elsewhere
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nowplay").join("config.toml"))
}

/// Fully resolved poller settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Backend address without a trailing slash
    pub base_url: String,
    pub log_level: String,
}

/// Resolve settings in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`NOWPLAY_BASE_URL`, base URL only)
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve(
    cli_base_url: Option<&str>,
    cli_log_level: Option<&str>,
    toml_config: &TomlConfig,
) -> Result<PollerConfig> {
    let env_base_url = std::env::var(BASE_URL_ENV).ok();

    let base_url = cli_base_url
        .map(str::to_string)
        .or(env_base_url)
        .or_else(|| toml_config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let log_level = cli_log_level
        .map(str::to_string)
        .or_else(|| toml_config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(PollerConfig {
        base_url: normalize_base_url(&base_url)?,
        log_level,
    })
}

/// Validate the scheme and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(Error::Config("Base URL is empty".to_string()));
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(format!(
            "Base URL must start with http:// or https://, got {:?}",
            raw
        )));
    }

    Ok(trimmed.to_string())
}
