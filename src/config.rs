use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

static DEFAULT_API_URL: &str = "http://localhost:3000";
static API_URL_ENV_VAR: &str = "DAYBOARD_API_URL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Global configuration at ~/.config/dayboard/config.toml
///
/// The `DAYBOARD_API_URL` environment variable overrides the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
        }
    }
}

impl Config {
    pub fn base_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("dayboard"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let from_file = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Some(toml::from_str(&content).with_context(|| {
                    format!("Failed to parse config at {}", path.display())
                })?)
            }
            _ => None,
        };

        Ok(Self::resolve(std::env::var(API_URL_ENV_VAR).ok(), from_file))
    }

    /// Combine the env override with the file config, falling back to the default.
    fn resolve(env_url: Option<String>, from_file: Option<Config>) -> Self {
        let mut config = from_file.unwrap_or_default();
        if let Some(url) = env_url.filter(|url| !url.trim().is_empty()) {
            config.api_url = url;
        }
        // Trailing slashes would produce double-slash endpoint paths
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config
    }
}
