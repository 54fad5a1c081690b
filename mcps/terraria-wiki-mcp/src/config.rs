//! Configuration loading for terraria-wiki-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variable TERRARIA_WIKI_URL (overrides `wiki.base_url`)
//! 2. Environment variable TERRARIA_WIKI_CONFIG_PATH
//! 3. ~/.binks/terraria-wiki.toml
//! 4. Default values

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Wiki endpoint configuration
    #[serde(default)]
    pub wiki: WikiConfig,
    /// How results are presented to the host
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Wiki endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Wiki root; the API lives at `<base_url>/api.php`, articles at `<base_url>/wiki/`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Icon attached to every result
    #[serde(default = "default_icon_path")]
    pub icon_path: Option<String>,
}

fn default_base_url() -> String {
    "https://terraria.wiki.gg".to_string()
}

fn default_user_agent() -> String {
    concat!("terraria-wiki-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_icon_path() -> Option<String> {
    Some("Images/favicon.png".to_string())
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icon_path: default_icon_path(),
        }
    }
}

impl WikiConfig {
    /// `api.php` endpoint
    pub fn api_url(&self) -> String {
        format!("{}/api.php", self.base_url.trim_end_matches('/'))
    }

    /// Prefix that article titles are appended to
    pub fn article_base(&self) -> String {
        format!("{}/wiki", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        // Wiki URL from environment (highest priority)
        if let Ok(url) = std::env::var("TERRARIA_WIKI_URL") {
            config.wiki.base_url = url;
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("TERRARIA_WIKI_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.binks/terraria-wiki.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".binks").join("terraria-wiki.toml");
            return Some(path);
        }

        None
    }
}
