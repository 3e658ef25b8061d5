//! Configuration loading for metasearch-mcp
//!
//! Configuration is resolved once at startup, from:
//! 1. Environment variables TAVILY_API_KEY, TAVILY_BASE_URL, SEARXNG_BASE_URL
//! 2. Environment variable METASEARCH_CONFIG_PATH
//! 3. ~/.config/metasearch-mcp/config.toml
//! 4. Default values
//!
//! The Tavily API key has no default: its absence is a fatal startup error,
//! not a per-request one. After startup the configuration is immutable.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tavily (web search) configuration
    #[serde(default)]
    pub tavily: TavilyConfig,
    /// SearXNG (image search) configuration
    #[serde(default)]
    pub searxng: SearxngConfig,
}

/// Tavily configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavilyConfig {
    /// API key; required, usually supplied via TAVILY_API_KEY
    #[serde(default)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_tavily_base_url")]
    pub base_url: String,
}

/// SearXNG configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearxngConfig {
    /// SearXNG instance URL
    #[serde(default = "default_searxng_base_url")]
    pub base_url: String,
}

fn default_tavily_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_searxng_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tavily_base_url(),
        }
    }
}

impl Default for SearxngConfig {
    fn default() -> Self {
        Self {
            base_url: default_searxng_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment, then validate it.
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::load_file(&path)?,
            _ => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        // Environment takes precedence over the file
        if let Ok(key) = std::env::var("TAVILY_API_KEY") {
            config.tavily.api_key = key;
        }
        if let Ok(url) = std::env::var("TAVILY_BASE_URL") {
            config.tavily.base_url = url;
        }
        if let Ok(url) = std::env::var("SEARXNG_BASE_URL") {
            config.searxng.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Check required fields and URL shapes.
    pub fn validate(&self) -> Result<()> {
        if self.tavily.api_key.trim().is_empty() {
            bail!(
                "TAVILY_API_KEY is required (set the environment variable or the \
                 [tavily] api_key config key)"
            );
        }
        Url::parse(&self.tavily.base_url)
            .with_context(|| format!("invalid tavily base URL '{}'", self.tavily.base_url))?;
        Url::parse(&self.searxng.base_url)
            .with_context(|| format!("invalid searxng base URL '{}'", self.searxng.base_url))?;
        Ok(())
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("METASEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("metasearch-mcp")
                    .join("config.toml"),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.tavily.api_key.is_empty());
        assert_eq!(config.tavily.base_url, "https://api.tavily.com");
        assert_eq!(config.searxng.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config_passes_validation() {
        let mut config = Config::default();
        config.tavily.api_key = "tvly-test".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_base_url_fails_validation() {
        let mut config = Config::default();
        config.tavily.api_key = "tvly-test".to_string();
        config.searxng.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_file_reads_both_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[tavily]
api_key = "tvly-from-file"

[searxng]
base_url = "http://searx.internal:8888"
"#
        )
        .unwrap();

        let config = Config::load_file(file.path()).unwrap();
        assert_eq!(config.tavily.api_key, "tvly-from-file");
        assert_eq!(config.tavily.base_url, "https://api.tavily.com");
        assert_eq!(config.searxng.base_url, "http://searx.internal:8888");
    }

    #[test]
    fn test_load_file_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[tavily\napi_key = ").unwrap();
        assert!(Config::load_file(file.path()).is_err());
    }
}
