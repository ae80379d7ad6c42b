//! Configuration Management
//!
//! Persistent settings for the hcloud CLI. Command-line flags win over the
//! environment, which wins over the config file.

use anyhow::{Context, Result};
use hcloud::api::auth::TOKEN_ENV;
use hcloud::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API token
    #[serde(default)]
    pub token: Option<String>,
    /// API base URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Page size for listings
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl Config {
    /// Directory holding the config file and the CLI log
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hcloud"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Log file for `--log-level`, next to the config file when the platform
    /// has a config directory
    pub fn log_path() -> PathBuf {
        Self::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".hcloud")))
            .unwrap_or_default()
            .join("hcloud.log")
    }

    /// Load configuration from disk; a missing or unreadable file yields the
    /// defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("No config directory on this platform")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective token (CLI > HCLOUD_TOKEN > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        let env = std::env::var(TOKEN_ENV).ok();
        pick(cli, env.as_deref(), self.token.as_deref())
    }

    /// Get effective endpoint (CLI > config > public API)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> String {
        pick(cli, None, self.endpoint.as_deref()).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Get effective page size (CLI > config > server default)
    pub fn effective_per_page(&self, cli: Option<u32>) -> Option<u32> {
        cli.or(self.per_page)
    }
}

/// First non-blank value in precedence order
fn pick(cli: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [cli, env, file]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(pick(Some("flag"), Some("env"), Some("file")).as_deref(), Some("flag"));
        assert_eq!(pick(None, Some("env"), Some("file")).as_deref(), Some("env"));
        assert_eq!(pick(Some(""), None, Some("file")).as_deref(), Some("file"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn test_endpoint_defaults_to_public_api() {
        let config = Config::default();
        assert_eq!(config.effective_endpoint(None), DEFAULT_ENDPOINT);

        let config = Config {
            endpoint: Some("http://localhost:8080/v1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_endpoint(None), "http://localhost:8080/v1");
        assert_eq!(config.effective_endpoint(Some("http://proxy")), "http://proxy");
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("hcloud-config-{}", std::process::id()));
        let path = dir.join("config.json");

        let config = Config {
            token: Some("abc".to_string()),
            endpoint: None,
            per_page: Some(50),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_log_file_shares_config_directory() {
        let log = Config::log_path();
        assert_eq!(log.file_name().and_then(|n| n.to_str()), Some("hcloud.log"));

        if let Some(dir) = Config::config_dir() {
            assert_eq!(Config::config_path(), Some(dir.join("config.json")));
            assert_eq!(log.parent(), Some(dir.as_path()));
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("hcloud-does-not-exist").join("config.json");
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
