//! Configuration Management
//!
//! Handles persistent defaults for tfe-workspace-ids.

use crate::tfe::client::DEFAULT_HOSTNAME;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default hostname
pub const HOSTNAME_ENV: &str = "TFE_HOSTNAME";

/// Environment variable overriding the default organization
pub const ORGANIZATION_ENV: &str = "TFE_ORGANIZATION";

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// TFE hostname, e.g. `app.terraform.io`
    #[serde(default)]
    pub hostname: Option<String>,
    /// Organization used when none is given
    #[serde(default)]
    pub organization: Option<String>,
    /// Workspaces requested per page
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tfe-workspace-ids").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective hostname (CLI > config > env > default)
    pub fn effective_hostname(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.hostname.clone())
            .or_else(|| std::env::var(HOSTNAME_ENV).ok().filter(|h| !h.is_empty()))
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string())
    }

    /// Get effective organization (CLI > config > env)
    pub fn effective_organization(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.organization.clone())
            .or_else(|| std::env::var(ORGANIZATION_ENV).ok().filter(|o| !o.is_empty()))
    }

    /// Get effective page size (CLI > config), clamped to the API limit
    pub fn effective_page_size(&self, cli: Option<u32>) -> Option<u32> {
        cli.or(self.page_size).map(|s| s.clamp(1, MAX_PAGE_SIZE))
    }

    /// Remember hostname and organization and save
    pub fn set_defaults(&mut self, hostname: &str, organization: &str) -> Result<()> {
        self.hostname = Some(hostname.to_string());
        self.organization = Some(organization.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            hostname: Some("tfe.corp".into()),
            organization: Some("acme".into()),
            page_size: Some(50),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_missing_or_malformed_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path), Config::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            hostname: Some("tfe.corp".into()),
            organization: Some("acme".into()),
            page_size: Some(20),
        };

        assert_eq!(config.effective_hostname(Some("other.host")), "other.host");
        assert_eq!(config.effective_hostname(None), "tfe.corp");
        assert_eq!(
            config.effective_organization(Some("globex")).as_deref(),
            Some("globex")
        );
        assert_eq!(config.effective_organization(None).as_deref(), Some("acme"));
    }

    #[test]
    fn test_page_size_clamped() {
        let config = Config::default();
        assert_eq!(config.effective_page_size(None), None);
        assert_eq!(config.effective_page_size(Some(0)), Some(1));
        assert_eq!(config.effective_page_size(Some(500)), Some(MAX_PAGE_SIZE));
    }
}
