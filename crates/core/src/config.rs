//! Clinic configuration
//!
//! Loaded from TOML. Every section has defaults, so an empty file (or no
//! file at all) gives a working setup.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::storage::DEFAULT_KEY;

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "DAWA_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub clinic: ClinicSection,
    pub storage: StorageSection,
    pub admin: AdminSection,
    pub notifications: NotificationSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicSection {
    /// Used in client confirmations
    pub name: String,
    /// Recipient of admin alerts
    pub admin_phone: String,
}

impl Default for ClinicSection {
    fn default() -> Self {
        Self {
            name: "Dawa Healthcare".to_string(),
            admin_phone: "+1-800-ADMIN-DAWA".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory for the snapshot file; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub passphrase: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            passphrase: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSection {
    /// Simulated provider latency
    pub latency_ms: u64,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self { latency_ms: 800 }
    }
}

impl ClinicConfig {
    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ClinicConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// `$DAWA_CONFIG`, then the platform config dir, then defaults
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            info!(path = %path, "Loading config from {}", CONFIG_ENV);
            return Self::from_file(path);
        }

        if let Some(dirs) = project_dirs() {
            let path = dirs.config_dir().join("config.toml");
            if path.exists() {
                info!(path = %path.display(), "Loading config");
                return Self::from_file(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::Config("storage.key must not be empty".into()));
        }
        if self.admin.passphrase.is_empty() {
            return Err(Error::Config("admin.passphrase must not be empty".into()));
        }
        Ok(())
    }

    /// Where the snapshot file lives
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("health", "dawa", "dawa")
}
