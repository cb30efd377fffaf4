//! Configuration management for the backup routine.
//!
//! Loads configuration from a TOML file with CLI overrides applied on top.
//! Every field has a default so a bare invocation with no config file works.

use crate::manifest::{default_manifest, ManifestEntry};
use crate::utils::errors::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub backup: BackupConfig,
    pub retention: RetentionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root of the live workspace being protected.
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Where snapshots are stored. Defaults to `<workspace>/backups`.
    pub root: Option<PathBuf>,

    /// The files and directories copied into each snapshot.
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Maximum snapshot age in days before it becomes eligible for deletion.
    pub max_age_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            root: None,
            entries: default_manifest(),
        }
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { max_age_days: 30 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            backup: BackupConfig::default(),
            retention: RetentionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The backup root, falling back to `backups/` under the workspace.
    pub fn backup_root(&self) -> PathBuf {
        self.backup
            .root
            .clone()
            .unwrap_or_else(|| self.workspace.root.join("backups"))
    }
}
