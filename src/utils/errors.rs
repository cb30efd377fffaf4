//! Custom error types for the backup routine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot directory creation failed: {0}")]
    SnapshotCreation(String),

    #[error("Backup root is locked by another run: {0}")]
    Locked(String),
}

pub type Result<T> = std::result::Result<T, BackupError>;
