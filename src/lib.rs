//! Workspace Backup Library
//!
//! One-shot backup routine: snapshots a fixed manifest of workspace files
//! into a timestamped directory, then prunes snapshots older than the
//! retention window. Periodicity is the job of an external scheduler.

pub mod config;
pub mod fs;
pub mod lock;
pub mod manifest;
pub mod prune;
pub mod report;
pub mod snapshot;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use utils::errors::BackupError;
pub type Result<T> = std::result::Result<T, BackupError>;
