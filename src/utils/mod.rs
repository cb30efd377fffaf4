//! Utility modules for the backup routine.

pub mod errors;
pub mod logger;

pub use errors::{BackupError, Result};
