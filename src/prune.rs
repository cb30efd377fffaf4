//! Retention Pruner: removes snapshot directories older than the window.
//!
//! Age is derived from the directory's modification time, which reflects
//! actual write completion and covers snapshots whose encoded timestamp is
//! malformed. Expiry is evaluated lazily against an injected `now`; there
//! is no timer, no undo, and a failed removal never aborts the pass.

use crate::snapshot::SNAPSHOT_PREFIX;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

const SECONDS_PER_DAY: u64 = 86_400;

/// Per-run result of the Retention Pruner.
#[derive(Debug, Default, Serialize)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub retained: usize,
}

/// A snapshot is expired once strictly older than the retention window.
/// A modification time in the future never expires.
pub fn is_expired(now: SystemTime, modified: SystemTime, max_age_days: u64) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age > Duration::from_secs(max_age_days * SECONDS_PER_DAY),
        Err(_) => false,
    }
}

/// Remove every snapshot under `backup_root` older than `max_age_days`,
/// judged against `now`. Entries that do not match the snapshot naming
/// pattern are never touched.
pub fn run(backup_root: &Path, max_age_days: u64, now: SystemTime) -> PruneReport {
    let mut report = PruneReport::default();

    let entries = match fs::read_dir(backup_root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read backup root {}: {}", backup_root.display(), e);
            return report;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(SNAPSHOT_PREFIX) {
            continue;
        }
        if !path.is_dir() {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!("Cannot read mtime of {}: {}", path.display(), e);
                continue;
            }
        };

        if !is_expired(now, modified, max_age_days) {
            debug!("Retaining {}", path.display());
            report.retained += 1;
            continue;
        }

        match fs::remove_dir_all(&path) {
            Ok(()) => {
                info!("Removed expired snapshot {}", path.display());
                report.removed.push(path);
            }
            Err(e) => {
                warn!("Failed to remove expired snapshot {}: {}", path.display(), e);
                report.failed.push(path);
            }
        }
    }

    report
}
