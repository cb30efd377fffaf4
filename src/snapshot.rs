//! Snapshot Builder: copies the manifest into a timestamped directory.
//!
//! The builder is deliberately tolerant: a manifest entry that is missing
//! or unreadable is recorded in the report and skipped, never aborting the
//! run. Only failure to create the snapshot directory itself is fatal.

use crate::config::Config;
use crate::fs::copy::copy_dir_recursive;
use crate::manifest::{EntryKind, ManifestEntry};
use crate::utils::errors::{BackupError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Snapshot directories are named `backup_<YYYYMMDD_HHMMSS>`.
pub const SNAPSHOT_PREFIX: &str = "backup_";

const SNAPSHOT_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// What happened to one manifest entry during the copy.
///
/// Missing and unreadable sources are both tolerated, but reported
/// distinctly so a run summary can tell "not created yet" from "broken".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Copied { files: u64, bytes: u64 },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub outcome: EntryOutcome,
}

/// Per-run result of the Snapshot Builder.
#[derive(Debug, Serialize)]
pub struct SnapshotReport {
    pub path: PathBuf,
    pub entries: Vec<EntryReport>,
    pub files_copied: u64,
    pub bytes_copied: u64,
}

impl SnapshotReport {
    pub fn copied_entries(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, EntryOutcome::Copied { .. }))
            .count()
    }

    pub fn skipped_entries(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, EntryOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_entries(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, EntryOutcome::Failed { .. }))
            .count()
    }
}

/// Directory name for a snapshot taken at `now`.
pub fn snapshot_dir_name(now: DateTime<Local>) -> String {
    format!("{}{}", SNAPSHOT_PREFIX, now.format(SNAPSHOT_TIME_FORMAT))
}

/// Build one snapshot of the configured manifest, taken at `now`.
///
/// Two runs within the same second land in the same directory: creation is
/// idempotent and copies overwrite in place.
pub fn create(config: &Config, now: DateTime<Local>) -> Result<SnapshotReport> {
    let backup_root = config.backup_root();
    let snapshot_path = backup_root.join(snapshot_dir_name(now));

    fs::create_dir_all(&snapshot_path).map_err(|e| {
        BackupError::SnapshotCreation(format!("{}: {}", snapshot_path.display(), e))
    })?;

    let mut entries = Vec::with_capacity(config.backup.entries.len());
    let mut files_copied = 0u64;
    let mut bytes_copied = 0u64;

    for entry in &config.backup.entries {
        let source = config.workspace.root.join(&entry.name);
        let outcome = copy_entry(&source, &snapshot_path, entry);
        match &outcome {
            EntryOutcome::Copied { files, bytes } => {
                debug!("Copied {} ({} files, {} bytes)", entry.name, files, bytes);
                files_copied += files;
                bytes_copied += bytes;
            }
            EntryOutcome::Skipped { reason } => {
                debug!("Skipped {}: {}", entry.name, reason);
            }
            EntryOutcome::Failed { reason } => {
                warn!("Failed to copy {}: {}", entry.name, reason);
            }
        }
        entries.push(EntryReport {
            name: entry.name.clone(),
            outcome,
        });
    }

    info!(
        "Snapshot written to {} ({} files, {} bytes)",
        snapshot_path.display(),
        files_copied,
        bytes_copied
    );

    Ok(SnapshotReport {
        path: snapshot_path,
        entries,
        files_copied,
        bytes_copied,
    })
}

/// Copy a single manifest entry into the snapshot, mapping the result onto
/// the tolerant per-entry policy.
fn copy_entry(source: &Path, snapshot: &Path, entry: &ManifestEntry) -> EntryOutcome {
    match source.symlink_metadata() {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return EntryOutcome::Skipped {
                reason: "not present in workspace".to_string(),
            };
        }
        Err(e) => {
            return EntryOutcome::Failed {
                reason: format!("cannot stat source: {}", e),
            };
        }
        Ok(_) => {}
    }

    let target = snapshot.join(&entry.name);
    let result = match entry.kind {
        EntryKind::Dir => copy_dir_recursive(source, &target).map(|s| (s.files, s.bytes)),
        EntryKind::File => fs::copy(source, &target).map(|bytes| (1, bytes)),
    };

    match result {
        Ok((files, bytes)) => EntryOutcome::Copied { files, bytes },
        Err(e) => EntryOutcome::Failed {
            reason: e.to_string(),
        },
    }
}
