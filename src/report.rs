//! Run orchestration and per-run outcome reporting.
//!
//! The builder and pruner are independent failure domains; the run report
//! carries both outcomes so the caller can log, print, or serialize them
//! without either component swallowing the other's result.

use crate::config::Config;
use crate::prune::{self, PruneReport};
use crate::snapshot::{self, SnapshotReport};
use chrono::Local;
use serde::Serialize;
use std::time::SystemTime;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub snapshot: Option<SnapshotReport>,
    pub snapshot_error: Option<String>,
    pub prune: PruneReport,
}

impl RunReport {
    pub fn new(snapshot: crate::Result<SnapshotReport>, prune: PruneReport) -> Self {
        match snapshot {
            Ok(snapshot) => Self {
                snapshot: Some(snapshot),
                snapshot_error: None,
                prune,
            },
            Err(e) => Self {
                snapshot: None,
                snapshot_error: Some(e.to_string()),
                prune,
            },
        }
    }

    /// The single human-readable completion line for a successful run.
    pub fn completion_line(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|s| format!("Backup completed: {}", s.path.display()))
    }
}

/// One discrete run: snapshot first and unconditionally, then prune.
/// A builder failure is recorded in the report and never stops the pruner.
pub fn execute(config: &Config) -> RunReport {
    let snapshot_result = snapshot::create(config, Local::now());
    if let Err(e) = &snapshot_result {
        error!("Snapshot builder failed: {}", e);
    }

    let prune_report = prune::run(
        &config.backup_root(),
        config.retention.max_age_days,
        SystemTime::now(),
    );

    RunReport::new(snapshot_result, prune_report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::BackupError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builder_failure_is_carried_alongside_the_prune_result() {
        let report = RunReport::new(
            Err(BackupError::SnapshotCreation("denied".to_string())),
            PruneReport::default(),
        );
        assert!(report.snapshot.is_none());
        assert!(report.completion_line().is_none());
        assert!(report.snapshot_error.as_deref().unwrap().contains("denied"));
    }

    #[test]
    fn run_report_serializes_to_json() {
        let report = RunReport::new(
            Err(BackupError::SnapshotCreation("denied".to_string())),
            PruneReport::default(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["snapshot"].is_null());
        assert_eq!(json["prune"]["retained"], 0);
    }

    #[test]
    fn a_full_run_snapshots_then_prunes() {
        let workspace = TempDir::new().unwrap();
        let backups = TempDir::new().unwrap();
        fs::write(workspace.path().join("MEMORY.md"), b"# memory").unwrap();

        // A stale snapshot from long ago, plus a fresh one from "today".
        let stale = backups.path().join("backup_20200101_000000");
        fs::create_dir_all(&stale).unwrap();
        fs::File::open(&stale)
            .unwrap()
            .set_modified(SystemTime::now() - std::time::Duration::from_secs(60 * 86_400))
            .unwrap();

        let mut config = Config::default();
        config.workspace.root = workspace.path().to_path_buf();
        config.backup.root = Some(backups.path().to_path_buf());

        let report = execute(&config);

        let snapshot = report.snapshot.expect("snapshot should have been built");
        assert!(snapshot.path.join("MEMORY.md").exists());
        assert_eq!(report.prune.removed, vec![stale]);
        // The snapshot written moments ago is retained.
        assert_eq!(report.prune.retained, 1);
    }

    #[cfg(unix)]
    #[test]
    fn pruner_runs_even_when_the_builder_cannot_create_the_snapshot() {
        use std::os::unix::fs::PermissionsExt;

        let workspace = TempDir::new().unwrap();
        let backups = TempDir::new().unwrap();

        let stale = backups.path().join("backup_20200101_000000");
        fs::create_dir_all(&stale).unwrap();
        fs::File::open(&stale)
            .unwrap()
            .set_modified(SystemTime::now() - std::time::Duration::from_secs(60 * 86_400))
            .unwrap();

        // A read-only backup root blocks the builder. Depending on
        // privileges it may or may not also block the removal; either way
        // the pruner must have processed the stale candidate.
        fs::set_permissions(backups.path(), fs::Permissions::from_mode(0o555)).unwrap();

        let mut config = Config::default();
        config.workspace.root = workspace.path().to_path_buf();
        config.backup.root = Some(backups.path().to_path_buf());

        let report = execute(&config);

        fs::set_permissions(backups.path(), fs::Permissions::from_mode(0o755)).unwrap();

        if report.snapshot_error.is_some() {
            assert_eq!(report.prune.removed.len() + report.prune.failed.len(), 1);
        } else {
            // Running as root: permissions are not enforced, nothing to prove.
            assert_eq!(report.prune.removed.len(), 1);
        }
    }
}
