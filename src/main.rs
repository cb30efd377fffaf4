//! Workspace Backup - Main entry point
//!
//! One discrete run: build a timestamped snapshot of the workspace
//! manifest, then prune snapshots past the retention window. The builder
//! and pruner are independent failure domains; the pruner always runs.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use workspace_backup::{config::Config, lock::RunLock, report, utils};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Workspace root to back up (overrides config)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Directory holding the snapshots (overrides config)
    #[arg(short, long)]
    backup_root: Option<PathBuf>,

    /// Maximum snapshot age in days (overrides config)
    #[arg(short, long)]
    retention_days: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the full run report as JSON instead of the completion line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };
    if let Some(workspace) = args.workspace {
        config.workspace.root = workspace;
    }
    if let Some(backup_root) = args.backup_root {
        config.backup.root = Some(backup_root);
    }
    if let Some(retention_days) = args.retention_days {
        config.retention.max_age_days = retention_days;
    }

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.log.level);
    utils::logger::init(log_level)?;

    tracing::info!(
        "Starting workspace-backup v{} (workspace: {}, retention: {} days)",
        env!("CARGO_PKG_VERSION"),
        config.workspace.root.display(),
        config.retention.max_age_days
    );

    // The backup root must exist before the lock file can live in it.
    let backup_root = config.backup_root();
    if let Err(e) = std::fs::create_dir_all(&backup_root) {
        tracing::warn!("Cannot create backup root {}: {}", backup_root.display(), e);
    }

    // Serialize overlapping scheduled runs.
    let _lock = RunLock::acquire(&backup_root)?;

    let report = report::execute(&config);
    if !report.prune.removed.is_empty() || !report.prune.failed.is_empty() {
        tracing::info!(
            "Pruned {} expired snapshot(s), {} failed, {} retained",
            report.prune.removed.len(),
            report.prune.failed.len(),
            report.prune.retained
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(line) = report.completion_line() {
        println!("{}", line);
    }

    // Skipped optional entries are fine; a run with no snapshot is not.
    if report.snapshot.is_none() {
        anyhow::bail!("backup run finished without producing a snapshot");
    }

    Ok(())
}
