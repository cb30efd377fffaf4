//! Advisory locking so overlapping scheduled runs do not race.
//!
//! Two concurrent invocations would collide on same-second snapshot names,
//! and the pruner of one could delete a directory the builder of the other
//! is still populating. An exclusive lock file in the backup root removes
//! both races; the second run fails fast instead. Released on Drop.

use crate::utils::errors::{BackupError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = ".lock";

#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Try to take the exclusive run lock. Does not block: if another run
    /// holds the lock this returns `BackupError::Locked`.
    pub fn acquire(backup_root: &Path) -> Result<Self> {
        let path = backup_root.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| BackupError::Locked(path.display().to_string()))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        // Unlock errors on drop are ignored; the OS releases on close anyway.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
