//! Recursive directory copy preserving internal structure.

use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Totals for one copied entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyStats {
    pub files: u64,
    pub bytes: u64,
}

/// Copy `src` into `dst` recursively, mirroring the directory layout.
///
/// `dst` and any missing intermediate directories are created. Existing
/// files are overwritten in place. Symlinks are not followed and not
/// copied. The first I/O error aborts the copy of this tree; the caller
/// decides whether that is fatal.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<CopyStats> {
    let mut stats = CopyStats::default();

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let bytes = fs::copy(entry.path(), &target)?;
            stats.files += 1;
            stats.bytes += bytes;
        } else {
            debug!("Skipping non-regular file {}", entry.path().display());
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_nested_tree_verbatim() -> std::io::Result<()> {
        let src = TempDir::new()?;
        let dst = TempDir::new()?;

        fs::write(src.path().join("top.txt"), b"top")?;
        fs::create_dir_all(src.path().join("sub/deeper"))?;
        fs::write(src.path().join("sub/mid.txt"), b"mid")?;
        fs::write(src.path().join("sub/deeper/leaf.txt"), b"leaf")?;

        let target = dst.path().join("out");
        let stats = copy_dir_recursive(src.path(), &target)?;

        assert_eq!(stats.files, 3);
        assert_eq!(stats.bytes, 10);
        assert_eq!(fs::read(target.join("top.txt"))?, b"top");
        assert_eq!(fs::read(target.join("sub/mid.txt"))?, b"mid");
        assert_eq!(fs::read(target.join("sub/deeper/leaf.txt"))?, b"leaf");
        Ok(())
    }

    #[test]
    fn preserves_empty_directories() -> std::io::Result<()> {
        let src = TempDir::new()?;
        let dst = TempDir::new()?;
        fs::create_dir_all(src.path().join("empty"))?;

        let target = dst.path().join("out");
        let stats = copy_dir_recursive(src.path(), &target)?;

        assert_eq!(stats.files, 0);
        assert!(target.join("empty").is_dir());
        Ok(())
    }

    #[test]
    fn overwrites_existing_files_in_place() -> std::io::Result<()> {
        let src = TempDir::new()?;
        let dst = TempDir::new()?;
        fs::write(src.path().join("a.txt"), b"new")?;

        let target = dst.path().join("out");
        fs::create_dir_all(&target)?;
        fs::write(target.join("a.txt"), b"stale contents")?;

        copy_dir_recursive(src.path(), &target)?;
        assert_eq!(fs::read(target.join("a.txt"))?, b"new");
        Ok(())
    }
}
