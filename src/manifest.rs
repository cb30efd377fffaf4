//! The backup manifest: the fixed set of workspace entries worth copying.
//!
//! The manifest is static configuration, not discovery. Entries that do not
//! exist in the workspace yet (a user who has not written `SOUL.md`) are
//! legitimate and simply skipped at snapshot time.

use serde::{Deserialize, Serialize};

/// Whether a manifest entry names a flat file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry eligible for backup, identified by its base name relative to
/// the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl ManifestEntry {
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Dir,
        }
    }
}

/// The built-in manifest: the workspace's identity and memory files, plus
/// the long-term memory directory.
pub fn default_manifest() -> Vec<ManifestEntry> {
    vec![
        ManifestEntry::file("AGENTS.md"),
        ManifestEntry::file("SOUL.md"),
        ManifestEntry::file("USER.md"),
        ManifestEntry::file("TOOLS.md"),
        ManifestEntry::file("MEMORY.md"),
        ManifestEntry::dir("memory"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_is_fixed_and_explicit() {
        let manifest = default_manifest();
        assert!(manifest.iter().any(|e| e.name == "MEMORY.md" && e.kind == EntryKind::File));
        assert!(manifest.iter().any(|e| e.name == "memory" && e.kind == EntryKind::Dir));
    }

    #[test]
    fn entry_kind_parses_from_lowercase() {
        let entry: ManifestEntry =
            toml::from_str("name = \"notes\"\nkind = \"dir\"").unwrap();
        assert_eq!(entry.kind, EntryKind::Dir);
    }
}
