//! Identifier vault.
//!
//! An ordered collection of unique record identifiers backed by a single
//! flat file: one identifier per line, UTF-8, rewritten wholesale after each
//! mutation. Insertion order is preserved for display; membership is checked
//! before insert. The file is read once when the vault is opened; no
//! concurrent writers are assumed.

use crate::error::StorageError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct Vault {
    identifiers: Vec<String>,
    path: PathBuf,
}

impl Vault {
    /// Open the vault at `path`, loading any persisted identifiers.
    ///
    /// A missing store file means an empty vault, not an error. Blank lines
    /// and duplicates in a hand-edited file are dropped on load, first
    /// occurrence winning, so the uniqueness invariant holds from the start.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let identifiers = Self::load_from_disk(&path)?;
        Ok(Self { identifiers, path })
    }

    fn load_from_disk(path: &Path) -> Result<Vec<String>, StorageError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let mut seen = HashSet::new();
        let mut identifiers = Vec::new();
        for line in content.lines() {
            let id = line.trim();
            if id.is_empty() {
                continue;
            }
            if seen.insert(id.to_string()) {
                identifiers.push(id.to_string());
            } else {
                tracing::warn!(identifier = id, "dropping duplicate vault entry on load");
            }
        }
        Ok(identifiers)
    }

    /// Add an identifier, persisting on success.
    ///
    /// Returns false without mutation when the identifier is already
    /// present. Duplicate detection is a linear scan; the vault stays small
    /// enough that no index is warranted.
    pub fn add(&mut self, identifier: &str) -> Result<bool, StorageError> {
        if self.contains(identifier) {
            return Ok(false);
        }
        self.identifiers.push(identifier.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Remove every identifier in `targets`, persisting the result.
    ///
    /// Returns how many were dropped. Removing a non-present identifier is a
    /// no-op, not an error.
    pub fn remove(&mut self, targets: &HashSet<String>) -> Result<usize, StorageError> {
        let before = self.identifiers.len();
        self.identifiers.retain(|id| !targets.contains(id));
        let removed = before - self.identifiers.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Read-only view in insertion order.
    pub fn list(&self) -> &[String] {
        &self.identifiers
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut content = self.identifiers.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault_path(dir: &TempDir) -> PathBuf {
        dir.path().join("vault.txt")
    }

    #[test]
    fn missing_store_file_means_empty_vault() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::open(vault_path(&dir)).unwrap();
        assert!(vault.is_empty());
    }

    #[test]
    fn add_persists_and_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = vault_path(&dir);

        let mut vault = Vault::open(&path).unwrap();
        assert!(vault.add("tt1375666").unwrap());
        drop(vault);

        let reopened = Vault::open(&path).unwrap();
        assert_eq!(reopened.list(), &["tt1375666".to_string()]);
    }

    #[test]
    fn duplicate_add_returns_false_without_mutation() {
        let dir = TempDir::new().unwrap();
        let mut vault = Vault::open(vault_path(&dir)).unwrap();

        assert!(vault.add("tt1375666").unwrap());
        assert!(!vault.add("tt1375666").unwrap());
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = vault_path(&dir);
        let mut vault = Vault::open(&path).unwrap();

        vault.add("tt0000003").unwrap();
        vault.add("tt0000001").unwrap();
        vault.add("tt0000002").unwrap();

        let reopened = Vault::open(&path).unwrap();
        assert_eq!(
            reopened.list(),
            &[
                "tt0000003".to_string(),
                "tt0000001".to_string(),
                "tt0000002".to_string()
            ]
        );
    }

    #[test]
    fn remove_counts_only_present_identifiers() {
        let dir = TempDir::new().unwrap();
        let mut vault = Vault::open(vault_path(&dir)).unwrap();
        vault.add("tt0000001").unwrap();
        vault.add("tt0000002").unwrap();

        let targets: HashSet<String> = ["tt0000002".to_string(), "tt9999999".to_string()]
            .into_iter()
            .collect();
        let removed = vault.remove(&targets).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(vault.list(), &["tt0000001".to_string()]);
        assert!(!vault.contains("tt0000002"));
    }

    #[test]
    fn remove_of_absent_identifiers_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut vault = Vault::open(vault_path(&dir)).unwrap();
        vault.add("tt0000001").unwrap();

        let targets: HashSet<String> = ["tt9999999".to_string()].into_iter().collect();
        assert_eq!(vault.remove(&targets).unwrap(), 0);
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn hand_edited_file_with_duplicates_loads_deduplicated() {
        let dir = TempDir::new().unwrap();
        let path = vault_path(&dir);
        std::fs::write(&path, "tt0000001\n\ntt0000002\ntt0000001\n  \n").unwrap();

        let vault = Vault::open(&path).unwrap();
        assert_eq!(
            vault.list(),
            &["tt0000001".to_string(), "tt0000002".to_string()]
        );
    }
}
