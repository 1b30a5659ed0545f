//! Key-value backing stores for the registry.
//!
//! # Storage layout ([`FileStore`])
//!
//! ```text
//! ~/.mdgen/
//!   store/            (mode 0700, created on first write)
//!     <key>.json      (one file per key — mode 0600)
//! ```
//!
//! Writes are atomic: serialize → `<key>.json.tmp` sibling → `chmod 0600` →
//! `rename`. The `.tmp` always lives next to the target, so the rename never
//! crosses filesystems.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::mdgen_root;
use crate::error::{io_err, StoreError};

/// Minimal durable key-value contract the registry persists through.
pub trait KeyValueStore {
    /// Raw value stored under `key`, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// 1. In-memory store
// ---------------------------------------------------------------------------

/// Process-local store. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one pre-existing entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 2. File-backed store
// ---------------------------------------------------------------------------

/// One JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at an explicit directory. Nothing is created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<home>/.mdgen/store/`
    pub fn at_home(home: &Path) -> Self {
        Self::new(mdgen_root(home).join("store"))
    }

    /// `at_home` convenience wrapper — derives home from `dirs::home_dir()`.
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Ok(Self::at_home(&home))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<key>.json` — pure, no I/O.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| io_err(&self.root, e))?;
            set_dir_permissions(&self.root)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| io_err(&path, e))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_root()?;
        let path = self.key_path(key);
        let tmp = path.with_file_name(format!("{key}.json.tmp"));

        std::fs::write(&tmp, value).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("nope").unwrap(), None);
    }

    #[test]
    fn memory_store_write_replaces_value() {
        let mut store = MemoryStore::with_entry("k", "old");
        store.write("k", "new").unwrap();
        assert_eq!(store.get("k"), Some("new"));
    }

    #[test]
    fn file_store_key_path_is_correct() {
        let home = TempDir::new().unwrap();
        let store = FileStore::at_home(home.path());
        assert!(store
            .key_path("mdgen-projects")
            .ends_with(".mdgen/store/mdgen-projects.json"));
    }

    #[test]
    fn file_store_read_before_write_is_none() {
        let home = TempDir::new().unwrap();
        let store = FileStore::at_home(home.path());
        assert_eq!(store.read("mdgen-projects").unwrap(), None);
        assert!(!store.root().exists(), "read must not create the store dir");
    }

    #[test]
    fn file_store_write_then_read() {
        let home = TempDir::new().unwrap();
        let mut store = FileStore::at_home(home.path());
        store.write("mdgen-projects", "[]").unwrap();
        assert_eq!(store.read("mdgen-projects").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_cleans_up_tmp() {
        let home = TempDir::new().unwrap();
        let mut store = FileStore::at_home(home.path());
        store.write("k", "v").unwrap();
        let tmp = store.key_path("k").with_file_name("k.json.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful write");
    }

    #[cfg(unix)]
    #[test]
    fn file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().unwrap();
        let mut store = FileStore::at_home(home.path());
        store.write("k", "v").unwrap();

        let dir_mode = std::fs::metadata(store.root()).unwrap().permissions().mode() & 0o777;
        let file_mode = std::fs::metadata(store.key_path("k"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
    }
}
