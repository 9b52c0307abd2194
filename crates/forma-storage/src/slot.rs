//! Slot-based durable storage: JSON strings keyed by name.
//!
//! The store depends on this trait rather than a concrete backend so that
//! tests can substitute an in-memory double for the file-backed default.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

/// Durable key/value storage for serialized form data.
///
/// One writer, one reader (the same process): no locking beyond interior
/// mutability is needed.
pub trait SlotStore: Send + Sync {
    /// Reads the slot's content, or `None` if it has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes the slot, replacing any previous content.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the slot. Removing a missing slot is a no-op.
    fn delete(&self, key: &str) -> Result<()>;
}

/// File-backed slot store: one `<key>.json` file per slot under a directory.
#[derive(Debug)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slot store for tests.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with a corrupt payload.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .slots
            .lock()
            .expect("slot mutex poisoned")
            .insert(key.into(), value.into());
        store
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .slots
            .lock()
            .expect("slot mutex poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .expect("slot mutex poisoned")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.slots.lock().expect("slot mutex poisoned").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path().join("slots")).unwrap();

        assert_eq!(store.read("forms").unwrap(), None);
        store.write("forms", "[]").unwrap();
        assert_eq!(store.read("forms").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path()).unwrap();

        store.write("draft", "{}").unwrap();
        store.delete("draft").unwrap();
        store.delete("draft").unwrap();
        assert_eq!(store.read("draft").unwrap(), None);
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySlotStore::new();
        assert_eq!(store.read("forms").unwrap(), None);
        store.write("forms", "[1]").unwrap();
        assert_eq!(store.read("forms").unwrap().as_deref(), Some("[1]"));
        store.delete("forms").unwrap();
        assert_eq!(store.read("forms").unwrap(), None);
    }
}
