//! Key/value storage backends
//!
//! Mirrors the browser Storage API (`getItem`/`setItem`/`removeItem`) so the
//! same [`SessionStore`](super::SessionStore) works over `localStorage`, a
//! directory on disk, or memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{SessionError, SessionResult};

/// Minimal string key/value persistence
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;
    fn remove_item(&self, key: &str) -> SessionResult<()>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> SessionResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| SessionError::Storage(format!("memory storage poisoned: {}", e)))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(feature = "native")]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> SessionResult<std::path::PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SessionError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

#[cfg(feature = "native")]
impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();

        a.set_item("token", "abc").unwrap();
        assert_eq!(b.get_item("token").unwrap().as_deref(), Some("abc"));

        b.remove_item("token").unwrap();
        assert!(a.is_empty());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session"));

        assert_eq!(storage.get_item("token").unwrap(), None);
        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.get_item("token").unwrap().as_deref(), Some("abc"));

        storage.remove_item("token").unwrap();
        storage.remove_item("token").unwrap();
        assert_eq!(storage.get_item("token").unwrap(), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(SessionError::InvalidKey(_))
        ));
    }
}
