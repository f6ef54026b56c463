//! Same-device preference storage.
//!
//! Values are JSON documents addressed by a short key. [`FileStore`] keeps
//! one file per key under the data directory; [`MemoryStore`] backs tests
//! and one-shot renders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub trait PreferenceStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed access on top of the raw string store.
pub trait PreferenceStoreExt: PreferenceStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Serde {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Load a value, falling back to its default when it is absent or unreadable.
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(v)) => v,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!("Discarding stored preference: {}", e);
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.put_raw(key, &raw)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStoreExt for S {}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/tuskblocks/preferences`
    pub fn default_dir() -> Result<PathBuf, StoreError> {
        Ok(dirs::data_dir()
            .ok_or(StoreError::NoDataDir)?
            .join("tuskblocks")
            .join("preferences"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but keep them from escaping the directory
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }

    fn io_err(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl PreferenceStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(key)(e)),
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(Self::io_err(key))?;
        std::fs::write(self.path(key), value).map_err(Self::io_err(key))?;
        tracing::debug!("Saved preference '{}'", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key)(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        size: u32,
        dark: bool,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load::<Prefs>("prefs").unwrap(), None);

        let prefs = Prefs { size: 120, dark: true };
        store.save("prefs", &prefs).unwrap();
        assert_eq!(store.load::<Prefs>("prefs").unwrap(), Some(prefs));

        store.remove("prefs").unwrap();
        assert_eq!(store.get_raw("prefs").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs { size: 90, dark: false };
        FileStore::new(dir.path()).save("prefs", &prefs).unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.load::<Prefs>("prefs").unwrap(), Some(prefs));
        assert!(dir.path().join("prefs.json").exists());
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.remove("never-written").is_ok());
        assert_eq!(store.get_raw("never-written").unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MemoryStore::new();
        store.put_raw("prefs", "{not json").unwrap();
        assert!(matches!(store.load::<Prefs>("prefs"), Err(StoreError::Serde { .. })));
        assert_eq!(store.load_or_default::<Prefs>("prefs"), Prefs::default());
    }

    #[test]
    fn test_keys_stay_inside_directory() {
        let store = FileStore::new("/tmp/prefs");
        assert_eq!(store.path("../etc/passwd"), PathBuf::from("/tmp/prefs/___etc_passwd.json"));
    }
}
