//! # Persistent client state
//!
//! A tiny key-value store for the handful of values that survive restarts:
//! the auth token (`access_token`, read-only from this client's perspective)
//! and the chosen theme. The store is a trait so tests and headless callers
//! can substitute an in-memory implementation.
//!
//! `FileStore` keeps one file per key under `~/.eddi/`, the same directory
//! the config file lives in.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage key for the bearer token attached to API requests.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the persisted theme mode.
pub const THEME_KEY: &str = "theme";

pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent/unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-per-key store rooted at a directory (normally `~/.eddi/`).
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Opens the default store at `~/.eddi/`, creating the directory.
    pub fn open_default() -> io::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        let root = home.join(".eddi");
        fs::create_dir_all(&root)?;
        Ok(Self::new(root))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let contents = fs::read_to_string(self.root.join(key)).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        // Write via .tmp + rename so a crash never leaves a half-written key
        let path = self.root.join(key);
        let tmp = self.root.join(format!("{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-memory store for tests and token overrides.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "store mutex poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        store.set(ACCESS_TOKEN_KEY, "tok-123").unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-123"));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = std::env::temp_dir().join(format!("eddi-store-test-{}", std::process::id()));
        let store = FileStore::new(dir.clone());
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = std::env::temp_dir().join(format!("eddi-store-empty-{}", std::process::id()));
        let store = FileStore::new(dir);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn file_store_trims_trailing_newline() {
        let dir = std::env::temp_dir().join(format!("eddi-store-trim-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ACCESS_TOKEN_KEY), "tok-456\n").unwrap();
        let store = FileStore::new(dir.clone());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-456"));
        let _ = fs::remove_dir_all(dir);
    }
}
