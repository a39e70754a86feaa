//! Local persistence for dashboard settings, chiefly the HeyReach API key.
//!
//! Values live in a flat string key/value store: the window's local storage in
//! the browser, a JSON file in the per-user data directory elsewhere. Writes
//! apply in call order, last write wins.

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use super::errors::StorageError;
use super::page::{Page, API_KEY_INPUT_ID};

/// Storage key holding the raw API key.
pub const API_KEY_STORAGE_KEY: &str = "heyreach_api_key";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Persists `api_key` when it has non-whitespace content.
///
/// The value is stored untrimmed. Blank input is ignored: nothing is written
/// and nothing is deleted. Returns whether a write happened.
pub fn save_api_key(store: &mut impl KeyValueStore, api_key: &str) -> Result<bool, StorageError> {
    if api_key.trim().is_empty() {
        return Ok(false);
    }
    store.set(API_KEY_STORAGE_KEY, api_key)?;
    tracing::debug!("api key saved");
    Ok(true)
}

/// Copies the saved API key into the `api_key` input, if both exist.
pub fn load_api_key(
    store: &impl KeyValueStore,
    page: &mut impl Page,
) -> Result<Option<String>, StorageError> {
    let saved = store
        .get(API_KEY_STORAGE_KEY)?
        .filter(|value| !value.is_empty());
    if let Some(key) = saved.as_deref() {
        if page.set_input_value(API_KEY_INPUT_ID, key) {
            tracing::debug!("api key restored into form");
        }
    }
    Ok(saved)
}

/// One-time page setup, run after the dashboard is mounted: restores the saved
/// API key when the page has an `api_key` input.
pub fn init_page(store: &impl KeyValueStore, page: &mut impl Page) {
    if !page.has_element(API_KEY_INPUT_ID) {
        return;
    }
    if let Err(err) = load_api_key(store, page) {
        tracing::warn!(%err, "could not restore api key");
    }
}

/// Volatile store; the fallback when no persistent backend is reachable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected(format!("{err:?}")))
    }
}

/// JSON object on disk, one entry per key.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    const FILE_NAME: &'static str = "local_storage.json";

    /// Store in the per-user data directory.
    pub fn open() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "HeyReach", "heyreach-exporter")
            .ok_or(StorageError::Unavailable)?;
        Ok(Self::at(dirs.data_dir().join(Self::FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// The persistent store for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Result<BrowserStorage, StorageError> {
    BrowserStorage::open()
}

/// The persistent store for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Result<FileStore, StorageError> {
    FileStore::open()
}
