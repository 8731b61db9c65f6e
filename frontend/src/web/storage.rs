//! `KeyValueStore` over `window.localStorage`

use builder360::{KeyValueStore, MemoryStore};

/// Handle to browser local storage.
///
/// Every call re-resolves the storage object; when it is unavailable reads
/// return `None` and writes report failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn is_available() -> bool {
        Self::storage().is_some()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// Storage used by the app: local storage when the browser grants it,
/// otherwise an in-memory map that lasts for the page lifetime.
#[derive(Debug, Clone)]
pub enum AppStore {
    Browser(BrowserStorage),
    Memory(MemoryStore),
}

impl AppStore {
    pub fn detect() -> Self {
        if BrowserStorage::is_available() {
            AppStore::Browser(BrowserStorage)
        } else {
            builder360::log_warn!("[Session] localStorage unavailable, session will not persist");
            AppStore::Memory(MemoryStore::new())
        }
    }
}

impl KeyValueStore for AppStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            AppStore::Browser(s) => s.get(key),
            AppStore::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self {
            AppStore::Browser(s) => s.set(key, value),
            AppStore::Memory(s) => s.set(key, value),
        }
    }

    fn delete(&self, key: &str) -> bool {
        match self {
            AppStore::Browser(s) => s.delete(key),
            AppStore::Memory(s) => s.delete(key),
        }
    }
}
