//! Durable key/value storage behind the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists through [`KeyValueStore`] so the same logic
//! runs against browser `localStorage` and, in unit tests, an in-memory map.
//! Outside the browser (SSR) `BrowserStorage` is inert and reads as empty.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort: read failures and malformed JSON are treated as
//! absent values, and write failures are dropped. A missing value always
//! degrades to the unauthenticated state.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

#[cfg(test)]
use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String-valued key/value store that survives reloads.
pub trait KeyValueStore {
    /// Read `key`, or `None` if it is absent or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);

    fn remove_item(&self, key: &str);
}

/// Load a JSON value for `key`. Malformed JSON counts as absent.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("ignoring malformed stored value for {key}: {e}");
            None
        }
    }
}

/// Save `value` as JSON under `key`.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, &raw),
        Err(e) => log::warn!("failed to encode {key} for storage: {e}"),
    }
}

/// Browser `localStorage`. Every operation is a no-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory store for unit tests. Clones share the same map, which models a
/// reload: a second session store built on a clone sees what the first wrote.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently present, in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.items
            .lock()
            .map(|items| items.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().map_or(true, |items| items.is_empty())
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}
