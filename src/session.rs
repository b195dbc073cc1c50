//! Session Context
//!
//! Explicit handle on the persisted client state (auth token, API key,
//! sidebar flag). Passed to the API client instead of reading browser
//! storage behind its back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TOKEN_KEY: &str = "access_token";
pub const API_KEY_KEY: &str = "apiKey";
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Key-value storage backend
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`
///
/// Storage can be missing (private mode, sandboxed iframes); reads then
/// return `None` and writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("[SESSION] Failed to persist {}", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process storage, used off-browser
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Bearer token, ignoring blank values
    pub fn token(&self) -> Option<String> {
        non_blank(self.store.get(TOKEN_KEY))
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.store.remove(TOKEN_KEY);
    }

    pub fn api_key(&self) -> Option<String> {
        non_blank(self.store.get(API_KEY_KEY))
    }

    /// Store the API key; blank input clears it
    pub fn set_api_key(&self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            self.store.remove(API_KEY_KEY);
        } else {
            self.store.set(API_KEY_KEY, key);
        }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.store.get(SIDEBAR_COLLAPSED_KEY).as_deref() == Some("true")
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.store.set(SIDEBAR_COLLAPSED_KEY, if collapsed { "true" } else { "false" });
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip_and_clear() {
        let session = Session::in_memory();
        assert_eq!(session.token(), None);
        session.set_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        session.clear_token();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let session = Session::in_memory();
        session.set_token("   ");
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_api_key_trimmed_and_cleared() {
        let session = Session::in_memory();
        session.set_api_key("  sk-1  ");
        assert_eq!(session.api_key().as_deref(), Some("sk-1"));
        session.set_api_key("");
        assert_eq!(session.api_key(), None);
    }

    #[test]
    fn test_sidebar_flag() {
        let session = Session::in_memory();
        assert!(!session.sidebar_collapsed());
        session.set_sidebar_collapsed(true);
        assert!(session.sidebar_collapsed());
        session.set_sidebar_collapsed(false);
        assert!(!session.sidebar_collapsed());
    }
}
