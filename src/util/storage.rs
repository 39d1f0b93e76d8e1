//! Durable session storage behind a swappable key/value trait.
//!
//! DESIGN
//! ======
//! Every write is a full-key set or remove, never a partial update, so the
//! session keys can always be purged as a unit and a half-written session
//! cannot survive a reload.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

/// Storage keys for the persisted session mirror.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER_ID: &str = "user_id";
    pub const EMAIL: &str = "email";
    pub const NAME: &str = "name";
    pub const IS_STAFF: &str = "is_staff";
    pub const IS_ACTIVE: &str = "is_active";

    /// Every key the session mirror may occupy, in purge order.
    pub const ALL: [&str; 7] = [
        ACCESS_TOKEN,
        REFRESH_TOKEN,
        USER_ID,
        EMAIL,
        NAME,
        IS_STAFF,
        IS_ACTIVE,
    ];
}

/// Durable client-side key/value storage for session state.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Remove every session key. Safe to call in any state.
pub fn purge(store: &dyn SessionStore) {
    for key in keys::ALL {
        store.remove(key);
    }
}

/// In-memory store used in native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Browser `localStorage` store. Reads and writes fail soft: a browser with
/// storage disabled behaves like an empty store.
#[cfg(feature = "browser")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(feature = "browser")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "browser")]
impl SessionStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
