//! `localStorage`-backed [`PreferenceStore`].

use behavior::error::BehaviorError;
use behavior::preferences::{MemoryStore, PreferenceStore};
use web_sys::{Storage, Window};

use crate::dom::js_reason;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`. Fails when storage is disabled or the
    /// page is sandboxed.
    pub fn open(window: &Window) -> Result<Self, BehaviorError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(BehaviorError::StorageUnavailable("window.localStorage is null".to_owned())),
            Err(err) => Err(BehaviorError::StorageUnavailable(js_reason(&err))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, BehaviorError> {
        self.storage
            .get_item(key)
            .map_err(|err| BehaviorError::StorageRead { key: key.to_owned(), reason: js_reason(&err) })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), BehaviorError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| BehaviorError::StorageWrite { key: key.to_owned(), reason: js_reason(&err) })
    }
}

/// `localStorage` when available; otherwise an in-memory store, so
/// toggles still work for the life of the page.
pub fn open_preferences(window: &Window) -> Box<dyn PreferenceStore> {
    match LocalStorage::open(window) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{err}; preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}
