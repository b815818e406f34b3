//! Persisted string preferences.
//!
//! The browser backs this with `localStorage`; [`MemoryStore`] stands in
//! when that is unavailable and in tests. Reads happen once at startup and
//! writes on every toggle, always from the single UI thread.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::collections::HashMap;

use crate::error::BehaviorError;

/// Key/value storage for preference flags.
pub trait PreferenceStore {
    /// Stored value for `key`, or `None` if never written.
    fn read(&self, key: &str) -> Result<Option<String>, BehaviorError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), BehaviorError>;
}

/// Process-local store. Values vanish with the page.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `key = value`.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }

    /// A store whose writes fail, like a full or private-mode `localStorage`.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, BehaviorError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), BehaviorError> {
        if self.reject_writes {
            return Err(BehaviorError::StorageWrite { key: key.to_owned(), reason: "store is read-only".to_owned() });
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Read `key`, treating a failing backend like an absent value.
pub fn read_or_absent<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.read(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{err}; using default");
            None
        }
    }
}

/// Write `key`, logging a failure instead of interrupting the caller.
pub fn write_or_warn<S: PreferenceStore + ?Sized>(store: &mut S, key: &str, value: &str) {
    if let Err(err) = store.write(key, value) {
        log::warn!("{err}");
    }
}
