//! Typed key-value wrapper with automatic serialization.

use crate::{CacheError, Store};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`Store`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
}

impl<S: Store> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and [`CacheError::Parse`] if
    /// the stored record cannot be decoded as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => {
                let value: T = serde_json::from_str(&raw)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw record without decoding it.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache, replacing any previous record.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        quantity: u32,
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let entry = Entry {
            name: "Widget".to_string(),
            quantity: 2,
        };
        cache.set("entry", &entry).unwrap();

        let loaded: Option<Entry> = cache.get("entry").unwrap();
        assert_eq!(loaded, Some(entry));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Entry> = cache.get("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_record_is_parse_error() {
        let store = MemoryStore::new();
        store.set("entry", "{not json").unwrap();
        let cache = Cache::new(store);

        let err = cache.get::<Entry>("entry").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("n", &1u32).unwrap();
        cache.set("n", &7u32).unwrap();
        assert_eq!(cache.get::<u32>("n").unwrap(), Some(7));
        assert_eq!(cache.get_raw("n").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_delete() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("n", &1u32).unwrap();
        assert!(cache.exists("n").unwrap());
        cache.delete("n").unwrap();
        assert!(!cache.exists("n").unwrap());
    }
}
