//! `window.localStorage` as a cart store.

use cart_cache::{CacheError, MemoryStore, Store};
use wasm_bindgen::JsValue;

/// The page's local storage.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the local storage of the current window.
    ///
    /// Fails when there is no window or when the browser refuses access,
    /// e.g. `SecurityError` in private mode or a sandboxed iframe.
    pub fn open() -> Result<Self, CacheError> {
        let window =
            web_sys::window().ok_or_else(|| CacheError::OpenError("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::OpenError(describe(&e)))?
            .ok_or_else(|| CacheError::OpenError("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl Store for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::StoreError(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::StoreError(describe(&e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::StoreError(describe(&e)))
    }
}

/// Where a page session keeps its cart.
///
/// Falls back to memory when local storage cannot be opened, so the cart
/// still works for the life of the page, just without persistence.
pub enum PageStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl PageStore {
    /// Local storage if the browser allows it, memory otherwise.
    pub fn open() -> Self {
        Self::or_memory(LocalStorage::open())
    }

    /// Use `local` if it opened, otherwise an empty in-memory store.
    pub fn or_memory(local: Result<LocalStorage, CacheError>) -> Self {
        match local {
            Ok(storage) => PageStore::Local(storage),
            Err(e) => {
                tracing::warn!(error = %e, "local storage unavailable, cart will not persist");
                PageStore::Memory(MemoryStore::new())
            }
        }
    }

    /// Whether the cart survives a reload.
    pub fn is_persistent(&self) -> bool {
        matches!(self, PageStore::Local(_))
    }
}

impl Store for PageStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            PageStore::Local(s) => s.get(key),
            PageStore::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        match self {
            PageStore::Local(s) => s.set(key, value),
            PageStore::Memory(s) => s.set(key, value),
        }
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match self {
            PageStore::Local(s) => s.delete(key),
            PageStore::Memory(s) => s.delete(key),
        }
    }
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use cart_commerce::prelude::*;

    fn blocked() -> Result<LocalStorage, CacheError> {
        Err(CacheError::OpenError("SecurityError".to_string()))
    }

    #[test]
    fn test_blocked_storage_falls_back_to_memory() {
        let store = PageStore::or_memory(blocked());
        assert!(!store.is_persistent());

        store.set("cart", "{}").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("{}"));
        store.delete("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_cart_works_without_local_storage() {
        let sink = MemorySink::new();
        let renderer = MemoryRenderer::new();
        let mut service = CartService::open(
            PageStore::or_memory(blocked()),
            CartConfig::default(),
            Capabilities {
                sink: Box::new(sink.clone()),
                renderer: Box::new(renderer.clone()),
                navigator: Box::new(MemoryNavigator::new()),
            },
        );

        service.add_item("P1", "Widget", 9.99).unwrap();
        service.add_item("P2", "Gadget", 5.0).unwrap();

        assert_eq!(service.item_count(), 2);
        assert_eq!(renderer.item_count(), Some(2));
        assert_eq!(sink.names(), vec![EventName::AddToCart, EventName::AddToCart]);
        assert!(service.store().raw().unwrap().is_some());
    }
}
