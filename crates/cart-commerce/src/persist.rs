//! Cart persistence over a string key-value store.

use cart_cache::{Cache, CacheError, Store};

use crate::cart::Cart;

/// Reads and writes the cart as one JSON record under a fixed key.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: Store> CartStore<S> {
    /// Persist under `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// The record key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the whole cart, overwriting the previous record.
    pub fn save(&self, cart: &Cart) -> Result<(), CacheError> {
        self.cache.set(&self.key, cart)
    }

    /// Read the cart.
    ///
    /// A missing record is an empty cart. A record that is not a well-formed
    /// cart fails with [`CacheError::Parse`].
    pub fn load(&self) -> Result<Cart, CacheError> {
        let mut cart = self.cache.get::<Cart>(&self.key)?.unwrap_or_default();
        cart.retain_valid();
        Ok(cart)
    }

    /// Read the cart, starting empty if the record can't be read.
    ///
    /// An unparseable record is copied to [`backup_key`](Self::backup_key)
    /// first, since the next save overwrites it.
    pub fn load_or_empty(&self) -> Cart {
        match self.load() {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored cart unreadable, starting empty");
                if e.is_parse() {
                    self.back_up_raw();
                }
                Cart::new()
            }
        }
    }

    /// Key the last unreadable record is copied to.
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    fn back_up_raw(&self) {
        let backup = self.backup_key();
        let copied = self
            .raw()
            .and_then(|raw| match raw {
                Some(raw) => self.store().set(&backup, &raw),
                None => Ok(()),
            });
        match copied {
            Ok(()) => tracing::info!(key = %self.key, backup = %backup, "kept unreadable cart record"),
            Err(e) => tracing::warn!(backup = %backup, error = %e, "failed to back up unreadable cart record"),
        }
    }

    /// The raw stored record, if any.
    pub fn raw(&self) -> Result<Option<String>, CacheError> {
        self.cache.get_raw(&self.key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Price;
    use cart_cache::MemoryStore;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("P1"), "Widget", Price::new(9.99));
        cart.add_item(ProductId::new("P1"), "Widget", Price::new(9.99));
        cart.add_item(ProductId::new("P2"), "Gadget", Price::new(20.0));
        cart
    }

    #[test]
    fn test_roundtrip() {
        let store = CartStore::new(MemoryStore::new(), "cart");
        let cart = sample_cart();

        store.save(&cart).unwrap();
        assert_eq!(store.load().unwrap(), cart);
    }

    #[test]
    fn test_missing_record_is_empty_cart() {
        let store = CartStore::new(MemoryStore::new(), "cart");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_parse_error() {
        let memory = MemoryStore::new();
        memory.set("cart", "[1, 2").unwrap();
        let store = CartStore::new(memory, "cart");

        assert!(store.load().unwrap_err().is_parse());
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn test_unreadable_record_is_backed_up() {
        let memory = MemoryStore::new();
        memory.set("cart", "[1, 2").unwrap();
        let store = CartStore::new(memory, "cart");

        assert!(store.load_or_empty().is_empty());
        assert_eq!(store.backup_key(), "cart.corrupt");
        assert_eq!(store.store().get("cart.corrupt").unwrap().as_deref(), Some("[1, 2"));

        store.save(&sample_cart()).unwrap();
        assert_eq!(store.store().get("cart.corrupt").unwrap().as_deref(), Some("[1, 2"));
    }

    #[test]
    fn test_readable_record_is_not_backed_up() {
        let store = CartStore::new(MemoryStore::new(), "cart");
        store.save(&sample_cart()).unwrap();

        assert_eq!(store.load_or_empty(), sample_cart());
        assert!(store.store().get("cart.corrupt").unwrap().is_none());
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let memory = MemoryStore::new();
        memory
            .set("cart", r#"{"P1": {"name": "A", "price": 1, "quantity": -1}}"#)
            .unwrap();
        let store = CartStore::new(memory, "cart");

        assert!(store.load().unwrap_err().is_parse());
    }

    #[test]
    fn test_save_overwrites() {
        let store = CartStore::new(MemoryStore::new(), "cart");
        store.save(&sample_cart()).unwrap();
        store.save(&Cart::new()).unwrap();

        assert_eq!(store.raw().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_reads_hand_written_record() {
        let memory = MemoryStore::new();
        memory
            .set(
                "cart",
                r#"{"sku-9":{"name":"Mug","price":12.5,"quantity":3}}"#,
            )
            .unwrap();
        let store = CartStore::new(memory, "cart");

        let cart = store.load().unwrap();
        let item = cart.get(&ProductId::new("sku-9")).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, Price::new(12.5));
    }
}
