//! Key-value storage for the pixel cart.
//!
//! Records are plain strings keyed by name, matching the shape of the
//! browser's `localStorage`. The [`Store`] trait abstracts the medium so the
//! same cart code runs against memory, a directory on disk, or the browser.
//! [`Cache`] layers automatic JSON serialization on top of any store.
//!
//! # Example
//!
//! ```rust
//! use cart_cache::{Cache, MemoryStore};
//! use std::collections::BTreeMap;
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! let mut totals = BTreeMap::new();
//! totals.insert("P1".to_string(), 2u32);
//! cache.set("cart", &totals).unwrap();
//!
//! let loaded: Option<BTreeMap<String, u32>> = cache.get("cart").unwrap();
//! assert_eq!(loaded, Some(totals));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{MemoryStore, Store};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, MemoryStore, Store};
}
