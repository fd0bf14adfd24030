//! Storage media for string-valued records.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::CacheError;

/// A string-valued key-value medium.
///
/// Mirrors the browser `localStorage` contract: `set` overwrites, `get` of an
/// unknown key is `None` rather than an error.
pub trait Store {
    /// Read the record under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write `value` under `key`, replacing any previous record.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove the record under `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether a record exists under `key`.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: Store + ?Sized> Store for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

/// In-process store, used for tests and headless sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::Store;
    use crate::CacheError;

    /// Directory-backed store: one `<key>.json` file per record.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// Open a store rooted at `dir`, creating the directory if needed.
        pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
            let dir = dir.as_ref().to_path_buf();
            std::fs::create_dir_all(&dir)
                .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
            Ok(Self { dir })
        }

        /// Root directory of the store.
        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
            if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
                return Err(CacheError::StoreError(format!("Invalid key: {:?}", key)));
            }
            Ok(self.dir.join(format!("{}.json", key)))
        }
    }

    impl Store for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            let path = self.path_for(key)?;
            match std::fs::read_to_string(&path) {
                Ok(raw) => Ok(Some(raw)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(CacheError::StoreError(format!("{}: {}", path.display(), e))),
            }
        }

        /// Writes a sibling temp file and renames it over the record, so a
        /// crash mid-write leaves the previous record intact.
        fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
            let path = self.path_for(key)?;
            let tmp = path.with_extension("json.tmp");
            tracing::trace!(path = %path.display(), bytes = value.len(), "writing record");
            std::fs::write(&tmp, value)
                .and_then(|()| std::fs::rename(&tmp, &path))
                .map_err(|e| {
                    let _ = std::fs::remove_file(&tmp);
                    CacheError::StoreError(format!("{}: {}", path.display(), e))
                })
        }

        fn delete(&self, key: &str) -> Result<(), CacheError> {
            let path = self.path_for(key)?;
            match std::fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CacheError::StoreError(format!("{}: {}", path.display(), e))),
            }
        }
    }
}
