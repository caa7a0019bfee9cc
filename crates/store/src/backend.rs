use crate::StoreError;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Ordered key-value storage underneath the document store.
///
/// Keys are `"<collection>/<id>"` strings and every implementation must
/// yield them in ascending byte order from [`StoreBackend::scan_prefix`].
pub trait StoreBackend: Send + Sync {
    /// Insert or replace a value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
    /// Retrieve a value by key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Delete a key, returning whether it existed.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
    /// Visit every entry whose key starts with `prefix`, in key order.
    fn scan_prefix(
        &self,
        prefix: &str,
        visitor: &mut dyn FnMut(&str, &[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
    /// Flush any buffered writes.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Selects and builds a backend.
///
/// ```
/// use store::BackendConfig;
///
/// let config = BackendConfig::in_memory();
/// let config = BackendConfig::redb("/data/storefront.redb");
/// ```
#[derive(Clone, Debug, Default)]
pub enum BackendConfig {
    /// Persistent storage in a single redb file.
    ///
    /// Requires the `backend-redb` feature (enabled by default).
    Redb { path: String },
    /// Ephemeral `BTreeMap` storage, used by tests and local runs.
    #[default]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn redb<P: Into<String>>(path: P) -> Self {
        BackendConfig::Redb { path: path.into() }
    }

    pub fn build(&self) -> Result<Box<dyn StoreBackend>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
            BackendConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Box::new(RedbBackend::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(StoreError::backend("redb backend disabled at compile time"))
                }
            }
        }
    }
}

/// An in-memory backend using a `RwLock` around a `BTreeMap`.
pub struct InMemoryBackend {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for InMemoryBackend {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let removed = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .remove(key);
        Ok(removed.is_some())
    }

    fn scan_prefix(
        &self,
        prefix: &str,
        visitor: &mut dyn FnMut(&str, &[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        // The read lock is held for the whole scan.
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        for (key, value) in guard.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            visitor(key, value)?;
        }
        Ok(())
    }
}

#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use redb::RedbBackend;

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(backend: &dyn StoreBackend, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        backend
            .scan_prefix(prefix, &mut |key: &str, _: &[u8]| {
                keys.push(key.to_string());
                Ok(())
            })
            .unwrap();
        keys
    }

    #[test]
    fn in_memory_put_get_delete() {
        let backend = InMemoryBackend::new();
        backend.put("a/1", b"one").unwrap();
        assert_eq!(backend.get("a/1").unwrap(), Some(b"one".to_vec()));
        assert!(backend.delete("a/1").unwrap());
        assert!(!backend.delete("a/1").unwrap());
        assert_eq!(backend.get("a/1").unwrap(), None);
    }

    #[test]
    fn scan_prefix_stays_inside_collection() {
        let backend = InMemoryBackend::new();
        backend.put("product/2", b"2").unwrap();
        backend.put("review/1", b"r").unwrap();
        backend.put("product/1", b"1").unwrap();
        backend.put("productx/1", b"x").unwrap();

        assert_eq!(collect(&backend, "product/"), vec!["product/1", "product/2"]);
        assert_eq!(collect(&backend, "review/"), vec!["review/1"]);
        assert!(collect(&backend, "user/").is_empty());
    }

    #[test]
    fn default_config_builds_in_memory_backend() {
        let backend = BackendConfig::default().build().unwrap();
        backend.put("k/1", b"v").unwrap();
        assert_eq!(backend.get("k/1").unwrap(), Some(b"v".to_vec()));
    }
}
