// KVStore — Encrypted blob store capability
//
// The secure backend only needs three operations from its storage: look up
// one item, insert one item, delete one item. Insert is not guaranteed to
// replace an existing item, so writers delete first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use zeroize::Zeroizing;

use super::error::status;
use super::BlobError;

/// Outcome of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// Nothing was stored under the key. Not an error.
    Absent,
}

/// Opaque byte storage scoped by `(namespace, key)`.
pub trait BlobStore: Send + Sync {
    /// Fetch the item, or `None` if it does not exist.
    fn query_one(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, BlobError>;

    /// Insert a new item. Stores without upsert fail if one already exists.
    fn insert(&self, namespace: &str, key: &str, bytes: &[u8]) -> Result<(), BlobError>;

    fn delete(&self, namespace: &str, key: &str) -> Result<Removal, BlobError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn query_one(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, BlobError> {
        (**self).query_one(namespace, key)
    }

    fn insert(&self, namespace: &str, key: &str, bytes: &[u8]) -> Result<(), BlobError> {
        (**self).insert(namespace, key, bytes)
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<Removal, BlobError> {
        (**self).delete(namespace, key)
    }
}

// ─── In-Memory Implementation ────────────────────────────────────────────────

/// A blob store held in process memory.
///
/// Used where no platform keyring exists and by tests, so they never touch
/// the real keychain. Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryBlobStore {
    items: Mutex<HashMap<(String, String), Zeroizing<Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items across all namespaces.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<(String, String), Zeroizing<Vec<u8>>>>, BlobError>
    {
        self.items
            .lock()
            .map_err(|_| BlobError::Status(status::PLATFORM_FAILURE))
    }
}

impl BlobStore for MemoryBlobStore {
    fn query_one(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, BlobError> {
        let items = self.lock()?;
        Ok(items
            .get(&(namespace.to_string(), key.to_string()))
            .map(|bytes| Zeroizing::new(bytes.to_vec())))
    }

    fn insert(&self, namespace: &str, key: &str, bytes: &[u8]) -> Result<(), BlobError> {
        let mut items = self.lock()?;
        let slot = (namespace.to_string(), key.to_string());
        if items.contains_key(&slot) {
            return Err(BlobError::Status(status::DUPLICATE_ITEM));
        }
        items.insert(slot, Zeroizing::new(bytes.to_vec()));
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<Removal, BlobError> {
        let mut items = self.lock()?;
        match items.remove(&(namespace.to_string(), key.to_string())) {
            Some(_) => Ok(Removal::Deleted),
            None => Ok(Removal::Absent),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
