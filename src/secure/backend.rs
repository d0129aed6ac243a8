// KVStore — Secure Store
//
// `KvStore` over an encrypted blob store. Values are encoded with the tag
// codec; a record that does not decode as the requested type is a type
// mismatch, never a silent coercion.
//
// `set_*` is delete-then-insert because the blob store has no upsert. The
// two calls are not atomic: concurrent writers to one key can lose an
// update or see the insert collide, and a concurrent reader can observe a
// transient absence. Callers that need per-key atomicity serialize access.

use zeroize::Zeroizing;

use crate::checkpoint::{Checkpoint, CheckpointedResult, ErrorInfo};
use crate::codec::{self, Scalar, ScalarValue};
use crate::store::{KvResult, KvStore, KvStoreError};

use super::{BlobError, BlobStore, Removal};

const COMPONENT: &str = "SecureStore";

/// Encrypted, namespaced store for secrets and credentials.
pub struct SecureStore<B> {
    namespace: String,
    blobs: B,
    checkpoint: Checkpoint,
}

impl<B: BlobStore> SecureStore<B> {
    /// Create a store whose keys live under `namespace` (the service
    /// identifier) in `blobs`.
    pub fn new(namespace: impl Into<String>, blobs: B) -> Self {
        Self {
            namespace: namespace.into(),
            blobs,
            checkpoint: Checkpoint::new(COMPONENT),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn blob_store(&self) -> &B {
        &self.blobs
    }

    fn failure(&self, error: KvStoreError) -> ErrorInfo<KvStoreError> {
        ErrorInfo::new(error, self.checkpoint).with_extra("namespace", self.namespace.as_str())
    }

    /// Map a blob store failure to exactly one error variant.
    fn blob_failure<T>(&self, err: BlobError) -> KvResult<T> {
        let error = match err {
            BlobError::Status(status) => KvStoreError::BackendStatus { status },
            BlobError::Malformed(message) => KvStoreError::Underlying { message },
        };
        self.failure(error).into()
    }

    fn read<T: Scalar>(&self, key: &str) -> KvResult<Option<T>> {
        let record = match self.blobs.query_one(&self.namespace, key) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(namespace = %self.namespace, key, "Secure read: absent");
                return CheckpointedResult::success(None, self.checkpoint);
            }
            Err(e) => return self.blob_failure(e),
        };

        match codec::decode(&record, T::TYPE).and_then(T::from_value) {
            Some(value) => {
                tracing::debug!(namespace = %self.namespace, key, ty = %T::TYPE, "Secure read");
                CheckpointedResult::success(Some(value), self.checkpoint)
            }
            None => {
                let mut info = self
                    .failure(KvStoreError::type_mismatch(key, T::TYPE))
                    .with_extra("stored_len", record.len());
                if let Some(stored) = codec::peek_type(&record) {
                    info = info.with_extra("stored_type", stored.name());
                }
                info.into()
            }
        }
    }

    fn write(&self, key: &str, value: ScalarValue) -> KvResult<()> {
        let ty = value.scalar_type();
        let record = Zeroizing::new(codec::encode(&value));

        // Only the insert decides the outcome.
        match self.blobs.delete(&self.namespace, key) {
            Ok(removal) => {
                tracing::debug!(
                    namespace = %self.namespace,
                    key,
                    ?removal,
                    "Cleared previous item"
                );
            }
            Err(e) => {
                tracing::warn!(
                    namespace = %self.namespace,
                    key,
                    error = %e,
                    "Failed to clear previous item before insert"
                );
            }
        }

        match self.blobs.insert(&self.namespace, key, &record) {
            Ok(()) => {
                tracing::debug!(namespace = %self.namespace, key, ty = %ty, "Secure write");
                CheckpointedResult::success((), self.checkpoint)
            }
            Err(e) => self.blob_failure(e),
        }
    }

    fn set<T: Scalar>(&self, key: &str, value: T) -> KvResult<()> {
        self.write(key, value.into_value())
    }
}

impl<B: BlobStore> KvStore for SecureStore<B> {
    fn get_bool(&self, key: &str) -> KvResult<Option<bool>> {
        self.read(key)
    }

    fn set_bool(&self, key: &str, value: bool) -> KvResult<()> {
        self.set(key, value)
    }

    fn get_int64(&self, key: &str) -> KvResult<Option<i64>> {
        self.read(key)
    }

    fn set_int64(&self, key: &str, value: i64) -> KvResult<()> {
        self.set(key, value)
    }

    fn get_uint64(&self, key: &str) -> KvResult<Option<u64>> {
        self.read(key)
    }

    fn set_uint64(&self, key: &str, value: u64) -> KvResult<()> {
        self.set(key, value)
    }

    fn get_double(&self, key: &str) -> KvResult<Option<f64>> {
        self.read(key)
    }

    fn set_double(&self, key: &str, value: f64) -> KvResult<()> {
        self.set(key, value)
    }

    fn get_float(&self, key: &str) -> KvResult<Option<f32>> {
        self.read(key)
    }

    fn set_float(&self, key: &str, value: f32) -> KvResult<()> {
        self.set(key, value)
    }

    fn get_string(&self, key: &str) -> KvResult<Option<String>> {
        self.read(key)
    }

    fn set_string(&self, key: &str, value: &str) -> KvResult<()> {
        self.write(key, ScalarValue::String(value.to_string()))
    }

    fn get_bytes(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        self.read(key)
    }

    fn set_bytes(&self, key: &str, value: &[u8]) -> KvResult<()> {
        self.write(key, ScalarValue::Bytes(value.to_vec()))
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        match self.blobs.delete(&self.namespace, key) {
            Ok(Removal::Deleted) | Ok(Removal::Absent) => {
                tracing::debug!(namespace = %self.namespace, key, "Secure remove");
                CheckpointedResult::success((), self.checkpoint)
            }
            Err(e) => self.blob_failure(e),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
