// KVStore — Store contract
//
// One named get/set pair per scalar type plus `remove`. The type is chosen
// by the method name, so reading a key as the wrong Rust type does not
// compile; whether the stored record matches is the backend's concern.

use crate::checkpoint::CheckpointedResult;

use super::KvStoreError;

/// Result type of every store operation.
pub type KvResult<T> = CheckpointedResult<T, KvStoreError>;

/// Typed key-value access implemented by every backend.
///
/// Getters return `Success(None)` for a key that was never set. Setters
/// replace any existing value. `remove` succeeds whether or not the key
/// existed. Nothing here is atomic across keys.
pub trait KvStore: Send + Sync {
    fn get_bool(&self, key: &str) -> KvResult<Option<bool>>;
    fn set_bool(&self, key: &str, value: bool) -> KvResult<()>;

    fn get_int64(&self, key: &str) -> KvResult<Option<i64>>;
    fn set_int64(&self, key: &str, value: i64) -> KvResult<()>;

    fn get_uint64(&self, key: &str) -> KvResult<Option<u64>>;
    fn set_uint64(&self, key: &str, value: u64) -> KvResult<()>;

    fn get_double(&self, key: &str) -> KvResult<Option<f64>>;
    fn set_double(&self, key: &str, value: f64) -> KvResult<()>;

    fn get_float(&self, key: &str) -> KvResult<Option<f32>>;
    fn set_float(&self, key: &str, value: f32) -> KvResult<()>;

    fn get_string(&self, key: &str) -> KvResult<Option<String>>;
    fn set_string(&self, key: &str, value: &str) -> KvResult<()>;

    fn get_bytes(&self, key: &str) -> KvResult<Option<Vec<u8>>>;
    fn set_bytes(&self, key: &str, value: &[u8]) -> KvResult<()>;

    fn remove(&self, key: &str) -> KvResult<()>;
}
