// KVStore — Settings Store
//
// `KvStore` over a plaintext preference store. Writes overwrite without
// reading first. Reads are permissive where the stores are: integer reads
// coerce any numeric kind, bool and floating reads accept any present
// value. Text and bytes reads return `None` for other kinds. This differs
// from `SecureStore`, which rejects any tag other than the requested one.

use crate::checkpoint::{Checkpoint, CheckpointedResult, ErrorInfo};
use crate::store::{KvResult, KvStore, KvStoreError};

use super::{Preference, PreferenceError, PreferenceStore};

const COMPONENT: &str = "SettingsStore";

/// Fast store for non-sensitive configuration and flags.
pub struct SettingsStore<P> {
    prefs: P,
    checkpoint: Checkpoint,
}

impl<P: PreferenceStore> SettingsStore<P> {
    pub fn new(prefs: P) -> Self {
        Self {
            prefs,
            checkpoint: Checkpoint::new(COMPONENT),
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    fn failure<T>(&self, err: PreferenceError) -> KvResult<T> {
        ErrorInfo::new(KvStoreError::underlying(err.to_string()), self.checkpoint).into()
    }

    fn read<T>(
        &self,
        key: &str,
        convert: impl FnOnce(Preference) -> Option<T>,
    ) -> KvResult<Option<T>> {
        match self.prefs.get_object(key) {
            Ok(Some(pref)) => {
                tracing::debug!(key, kind = pref.kind(), "Settings read");
                CheckpointedResult::success(convert(pref), self.checkpoint)
            }
            Ok(None) => CheckpointedResult::success(None, self.checkpoint),
            Err(e) => self.failure(e),
        }
    }

    fn write(&self, key: &str, value: Preference) -> KvResult<()> {
        tracing::debug!(key, kind = value.kind(), "Settings write");
        match self.prefs.set_scalar(key, value) {
            Ok(()) => CheckpointedResult::success((), self.checkpoint),
            Err(e) => self.failure(e),
        }
    }
}

impl<P: PreferenceStore> KvStore for SettingsStore<P> {
    fn get_bool(&self, key: &str) -> KvResult<Option<bool>> {
        self.read(key, |p| Some(p.as_bool()))
    }

    fn set_bool(&self, key: &str, value: bool) -> KvResult<()> {
        self.write(key, Preference::Bool(value))
    }

    fn get_int64(&self, key: &str) -> KvResult<Option<i64>> {
        self.read(key, |p| p.as_i64())
    }

    fn set_int64(&self, key: &str, value: i64) -> KvResult<()> {
        self.write(key, Preference::Int(value))
    }

    fn get_uint64(&self, key: &str) -> KvResult<Option<u64>> {
        self.read(key, |p| p.as_u64())
    }

    fn set_uint64(&self, key: &str, value: u64) -> KvResult<()> {
        self.write(key, Preference::UInt(value))
    }

    fn get_double(&self, key: &str) -> KvResult<Option<f64>> {
        self.read(key, |p| Some(p.as_double()))
    }

    fn set_double(&self, key: &str, value: f64) -> KvResult<()> {
        self.write(key, Preference::Double(value))
    }

    fn get_float(&self, key: &str) -> KvResult<Option<f32>> {
        self.read(key, |p| Some(p.as_float()))
    }

    fn set_float(&self, key: &str, value: f32) -> KvResult<()> {
        self.write(key, Preference::Float(value))
    }

    fn get_string(&self, key: &str) -> KvResult<Option<String>> {
        self.read(key, Preference::into_text)
    }

    fn set_string(&self, key: &str, value: &str) -> KvResult<()> {
        self.write(key, Preference::Text(value.to_string()))
    }

    fn get_bytes(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        self.read(key, Preference::into_data)
    }

    fn set_bytes(&self, key: &str, value: &[u8]) -> KvResult<()> {
        self.write(key, Preference::Data(value.to_vec()))
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        tracing::debug!(key, "Settings remove");
        match self.prefs.remove_object(key) {
            Ok(()) => CheckpointedResult::success((), self.checkpoint),
            Err(e) => self.failure(e),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryPreferences, SqlitePreferences};

    fn stores() -> Vec<Box<dyn KvStore>> {
        vec![
            Box::new(SettingsStore::new(MemoryPreferences::new())),
            Box::new(SettingsStore::new(SqlitePreferences::open_in_memory().unwrap())),
        ]
    }

    fn value<T>(result: KvResult<Option<T>>) -> Option<T> {
        match result {
            CheckpointedResult::Success { value, .. } => value,
            CheckpointedResult::Failure(info) => panic!("Expected success, got {}", info),
        }
    }

    #[test]
    fn test_round_trip_every_type() {
        for store in stores() {
            assert!(store.set_bool("b", true).is_success());
            assert_eq!(value(store.get_bool("b")), Some(true));

            assert!(store.set_int64("i", i64::MIN).is_success());
            assert_eq!(value(store.get_int64("i")), Some(i64::MIN));

            assert!(store.set_uint64("u", u64::MAX).is_success());
            assert_eq!(value(store.get_uint64("u")), Some(u64::MAX));

            assert!(store.set_double("d", f64::MAX).is_success());
            assert_eq!(value(store.get_double("d")).map(f64::to_bits), Some(f64::MAX.to_bits()));

            assert!(store.set_float("f", -1.5e-7).is_success());
            assert_eq!(
                value(store.get_float("f")).map(f32::to_bits),
                Some((-1.5e-7f32).to_bits())
            );

            assert!(store.set_string("s", "hello, wörld").is_success());
            assert_eq!(value(store.get_string("s")), Some("hello, wörld".to_string()));

            assert!(store.set_bytes("x", &[0xde, 0xad]).is_success());
            assert_eq!(value(store.get_bytes("x")), Some(vec![0xde, 0xad]));
        }
    }

    #[test]
    fn test_missing_key_is_success_none() {
        for store in stores() {
            assert_eq!(value(store.get_bool("nope")), None);
            assert_eq!(value(store.get_int64("nope")), None);
            assert_eq!(value(store.get_uint64("nope")), None);
            assert_eq!(value(store.get_double("nope")), None);
            assert_eq!(value(store.get_float("nope")), None);
            assert_eq!(value(store.get_string("nope")), None);
            assert_eq!(value(store.get_bytes("nope")), None);
        }
    }

    #[test]
    fn test_flag_scenario() {
        for store in stores() {
            assert!(store.set_bool("flag", true).is_success());
            assert!(store.remove("flag").is_success());
            assert_eq!(value(store.get_bool("flag")), None);
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        for store in stores() {
            assert!(store.remove("never-set").is_success());
            assert!(store.set_int64("k", 1).is_success());
            assert!(store.remove("k").is_success());
            assert!(store.remove("k").is_success());
        }
    }

    #[test]
    fn test_int64_is_readable_as_other_numeric_types() {
        for store in stores() {
            assert!(store.set_int64("n", 42).is_success());
            assert_eq!(value(store.get_uint64("n")), Some(42));
            assert_eq!(value(store.get_double("n")), Some(42.0));
            assert_eq!(value(store.get_float("n")), Some(42.0));
            assert_eq!(value(store.get_bool("n")), Some(true));

            // Negative values reinterpret bitwise when read unsigned.
            assert!(store.set_int64("neg", -1).is_success());
            assert_eq!(value(store.get_uint64("neg")), Some(u64::MAX));
            assert_eq!(value(store.get_double("neg")), Some(-1.0));

            // Large magnitudes round to the nearest representable float.
            assert!(store.set_int64("big", i64::MAX).is_success());
            assert_eq!(value(store.get_double("big")), Some(i64::MAX as f64));
        }
    }

    #[test]
    fn test_uint64_above_i64_max_wraps_when_read_signed() {
        for store in stores() {
            assert!(store.set_uint64("u", u64::MAX).is_success());
            assert_eq!(value(store.get_int64("u")), Some(-1));
            assert!(store.set_uint64("u", 1 << 63).is_success());
            assert_eq!(value(store.get_int64("u")), Some(i64::MIN));
        }
    }

    #[test]
    fn test_double_truncates_when_read_as_integer() {
        for store in stores() {
            assert!(store.set_double("d", -7.9).is_success());
            assert_eq!(value(store.get_int64("d")), Some(-7));
            assert_eq!(value(store.get_uint64("d")), Some(0));
        }
    }

    #[test]
    fn test_text_and_bytes_reads_are_kind_strict() {
        for store in stores() {
            assert!(store.set_int64("n", 5).is_success());
            assert_eq!(value(store.get_string("n")), None);
            assert_eq!(value(store.get_bytes("n")), None);

            assert!(store.set_string("s", "12").is_success());
            assert_eq!(value(store.get_int64("s")), None, "Text is not a numeric box");
            assert_eq!(value(store.get_bytes("s")), None);
            assert_eq!(value(store.get_double("s")), Some(12.0));

            assert!(store.set_bytes("b", b"bytes").is_success());
            assert_eq!(value(store.get_string("b")), None);
        }
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        for store in stores() {
            assert!(store.set_string("Theme", "dark").is_success());
            assert_eq!(value(store.get_string("theme")), None);
        }
    }

    #[test]
    fn test_results_carry_store_checkpoint() {
        let store = SettingsStore::new(MemoryPreferences::new());
        assert_eq!(store.checkpoint().component, "SettingsStore");
        assert_eq!(store.set_bool("k", true).checkpoint(), store.checkpoint());
        assert_eq!(store.get_bool("k").checkpoint(), store.checkpoint());
        assert_eq!(store.remove("k").checkpoint(), store.checkpoint());
    }

    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn get_object(&self, _key: &str) -> Result<Option<Preference>, PreferenceError> {
            Err(PreferenceError::Poisoned)
        }

        fn set_scalar(&self, _key: &str, _value: Preference) -> Result<(), PreferenceError> {
            Err(PreferenceError::Poisoned)
        }

        fn remove_object(&self, _key: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Poisoned)
        }
    }

    #[test]
    fn test_store_failures_map_to_underlying() {
        let store = SettingsStore::new(BrokenPreferences);
        let expected = KvStoreError::underlying("Preference store lock poisoned");

        assert_eq!(store.get_int64("k").error(), Some(&expected));
        assert_eq!(store.set_string("k", "v").error(), Some(&expected));
        assert_eq!(store.remove("k").error(), Some(&expected));
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;

        let store = Arc::new(SettingsStore::new(MemoryPreferences::new()));
        let handles: Vec<_> = (0..4u64)
            .map(|n| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("t{}-{}", n, i);
                        assert!(store.set_uint64(&key, i).is_success());
                        assert_eq!(value(store.get_uint64(&key)), Some(i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
