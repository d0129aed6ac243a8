// KVStore — Checkpointed results
//
// Every store operation returns a `CheckpointedResult`: the value or a
// structured error, plus the provenance of the component instance that
// produced it. Provenance is for tracing only and never drives control flow.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the component instance that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Checkpoint {
    pub component: &'static str,
    pub instance: u64,
}

impl Checkpoint {
    /// Allocate a checkpoint for a new component instance.
    /// Instance ids are unique within the process.
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            instance: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.component, self.instance)
    }
}

/// Extras key carrying the error's display string.
pub const EXTRA_UNDERLYING: &str = "underlying";

/// A structured failure: the error, where it came from, and optional
/// diagnostic extras.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo<E> {
    pub error: E,
    pub checkpoint: Checkpoint,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, Value>,
}

impl<E: fmt::Display> ErrorInfo<E> {
    /// Build an error record. The `underlying` extra is always filled from
    /// the error's display form.
    pub fn new(error: E, checkpoint: Checkpoint) -> Self {
        let mut extras = BTreeMap::new();
        extras.insert(EXTRA_UNDERLYING.to_string(), Value::String(error.to_string()));
        Self {
            error,
            checkpoint,
            extras,
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

impl<E: fmt::Display> fmt::Display for ErrorInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.error, self.checkpoint)
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ErrorInfo<E> {}

/// Success with a value, or failure with an `ErrorInfo`. Both carry provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CheckpointedResult<T, E> {
    Success { value: T, checkpoint: Checkpoint },
    Failure(ErrorInfo<E>),
}

impl<T, E> CheckpointedResult<T, E> {
    pub fn success(value: T, checkpoint: Checkpoint) -> Self {
        CheckpointedResult::Success { value, checkpoint }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckpointedResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Provenance of this result, whichever arm it is.
    pub fn checkpoint(&self) -> Checkpoint {
        match self {
            CheckpointedResult::Success { checkpoint, .. } => *checkpoint,
            CheckpointedResult::Failure(info) => info.checkpoint,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            CheckpointedResult::Success { value, .. } => Some(value),
            CheckpointedResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            CheckpointedResult::Success { .. } => None,
            CheckpointedResult::Failure(info) => Some(&info.error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CheckpointedResult<U, E> {
        match self {
            CheckpointedResult::Success { value, checkpoint } => {
                CheckpointedResult::Success {
                    value: f(value),
                    checkpoint,
                }
            }
            CheckpointedResult::Failure(info) => CheckpointedResult::Failure(info),
        }
    }

    /// Drop the success provenance and convert into a plain `Result`, so
    /// callers can use `?`.
    pub fn into_result(self) -> Result<T, ErrorInfo<E>> {
        match self {
            CheckpointedResult::Success { value, .. } => Ok(value),
            CheckpointedResult::Failure(info) => Err(info),
        }
    }
}

impl<T, E> From<ErrorInfo<E>> for CheckpointedResult<T, E> {
    fn from(info: ErrorInfo<E>) -> Self {
        CheckpointedResult::Failure(info)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct TestError(&'static str);

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_checkpoint_instances_are_unique() {
        let a = Checkpoint::new("Component");
        let b = Checkpoint::new("Component");
        assert_ne!(a.instance, b.instance);
        assert_eq!(a.component, b.component);
    }

    #[test]
    fn test_error_info_records_underlying() {
        let info = ErrorInfo::new(TestError("boom"), Checkpoint::new("Component"));
        assert_eq!(
            info.extras.get(EXTRA_UNDERLYING),
            Some(&Value::String("boom".to_string()))
        );
    }

    #[test]
    fn test_result_accessors() {
        let cp = Checkpoint::new("Component");
        let ok: CheckpointedResult<u8, TestError> = CheckpointedResult::success(3, cp);
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(&3));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.checkpoint(), cp);
        assert_eq!(ok.map(|v| v * 2).into_result().unwrap(), 6);

        let err: CheckpointedResult<u8, TestError> =
            ErrorInfo::new(TestError("bad"), cp).into();
        assert!(err.is_failure());
        assert_eq!(err.error(), Some(&TestError("bad")));
        assert_eq!(err.checkpoint(), cp);
        assert!(err.into_result().is_err());
    }

    #[test]
    fn test_result_serialization_is_tagged() {
        let cp = Checkpoint {
            component: "Component",
            instance: 9,
        };
        let ok: CheckpointedResult<Option<i64>, TestError> =
            CheckpointedResult::success(Some(4), cp);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["value"], 4);
        assert_eq!(json["checkpoint"]["component"], "Component");
        assert_eq!(json["checkpoint"]["instance"], 9);
    }

    #[test]
    fn test_results_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CheckpointedResult<Option<String>, TestError>>();
    }
}
