// KVStore — Store error types

use serde::Serialize;
use thiserror::Error;

use crate::codec::ScalarType;

/// Failures a store operation can report. Callers branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum KvStoreError {
    /// Reserved: no backend produces this today; both map absence to `Success` with a `None` value.
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// The stored record could not be read as the requested type.
    #[error("Type mismatch for key \"{key}\": expected {expected}")]
    TypeMismatch { key: String, expected: ScalarType },

    /// Reserved for value types a backend cannot hold.
    #[error("Unsupported type: {type_name}")]
    UnsupportedType {
        #[serde(rename = "typeName")]
        type_name: String,
    },

    /// The backend returned something malformed or failed internally.
    #[error("Underlying storage error: {message}")]
    Underlying { message: String },

    /// The backend reported a status code.
    #[error("Backend returned status {status}")]
    BackendStatus { status: i32 },
}

impl KvStoreError {
    pub fn type_mismatch(key: &str, expected: ScalarType) -> Self {
        KvStoreError::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }

    pub fn underlying(message: impl Into<String>) -> Self {
        KvStoreError::Underlying {
            message: message.into(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_uses_kind_tag() {
        let json = serde_json::to_value(KvStoreError::type_mismatch("pin", ScalarType::Float))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "typeMismatch", "key": "pin", "expected": "Float"})
        );

        let json = serde_json::to_value(KvStoreError::BackendStatus { status: -25300 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "backendStatus", "status": -25300}));

        let json = serde_json::to_value(KvStoreError::UnsupportedType {
            type_name: "Date".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"kind": "unsupportedType", "typeName": "Date"}));

        let json = serde_json::to_value(KvStoreError::KeyNotFound {
            key: "k".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"kind": "keyNotFound", "key": "k"}));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            KvStoreError::type_mismatch("pin", ScalarType::Float).to_string(),
            "Type mismatch for key \"pin\": expected Float"
        );
        assert_eq!(
            KvStoreError::underlying("disk full").to_string(),
            "Underlying storage error: disk full"
        );
    }
}
