// KVStore — Preference store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unknown preference kind \"{kind}\" for key \"{key}\"")]
    UnknownKind { key: String, kind: String },

    #[error("Preference store lock poisoned")]
    Poisoned,
}
