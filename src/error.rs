// KVStore — Top-level error types
//
// Aggregates errors from the backends, configuration and CLI into a single
// error enum for the application boundary. Store operations themselves
// never return this type; they return `KvResult`.

use thiserror::Error;

use crate::checkpoint::ErrorInfo;
use crate::settings::PreferenceError;
use crate::store::KvStoreError;

/// Top-level error type for the binary and for opening stores.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Preference store error: {0}")]
    Preference(#[from] PreferenceError),

    #[error("Store error: {0}")]
    Store(#[from] ErrorInfo<KvStoreError>),

    #[error("The {0} backend is not available in this build")]
    BackendUnavailable(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
