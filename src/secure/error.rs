// KVStore — Blob store error types

use thiserror::Error;

/// Status codes reported by blob stores.
pub mod status {
    /// The platform store is locked or access was refused.
    pub const NO_STORAGE_ACCESS: i32 = 1;
    /// The platform store failed internally.
    pub const PLATFORM_FAILURE: i32 = 2;
    /// An attribute or the payload exceeds a platform limit.
    pub const TOO_LONG: i32 = 3;
    /// An attribute was rejected by the platform.
    pub const INVALID: i32 = 4;
    /// More than one item matched a lookup that expects one.
    pub const AMBIGUOUS: i32 = 5;
    /// An insert collided with an existing item.
    pub const DUPLICATE_ITEM: i32 = 6;
    /// Any failure without a dedicated code.
    pub const UNKNOWN: i32 = 255;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    #[error("Blob store returned status {0}")]
    Status(i32),

    #[error("Blob store returned a malformed item: {0}")]
    Malformed(String),
}
