// KVStore — Secure Backend
//
// Stores values as encoded records in an encrypted blob store, partitioned
// by a namespace (service identifier). The platform keyring is the
// production blob store; it is optional and compiled in with the
// `keyring-store` feature.

mod backend;
mod blob;
mod error;
#[cfg(feature = "keyring-store")]
mod keyring_store;

pub use backend::SecureStore;
pub use blob::{BlobStore, MemoryBlobStore, Removal};
pub use error::{status, BlobError};
#[cfg(feature = "keyring-store")]
pub use keyring_store::KeyringBlobStore;
