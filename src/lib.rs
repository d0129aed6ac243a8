// KVStore — Library root
//
// Typed key-value access over two backends: a fast plaintext settings store
// and an encrypted secure store. Re-exports the codec, result model, store
// contract, backends, configuration, and CLI modules.

pub mod checkpoint;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod secure;
pub mod settings;
pub mod store;

pub use checkpoint::{Checkpoint, CheckpointedResult, ErrorInfo};
pub use codec::{ScalarType, ScalarValue};
pub use config::{open_store, BackendKind, StoreConfig};
pub use error::{AppError, Result};
pub use store::{KvResult, KvStore, KvStoreError};
