// KVStore — Store Module
//
// The contract both backends implement and the error taxonomy they report.
// Absence of a key is a successful read of `None`, never an error.

mod contract;
mod error;

pub use contract::{KvResult, KvStore};
pub use error::KvStoreError;
