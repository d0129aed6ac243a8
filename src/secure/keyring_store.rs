// KVStore — Platform keyring blob store
//
// Persists each `(namespace, key)` item as one generic-password entry in
// the platform keyring, with the namespace as the service and the key as
// the account. The keyring crate dispatches to:
//   - Linux: D-Bus Secret Service (GNOME Keyring / KDE Wallet)
//   - macOS: Security.framework Keychain
//   - Windows: Windows Credential Manager

use zeroize::Zeroizing;

use super::blob::{BlobStore, Removal};
use super::error::status;
use super::BlobError;

/// Production blob store backed by the `keyring` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringBlobStore;

impl KeyringBlobStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(namespace: &str, key: &str) -> Result<keyring::Entry, BlobError> {
        keyring::Entry::new(namespace, key).map_err(map_error)
    }
}

/// Map a keyring failure to a blob store error. `NoEntry` is handled by
/// the callers since it is not a failure for any of them.
fn map_error(err: keyring::Error) -> BlobError {
    let code = match &err {
        keyring::Error::BadEncoding(_) => {
            return BlobError::Malformed(format!("keyring item is not valid: {}", err));
        }
        keyring::Error::NoStorageAccess(_) => status::NO_STORAGE_ACCESS,
        keyring::Error::PlatformFailure(_) => status::PLATFORM_FAILURE,
        keyring::Error::TooLong(_, _) => status::TOO_LONG,
        keyring::Error::Invalid(_, _) => status::INVALID,
        keyring::Error::Ambiguous(_) => status::AMBIGUOUS,
        _ => status::UNKNOWN,
    };
    tracing::debug!(status = code, error = %err, "Keyring operation failed");
    BlobError::Status(code)
}

impl BlobStore for KeyringBlobStore {
    fn query_one(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, BlobError> {
        let entry = Self::entry(namespace, key)?;
        match entry.get_secret() {
            Ok(secret) => Ok(Some(Zeroizing::new(secret))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    fn insert(&self, namespace: &str, key: &str, bytes: &[u8]) -> Result<(), BlobError> {
        let entry = Self::entry(namespace, key)?;
        entry.set_secret(bytes).map_err(map_error)
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<Removal, BlobError> {
        let entry = Self::entry(namespace, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(Removal::Deleted),
            Err(keyring::Error::NoEntry) => Ok(Removal::Absent),
            Err(e) => Err(map_error(e)),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
