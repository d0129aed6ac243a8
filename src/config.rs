// KVStore — Configuration
//
// Chooses the backend at configuration time. The secure backend needs the
// platform keyring, which is only compiled in with the `keyring-store`
// feature; without it, asking for the secure backend is an error rather
// than a silent fallback.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::Result;
use crate::settings::{SettingsStore, SqlitePreferences};
use crate::store::KvStore;

/// Default namespace (keyring service) for the secure backend.
pub const DEFAULT_NAMESPACE: &str = "kvstore";

/// File name of the settings database inside the data directory.
const PREFERENCES_FILE: &str = "preferences.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Plaintext SQLite preferences.
    Settings,
    /// Encrypted platform keyring.
    Secure,
}

impl BackendKind {
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Settings => true,
            BackendKind::Secure => cfg!(feature = "keyring-store"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: BackendKind,
    /// Partitions keys in the secure backend. Ignored by the settings backend.
    pub namespace: String,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Settings,
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl StoreConfig {
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE)
    }
}

/// `<platform data dir>/kvstore`, or `./kvstore` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("kvstore")
}

/// Open the configured backend.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn KvStore>> {
    match config.backend {
        BackendKind::Settings => {
            std::fs::create_dir_all(&config.data_dir)?;
            let prefs = SqlitePreferences::open(&config.preferences_path())?;
            tracing::debug!(path = %config.preferences_path().display(), "Opened settings store");
            Ok(Box::new(SettingsStore::new(prefs)))
        }
        BackendKind::Secure => open_secure(config),
    }
}

#[cfg(feature = "keyring-store")]
fn open_secure(config: &StoreConfig) -> Result<Box<dyn KvStore>> {
    use crate::secure::{KeyringBlobStore, SecureStore};

    tracing::debug!(namespace = %config.namespace, "Opened secure store");
    Ok(Box::new(SecureStore::new(
        config.namespace.clone(),
        KeyringBlobStore::new(),
    )))
}

#[cfg(not(feature = "keyring-store"))]
fn open_secure(_config: &StoreConfig) -> Result<Box<dyn KvStore>> {
    Err(crate::error::AppError::BackendUnavailable("secure"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, BackendKind::Settings);
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(config.data_dir.ends_with("kvstore"));
        assert!(config.preferences_path().ends_with("kvstore/preferences.db"));
    }

    #[test]
    fn test_open_settings_store_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: dir.path().join("nested").join("data"),
            ..StoreConfig::default()
        };

        let store = open_store(&config).unwrap();
        assert!(store.set_string("theme", "dark").is_success());
        assert!(config.preferences_path().exists());

        drop(store);
        let reopened = open_store(&config).unwrap();
        assert_eq!(
            reopened.get_string("theme").value(),
            Some(&Some("dark".to_string()))
        );
    }

    #[test]
    fn test_secure_availability_follows_feature() {
        assert!(BackendKind::Settings.is_available());
        assert_eq!(
            BackendKind::Secure.is_available(),
            cfg!(feature = "keyring-store")
        );
    }

    #[cfg(not(feature = "keyring-store"))]
    #[test]
    fn test_secure_backend_unavailable_without_keyring() {
        use crate::error::AppError;

        let config = StoreConfig {
            backend: BackendKind::Secure,
            ..StoreConfig::default()
        };
        assert!(matches!(
            open_store(&config),
            Err(AppError::BackendUnavailable("secure"))
        ));
    }
}
