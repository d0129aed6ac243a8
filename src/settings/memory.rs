// KVStore — In-memory preference store

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Preference, PreferenceError, PreferenceStore};

/// Preferences held in process memory behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, Preference>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_object(&self, key: &str) -> Result<Option<Preference>, PreferenceError> {
        let values = self.values.read().map_err(|_| PreferenceError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set_scalar(&self, key: &str, value: Preference) -> Result<(), PreferenceError> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_object(&self, key: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}
