// KVStore — SQLite preference store
//
// Persists preferences in a plain (unencrypted) SQLite file, one row per
// key. The `kind` column records the native kind so reads return exactly
// what was written. Floating-point values are stored as their IEEE-754 bit
// pattern in an INTEGER column, since SQLite turns NaN into NULL.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use super::{Preference, PreferenceError, PreferenceStore};

/// Preference store backed by a SQLite database.
/// The connection is serialized behind a mutex so the store can be shared.
pub struct SqlitePreferences {
    conn: Mutex<Connection>,
}

impl SqlitePreferences {
    /// Open (or create) the preference database at `path`.
    pub fn open(path: &Path) -> Result<Self, PreferenceError> {
        let conn = Connection::open(path)?;
        let prefs = Self {
            conn: Mutex::new(conn),
        };
        prefs.run_migrations()?;
        tracing::debug!(path = %path.display(), "Preference database opened");
        Ok(prefs)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, PreferenceError> {
        let conn = Connection::open_in_memory()?;
        let prefs = Self {
            conn: Mutex::new(conn),
        };
        prefs.run_migrations()?;
        Ok(prefs)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, PreferenceError> {
        self.conn.lock().map_err(|_| PreferenceError::Poisoned)
    }

    fn run_migrations(&self) -> Result<(), PreferenceError> {
        self.conn()?.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS preferences (
                key     TEXT PRIMARY KEY,
                kind    TEXT NOT NULL,
                value
            );
            ",
        )?;
        Ok(())
    }

    fn to_column(value: Preference) -> (&'static str, Value) {
        let kind = value.kind();
        let column = match value {
            Preference::Bool(v) => Value::Integer(i64::from(v)),
            Preference::Int(v) => Value::Integer(v),
            Preference::UInt(v) => Value::Integer(v as i64),
            Preference::Double(v) => Value::Integer(v.to_bits() as i64),
            Preference::Float(v) => Value::Integer(i64::from(v.to_bits())),
            Preference::Text(v) => Value::Text(v),
            Preference::Data(v) => Value::Blob(v),
        };
        (kind, column)
    }

    fn from_column(key: &str, kind: String, column: Value) -> Result<Preference, PreferenceError> {
        match (kind.as_str(), column) {
            ("bool", Value::Integer(v)) => Ok(Preference::Bool(v != 0)),
            ("int", Value::Integer(v)) => Ok(Preference::Int(v)),
            ("uint", Value::Integer(v)) => Ok(Preference::UInt(v as u64)),
            ("double", Value::Integer(bits)) => Ok(Preference::Double(f64::from_bits(bits as u64))),
            ("float", Value::Integer(bits)) => Ok(Preference::Float(f32::from_bits(bits as u32))),
            ("text", Value::Text(v)) => Ok(Preference::Text(v)),
            ("data", Value::Blob(v)) => Ok(Preference::Data(v)),
            _ => Err(PreferenceError::UnknownKind {
                key: key.to_string(),
                kind,
            }),
        }
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get_object(&self, key: &str) -> Result<Option<Preference>, PreferenceError> {
        let row = self
            .conn()?
            .query_row(
                "SELECT kind, value FROM preferences WHERE key = ?1",
                params![key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?)),
            )
            .optional()?;

        match row {
            Some((kind, column)) => Self::from_column(key, kind, column).map(Some),
            None => Ok(None),
        }
    }

    fn set_scalar(&self, key: &str, value: Preference) -> Result<(), PreferenceError> {
        let (kind, column) = Self::to_column(value);
        self.conn()?.execute(
            "INSERT OR REPLACE INTO preferences (key, kind, value) VALUES (?1, ?2, ?3)",
            params![key, kind, column],
        )?;
        Ok(())
    }

    fn remove_object(&self, key: &str) -> Result<(), PreferenceError> {
        self.conn()?
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
