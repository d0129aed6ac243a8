// KVStore — Settings Backend
//
// Fast, unencrypted store for non-sensitive configuration and flags. Values
// are kept in their native kinds; no codec is involved. Numeric reads
// coerce across widths and signedness.

mod backend;
mod error;
mod memory;
mod preference;
mod sqlite;

pub use backend::SettingsStore;
pub use error::PreferenceError;
pub use memory::MemoryPreferences;
pub use preference::{Preference, PreferenceStore};
pub use sqlite::SqlitePreferences;
