// KVStore — Native preference values
//
// The plaintext store keeps values in their native kinds. Reads are
// permissive: any present value answers a bool/float read, and any numeric
// kind answers an integer read, the way a platform preferences API does.

use std::sync::Arc;

use super::PreferenceError;

/// A value as held by a preference store.
#[derive(Debug, Clone, PartialEq)]
pub enum Preference {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Float(f32),
    Text(String),
    Data(Vec<u8>),
}

impl Preference {
    /// Storage kind name, as persisted by `SqlitePreferences`.
    pub fn kind(&self) -> &'static str {
        match self {
            Preference::Bool(_) => "bool",
            Preference::Int(_) => "int",
            Preference::UInt(_) => "uint",
            Preference::Double(_) => "double",
            Preference::Float(_) => "float",
            Preference::Text(_) => "text",
            Preference::Data(_) => "data",
        }
    }

    /// Numbers are true when non-zero; text is true for `true`, `yes` or
    /// `1` (ASCII case-insensitive); data is false.
    pub fn as_bool(&self) -> bool {
        match self {
            Preference::Bool(v) => *v,
            Preference::Int(v) => *v != 0,
            Preference::UInt(v) => *v != 0,
            Preference::Double(v) => *v != 0.0,
            Preference::Float(v) => *v != 0.0,
            Preference::Text(v) => {
                let v = v.trim();
                v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") || v == "1"
            }
            Preference::Data(_) => false,
        }
    }

    /// Numbers convert with `as`; text is parsed, falling back to `0.0`.
    pub fn as_double(&self) -> f64 {
        match self {
            Preference::Bool(v) => f64::from(u8::from(*v)),
            Preference::Int(v) => *v as f64,
            Preference::UInt(v) => *v as f64,
            Preference::Double(v) => *v,
            Preference::Float(v) => f64::from(*v),
            Preference::Text(v) => v.trim().parse().unwrap_or(0.0),
            Preference::Data(_) => 0.0,
        }
    }

    /// Numbers convert with `as` (rounding to nearest); text is parsed,
    /// falling back to `0.0`.
    pub fn as_float(&self) -> f32 {
        match self {
            Preference::Bool(v) => f32::from(u8::from(*v)),
            Preference::Int(v) => *v as f32,
            Preference::UInt(v) => *v as f32,
            Preference::Double(v) => *v as f32,
            Preference::Float(v) => *v,
            Preference::Text(v) => v.trim().parse().unwrap_or(0.0),
            Preference::Data(_) => 0.0,
        }
    }

    /// Read the numeric box as `i64`. `None` for text and data.
    ///
    /// Unsigned values are reinterpreted bitwise (values above `i64::MAX`
    /// wrap negative). Floats truncate toward zero and saturate; NaN is 0.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Preference::Bool(v) => Some(i64::from(*v)),
            Preference::Int(v) => Some(*v),
            Preference::UInt(v) => Some(*v as i64),
            Preference::Double(v) => Some(*v as i64),
            Preference::Float(v) => Some(*v as i64),
            Preference::Text(_) | Preference::Data(_) => None,
        }
    }

    /// Read the numeric box as `u64`. `None` for text and data.
    ///
    /// Signed values are reinterpreted bitwise (`-1` becomes `u64::MAX`).
    /// Floats truncate toward zero and saturate; negatives and NaN are 0.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Preference::Bool(v) => Some(u64::from(*v)),
            Preference::Int(v) => Some(*v as u64),
            Preference::UInt(v) => Some(*v),
            Preference::Double(v) => Some(*v as u64),
            Preference::Float(v) => Some(*v as u64),
            Preference::Text(_) | Preference::Data(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Preference::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<Vec<u8>> {
        match self {
            Preference::Data(v) => Some(v),
            _ => None,
        }
    }
}

/// A plaintext preference store. Implementations must be safe to use from
/// several threads without outside locking.
pub trait PreferenceStore: Send + Sync {
    fn get_object(&self, key: &str) -> Result<Option<Preference>, PreferenceError>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set_scalar(&self, key: &str, value: Preference) -> Result<(), PreferenceError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_object(&self, key: &str) -> Result<(), PreferenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn get_object(&self, key: &str) -> Result<Option<Preference>, PreferenceError> {
        (**self).get_object(key)
    }

    fn set_scalar(&self, key: &str, value: Preference) -> Result<(), PreferenceError> {
        (**self).set_scalar(key, value)
    }

    fn remove_object(&self, key: &str) -> Result<(), PreferenceError> {
        (**self).remove_object(key)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
