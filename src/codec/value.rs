// KVStore — Scalar value model
//
// The closed set of value kinds the store supports. `ScalarType` mirrors
// `ScalarValue` without a payload and owns the stable tag table.

use std::fmt;

use serde::Serialize;

/// The seven scalar kinds. Tags are persisted and must never be renumbered;
/// a new layout gets a new tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Bool,
    Int64,
    UInt64,
    Double,
    Float,
    String,
    Bytes,
}

impl ScalarType {
    /// Every scalar type, in tag order.
    pub const ALL: [ScalarType; 7] = [
        ScalarType::Bool,
        ScalarType::Int64,
        ScalarType::UInt64,
        ScalarType::Double,
        ScalarType::Float,
        ScalarType::String,
        ScalarType::Bytes,
    ];

    /// The leading byte of an encoded record of this type.
    pub const fn tag(self) -> u8 {
        match self {
            ScalarType::Bool => 0x01,
            ScalarType::Int64 => 0x02,
            ScalarType::UInt64 => 0x03,
            ScalarType::Double => 0x04,
            ScalarType::Float => 0x05,
            ScalarType::String => 0x06,
            ScalarType::Bytes => 0x07,
        }
    }

    pub const fn from_tag(tag: u8) -> Option<ScalarType> {
        match tag {
            0x01 => Some(ScalarType::Bool),
            0x02 => Some(ScalarType::Int64),
            0x03 => Some(ScalarType::UInt64),
            0x04 => Some(ScalarType::Double),
            0x05 => Some(ScalarType::Float),
            0x06 => Some(ScalarType::String),
            0x07 => Some(ScalarType::Bytes),
            _ => None,
        }
    }

    /// Exact payload width for fixed-width types; `None` for text and bytes,
    /// whose payload is the remainder of the record.
    pub const fn payload_width(self) -> Option<usize> {
        match self {
            ScalarType::Bool => Some(1),
            ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Double => Some(8),
            ScalarType::Float => Some(4),
            ScalarType::String | ScalarType::Bytes => None,
        }
    }

    /// Name used in error reports (`typeMismatch.expected`).
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "Bool",
            ScalarType::Int64 => "Int64",
            ScalarType::UInt64 => "UInt64",
            ScalarType::Double => "Double",
            ScalarType::Float => "Float",
            ScalarType::String => "String",
            ScalarType::Bytes => "Bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single typed value.
///
/// Equality follows IEEE-754 for the float variants (`NaN != NaN`); compare
/// `to_bits()` when bit-exactness matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ScalarValue {
    Bool(bool),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Float(f32),
    String(String),
    Bytes(Vec<u8>),
}

impl ScalarValue {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Bool(_) => ScalarType::Bool,
            ScalarValue::Int64(_) => ScalarType::Int64,
            ScalarValue::UInt64(_) => ScalarType::UInt64,
            ScalarValue::Double(_) => ScalarType::Double,
            ScalarValue::Float(_) => ScalarType::Float,
            ScalarValue::String(_) => ScalarType::String,
            ScalarValue::Bytes(_) => ScalarType::Bytes,
        }
    }
}

/// Renders the value for humans. Bytes are shown as lowercase hex.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(v) => write!(f, "{}", v),
            ScalarValue::Int64(v) => write!(f, "{}", v),
            ScalarValue::UInt64(v) => write!(f, "{}", v),
            ScalarValue::Double(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::String(v) => f.write_str(v),
            ScalarValue::Bytes(v) => f.write_str(&hex::encode(v)),
        }
    }
}

/// Native Rust types that map one-to-one onto a `ScalarType`.
pub(crate) trait Scalar: Sized {
    const TYPE: ScalarType;

    fn into_value(self) -> ScalarValue;

    /// Unwraps the matching variant; `None` for any other variant.
    fn from_value(value: ScalarValue) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const TYPE: ScalarType = ScalarType::$variant;

            fn into_value(self) -> ScalarValue {
                ScalarValue::$variant(self)
            }

            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(i64, Int64);
impl_scalar!(u64, UInt64);
impl_scalar!(f64, Double);
impl_scalar!(f32, Float);
impl_scalar!(String, String);
impl_scalar!(Vec<u8>, Bytes);

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_is_stable() {
        let tags: Vec<u8> = ScalarType::ALL.iter().map(|t| t.tag()).collect();
        assert_eq!(
            tags,
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07],
            "Persisted tags must never be renumbered"
        );
    }

    #[test]
    fn test_from_tag_inverts_tag() {
        for ty in ScalarType::ALL {
            assert_eq!(ScalarType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ScalarType::from_tag(0x00), None);
        assert_eq!(ScalarType::from_tag(0x08), None);
        assert_eq!(ScalarType::from_tag(0xff), None);
    }

    #[test]
    fn test_payload_widths() {
        assert_eq!(ScalarType::Bool.payload_width(), Some(1));
        assert_eq!(ScalarType::Int64.payload_width(), Some(8));
        assert_eq!(ScalarType::UInt64.payload_width(), Some(8));
        assert_eq!(ScalarType::Double.payload_width(), Some(8));
        assert_eq!(ScalarType::Float.payload_width(), Some(4));
        assert_eq!(ScalarType::String.payload_width(), None);
        assert_eq!(ScalarType::Bytes.payload_width(), None);
    }

    #[test]
    fn test_scalar_type_serializes_as_name() {
        let json = serde_json::to_string(&ScalarType::UInt64).unwrap();
        assert_eq!(json, "\"UInt64\"");
    }

    #[test]
    fn test_display_bytes_as_hex() {
        let value = ScalarValue::Bytes(vec![0x00, 0xab, 0x10]);
        assert_eq!(value.to_string(), "00ab10");
    }

    #[test]
    fn test_scalar_from_value_rejects_other_variants() {
        assert_eq!(<i64 as Scalar>::from_value(ScalarValue::Int64(7)), Some(7));
        assert_eq!(<i64 as Scalar>::from_value(ScalarValue::UInt64(7)), None);
        assert_eq!(
            <String as Scalar>::from_value(ScalarValue::Bytes(b"x".to_vec())),
            None
        );
    }
}
