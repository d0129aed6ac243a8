// KVStore — Record encoding
//
// `[1-byte tag][payload]`. Numeric payloads use the native byte order,
// text is UTF-8, bytes are copied verbatim. Decoding validates the tag and
// the exact payload length before interpreting anything.

use super::{ScalarType, ScalarValue};

/// Encode a value as a tagged record. Total and deterministic.
pub fn encode(value: &ScalarValue) -> Vec<u8> {
    let tag = value.scalar_type().tag();
    let mut record = Vec::with_capacity(1 + payload_len(value));
    record.push(tag);
    match value {
        ScalarValue::Bool(v) => record.push(u8::from(*v)),
        ScalarValue::Int64(v) => record.extend_from_slice(&v.to_ne_bytes()),
        ScalarValue::UInt64(v) => record.extend_from_slice(&v.to_ne_bytes()),
        ScalarValue::Double(v) => record.extend_from_slice(&v.to_ne_bytes()),
        ScalarValue::Float(v) => record.extend_from_slice(&v.to_ne_bytes()),
        ScalarValue::String(v) => record.extend_from_slice(v.as_bytes()),
        ScalarValue::Bytes(v) => record.extend_from_slice(v),
    }
    record
}

/// Decode a record as `expected`.
///
/// Returns `None` when the record is empty, carries a different tag, has a
/// fixed-width payload of the wrong length, or holds text that is not UTF-8.
pub fn decode(bytes: &[u8], expected: ScalarType) -> Option<ScalarValue> {
    let (&tag, payload) = bytes.split_first()?;
    if tag != expected.tag() {
        return None;
    }
    if let Some(width) = expected.payload_width() {
        if payload.len() != width {
            return None;
        }
    }

    match expected {
        ScalarType::Bool => fixed::<1>(payload).map(|[b]| ScalarValue::Bool(b != 0)),
        ScalarType::Int64 => fixed::<8>(payload).map(|b| ScalarValue::Int64(i64::from_ne_bytes(b))),
        ScalarType::UInt64 => {
            fixed::<8>(payload).map(|b| ScalarValue::UInt64(u64::from_ne_bytes(b)))
        }
        ScalarType::Double => {
            fixed::<8>(payload).map(|b| ScalarValue::Double(f64::from_ne_bytes(b)))
        }
        ScalarType::Float => fixed::<4>(payload).map(|b| ScalarValue::Float(f32::from_ne_bytes(b))),
        ScalarType::String => std::str::from_utf8(payload)
            .ok()
            .map(|s| ScalarValue::String(s.to_owned())),
        ScalarType::Bytes => Some(ScalarValue::Bytes(payload.to_vec())),
    }
}

/// The type named by a record's tag byte, if the tag is known.
/// Diagnostic only: a recognized tag says nothing about payload validity.
pub fn peek_type(bytes: &[u8]) -> Option<ScalarType> {
    bytes.first().copied().and_then(ScalarType::from_tag)
}

fn payload_len(value: &ScalarValue) -> usize {
    match value {
        ScalarValue::String(v) => v.len(),
        ScalarValue::Bytes(v) => v.len(),
        other => other.scalar_type().payload_width().unwrap_or(0),
    }
}

fn fixed<const N: usize>(payload: &[u8]) -> Option<[u8; N]> {
    payload.try_into().ok()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
